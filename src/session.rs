//! Per-document state.

use crate::config::{GeoConfig, UserParams};
use crate::dictionaries::GeoDictionaries;
use crate::entity::{EntityId, GeoEntity, GeoRegistry};
use crate::errors::TermError;
use crate::regime::{Phase, PhaseGuard, RegimeState};
use crate::scanner::{ContextScanner, GeoCondition};
use crate::token_line::TokenLine;

/// Everything one analysis pass over one document needs: read-only
/// dictionaries shared with other sessions, the user parameters, and the
/// mutable phase and entity state owned by this session alone.
///
/// ```
/// use layered_geo::{GeoSession, TokenLine};
///
/// let session = GeoSession::shared().unwrap();
/// let line = TokenLine::from_text("РФ, Москва");
/// assert!(session.scanner().check_geo_object_before(&line, 2, true));
/// ```
#[derive(Debug, Clone)]
pub struct GeoSession<'d> {
    dictionaries: &'d GeoDictionaries,
    params: UserParams,
    regime: RegimeState,
    registry: GeoRegistry,
}

impl<'d> GeoSession<'d> {
    pub fn new(dictionaries: &'d GeoDictionaries) -> Self {
        Self {
            dictionaries,
            params: UserParams::default(),
            regime: RegimeState::new(),
            registry: GeoRegistry::new(),
        }
    }

    pub fn with_params(mut self, params: UserParams) -> Self {
        self.params = params;
        self
    }

    /// Session over dictionaries built from `config`, with its parameters.
    /// The caller owns the dictionaries so that several sessions can share
    /// them.
    pub fn from_config(dictionaries: &'d GeoDictionaries, config: &GeoConfig) -> Self {
        Self::new(dictionaries).with_params(config.params())
    }

    pub fn dictionaries(&self) -> &'d GeoDictionaries {
        self.dictionaries
    }

    pub fn params(&self) -> &UserParams {
        &self.params
    }

    pub fn regime(&self) -> &RegimeState {
        &self.regime
    }

    pub fn regime_mut(&mut self) -> &mut RegimeState {
        &mut self.regime
    }

    pub fn registry(&self) -> &GeoRegistry {
        &self.registry
    }

    pub fn scanner(&self) -> ContextScanner<'_> {
        ContextScanner::new(self.dictionaries, &self.params)
    }

    /// Enter `phase` unless it is already nested `max_depth` times.
    pub fn try_enter(&mut self, phase: Phase, max_depth: u32) -> Option<PhaseGuard<'_>> {
        self.regime.try_guard(phase, max_depth)
    }

    pub fn check(&self, condition: &GeoCondition, line: &TokenLine) -> bool {
        condition.check(&self.scanner(), line)
    }

    /// Finalize and store a recognized place.
    pub fn register(&mut self, entity: GeoEntity) -> EntityId {
        self.registry.register(entity)
    }

    /// Drop all per-document state; dictionaries and parameters stay.
    pub fn reset(&mut self) {
        self.regime.reset();
        self.registry = GeoRegistry::new();
    }
}

impl GeoSession<'static> {
    /// Session over the process-wide default dictionaries.
    pub fn shared() -> Result<Self, TermError> {
        Ok(Self::new(GeoDictionaries::shared()?))
    }
}
