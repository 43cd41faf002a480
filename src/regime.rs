//! Which recognition phases are running for the current document.
//!
//! Each [`Phase`] has a nesting depth. A phase is active iff its depth is
//! above zero, so there is no separate flag to fall out of sync. Recognizers
//! that can recurse into their own phase take a guard first:
//!
//! ```
//! use layered_geo::{Phase, RegimeState};
//!
//! let mut regime = RegimeState::new();
//! {
//!     let mut city = regime.guard(Phase::City);
//!     assert!(city.is_active(Phase::City));
//!     // a nested city parse is refused
//!     assert!(city.try_guard(Phase::City, 1).is_none());
//! }
//! assert!(!regime.is_active(Phase::City));
//! ```

use std::ops::{Deref, DerefMut};

use crate::errors::RegimeError;

/// A recognition strategy that can be nested but must not re-enter itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A whole-span pass running every strategy at once
    All,
    Territory,
    City,
    Organization,
    /// Organization-type words read as territory nouns
    OrgType,
    Street,
    Address,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::All,
        Phase::Territory,
        Phase::City,
        Phase::Organization,
        Phase::OrgType,
        Phase::Street,
        Phase::Address,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Per-document phase depths plus the side-validation flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegimeState {
    depths: [u32; Phase::ALL.len()],
    /// Set while a recognizer runs only to validate a candidate, not to
    /// extract it.
    pub checking: bool,
}

impl RegimeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, phase: Phase) {
        self.depths[phase.index()] += 1;
    }

    /// Leave `phase`. Leaving a phase that is not active leaves the depth at
    /// zero and reports the mismatch.
    pub fn exit(&mut self, phase: Phase) -> Result<(), RegimeError> {
        let depth = &mut self.depths[phase.index()];
        if *depth == 0 {
            tracing::warn!(?phase, "regime exit without matching enter");
            return Err(RegimeError::NotActive(phase));
        }
        *depth -= 1;
        Ok(())
    }

    pub fn is_active(&self, phase: Phase) -> bool {
        self.depth(phase) > 0
    }

    pub fn depth(&self, phase: Phase) -> u32 {
        self.depths[phase.index()]
    }

    /// Clear all phases, as at the start of a new document.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Enter `phase` for the lifetime of the returned guard.
    pub fn guard(&mut self, phase: Phase) -> PhaseGuard<'_> {
        self.enter(phase);
        PhaseGuard { state: self, phase }
    }

    /// Like [`guard`](Self::guard) but refuses when `phase` is already
    /// nested `max_depth` times.
    pub fn try_guard(&mut self, phase: Phase, max_depth: u32) -> Option<PhaseGuard<'_>> {
        if self.depth(phase) >= max_depth {
            tracing::trace!(?phase, max_depth, "phase re-entry refused");
            return None;
        }
        Some(self.guard(phase))
    }
}

/// Exits its phase on drop. Derefs to the state so nested guards can be
/// taken through it.
#[derive(Debug)]
pub struct PhaseGuard<'a> {
    state: &'a mut RegimeState,
    phase: Phase,
}

impl PhaseGuard<'_> {
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

impl Deref for PhaseGuard<'_> {
    type Target = RegimeState;

    fn deref(&self) -> &RegimeState {
        self.state
    }
}

impl DerefMut for PhaseGuard<'_> {
    fn deref_mut(&mut self) -> &mut RegimeState {
        self.state
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        // a reset inside the guard already cleared the depth; exit logs it
        let _ = self.state.exit(self.phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_exit_restores() {
        let mut regime = RegimeState::new();
        regime.enter(Phase::Territory);
        assert!(regime.is_active(Phase::Territory));
        regime.exit(Phase::Territory).unwrap();
        assert!(!regime.is_active(Phase::Territory));
        assert_eq!(regime.depth(Phase::Territory), 0);
    }

    #[test]
    fn nested_enter_stays_active_after_inner_exit() {
        let mut regime = RegimeState::new();
        regime.enter(Phase::City);
        regime.enter(Phase::City);
        regime.exit(Phase::City).unwrap();
        assert!(regime.is_active(Phase::City));
        assert_eq!(regime.depth(Phase::City), 1);
    }

    #[test]
    fn exit_at_zero_is_clamped_and_reported() {
        let mut regime = RegimeState::new();
        assert_eq!(
            regime.exit(Phase::Street),
            Err(RegimeError::NotActive(Phase::Street))
        );
        assert_eq!(regime.depth(Phase::Street), 0);
        regime.enter(Phase::Street);
        assert!(regime.is_active(Phase::Street));
    }

    #[test]
    fn phases_are_independent() {
        let mut regime = RegimeState::new();
        regime.enter(Phase::OrgType);
        for phase in Phase::ALL {
            assert_eq!(regime.is_active(phase), phase == Phase::OrgType);
        }
    }

    #[test]
    fn guards_nest_and_unwind() {
        let mut regime = RegimeState::new();
        {
            let mut outer = regime.guard(Phase::Address);
            {
                let inner = outer.guard(Phase::Street);
                assert!(inner.is_active(Phase::Address));
                assert!(inner.is_active(Phase::Street));
                assert_eq!(inner.phase(), Phase::Street);
            }
            assert!(!outer.is_active(Phase::Street));
        }
        assert_eq!(regime, RegimeState::new());
    }

    #[test]
    fn try_guard_respects_depth_limit() {
        let mut regime = RegimeState::new();
        let mut first = regime.try_guard(Phase::Territory, 2).unwrap();
        let mut second = first.try_guard(Phase::Territory, 2).unwrap();
        assert!(second.try_guard(Phase::Territory, 2).is_none());
        assert_eq!(second.depth(Phase::Territory), 2);
    }

    #[test]
    fn reset_clears_everything() {
        let mut regime = RegimeState::new();
        regime.enter(Phase::All);
        regime.checking = true;
        regime.reset();
        assert_eq!(regime, RegimeState::new());
    }
}
