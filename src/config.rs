//! Session configuration.
//!
//! Everything is optional; an empty RON struct `()` is a valid config.
//!
//! ```
//! use layered_geo::GeoConfig;
//!
//! let config = GeoConfig::from_ron_str(r#"(
//!     user_params: ["ADDRESS"],
//!     extra_unknown_regions: ["ЗАУРАЛЬЕ"],
//! )"#).unwrap();
//! assert!(config.params().is_address());
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::GeoResult;
use crate::lexicon::{LexiconEntry, StaticLexicon};
use crate::termin::Term;

/// Configured dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSpec {
    pub canonical: String,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub abbreviations: Vec<String>,
}

impl TermSpec {
    pub fn to_term(&self) -> Term {
        let mut term = Term::new(&self.canonical);
        for variant in &self.variants {
            term = term.with_variant(variant);
        }
        for abbreviation in &self.abbreviations {
            term = term.with_abbreviation(abbreviation);
        }
        term
    }
}

/// Top-level configuration for a geo session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoConfig {
    /// Mode strings such as `"ADDRESS"` or `"GARADDRESS"`
    #[serde(default)]
    pub user_params: Vec<String>,
    /// Names of regions whose administrative type cannot be read from context
    #[serde(default)]
    pub extra_unknown_regions: Vec<String>,
    /// Additional residency/registration words that precede a place
    #[serde(default)]
    pub extra_geo_before: Vec<String>,
    #[serde(default)]
    pub extra_territories: Vec<TermSpec>,
    #[serde(default)]
    pub lexicon: Vec<LexiconEntry>,
}

impl GeoConfig {
    pub fn from_ron_str(s: &str) -> GeoResult<Self> {
        Ok(ron::from_str(s)?)
    }

    pub fn params(&self) -> UserParams {
        UserParams::new(self.user_params.iter().map(String::as_str))
    }

    pub fn lexicon(&self) -> StaticLexicon {
        StaticLexicon::from_entries(&self.lexicon)
    }
}

/// Mode strings that gate a few permissive heuristics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserParams {
    modes: BTreeSet<String>,
}

impl UserParams {
    pub const ADDRESS: &'static str = "ADDRESS";
    pub const GAR_ADDRESS: &'static str = "GARADDRESS";

    pub fn new<'a>(modes: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            modes: modes.into_iter().map(|m| m.trim().to_uppercase()).collect(),
        }
    }

    pub fn contains(&self, mode: &str) -> bool {
        self.modes.contains(&mode.to_uppercase())
    }

    /// Postal-address parsing mode (plain or GAR).
    pub fn is_address(&self) -> bool {
        self.contains(Self::ADDRESS) || self.contains(Self::GAR_ADDRESS)
    }

    pub fn is_gar_address(&self) -> bool {
        self.contains(Self::GAR_ADDRESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GeoError;

    #[test]
    fn empty_config() {
        let config = GeoConfig::from_ron_str("()").unwrap();
        assert_eq!(config, GeoConfig::default());
        assert!(!config.params().is_address());
    }

    #[test]
    fn gar_address_implies_address() {
        let params = UserParams::new(["garaddress"]);
        assert!(params.is_address());
        assert!(params.is_gar_address());
    }

    #[test]
    fn territory_spec_becomes_term() {
        let config = GeoConfig::from_ron_str(
            r#"(
                extra_territories: [
                    (canonical: "промзона", variants: ["промышленная зона"], abbreviations: ["п/з"]),
                ],
            )"#,
        )
        .unwrap();
        let term = config.extra_territories[0].to_term();
        assert_eq!(term.canonical(), "ПРОМЗОНА");
        assert_eq!(term.variants(), &["ПРОМЫШЛЕННАЯ ЗОНА".to_string()]);
    }

    #[test]
    fn lexicon_rows_are_loaded() {
        let config = GeoConfig::from_ron_str(
            r#"(
                lexicon: [
                    (word: "проживает", morph: (class: "VERB", lemma: Some("ПРОЖИВАТЬ"))),
                ],
            )"#,
        )
        .unwrap();
        assert_eq!(config.lexicon().len(), 1);
    }

    #[test]
    fn syntax_errors_surface_as_config_errors() {
        let err = GeoConfig::from_ron_str("(user_params: [").unwrap_err();
        assert!(matches!(err, GeoError::Config(_)));
    }
}
