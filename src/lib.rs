#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Geographic context and name normalization over annotated token streams.
//!
//! Tokenization and morphology happen upstream; this crate takes their
//! output as a [`TokenLine`] and answers the questions a place recognizer
//! keeps asking: is this keyword a territory, is there a residency verb or a
//! known place nearby, what are the full forms of "Н." in "Н. Валуево",
//! which spelling of "Подгорное" should lead.
//!
//! ## Building blocks
//!
//! - [`TermCollection`] - dictionary of [`Term`]s with variants and
//!   abbreviations, longest match at a token position
//! - [`GeoDictionaries`] - the curated territory, residency, proximity,
//!   settlement, compass and region dictionaries
//! - [`ContextScanner`] - bounded walks deciding whether a position is
//!   geographically anchored, plus [`GeoCondition`]
//! - [`name_variants`] - full forms of abbreviated adjectives
//! - [`GeoRegistry`] and [`on_register`] - canonical [`GeoEntity`] records,
//!   reordered and re-gendered names, merging of repeated mentions
//! - [`RegimeState`] - per-document phase depths guarding against
//!   re-entrant recognition
//! - [`GeoSession`] - one document's worth of the above
//!
//! ## Example
//!
//! ```
//! use layered_geo::{GeoSession, MorphClass, MorphInfo, StaticLexicon, TokenLine};
//!
//! let lexicon = StaticLexicon::function_words().with(
//!     "проживает",
//!     MorphInfo::new(MorphClass::VERB).with_lemma("проживать"),
//! );
//! let line = TokenLine::from_text_with("проживает в Московской области", &lexicon);
//!
//! let session = GeoSession::shared().unwrap();
//! assert!(session.scanner().check_geo_object_before(&line, 1, false));
//! ```

mod config;
mod dictionaries;
mod entity;
mod errors;
mod lexicon;
mod morph;
mod noun_phrase;
mod regime;
mod registrar;
mod scanner;
mod session;
mod termin;
mod token_line;

pub mod name_variants;

pub use config::{GeoConfig, TermSpec, UserParams};
pub use dictionaries::GeoDictionaries;
pub use entity::{
    EntityId, EntityKind, GeoClass, GeoEntity, GeoRegistry, RecognizedEntity,
};
pub use errors::{GeoError, GeoResult, RegimeError, TermError};
pub use lexicon::{LexiconEntry, MorphAnalyzer, StaticLexicon};
pub use morph::{Gender, MorphClass, MorphInfo, Number};
pub use noun_phrase::NounPhrase;
pub use regime::{Phase, PhaseGuard, RegimeState};
pub use registrar::{infer_gender, on_register};
pub use scanner::{ContextScanner, GeoCondition};
pub use session::GeoSession;
pub use termin::{MatchMode, Term, TermCollection, TermMatch};
pub use token_line::{
    CharClass, CityItem, CityItemKind, GeoToken, GeoTokenData, SpanRef, StreetItem,
    StreetItemKind, TerrItem, TokenLine, TokenLineDisplay,
};

/// Parse a noun phrase (adjectives + head) starting at `idx`.
pub fn try_parse_noun_phrase(line: &TokenLine, idx: usize) -> Option<NounPhrase> {
    noun_phrase::try_parse(line, idx)
}

#[cfg(test)]
mod tests {
    mod address_context;
    mod config_session;
    mod registration;
}
