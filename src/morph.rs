//! Morphological facts attached to tokens.
//!
//! These are produced by an external morphological analyzer (see
//! [`MorphAnalyzer`](crate::MorphAnalyzer)); this crate only reads them.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Grammatical gender. Several bits may be set when the analyzer could
    /// not decide.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Gender: u8 {
        const MASCULINE = 1 << 0;
        const FEMININE = 1 << 1;
        const NEUTER = 1 << 2;
    }
}

bitflags! {
    /// Grammatical number.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Number: u8 {
        const SINGULAR = 1 << 0;
        const PLURAL = 1 << 1;
    }
}

bitflags! {
    /// Part-of-speech and lexical class bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct MorphClass: u16 {
        const NOUN = 1 << 0;
        const ADJECTIVE = 1 << 1;
        const VERB = 1 << 2;
        const PREPOSITION = 1 << 3;
        const CONJUNCTION = 1 << 4;
        const PRONOUN = 1 << 5;
        const PROPER = 1 << 6;
        const PROPER_GEO = 1 << 7;
        const PROPER_SURNAME = 1 << 8;
    }
}

impl Gender {
    /// The three singular genders in the order the inflection tables use.
    pub const ALL: [Gender; 3] = [Gender::FEMININE, Gender::MASCULINE, Gender::NEUTER];

    pub fn is_undefined(self) -> bool {
        self.is_empty()
    }
}

impl MorphClass {
    pub fn is_undefined(self) -> bool {
        self.is_empty()
    }
}

/// Morphological information for one token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphInfo {
    #[serde(default)]
    pub class: MorphClass,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub number: Number,
    /// Normal (dictionary) form, upper-cased.
    #[serde(default)]
    pub lemma: Option<String>,
}

impl MorphInfo {
    pub fn new(class: MorphClass) -> Self {
        Self {
            class,
            ..Self::default()
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_number(mut self, number: Number) -> Self {
        self.number = number;
        self
    }

    pub fn with_lemma(mut self, lemma: &str) -> Self {
        self.lemma = Some(lemma.to_uppercase());
        self
    }

    pub fn is_preposition(&self) -> bool {
        self.class.contains(MorphClass::PREPOSITION)
    }

    pub fn is_conjunction(&self) -> bool {
        self.class.contains(MorphClass::CONJUNCTION)
    }

    pub fn is_adjective(&self) -> bool {
        self.class.contains(MorphClass::ADJECTIVE)
    }

    pub fn is_noun(&self) -> bool {
        self.class.contains(MorphClass::NOUN)
    }
}
