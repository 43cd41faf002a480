//! Morphological analyzer seam.
//!
//! Real deployments plug in a full analyzer; [`StaticLexicon`] is a word
//! list keyed by upper-cased surface form, loadable from configuration and
//! enough for tests and small fixed vocabularies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::morph::{Gender, MorphClass, MorphInfo, Number};

/// Assigns morphological facts to a surface word.
pub trait MorphAnalyzer {
    fn analyze(&self, word: &str) -> Option<MorphInfo>;
}

/// One configured lexicon row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    pub morph: MorphInfo,
}

/// A fixed word → morphology table.
#[derive(Debug, Clone, Default)]
pub struct StaticLexicon {
    entries: HashMap<String, MorphInfo>,
}

impl StaticLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: &[LexiconEntry]) -> Self {
        let mut lexicon = Self::new();
        for entry in entries {
            lexicon.insert(&entry.word, entry.morph.clone());
        }
        lexicon
    }

    pub fn insert(&mut self, word: &str, mut morph: MorphInfo) {
        morph.lemma = morph.lemma.map(|lemma| lemma.to_uppercase());
        self.entries.insert(word.to_uppercase(), morph);
    }

    /// Builder-style insert.
    pub fn with(mut self, word: &str, morph: MorphInfo) -> Self {
        self.insert(word, morph);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A small vocabulary of function words every geo text needs:
    /// prepositions and conjunctions.
    pub fn function_words() -> Self {
        let mut lexicon = Self::new();
        for prep in [
            "В", "ВО", "НА", "У", "ОКОЛО", "ВБЛИЗИ", "НЕДАЛЕКО", "НЕПОДАЛЕКУ", "ОТ", "С", "СО",
            "ИЗ", "ПО", "ДО", "ЗА", "ПОД", "НАД", "ПРИ", "К",
        ] {
            lexicon.insert(prep, MorphInfo::new(MorphClass::PREPOSITION));
        }
        for conj in ["И", "ИЛИ", "А", "НО", "ЛИБО"] {
            lexicon.insert(conj, MorphInfo::new(MorphClass::CONJUNCTION));
        }
        lexicon
    }

    /// Convenience for tests and fixtures: an adjective with gender.
    pub fn adjective(lemma: &str, gender: Gender) -> MorphInfo {
        MorphInfo::new(MorphClass::ADJECTIVE)
            .with_gender(gender)
            .with_number(Number::SINGULAR)
            .with_lemma(lemma)
    }

    /// Convenience for tests and fixtures: a noun with gender.
    pub fn noun(lemma: &str, gender: Gender) -> MorphInfo {
        MorphInfo::new(MorphClass::NOUN)
            .with_gender(gender)
            .with_number(Number::SINGULAR)
            .with_lemma(lemma)
    }
}

impl MorphAnalyzer for StaticLexicon {
    fn analyze(&self, word: &str) -> Option<MorphInfo> {
        self.entries.get(&word.to_uppercase()).cloned()
    }
}
