//! Terminology matching over the token stream.
//!
//! A [`Term`] is one dictionary entry: canonical text plus spelling
//! variants and abbreviations ("ТЕРРИТОРИЯ" / "ТЕРР" / "ТЕР."). A
//! [`TermCollection`] finds the longest term starting at a token position.
//!
//! Matching works on tokens, not raw substrings, so multi-word terms
//! ("В ГРАНИЦАХ") match across token boundaries. Each term word matches a
//! token by upper-cased surface text or by lemma, so "ПРОЖИВАТЬ" matches
//! "проживает" when the analyzer supplied the lemma.
//!
//! # Example
//!
//! ```
//! use layered_geo::{MatchMode, Term, TermCollection, TokenLine};
//!
//! let mut terms = TermCollection::new();
//! terms
//!     .add(Term::new("ТЕРРИТОРИЯ").with_variant("ТЕРР").with_abbreviation("ТЕР."))
//!     .unwrap();
//!
//! let line = TokenLine::from_text("тер. СНТ Рассвет");
//! let found = terms.try_match(&line, 0, MatchMode::Normal).unwrap();
//! assert_eq!(found.canonical(), "ТЕРРИТОРИЯ");
//! assert_eq!(found.end, 1);
//! ```

use std::collections::HashMap;

use crate::errors::TermError;
use crate::token_line::{GeoToken, TokenLine};

/// How strictly abbreviations are credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Variants and abbreviations are all eligible.
    #[default]
    Normal,
    /// Abbreviations count only when their delimiters are literally present.
    FullWordsOnly,
}

/// One dictionary entry before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    canonical: String,
    variants: Vec<String>,
    abbreviations: Vec<String>,
}

impl Term {
    pub fn new(canonical: &str) -> Self {
        Self {
            canonical: normalize(canonical),
            variants: Vec::new(),
            abbreviations: Vec::new(),
        }
    }

    /// Add an alternative full spelling.
    pub fn with_variant(mut self, variant: &str) -> Self {
        self.variants.push(normalize(variant));
        self
    }

    /// Add an abbreviated form such as "ТЕР." or "УЧ-К". Parsed when the
    /// term is added to a collection.
    pub fn with_abbreviation(mut self, abbreviation: &str) -> Self {
        self.abbreviations.push(abbreviation.trim().to_uppercase());
        self
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Letter run of an abbreviation and whether a delimiter follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AbbrPart {
    text: String,
    has_delim: bool,
}

/// A parsed abbreviation: "Н.П." is two delimited parts, "УЧ-К" a part
/// with a hyphen tail.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Abbreviation {
    parts: Vec<AbbrPart>,
    tail: Option<String>,
}

const ABBR_DELIMS: &[char] = &['.', '/', '-'];

impl Abbreviation {
    fn parse(canonical: &str, source: &str) -> Result<Self, TermError> {
        let malformed = |reason: &'static str| TermError::MalformedAbbreviation {
            canonical: canonical.to_string(),
            abbreviation: source.to_string(),
            reason,
        };

        let chars: Vec<char> = source.chars().collect();
        let lead = chars.iter().take_while(|c| c.is_alphabetic()).count();
        if lead == 0 {
            return Err(malformed("must start with a letter"));
        }

        let mut parts = vec![AbbrPart {
            text: chars[..lead].iter().collect(),
            has_delim: false,
        }];
        let mut tail = None;

        if lead + 1 < chars.len() && chars[lead] == '-' {
            let rest: String = chars[lead + 1..].iter().collect();
            if !rest.chars().all(char::is_alphabetic) {
                return Err(malformed("hyphen tail must be letters only"));
            }
            tail = Some(rest);
        } else {
            let mut i = lead;
            while i < chars.len() {
                let c = chars[i];
                if c.is_alphabetic() {
                    let run = chars[i..].iter().take_while(|c| c.is_alphabetic()).count();
                    parts.push(AbbrPart {
                        text: chars[i..i + run].iter().collect(),
                        has_delim: false,
                    });
                    i += run;
                } else if c.is_whitespace() {
                    i += 1;
                } else if ABBR_DELIMS.contains(&c) {
                    match parts.last_mut() {
                        Some(last) if !last.has_delim => last.has_delim = true,
                        _ => return Err(malformed("delimiter without a preceding letter run")),
                    }
                    i += 1;
                } else {
                    return Err(malformed("unsupported delimiter"));
                }
            }
        }

        Ok(Self { parts, tail })
    }

    fn first_key(&self) -> &str {
        &self.parts[0].text
    }

    /// Try to attach at `idx`; returns the inclusive end token.
    fn match_at(&self, line: &TokenLine, idx: usize, mode: MatchMode) -> Option<usize> {
        let mut cur = idx;
        let mut end = idx;

        for (k, part) in self.parts.iter().enumerate() {
            let token = line.get(cur)?;
            if k > 0 && token.is_newline_before() {
                return None;
            }
            if token.term() != part.text {
                return None;
            }
            end = cur;

            if let Some(tail) = &self.tail {
                let hyphen = line.get(cur + 1)?;
                let last = line.get(cur + 2)?;
                if hyphen.is_hyphen()
                    && hyphen.whitespace_before < 2
                    && last.whitespace_before < 2
                    && last.term() == tail
                {
                    return Some(cur + 2);
                }
                return None;
            }

            if !part.has_delim {
                cur += 1;
                continue;
            }

            match line.get(cur + 1) {
                Some(delim) if is_delim_token(delim) && delim.whitespace_before == 0 => {
                    end = cur + 1;
                    cur += 2;
                }
                _ => {
                    // delimiter absent: only a final bare part may stand alone
                    let is_last = k + 1 == self.parts.len();
                    if !is_last || mode == MatchMode::FullWordsOnly {
                        return None;
                    }
                    if part.text.chars().count() == 1
                        && (token.morph.is_preposition() || token.morph.is_conjunction())
                    {
                        return None;
                    }
                    return Some(cur);
                }
            }
        }

        Some(end)
    }
}

fn is_delim_token(token: &GeoToken) -> bool {
    token.is_char('.') || token.is_char('/')
}

/// A successful match: the term and the inclusive token range it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermMatch<'a> {
    pub term: &'a Term,
    pub begin: usize,
    pub end: usize,
}

impl<'a> TermMatch<'a> {
    pub fn canonical(&self) -> &'a str {
        self.term.canonical()
    }

    pub fn token_count(&self) -> usize {
        self.end - self.begin + 1
    }
}

#[derive(Debug, Clone)]
struct Entry {
    term: Term,
    /// Canonical text and variants, each as a token-term sequence
    forms: Vec<Vec<String>>,
    abbreviations: Vec<Abbreviation>,
}

impl Entry {
    fn compile(term: Term) -> Result<Self, TermError> {
        let mut forms = Vec::new();
        for text in std::iter::once(&term.canonical).chain(term.variants.iter()) {
            let words: Vec<String> = TokenLine::from_text(text)
                .tokens()
                .iter()
                .map(|t| t.term().to_string())
                .collect();
            if words.is_empty() {
                return Err(TermError::Empty);
            }
            forms.push(words);
        }
        let abbreviations = term
            .abbreviations
            .iter()
            .map(|a| Abbreviation::parse(&term.canonical, a))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            term,
            forms,
            abbreviations,
        })
    }

    fn match_at(&self, line: &TokenLine, idx: usize, mode: MatchMode) -> Option<usize> {
        let mut best: Option<usize> = None;
        for form in &self.forms {
            if let Some(end) = match_words(line, idx, form) {
                best = Some(best.map_or(end, |b| b.max(end)));
            }
        }
        for abbr in &self.abbreviations {
            if let Some(end) = abbr.match_at(line, idx, mode) {
                best = Some(best.map_or(end, |b| b.max(end)));
            }
        }
        best
    }
}

fn match_words(line: &TokenLine, idx: usize, words: &[String]) -> Option<usize> {
    for (k, word) in words.iter().enumerate() {
        let token = line.get(idx + k)?;
        if k > 0 && token.is_newline_before() {
            return None;
        }
        if !token.is_value(word) {
            return None;
        }
    }
    Some(idx + words.len() - 1)
}

/// A set of terms with longest-match lookup.
///
/// Built once and read-only afterwards; share it by reference.
#[derive(Debug, Clone, Default)]
pub struct TermCollection {
    entries: Vec<Entry>,
    /// First token key (term or lemma) → entry indices in registration order
    index: HashMap<String, Vec<usize>>,
}

impl TermCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from plain canonical words.
    pub fn from_words(words: &[&str]) -> Result<Self, TermError> {
        let mut collection = Self::new();
        for word in words {
            collection.add(Term::new(word))?;
        }
        Ok(collection)
    }

    /// Add a term. Canonical text must be unique and every abbreviation
    /// must parse.
    pub fn add(&mut self, term: Term) -> Result<(), TermError> {
        if term.canonical.is_empty() {
            return Err(TermError::Empty);
        }
        if self.find(&term.canonical).is_some() {
            return Err(TermError::DuplicateCanonical {
                canonical: term.canonical,
            });
        }

        let entry = Entry::compile(term)?;
        let slot = self.entries.len();
        let mut keys: Vec<String> = entry.forms.iter().map(|f| f[0].clone()).collect();
        keys.extend(entry.abbreviations.iter().map(|a| a.first_key().to_string()));
        keys.sort();
        keys.dedup();
        for key in keys {
            self.index.entry(key).or_default().push(slot);
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look a term up by canonical text (case-insensitive).
    pub fn find(&self, canonical: &str) -> Option<&Term> {
        let wanted = normalize(canonical);
        self.entries
            .iter()
            .map(|e| &e.term)
            .find(|t| t.canonical == wanted)
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.entries.iter().map(|e| &e.term)
    }

    /// Longest term starting at `idx`; equal lengths go to the term
    /// registered first. Pure query: the line is not touched.
    pub fn try_match<'a>(
        &'a self,
        line: &TokenLine,
        idx: usize,
        mode: MatchMode,
    ) -> Option<TermMatch<'a>> {
        let token = line.get(idx)?;

        let mut candidates: Vec<usize> = Vec::new();
        let keys = std::iter::once(token.term()).chain(token.lemma());
        for key in keys {
            if let Some(slots) = self.index.get(key) {
                candidates.extend(slots.iter().copied());
            }
        }
        candidates.sort_unstable();
        candidates.dedup();

        let mut best: Option<TermMatch<'a>> = None;
        for slot in candidates {
            let entry = &self.entries[slot];
            if let Some(end) = entry.match_at(line, idx, mode) {
                let longer = best.map_or(true, |b| end > b.end);
                if longer {
                    best = Some(TermMatch {
                        term: &entry.term,
                        begin: idx,
                        end,
                    });
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{MorphAnalyzer, StaticLexicon};
    use crate::morph::{MorphClass, MorphInfo};

    fn territories() -> TermCollection {
        let mut terms = TermCollection::new();
        terms
            .add(
                Term::new("ТЕРРИТОРИЯ")
                    .with_variant("ТЕР")
                    .with_variant("ТЕРР")
                    .with_abbreviation("ТЕР.")
                    .with_abbreviation("ТЕРР."),
            )
            .unwrap();
        terms.add(Term::new("ГРАНИЦА")).unwrap();
        terms.add(Term::new("В ГРАНИЦАХ")).unwrap();
        terms
            .add(
                Term::new("УЧАСТОК")
                    .with_abbreviation("УЧ.")
                    .with_abbreviation("УЧ-К"),
            )
            .unwrap();
        terms
    }

    #[test]
    fn matches_canonical_case_insensitively() {
        let terms = territories();
        let line = TokenLine::from_text("Территория завода");
        let m = terms.try_match(&line, 0, MatchMode::Normal).unwrap();
        assert_eq!(m.canonical(), "ТЕРРИТОРИЯ");
        assert_eq!((m.begin, m.end), (0, 0));
    }

    #[test]
    fn variant_resolves_to_canonical() {
        let terms = territories();
        let line = TokenLine::from_text("терр Рассвет");
        let m = terms.try_match(&line, 0, MatchMode::Normal).unwrap();
        assert_eq!(m.canonical(), "ТЕРРИТОРИЯ");
    }

    #[test]
    fn abbreviation_consumes_period() {
        let terms = territories();
        let line = TokenLine::from_text("тер. Рассвет");
        let m = terms.try_match(&line, 0, MatchMode::FullWordsOnly).unwrap();
        assert_eq!(m.canonical(), "ТЕРРИТОРИЯ");
        assert_eq!(m.end, 1);
    }

    #[test]
    fn hyphen_tail_abbreviation() {
        let terms = territories();
        let line = TokenLine::from_text("уч-к 5");
        let m = terms.try_match(&line, 0, MatchMode::Normal).unwrap();
        assert_eq!(m.canonical(), "УЧАСТОК");
        assert_eq!(m.end, 2);
    }

    #[test]
    fn bare_abbreviation_only_in_normal_mode() {
        let terms = territories();
        let line = TokenLine::from_text("уч 5");
        assert_eq!(
            terms
                .try_match(&line, 0, MatchMode::Normal)
                .map(|m| m.canonical()),
            Some("УЧАСТОК")
        );
        assert!(terms.try_match(&line, 0, MatchMode::FullWordsOnly).is_none());
    }

    #[test]
    fn multi_word_term_spans_tokens() {
        let terms = territories();
        let line = TokenLine::from_text("в границах поселка");
        let m = terms.try_match(&line, 0, MatchMode::Normal).unwrap();
        assert_eq!(m.canonical(), "В ГРАНИЦАХ");
        assert_eq!(m.token_count(), 2);
    }

    #[test]
    fn longest_match_wins() {
        let mut terms = TermCollection::new();
        terms.add(Term::new("A")).unwrap();
        terms.add(Term::new("A B")).unwrap();
        let line = TokenLine::from_text("a b c");
        let m = terms.try_match(&line, 0, MatchMode::Normal).unwrap();
        assert_eq!(m.canonical(), "A B");
    }

    #[test]
    fn equal_length_tie_goes_to_first_registered() {
        let mut terms = TermCollection::new();
        terms.add(Term::new("ОКРУГ").with_variant("ОКР")).unwrap();
        terms.add(Term::new("ОКРАИНА").with_variant("ОКР")).unwrap();
        let line = TokenLine::from_text("окр Центральный");
        let m = terms.try_match(&line, 0, MatchMode::Normal).unwrap();
        assert_eq!(m.canonical(), "ОКРУГ");
    }

    #[test]
    fn terms_do_not_cross_newlines() {
        let terms = territories();
        let line = TokenLine::from_text("в\nграницах");
        assert!(terms.try_match(&line, 0, MatchMode::Normal).is_none());
    }

    #[test]
    fn lemma_matches_inflected_token() {
        let terms = TermCollection::from_words(&["ПРОЖИВАТЬ"]).unwrap();
        let lexicon = StaticLexicon::new().with(
            "проживает",
            MorphInfo::new(MorphClass::VERB).with_lemma("проживать"),
        );
        let line = TokenLine::from_text_with("проживает в Москве", &lexicon);
        assert!(lexicon.analyze("ПРОЖИВАЕТ").is_some());
        let m = terms.try_match(&line, 0, MatchMode::Normal).unwrap();
        assert_eq!(m.canonical(), "ПРОЖИВАТЬ");
    }

    #[test]
    fn single_letter_bare_abbreviation_skips_prepositions() {
        let mut terms = TermCollection::new();
        terms
            .add(Term::new("СЕЛО").with_abbreviation("С."))
            .unwrap();
        let lexicon = StaticLexicon::function_words();
        let line = TokenLine::from_text_with("с Ивановым", &lexicon);
        assert!(terms.try_match(&line, 0, MatchMode::Normal).is_none());

        let line = TokenLine::from_text_with("с. Ивановка", &lexicon);
        assert_eq!(
            terms
                .try_match(&line, 0, MatchMode::Normal)
                .map(|m| m.end),
            Some(1)
        );
    }

    #[test]
    fn no_match_is_none() {
        let terms = territories();
        let line = TokenLine::from_text("Москва");
        assert!(terms.try_match(&line, 0, MatchMode::Normal).is_none());
        assert!(terms.try_match(&line, 5, MatchMode::Normal).is_none());
    }

    #[test]
    fn duplicate_canonical_is_rejected() {
        let mut terms = territories();
        let err = terms.add(Term::new("граница")).unwrap_err();
        assert_eq!(
            err,
            TermError::DuplicateCanonical {
                canonical: "ГРАНИЦА".to_string()
            }
        );
    }

    #[test]
    fn malformed_abbreviations_are_rejected() {
        let mut terms = TermCollection::new();
        let err = terms
            .add(Term::new("ТЕРРИТОРИЯ").with_abbreviation(".ТЕР"))
            .unwrap_err();
        assert!(matches!(err, TermError::MalformedAbbreviation { .. }));

        let err = terms
            .add(Term::new("ОБЛАСТЬ").with_abbreviation("ОБЛ!"))
            .unwrap_err();
        assert!(matches!(
            err,
            TermError::MalformedAbbreviation {
                reason: "unsupported delimiter",
                ..
            }
        ));
        assert!(terms.is_empty());
    }

    #[test]
    fn empty_term_is_rejected() {
        let mut terms = TermCollection::new();
        assert_eq!(terms.add(Term::new("   ")), Err(TermError::Empty));
    }

    #[test]
    fn multi_part_abbreviation() {
        let mut terms = TermCollection::new();
        terms
            .add(Term::new("НАСЕЛЕННЫЙ ПУНКТ").with_abbreviation("Н.П."))
            .unwrap();
        let line = TokenLine::from_text("н. п. Озерный");
        let m = terms.try_match(&line, 0, MatchMode::FullWordsOnly).unwrap();
        assert_eq!(m.canonical(), "НАСЕЛЕННЫЙ ПУНКТ");
        assert_eq!(m.end, 3);

        let line = TokenLine::from_text("н п Озерный");
        assert!(terms.try_match(&line, 0, MatchMode::Normal).is_none());
    }
}
