//! The annotated token stream the geo core walks over.
//!
//! Tokenization and morphology belong to upstream collaborators. A
//! [`TokenLine`] is their output as far as this crate is concerned: an
//! ordered run of [`GeoToken`]s with whitespace metrics, morphological
//! facts, an optional attached [`GeoTokenData`] tag and an optional
//! reference to an already materialized entity.
//!
//! [`TokenLine::from_text`] is a small word-boundary tokenizer for hosts
//! that have no tokenizer of their own, and for tests.

mod display;
mod span;
mod tag;

pub use display::TokenLineDisplay;
pub use span::SpanRef;
pub use tag::{CityItem, CityItemKind, GeoTokenData, StreetItem, StreetItemKind, TerrItem};

use bitflags::bitflags;
use unicode_segmentation::UnicodeSegmentation;

use crate::entity::RecognizedEntity;
use crate::lexicon::MorphAnalyzer;
use crate::morph::MorphInfo;

bitflags! {
    /// Character-class facts about a token's text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CharClass: u8 {
        const LETTER = 1 << 0;
        const DIGIT = 1 << 1;
        const ALL_UPPER = 1 << 2;
        const ALL_LOWER = 1 << 3;
        const CAPITALIZED = 1 << 4;
        const PUNCT = 1 << 5;
    }
}

impl CharClass {
    pub fn of(text: &str) -> Self {
        let mut class = CharClass::empty();
        let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
        if !letters.is_empty() {
            class |= CharClass::LETTER;
            if letters.iter().all(|c| !c.is_lowercase()) {
                class |= CharClass::ALL_UPPER;
            } else if letters.iter().all(|c| !c.is_uppercase()) {
                class |= CharClass::ALL_LOWER;
            } else if letters[0].is_uppercase() && letters[1..].iter().all(|c| !c.is_uppercase())
            {
                class |= CharClass::CAPITALIZED;
            }
        }
        if !text.is_empty() && text.chars().all(|c| c.is_numeric()) {
            class |= CharClass::DIGIT;
        }
        if !text.is_empty() && !text.chars().any(|c| c.is_alphanumeric()) {
            class |= CharClass::PUNCT;
        }
        class
    }
}

/// One token of the stream.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoToken {
    text: String,
    term: String,
    pub chars: CharClass,
    pub morph: MorphInfo,
    /// Whitespace characters (newlines included) between this token and the previous one
    pub whitespace_before: usize,
    pub whitespace_after: usize,
    pub newlines_before: usize,
    pub newlines_after: usize,
    /// Attached recognition data, written by recognizers
    pub tag: Option<GeoTokenData>,
    /// A materialized entity covering this position
    pub entity: Option<RecognizedEntity>,
}

impl GeoToken {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            term: text.to_uppercase(),
            chars: CharClass::of(text),
            morph: MorphInfo::default(),
            whitespace_before: 0,
            whitespace_after: 0,
            newlines_before: 0,
            newlines_after: 0,
            tag: None,
            entity: None,
        }
    }

    pub fn with_morph(mut self, morph: MorphInfo) -> Self {
        self.morph = morph;
        self
    }

    /// Literal text as it appeared in the input.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Upper-cased text, the form dictionaries are keyed by.
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn lemma(&self) -> Option<&str> {
        self.morph.lemma.as_deref()
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Matches either the surface term or the lemma.
    pub fn is_value(&self, word: &str) -> bool {
        self.term == word || self.lemma() == Some(word)
    }

    pub fn is_char(&self, ch: char) -> bool {
        let mut chars = self.text.chars();
        chars.next() == Some(ch) && chars.next().is_none()
    }

    pub fn is_char_of(&self, set: &str) -> bool {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => set.contains(c),
            _ => false,
        }
    }

    pub fn is_comma(&self) -> bool {
        self.is_char(',')
    }

    pub fn is_hyphen(&self) -> bool {
        self.is_char_of("-\u{2010}\u{2011}\u{2012}\u{2013}\u{2014}")
    }

    /// Generic "and" connectors.
    pub fn is_and(&self) -> bool {
        matches!(self.term.as_str(), "И" | "AND" | "ТА" | "Й" | "&")
    }

    pub fn is_letters(&self) -> bool {
        self.chars.contains(CharClass::LETTER)
    }

    pub fn is_all_upper(&self) -> bool {
        self.chars.contains(CharClass::ALL_UPPER)
    }

    pub fn is_all_lower(&self) -> bool {
        self.chars.contains(CharClass::ALL_LOWER)
    }

    pub fn is_number(&self) -> bool {
        self.chars.contains(CharClass::DIGIT)
    }

    pub fn is_newline_before(&self) -> bool {
        self.newlines_before > 0
    }

    pub fn is_newline_after(&self) -> bool {
        self.newlines_after > 0
    }
}

/// Word-boundary segmentation keeps "г.Москва" and "Н.П" together; split
/// periods out of lettered segments so abbreviations see their delimiter.
fn split_periods(segment: &str) -> Vec<&str> {
    if !segment.contains('.') || !segment.chars().any(char::is_alphabetic) {
        return vec![segment];
    }
    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, _) in segment.match_indices('.') {
        if i > start {
            pieces.push(&segment[start..i]);
        }
        pieces.push(&segment[i..i + 1]);
        start = i + 1;
    }
    if start < segment.len() {
        pieces.push(&segment[start..]);
    }
    pieces
}

/// An ordered, index-linked run of tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenLine {
    tokens: Vec<GeoToken>,
}

impl TokenLine {
    /// Build a line from already prepared tokens; whitespace fields are
    /// taken as given.
    pub fn from_tokens(tokens: Vec<GeoToken>) -> Self {
        Self { tokens }
    }

    /// Tokenize on Unicode word boundaries without morphology.
    pub fn from_text(text: &str) -> Self {
        Self::tokenize(text, None)
    }

    /// Tokenize and ask `analyzer` for each word's morphology.
    pub fn from_text_with(text: &str, analyzer: &dyn MorphAnalyzer) -> Self {
        Self::tokenize(text, Some(analyzer))
    }

    fn tokenize(text: &str, analyzer: Option<&dyn MorphAnalyzer>) -> Self {
        let mut tokens: Vec<GeoToken> = Vec::new();
        let mut pending_ws = 0;
        let mut pending_nl = 0;

        for segment in text.split_word_bounds() {
            if segment.chars().all(char::is_whitespace) {
                pending_ws += segment.chars().count();
                pending_nl += segment.chars().filter(|&c| c == '\n').count();
                continue;
            }

            for piece in split_periods(segment) {
                let mut token = GeoToken::new(piece);
                if let Some(morph) = analyzer.and_then(|a| a.analyze(piece)) {
                    token.morph = morph;
                }
                token.whitespace_before = pending_ws;
                token.newlines_before = pending_nl;
                if let Some(prev) = tokens.last_mut() {
                    prev.whitespace_after = pending_ws;
                    prev.newlines_after = pending_nl;
                }
                pending_ws = 0;
                pending_nl = 0;
                tokens.push(token);
            }
        }

        if let Some(last) = tokens.last_mut() {
            last.whitespace_after = pending_ws;
            last.newlines_after = pending_nl;
        }

        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&GeoToken> {
        self.tokens.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut GeoToken> {
        self.tokens.get_mut(idx)
    }

    pub fn tokens(&self) -> &[GeoToken] {
        &self.tokens
    }

    pub fn prev(&self, idx: usize) -> Option<usize> {
        if idx == 0 || idx > self.tokens.len() {
            None
        } else {
            Some(idx - 1)
        }
    }

    pub fn next(&self, idx: usize) -> Option<usize> {
        if idx + 1 < self.tokens.len() {
            Some(idx + 1)
        } else {
            None
        }
    }

    /// Index of the first token whose term equals `word`.
    pub fn position_of(&self, word: &str) -> Option<usize> {
        let word = word.to_uppercase();
        self.tokens.iter().position(|t| t.term() == word)
    }

    pub fn tag(&self, idx: usize) -> Option<&GeoTokenData> {
        self.tokens.get(idx).and_then(|t| t.tag.as_ref())
    }

    /// Mutable access to the attached tag, created empty on first write.
    pub fn tag_mut(&mut self, idx: usize) -> Option<&mut GeoTokenData> {
        self.tokens
            .get_mut(idx)
            .map(|t| t.tag.get_or_insert_with(GeoTokenData::default))
    }

    pub fn set_morph(&mut self, idx: usize, morph: MorphInfo) {
        if let Some(token) = self.tokens.get_mut(idx) {
            token.morph = morph;
        }
    }

    /// Mark every token of `span` as covered by `entity`.
    pub fn attach_entity(&mut self, span: SpanRef, entity: RecognizedEntity) {
        for idx in span.start_idx..=span.end_idx {
            if let Some(token) = self.tokens.get_mut(idx) {
                token.entity = Some(entity);
            }
        }
    }

    /// The inclusive span of the entity covering `idx`, if any.
    pub fn entity_span(&self, idx: usize) -> Option<(SpanRef, RecognizedEntity)> {
        let entity = self.tokens.get(idx)?.entity?;
        let mut start = idx;
        while start > 0 && self.tokens[start - 1].entity == Some(entity) {
            start -= 1;
        }
        let mut end = idx;
        while end + 1 < self.tokens.len() && self.tokens[end + 1].entity == Some(entity) {
            end += 1;
        }
        Some((SpanRef::new(start, end), entity))
    }

    /// Joined literal text of `begin..=end`, single-spaced.
    pub fn text_of(&self, begin: usize, end: usize) -> String {
        let mut out = String::new();
        for (i, token) in self.tokens.iter().enumerate().take(end + 1).skip(begin) {
            if i > begin && token.whitespace_before > 0 {
                out.push(' ');
            }
            out.push_str(token.text());
        }
        out
    }
}
