//! Minimal noun-phrase recognizer: a run of adjectives and a head noun.
//!
//! Good enough for "бывших колхозных земель" and "Дальний Восток". It does
//! not check agreement; morphology comes from the analyzer as-is.

use crate::token_line::{GeoToken, TokenLine};

/// Inclusive token range of a phrase and the position of its head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NounPhrase {
    pub begin: usize,
    pub end: usize,
    pub adjectives: Vec<usize>,
}

impl NounPhrase {
    pub fn head(&self) -> usize {
        self.end
    }
}

/// A word the analyzer knows nothing about can still head a phrase:
/// capitalized region names are often missing from small lexicons.
fn can_head(token: &GeoToken) -> bool {
    if token.morph.is_noun() {
        return true;
    }
    token.morph.class.is_undefined() && token.is_letters()
}

fn is_modifier(token: &GeoToken) -> bool {
    token.morph.is_adjective() && !token.morph.is_noun()
}

/// Parse a phrase starting exactly at `idx`.
pub fn try_parse(line: &TokenLine, idx: usize) -> Option<NounPhrase> {
    let mut adjectives = Vec::new();
    let mut cur = idx;
    loop {
        let token = line.get(cur)?;
        if cur > idx && token.is_newline_before() {
            return None;
        }
        if is_modifier(token) {
            adjectives.push(cur);
            cur += 1;
            continue;
        }
        if can_head(token) {
            return Some(NounPhrase {
                begin: idx,
                end: cur,
                adjectives,
            });
        }
        return None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::StaticLexicon;
    use crate::morph::Gender;

    fn lexicon() -> StaticLexicon {
        StaticLexicon::function_words()
            .with("бывших", StaticLexicon::adjective("бывший", Gender::MASCULINE))
            .with("колхозных", StaticLexicon::adjective("колхозный", Gender::MASCULINE))
            .with("земель", StaticLexicon::noun("земля", Gender::FEMININE))
    }

    #[test]
    fn adjectives_then_head() {
        let line = TokenLine::from_text_with("бывших колхозных земель", &lexicon());
        let phrase = try_parse(&line, 0).unwrap();
        assert_eq!((phrase.begin, phrase.end), (0, 2));
        assert_eq!(phrase.adjectives, vec![0, 1]);
        assert_eq!(line.get(phrase.head()).unwrap().lemma(), Some("ЗЕМЛЯ"));
    }

    #[test]
    fn unknown_capitalized_word_heads_alone() {
        let line = TokenLine::from_text("Подмосковье");
        assert_eq!(try_parse(&line, 0).map(|p| p.end), Some(0));
    }

    #[test]
    fn prepositions_and_punctuation_do_not_start_phrases() {
        let line = TokenLine::from_text_with("в , земель", &lexicon());
        assert!(try_parse(&line, 0).is_none());
        assert!(try_parse(&line, 1).is_none());
    }

    #[test]
    fn phrase_stops_at_newline() {
        let line = TokenLine::from_text_with("колхозных\nземель", &lexicon());
        assert!(try_parse(&line, 0).is_none());
    }
}
