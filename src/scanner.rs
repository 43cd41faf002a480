//! Bounded context walks that decide whether a position is geographically
//! anchored.
//!
//! Every walk moves one token at a time away from a candidate span. Commas,
//! periods, hyphens and conjunctions are skipped for free; anything else
//! either decides the walk or spends part of a small miss budget. The
//! budgets differ per walk:
//!
//! | walk | direction | stops after |
//! |---|---|---|
//! | [`check_geo_object_before`](ContextScanner::check_geo_object_before) | back | first undecided token |
//! | [`check_geo_object_before_brief`](ContextScanner::check_geo_object_before_brief) | back | 3 misses or a newline |
//! | [`check_geo_object_after_brief`](ContextScanner::check_geo_object_after_brief) | forward | 5 misses, a newline or a lower-case word |
//! | [`check_geo_object_after`](ContextScanner::check_geo_object_after) | forward | second undecided token |
//!
//! A "no" is always `false`/`None`; nothing here fails.

use crate::config::UserParams;
use crate::dictionaries::GeoDictionaries;
use crate::entity::EntityKind;
use crate::morph::MorphClass;
use crate::noun_phrase;
use crate::termin::MatchMode;
use crate::token_line::{CityItemKind, GeoToken, TerrItem, TokenLine};

/// Misses the brief backward walk tolerates.
const BEFORE_BRIEF_MISSES: usize = 2;
/// Misses the brief forward walk tolerates.
const AFTER_BRIEF_MISSES: usize = 4;
/// How far back a proximity word or address detail is looked for.
const NEAR_WINDOW: usize = 5;
/// The proximity preposition itself must sit this close.
const NEAR_PREPOSITION_WINDOW: usize = 2;

/// Skipped by the strict backward walk.
fn is_transparent_before(token: &GeoToken) -> bool {
    token.is_char_of(",.;:")
        || token.is_hyphen()
        || token.is_and()
        || token.morph.is_conjunction()
        || token.morph.is_preposition()
}

/// Skipped by the brief walks and the strict forward walk.
fn is_transparent(token: &GeoToken) -> bool {
    token.is_char_of(",.;") || token.is_hyphen() || token.morph.is_conjunction()
}

fn has_tag_evidence(token: &GeoToken) -> bool {
    token.tag.as_ref().map_or(false, |tag| tag.is_geo_evidence())
}

/// A city-level item found at a position, from a prior tag or read off
/// the text.
#[derive(Debug, Clone, Copy)]
struct CityRun {
    begin: usize,
    end: usize,
    kind: CityItemKind,
}

/// Context walks over one line, with the dictionaries and user parameters
/// of the current session.
#[derive(Debug, Clone, Copy)]
pub struct ContextScanner<'a> {
    dictionaries: &'a GeoDictionaries,
    params: &'a UserParams,
}

impl<'a> ContextScanner<'a> {
    pub fn new(dictionaries: &'a GeoDictionaries, params: &'a UserParams) -> Self {
        Self {
            dictionaries,
            params,
        }
    }

    /// A territory keyword at `idx` and the inclusive end of everything it
    /// pulls in: a second territory word, "...земель", "бывший"/"района".
    pub fn check_territory(&self, line: &TokenLine, idx: usize) -> Option<usize> {
        let token = line.get(idx)?;
        if !token.is_letters() {
            return None;
        }
        let found = self
            .dictionaries
            .territories
            .try_match(line, idx, MatchMode::Normal)?;

        match found.canonical() {
            // "федеральная территория" is a type of its own
            "ТЕРРИТОРИЯ" => {
                let federal = line
                    .prev(idx)
                    .and_then(|p| line.get(p))
                    .map_or(false, |p| p.is_value("ФЕДЕРАЛЬНЫЙ"));
                if federal {
                    return None;
                }
            }
            "УЧАСТОК" => {
                if !self.params.is_address() {
                    return None;
                }
                // "участок 12" is a land plot number, not a territory
                let numbered = line
                    .get(found.end + 1)
                    .map_or(false, |n| n.is_number() && n.len_chars() < 4);
                if numbered {
                    return None;
                }
            }
            _ => {}
        }

        let mut end = found.end;
        if let Some(second) = self
            .dictionaries
            .territories
            .try_match(line, end + 1, MatchMode::Normal)
        {
            end = second.end;
        }
        if let Some(phrase) = noun_phrase::try_parse(line, end + 1) {
            let head_is_land = line
                .get(phrase.head())
                .map_or(false, |h| h.is_value("ЗЕМЛЯ"));
            if head_is_land {
                end = phrase.end;
            }
        }
        if let Some(next) = line.get(end + 1) {
            if next.is_value("БЫВШИЙ") || next.is_value("РАЙОН") {
                end += 1;
            } else if next.is_value("БЫВШ") {
                end += 1;
                if line.get(end + 1).map_or(false, |p| p.is_char('.')) {
                    end += 1;
                }
            }
        }
        Some(end)
    }

    /// Strict backward walk from the token before `idx`. Accepts on a
    /// residency word, a region code like "РФ", or a recognized place.
    /// With `pure_geo` an address or street does not count.
    pub fn check_geo_object_before(&self, line: &TokenLine, idx: usize, pure_geo: bool) -> bool {
        for tt in (0..idx.min(line.len())).rev() {
            let Some(token) = line.get(tt) else { break };
            if is_transparent_before(token) {
                continue;
            }
            if self
                .dictionaries
                .territories
                .try_match(line, tt, MatchMode::Normal)
                .is_some()
            {
                continue;
            }
            if self
                .dictionaries
                .geo_before
                .try_match(line, tt, MatchMode::Normal)
                .is_some()
            {
                tracing::trace!(at = tt, "geo precursor before candidate");
                return true;
            }
            if token.len_chars() == 2
                && token.is_letters()
                && token.is_all_upper()
                && token.term().starts_with('Р')
            {
                return true;
            }
            if let Some(entity) = token.entity {
                match entity.kind() {
                    EntityKind::Geo => return true,
                    EntityKind::Address | EntityKind::Street if !pure_geo => return true,
                    _ => {}
                }
            }
            break;
        }
        false
    }

    /// Backward walk on the same line with a budget of two misses.
    pub fn check_geo_object_before_brief(&self, line: &TokenLine, idx: usize) -> bool {
        let mut misses = 0;
        for tt in (0..idx.min(line.len())).rev() {
            let Some(token) = line.get(tt) else { break };
            if token.is_newline_after() {
                break;
            }
            if is_transparent(token) {
                continue;
            }
            if self.check_territory(line, tt).is_some() {
                return true;
            }
            if token.entity.is_some() || has_tag_evidence(token) {
                tracing::trace!(at = tt, "recognized place before candidate");
                return true;
            }
            misses += 1;
            if misses > BEFORE_BRIEF_MISSES {
                break;
            }
        }
        false
    }

    /// Forward walk on the same line with a budget of four misses; a
    /// lower-case content word ends it.
    pub fn check_geo_object_after_brief(&self, line: &TokenLine, idx: usize) -> bool {
        let mut misses = 0;
        let mut tt = idx + 1;
        while let Some(token) = line.get(tt) {
            if token.is_newline_before() {
                break;
            }
            if is_transparent(token) {
                tt += 1;
                continue;
            }
            if self.check_territory(line, tt).is_some() {
                return true;
            }
            if token.entity.is_some() || has_tag_evidence(token) {
                tracing::trace!(at = tt, "recognized place after candidate");
                return true;
            }
            if self.city_keyword(line, tt) {
                return true;
            }
            if token.is_all_lower() && !token.morph.is_preposition() {
                break;
            }
            misses += 1;
            if misses > AFTER_BRIEF_MISSES {
                break;
            }
            tt += 1;
        }
        false
    }

    /// Strict forward walk.
    ///
    /// Besides territories and recognized places it accepts "с. Ивановка",
    /// a settlement noun with a name ("пос. Рассвет"), and a settlement noun
    /// followed by an organization ("пос. санатория"). With `check_terr`
    /// a pair of territory items (type word + name) also counts. One long
    /// word is let through before the walk must decide.
    pub fn check_geo_object_after(
        &self,
        line: &TokenLine,
        idx: usize,
        dont_check_city: bool,
        check_terr: bool,
    ) -> bool {
        let mut passed = 0;
        let mut tt = idx + 1;
        while let Some(token) = line.get(tt) {
            if is_transparent(token) {
                tt += 1;
                continue;
            }
            if token.morph.is_preposition() {
                if !dont_check_city && token.is_value("С") && self.settlement_after_s(line, tt) {
                    return true;
                }
                tt += 1;
                continue;
            }
            if self.check_territory(line, tt).is_some() {
                return true;
            }
            if token.entity.is_some() {
                return true;
            }

            if !dont_check_city && passed == 0 {
                let items = self.city_items(line, tt, 3);
                if items.len() >= 2
                    && items[0].kind == CityItemKind::Noun
                    && matches!(items[1].kind, CityItemKind::ProperName | CityItemKind::City)
                    && !self.shouting_noun(line, items[0].begin, items[1].begin)
                {
                    return true;
                }
                if let Some(first) = items.first() {
                    let close = line
                        .get(first.end)
                        .map_or(false, |t| t.whitespace_after < 3);
                    if first.kind == CityItemKind::Noun && close && self.is_org_at(line, first.end + 1) {
                        return true;
                    }
                }
            }
            if check_terr && passed == 0 && self.territory_pair_at(line, tt) {
                return true;
            }
            if token.is_letters() && token.len_chars() > 2 && passed == 0 {
                passed += 1;
                tt += 1;
                continue;
            }
            break;
        }
        false
    }

    /// A proximity word ("около", "вблизи от") or an address detail within
    /// a few tokens before `idx`; returns where it starts.
    pub fn check_near_before(&self, line: &TokenLine, idx: usize) -> Option<usize> {
        let start = idx.min(line.len());
        for (cou, tt) in (0..start).rev().take(NEAR_WINDOW).enumerate() {
            let token = line.get(tt)?;
            if cou < NEAR_PREPOSITION_WINDOW
                && token.morph.is_preposition()
                && self
                    .dictionaries
                    .near
                    .try_match(line, tt, MatchMode::Normal)
                    .is_some()
            {
                return Some(tt);
            }
            if token.tag.as_ref().map_or(false, |tag| tag.detail) {
                return Some(tt);
            }
        }
        None
    }

    /// A noun phrase at `idx` naming a region whose type the text does not
    /// give ("Подмосковье", "Дальний Восток"). Returns the end of the name.
    pub fn check_unknown_region(&self, line: &TokenLine, idx: usize) -> Option<usize> {
        if !line.get(idx)?.is_letters() {
            return None;
        }
        let phrase = noun_phrase::try_parse(line, idx)?;
        let regions = &self.dictionaries.unknown_regions;
        if let Some(found) = regions.try_match(line, phrase.begin, MatchMode::FullWordsOnly) {
            if found.end >= phrase.end {
                return Some(found.end);
            }
        }
        regions
            .try_match(line, phrase.end, MatchMode::FullWordsOnly)
            .map(|found| found.end)
    }

    /// A compass-direction prefix at `idx`, joined with a second one across
    /// a hyphen: "Юго-Западный". Returns the inclusive span.
    pub fn try_attach_compass(&self, line: &TokenLine, idx: usize) -> Option<(usize, usize)> {
        let token = line.get(idx)?;
        if !token.is_letters() {
            return None;
        }
        let compass = &self.dictionaries.compass;
        let first = compass.try_match(line, idx, MatchMode::Normal)?;

        let hyphenated = line
            .get(first.end + 1)
            .map_or(false, |h| h.is_hyphen() && h.whitespace_before < 2 && h.whitespace_after < 2);
        let second_at = if hyphenated {
            Some(first.end + 2)
        } else if token.morph.is_adjective() && token.whitespace_after < 2 {
            Some(first.end + 1)
        } else {
            None
        };

        let end = second_at
            .and_then(|at| compass.try_match(line, at, MatchMode::Normal))
            .map_or(first.end, |second| second.end);
        Some((idx, end))
    }

    fn city_keyword(&self, line: &TokenLine, idx: usize) -> bool {
        match self
            .dictionaries
            .city_nouns
            .try_match(line, idx, MatchMode::Normal)
        {
            Some(found) => !(found.canonical() == "ГОРОДОК" && self.params.is_address()),
            None => false,
        }
    }

    fn city_item_at(&self, line: &TokenLine, idx: usize) -> Option<CityRun> {
        let token = line.get(idx)?;
        if let Some(city) = token.tag.as_ref().and_then(|tag| tag.city.as_ref()) {
            return Some(CityRun {
                begin: idx,
                end: city.end.max(idx),
                kind: city.kind,
            });
        }
        if token.entity.is_some() {
            return None;
        }
        if let Some(noun) = self
            .dictionaries
            .city_nouns
            .try_match(line, idx, MatchMode::Normal)
        {
            return Some(CityRun {
                begin: idx,
                end: noun.end,
                kind: CityItemKind::Noun,
            });
        }
        let name_like = token.is_letters()
            && !token.is_all_lower()
            && token.len_chars() > 1
            && !token.morph.is_preposition()
            && !token.morph.is_conjunction()
            && !token.morph.class.contains(MorphClass::PROPER_SURNAME);
        if name_like {
            return Some(CityRun {
                begin: idx,
                end: idx,
                kind: CityItemKind::ProperName,
            });
        }
        None
    }

    /// Consecutive city items on one line, at most `max`.
    fn city_items(&self, line: &TokenLine, idx: usize, max: usize) -> Vec<CityRun> {
        let mut items = Vec::new();
        let mut cur = idx;
        while items.len() < max {
            if cur > idx && line.get(cur).map_or(true, |t| t.is_newline_before()) {
                break;
            }
            match self.city_item_at(line, cur) {
                Some(item) => {
                    cur = item.end + 1;
                    items.push(item);
                }
                None => break,
            }
        }
        items
    }

    /// "С. Ивановка": the settlement abbreviation after a preposition-looking
    /// "с", followed by exactly one name.
    fn settlement_after_s(&self, line: &TokenLine, s_idx: usize) -> bool {
        let mut next = s_idx + 1;
        match line.get(next) {
            Some(dot) if dot.is_char('.') => {
                if dot.whitespace_after < 3 {
                    next += 1;
                }
            }
            Some(_) => {}
            None => return false,
        }
        let items = self.city_items(line, next, 3);
        if items.len() != 1 {
            return false;
        }
        let item = items[0];
        if !matches!(item.kind, CityItemKind::ProperName | CityItemKind::City) {
            return false;
        }
        !self.shouting_noun(line, s_idx, item.begin)
    }

    /// An upper-case keyword before a name that is not upper-case reads as
    /// a heading, not a settlement reference.
    fn shouting_noun(&self, line: &TokenLine, noun: usize, name: usize) -> bool {
        let noun_upper = line.get(noun).map_or(false, |t| t.is_all_upper());
        let name_upper = line.get(name).map_or(false, |t| t.is_all_upper());
        noun_upper && !name_upper
    }

    fn is_org_at(&self, line: &TokenLine, idx: usize) -> bool {
        match line.get(idx) {
            Some(token) if token.tag.as_ref().map_or(false, |tag| tag.org) => true,
            Some(_) => self
                .dictionaries
                .org_types
                .try_match(line, idx, MatchMode::Normal)
                .is_some(),
            None => false,
        }
    }

    /// Territory items tagged by an earlier pass: a type word with a name
    /// next to it, or a single known territory.
    fn territory_pair_at(&self, line: &TokenLine, idx: usize) -> bool {
        let mut items: Vec<(usize, &TerrItem)> = Vec::new();
        let mut cur = idx;
        while items.len() < 4 {
            match line.tag(cur).and_then(|tag| tag.terr.as_ref()) {
                Some(item) => {
                    items.push((cur, item));
                    cur = item.end.max(cur) + 1;
                }
                None => break,
            }
        }

        match items.as_slice() {
            [(_, first), (_, second)] => {
                let close = line
                    .get(first.end)
                    .map_or(false, |t| t.whitespace_after < 3);
                close
                    && ((first.termin.is_some() && !second.is_known())
                        || (second.termin.is_some() && first.termin.is_none()))
            }
            [(_, only)] => only.onto.is_some(),
            _ => false,
        }
    }
}

/// "Is there a geo-indicative token right before `position`", evaluated
/// only when a caller asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoCondition {
    pub position: usize,
    pub pure_geo: bool,
}

impl GeoCondition {
    pub fn new(position: usize, pure_geo: bool) -> Self {
        Self { position, pure_geo }
    }

    pub fn check(&self, scanner: &ContextScanner<'_>, line: &TokenLine) -> bool {
        scanner.check_geo_object_before(line, self.position, self.pure_geo)
    }
}
