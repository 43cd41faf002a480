//! Final touches applied to a geographic entity before it is stored.
//!
//! Regions and small settlements are written many ways: "Подгорное",
//! "Подгорная", "Ханты-Мансийский автономный" vs "автономный Ханты-Мансийский".
//! [`on_register`] adds the reordered and re-gendered spellings and picks a
//! lead name agreeing with the administrative type.

use crate::entity::{GeoClass, GeoEntity};
use crate::morph::Gender;

/// Adjectival endings as (masculine, neuter, feminine).
static ENDINGS: [[&str; 3]; 3] = [
    ["КИЙ", "КОЕ", "КАЯ"],
    ["НЫЙ", "НОЕ", "НАЯ"],
    ["НИЙ", "НЕЕ", "НЯЯ"],
];

const MASCULINE_TYPES: &[&str] = &["РАЙОН", "КРАЙ", "ОКРУГ", "УЛУС"];
const FEMININE_TYPES: &[&str] = &["ОБЛАСТЬ", "ТЕРРИТОРИЯ"];

/// Gender implied by the administrative type words.
pub fn infer_gender<S: AsRef<str>>(types: &[S]) -> Gender {
    let mut gender = Gender::empty();
    for typ in types {
        let typ = typ.as_ref().to_uppercase();
        if MASCULINE_TYPES.iter().any(|s| typ.ends_with(s)) {
            gender |= Gender::MASCULINE;
        }
        if FEMININE_TYPES.iter().any(|s| typ.ends_with(s)) {
            gender |= Gender::FEMININE;
        }
    }
    gender
}

/// Slot of the ending triplet matching `gender`, by priority.
fn ending_slot(gender: Gender) -> Option<usize> {
    if gender.contains(Gender::MASCULINE) {
        Some(0)
    } else if gender.contains(Gender::FEMININE) {
        Some(2)
    } else if gender.contains(Gender::NEUTER) {
        Some(1)
    } else {
        None
    }
}

/// Stem and triplet of a name ending in one of [`ENDINGS`].
fn split_ending(name: &str) -> Option<(&str, &'static [&'static str; 3])> {
    for triplet in &ENDINGS {
        for ending in triplet {
            if let Some(stem) = name.strip_suffix(ending) {
                if !stem.is_empty() {
                    return Some((stem, triplet));
                }
            }
        }
    }
    None
}

fn reorder_two_words(name: &str) -> Option<String> {
    let mut words = name.split(' ');
    match (words.next(), words.next(), words.next()) {
        (Some(first), Some(second), None) if !first.is_empty() && !second.is_empty() => {
            Some(format!("{} {}", second, first))
        }
        _ => None,
    }
}

/// Expand and reorder the names of a freshly assembled entity.
///
/// Never removes a name. Running it again on an unchanged entity changes
/// nothing.
pub fn on_register(entity: &mut GeoEntity) {
    if entity.class.contains(GeoClass::STATE) {
        return;
    }
    let eligible = entity.class.contains(GeoClass::REGION)
        || (entity.class.contains(GeoClass::CITY) && !entity.class.contains(GeoClass::BIG_CITY));
    if !eligible {
        return;
    }

    let gender = infer_gender(entity.types());
    let original: Vec<String> = entity.names().to_vec();

    for name in &original {
        if name.contains(' ') {
            if entity.reference.is_none() {
                if let Some(reordered) = reorder_two_words(name) {
                    entity.add_name(&reordered);
                }
            }
            continue;
        }
        if let Some((stem, triplet)) = split_ending(name) {
            for ending in triplet {
                entity.add_name(&format!("{}{}", stem, ending));
            }
        }
    }

    let Some(slot) = ending_slot(gender) else {
        return;
    };
    let agrees = |name: &str| {
        !name.contains(' ')
            && ENDINGS
                .iter()
                .any(|t| name.len() > t[slot].len() && name.ends_with(t[slot]))
    };
    // a lead that already agrees stays put
    if entity.lead_name().map_or(false, |lead| agrees(lead)) {
        return;
    }
    let base = entity
        .names()
        .iter()
        .filter(|n| agrees(n.as_str()))
        .last()
        .cloned();

    if let Some(base) = base {
        if entity.lead_name() != Some(base.as_str()) && entity.promote_name(&base) {
            tracing::trace!(lead = %base, "lead name follows the type gender");
        }
    }
}
