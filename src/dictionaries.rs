//! Curated dictionaries the context scanners consult.
//!
//! Built explicitly with [`GeoDictionaries::build`] (or
//! [`GeoDictionaries::from_config`] when a host adds its own entries) and
//! immutable afterwards, so one value can be shared read-only by any number
//! of sessions. [`GeoDictionaries::shared`] keeps one default instance per
//! process.

use once_cell::sync::OnceCell;

use crate::config::GeoConfig;
use crate::errors::TermError;
use crate::termin::{Term, TermCollection};

/// Residency, registration and birthplace words that introduce a place.
const GEO_BEFORE: &[&str] = &[
    "ПРОЖИВАТЬ",
    "ПРОЖИВАТИ",
    "РОДИТЬ",
    "НАРОДИТИ",
    "ЗАРЕГИСТРИРОВАТЬ",
    "ЗАРЕЄСТРУВАТИ",
    "АДРЕС",
    "УРОЖЕНЕЦ",
    "УРОДЖЕНЕЦЬ",
    "УРОЖЕНКА",
    "УРОДЖЕНКА",
];

const NEAR: &[&str] = &[
    "У",
    "ОКОЛО",
    "ВБЛИЗИ",
    "ВБЛИЗИ ОТ",
    "НЕДАЛЕКО ОТ",
    "НЕПОДАЛЕКУ ОТ",
];

const COMPASS: &[&str] = &[
    "СЕВЕРНЫЙ",
    "ЮЖНЫЙ",
    "ЗАПАДНЫЙ",
    "ВОСТОЧНЫЙ",
    "ЦЕНТРАЛЬНЫЙ",
    "БЛИЖНИЙ",
    "ДАЛЬНИЙ",
    "СРЕДНИЙ",
    "СЕВЕР",
    "ЮГ",
    "ЗАПАД",
    "ВОСТОК",
    "СЕВЕРО",
    "ЮГО",
    "ЗАПАДНО",
    "ВОСТОЧНО",
    "СЕВЕРОЗАПАДНЫЙ",
    "СЕВЕРОВОСТОЧНЫЙ",
    "ЮГОЗАПАДНЫЙ",
    "ЮГОВОСТОЧНЫЙ",
];

/// Informal region names with no administrative type in the text.
const UNKNOWN_REGIONS: &[&str] = &[
    "ПОДМОСКОВЬЕ",
    "ЗАБАЙКАЛЬЕ",
    "ПРИМОРЬЕ",
    "ПОВОЛЖЬЕ",
    "ПРИКАМЬЕ",
    "ПРИАМУРЬЕ",
    "ЗАКАВКАЗЬЕ",
    "ЗАПОЛЯРЬЕ",
    "КУБАНЬ",
    "УРАЛ",
    "СИБИРЬ",
    "ЗАУРАЛЬЕ",
    "СТАВРОПОЛЬЕ",
    "ДАЛЬНИЙ ВОСТОК",
    "СЕВЕРНЫЙ КАВКАЗ",
    "СРЕДНЯЯ АЗИЯ",
    "ПРИБАЛТИКА",
];

const ORG_TYPES: &[&str] = &[
    "ЗАВОД",
    "ФАБРИКА",
    "КОЛХОЗ",
    "СОВХОЗ",
    "САНАТОРИЙ",
    "КОМБИНАТ",
    "ПАНСИОНАТ",
    "ЛАГЕРЬ",
    "ВОИНСКАЯ ЧАСТЬ",
    "СНТ",
    "ДНТ",
    "ТСН",
    "ЖК",
];

fn territory_terms() -> Vec<Term> {
    vec![
        Term::new("ТЕРРИТОРИЯ")
            .with_variant("ТЕР")
            .with_variant("ТЕРР")
            .with_variant("ТЕРИТОРІЯ")
            .with_abbreviation("ТЕР.")
            .with_abbreviation("ТЕРР."),
        Term::new("ГРАНИЦА"),
        Term::new("В ГРАНИЦАХ"),
        Term::new("УЧАСТОК")
            .with_abbreviation("УЧ.")
            .with_abbreviation("УЧ-К"),
    ]
}

fn city_noun_terms() -> Vec<Term> {
    vec![
        Term::new("ГОРОД").with_abbreviation("Г."),
        Term::new("ПОСЕЛОК")
            .with_variant("ПОСЁЛОК")
            .with_abbreviation("П.")
            .with_abbreviation("ПОС."),
        Term::new("СЕЛО").with_abbreviation("С."),
        Term::new("ДЕРЕВНЯ")
            .with_abbreviation("Д.")
            .with_abbreviation("ДЕР."),
        Term::new("СТАНИЦА").with_abbreviation("СТ-ЦА"),
        Term::new("ХУТОР").with_abbreviation("Х."),
        Term::new("ГОРОДОК"),
        Term::new("АУЛ"),
        Term::new("ПОСЕЛОК ГОРОДСКОГО ТИПА").with_variant("ПГТ"),
        Term::new("РАБОЧИЙ ПОСЕЛОК").with_variant("РП"),
    ]
}

fn collect(terms: Vec<Term>) -> Result<TermCollection, TermError> {
    let mut collection = TermCollection::new();
    for term in terms {
        collection.add(term)?;
    }
    Ok(collection)
}

/// Adds `words` that are not present yet; configured extras may repeat a
/// built-in entry.
fn extend_words(collection: &mut TermCollection, words: &[String]) -> Result<(), TermError> {
    for word in words {
        if collection.find(word).is_none() {
            collection.add(Term::new(word))?;
        }
    }
    Ok(())
}

/// The dictionary set.
#[derive(Debug, Clone)]
pub struct GeoDictionaries {
    /// Administrative-unit nouns: "территория", "в границах", "участок"
    pub territories: TermCollection,
    /// Residency and registration words
    pub geo_before: TermCollection,
    /// Proximity prepositions
    pub near: TermCollection,
    /// Settlement nouns: "город", "пос.", "с."
    pub city_nouns: TermCollection,
    pub org_types: TermCollection,
    /// Compass-direction words used as name prefixes
    pub compass: TermCollection,
    pub unknown_regions: TermCollection,
}

static SHARED: OnceCell<GeoDictionaries> = OnceCell::new();

impl GeoDictionaries {
    /// Build the built-in dictionaries.
    pub fn build() -> Result<Self, TermError> {
        let dictionaries = Self {
            territories: collect(territory_terms())?,
            geo_before: TermCollection::from_words(GEO_BEFORE)?,
            near: TermCollection::from_words(NEAR)?,
            city_nouns: collect(city_noun_terms())?,
            org_types: TermCollection::from_words(ORG_TYPES)?,
            compass: TermCollection::from_words(COMPASS)?,
            unknown_regions: TermCollection::from_words(UNKNOWN_REGIONS)?,
        };
        tracing::debug!(
            territories = dictionaries.territories.len(),
            geo_before = dictionaries.geo_before.len(),
            city_nouns = dictionaries.city_nouns.len(),
            unknown_regions = dictionaries.unknown_regions.len(),
            "built geo dictionaries"
        );
        Ok(dictionaries)
    }

    /// Built-in dictionaries plus the configured extras.
    pub fn from_config(config: &GeoConfig) -> Result<Self, TermError> {
        let mut dictionaries = Self::build()?;
        extend_words(&mut dictionaries.unknown_regions, &config.extra_unknown_regions)?;
        extend_words(&mut dictionaries.geo_before, &config.extra_geo_before)?;
        for spec in &config.extra_territories {
            dictionaries.territories.add(spec.to_term())?;
        }
        tracing::debug!(
            extra_unknown_regions = config.extra_unknown_regions.len(),
            extra_geo_before = config.extra_geo_before.len(),
            extra_territories = config.extra_territories.len(),
            "applied configured dictionary extras"
        );
        Ok(dictionaries)
    }

    /// The process-wide default instance, built on first call.
    pub fn shared() -> Result<&'static Self, TermError> {
        SHARED.get_or_try_init(Self::build)
    }
}
