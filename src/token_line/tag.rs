//! Recognition data attached to single token positions.
//!
//! Earlier passes (territory, city, street item recognizers) leave what
//! they found on the token where the item starts. The context scanners read
//! these tags to decide whether a neighbourhood is geographic.

/// Kind of a city-level item recognized at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CityItemKind {
    /// A settlement noun: "город", "пос.", "село"
    Noun,
    /// A known city name
    City,
    /// A proper name that may denote a settlement
    ProperName,
    Misc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityItem {
    pub kind: CityItemKind,
    /// Inclusive end token of the item
    pub end: usize,
}

/// A territory item; at least one of `termin` / `onto` must be present for
/// the item to count as geographic evidence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerrItem {
    /// Canonical administrative-type keyword ("ОБЛАСТЬ", "КРАЙ", ...)
    pub termin: Option<String>,
    /// Canonical name of a known territory matched from an ontology
    pub onto: Option<String>,
    pub end: usize,
}

impl TerrItem {
    pub fn is_known(&self) -> bool {
        self.termin.is_some() || self.onto.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreetItemKind {
    /// A street-type noun: "улица", "пр-т"
    Noun,
    Name,
    Number,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetItem {
    pub kind: StreetItemKind,
    /// How doubtful the noun reading is; `0` means certain.
    pub noun_doubt: u8,
    pub end: usize,
}

/// Per-position recognition findings, written at most once per recognizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoTokenData {
    pub city: Option<CityItem>,
    pub terr: Option<TerrItem>,
    pub street: Option<StreetItem>,
    /// An organization-looking phrase starts here
    pub org: bool,
    /// An address detail ("около", "в районе", "напротив") starts here
    pub detail: bool,
    /// A recognizer ruled this position out as geographic
    pub no_geo: bool,
}

impl GeoTokenData {
    /// True when the tag alone is enough to anchor a geographic reading.
    pub fn is_geo_evidence(&self) -> bool {
        if let Some(city) = &self.city {
            if matches!(city.kind, CityItemKind::Noun | CityItemKind::City) {
                return true;
            }
        }
        if let Some(terr) = &self.terr {
            if terr.is_known() {
                return true;
            }
        }
        if let Some(street) = &self.street {
            if street.kind == StreetItemKind::Noun && street.noun_doubt == 0 {
                return true;
            }
        }
        false
    }

    /// Short label used by the line display.
    pub fn label(&self) -> String {
        let mut parts = Vec::new();
        if let Some(city) = &self.city {
            parts.push(format!("City({:?})", city.kind));
        }
        if let Some(terr) = &self.terr {
            match (&terr.termin, &terr.onto) {
                (Some(t), _) => parts.push(format!("Terr({})", t)),
                (None, Some(o)) => parts.push(format!("Terr(={})", o)),
                (None, None) => parts.push("Terr(?)".to_string()),
            }
        }
        if let Some(street) = &self.street {
            parts.push(format!("Street({:?}/{})", street.kind, street.noun_doubt));
        }
        if self.org {
            parts.push("Org".to_string());
        }
        if self.detail {
            parts.push("Detail".to_string());
        }
        if self.no_geo {
            parts.push("NoGeo".to_string());
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubtful_street_noun_is_not_evidence() {
        let mut data = GeoTokenData::default();
        data.street = Some(StreetItem {
            kind: StreetItemKind::Noun,
            noun_doubt: 1,
            end: 0,
        });
        assert!(!data.is_geo_evidence());
        data.street.as_mut().unwrap().noun_doubt = 0;
        assert!(data.is_geo_evidence());
    }

    #[test]
    fn unknown_territory_is_not_evidence() {
        let data = GeoTokenData {
            terr: Some(TerrItem::default()),
            ..GeoTokenData::default()
        };
        assert!(!data.is_geo_evidence());
        assert_eq!(data.label(), "Terr(?)");
    }

    #[test]
    fn proper_name_city_item_is_not_evidence() {
        let data = GeoTokenData {
            city: Some(CityItem {
                kind: CityItemKind::ProperName,
                end: 0,
            }),
            ..GeoTokenData::default()
        };
        assert!(!data.is_geo_evidence());
    }
}
