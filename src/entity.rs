//! Canonical geographic records and the references tokens carry to them.

use std::collections::BTreeSet;

use bitflags::bitflags;

use crate::registrar;
use crate::token_line::SpanRef;

/// Index of an entity inside the registry that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

impl EntityId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Discriminant of [`RecognizedEntity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Geo,
    Address,
    Street,
}

/// A materialized entity covering a token span. Address and street ids
/// belong to the host's own registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognizedEntity {
    Geo(EntityId),
    Address(EntityId),
    Street(EntityId),
}

impl RecognizedEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            RecognizedEntity::Geo(_) => EntityKind::Geo,
            RecognizedEntity::Address(_) => EntityKind::Address,
            RecognizedEntity::Street(_) => EntityKind::Street,
        }
    }

    pub fn id(&self) -> EntityId {
        match *self {
            RecognizedEntity::Geo(id)
            | RecognizedEntity::Address(id)
            | RecognizedEntity::Street(id) => id,
        }
    }
}

bitflags! {
    /// Classification of a geographic entity.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GeoClass: u8 {
        /// Sovereign state
        const STATE = 1 << 0;
        const REGION = 1 << 1;
        const CITY = 1 << 2;
        const BIG_CITY = 1 << 3;
        /// Union of states
        const UNION = 1 << 4;
    }
}

/// One recognized place.
///
/// `names[0]` is the lead (display) name. Names are upper-cased and never
/// repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoEntity {
    names: Vec<String>,
    types: Vec<String>,
    pub class: GeoClass,
    /// The containing entity, e.g. the region of a city
    pub higher: Option<EntityId>,
    /// The same place recorded under a different classification
    pub reference: Option<EntityId>,
    /// Where in the text the entity was seen
    pub occurrences: Vec<SpanRef>,
}

impl GeoEntity {
    pub fn new(class: GeoClass) -> Self {
        Self {
            class,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.add_name(name);
        self
    }

    pub fn with_type(mut self, typ: &str) -> Self {
        self.add_type(typ);
        self
    }

    pub fn with_occurrence(mut self, span: SpanRef) -> Self {
        self.occurrences.push(span);
        self
    }

    /// Adds `name` unless it is already present. Returns whether it was added.
    pub fn add_name(&mut self, name: &str) -> bool {
        let name = name.trim().to_uppercase();
        if name.is_empty() || self.has_name(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn add_type(&mut self, typ: &str) -> bool {
        let typ = typ.trim().to_lowercase();
        if typ.is_empty() || self.types.contains(&typ) {
            return false;
        }
        self.types.push(typ);
        true
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn lead_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Move `name` to the lead slot keeping the others in order. False when
    /// the name is absent.
    pub fn promote_name(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(pos) => {
                let lead = self.names.remove(pos);
                self.names.insert(0, lead);
                true
            }
            None => false,
        }
    }

    pub fn is_state(&self) -> bool {
        self.class.contains(GeoClass::STATE)
    }

    pub fn is_region(&self) -> bool {
        self.class.contains(GeoClass::REGION)
    }

    pub fn is_city(&self) -> bool {
        self.class.contains(GeoClass::CITY)
    }

    pub fn is_big_city(&self) -> bool {
        self.class.contains(GeoClass::BIG_CITY)
    }

    pub fn is_union(&self) -> bool {
        self.class.contains(GeoClass::UNION)
    }

    fn type_set(&self) -> BTreeSet<&str> {
        self.types.iter().map(String::as_str).collect()
    }

    /// Same class, same administrative types and at least one shared name.
    pub fn can_merge(&self, other: &GeoEntity) -> bool {
        self.class == other.class
            && self.type_set() == other.type_set()
            && self.names.iter().any(|n| other.has_name(n))
    }

    fn absorb(&mut self, other: GeoEntity) {
        for name in &other.names {
            self.add_name(name);
        }
        if self.higher.is_none() {
            self.higher = other.higher;
        }
        if self.reference.is_none() {
            self.reference = other.reference;
        }
        self.occurrences.extend(other.occurrences);
    }
}

/// Owns every geographic entity of one document.
#[derive(Debug, Clone, Default)]
pub struct GeoRegistry {
    entities: Vec<GeoEntity>,
}

impl GeoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalize `entity` and store it, merging into an equal one already
    /// registered.
    pub fn register(&mut self, mut entity: GeoEntity) -> EntityId {
        registrar::on_register(&mut entity);

        if let Some(pos) = self.entities.iter().position(|e| e.can_merge(&entity)) {
            tracing::debug!(
                id = pos,
                lead = ?entity.lead_name(),
                "merging geo entity into existing record"
            );
            self.entities[pos].absorb(entity);
            return EntityId(pos);
        }

        self.entities.push(entity);
        EntityId(self.entities.len() - 1)
    }

    pub fn get(&self, id: EntityId) -> Option<&GeoEntity> {
        self.entities.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &GeoEntity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityId(i), e))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_deduplicated_and_uppercased() {
        let mut entity = GeoEntity::new(GeoClass::CITY).with_name("Тверь");
        assert!(!entity.add_name("ТВЕРЬ"));
        assert!(!entity.add_name("  "));
        assert_eq!(entity.names(), &["ТВЕРЬ".to_string()]);
        assert_eq!(entity.lead_name(), Some("ТВЕРЬ"));
    }

    #[test]
    fn promote_keeps_relative_order() {
        let mut entity = GeoEntity::new(GeoClass::REGION)
            .with_name("А")
            .with_name("Б")
            .with_name("В");
        assert!(entity.promote_name("В"));
        assert_eq!(entity.names(), &["В", "А", "Б"]);
        assert!(!entity.promote_name("Г"));
    }

    #[test]
    fn recognized_entity_kind() {
        let geo = RecognizedEntity::Geo(EntityId(3));
        assert_eq!(geo.kind(), EntityKind::Geo);
        assert_eq!(geo.id(), EntityId(3));
        assert_eq!(
            RecognizedEntity::Street(EntityId(0)).kind(),
            EntityKind::Street
        );
    }

    #[test]
    fn registry_merges_equal_places() {
        let mut registry = GeoRegistry::new();
        let a = registry.register(
            GeoEntity::new(GeoClass::REGION)
                .with_name("МОСКОВСКАЯ")
                .with_type("область")
                .with_occurrence(SpanRef::new(2, 3)),
        );
        let b = registry.register(
            GeoEntity::new(GeoClass::REGION)
                .with_name("МОСКОВСКАЯ")
                .with_type("Область")
                .with_occurrence(SpanRef::new(10, 11)),
        );
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
        let entity = registry.get(a).unwrap();
        assert_eq!(entity.occurrences.len(), 2);
        assert_eq!(entity.lead_name(), Some("МОСКОВСКАЯ"));
    }

    #[test]
    fn registry_keeps_different_types_apart() {
        let mut registry = GeoRegistry::new();
        let region = registry.register(
            GeoEntity::new(GeoClass::REGION)
                .with_name("МОСКОВСКАЯ")
                .with_type("область"),
        );
        let city = registry.register(GeoEntity::new(GeoClass::CITY).with_name("МОСКВА").with_type("город"));
        assert_ne!(region, city);
        assert_eq!(registry.iter().count(), 2);
    }
}
