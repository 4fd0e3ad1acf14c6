//! Boundary geometry lookup for location options.

use std::collections::{BTreeMap, HashMap};

use crate::models::location::GeographicLevel;

/// Index of boundary geometry keyed by (level, effective value).
///
/// Payloads are opaque GeoJSON values supplied by the caller; validity
/// is the ingest boundary's concern, the builder never inspects them.
#[derive(Debug, Clone, Default)]
pub struct GeoJsonIndex {
    geometries: HashMap<(GeographicLevel, String), serde_json::Value>,
}

impl GeoJsonIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from per-level maps of effective value to geometry
    pub fn from_levels(
        levels: BTreeMap<GeographicLevel, BTreeMap<String, serde_json::Value>>,
    ) -> Self {
        let mut index = Self::new();
        for (level, by_value) in levels {
            for (value, geometry) in by_value {
                index.insert(level, value, geometry);
            }
        }
        index
    }

    /// Register a geometry for a place at a level
    pub fn insert(
        &mut self,
        level: GeographicLevel,
        value: impl Into<String>,
        geometry: serde_json::Value,
    ) {
        self.geometries.insert((level, value.into()), geometry);
    }

    /// Geometry for a place at a level, if one was supplied
    pub fn get(&self, level: GeographicLevel, value: &str) -> Option<&serde_json::Value> {
        self.geometries.get(&(level, value.to_string()))
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_is_keyed_by_level_and_value() {
        let mut index = GeoJsonIndex::new();
        index.insert(
            GeographicLevel::Region,
            "E12000001",
            json!({"type": "Polygon", "coordinates": []}),
        );

        assert!(index.get(GeographicLevel::Region, "E12000001").is_some());
        assert!(index.get(GeographicLevel::Country, "E12000001").is_none());
        assert!(index.get(GeographicLevel::Region, "E12000002").is_none());
    }

    #[test]
    fn test_from_levels() {
        let mut by_value = BTreeMap::new();
        by_value.insert("E92000001".to_string(), json!({"type": "Point", "coordinates": [0, 0]}));
        let mut levels = BTreeMap::new();
        levels.insert(GeographicLevel::Country, by_value);

        let index = GeoJsonIndex::from_levels(levels);
        assert_eq!(index.len(), 1);
        assert!(index.get(GeographicLevel::Country, "E92000001").is_some());
    }
}
