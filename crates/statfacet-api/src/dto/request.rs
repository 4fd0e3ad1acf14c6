use serde::Deserialize;
use std::collections::BTreeMap;

use statfacet_core::models::{GeographicLevel, LocationRow, TimeIdentifier};

/// Hierarchy build request body
#[derive(Debug, Deserialize)]
pub struct HierarchyRequest {
    pub locations: Vec<LocationRow>,

    /// Inline nesting override; the server configuration applies when
    /// absent
    #[serde(default)]
    pub hierarchies: Option<BTreeMap<GeographicLevel, Vec<GeographicLevel>>>,

    /// GeoJSON boundaries keyed by level, then by effective value
    #[serde(default)]
    pub geo_json: Option<BTreeMap<GeographicLevel, BTreeMap<String, serde_json::Value>>>,
}

/// Time period range request body
#[derive(Debug, Deserialize)]
pub struct RangeRequest {
    pub start_year: Option<i32>,
    pub start_code: TimeIdentifier,
    pub end_year: Option<i32>,
    pub end_code: TimeIdentifier,
}
