use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, Json};

use statfacet_core::config::HierarchyConfig;
use statfacet_core::hierarchy::{build_options, GeoJsonIndex};
use statfacet_core::models::{GeographicLevel, LocationOptionNode};

use crate::dto::HierarchyRequest;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn build_hierarchy(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HierarchyRequest>,
) -> Result<Json<BTreeMap<GeographicLevel, Vec<LocationOptionNode>>>, ApiError> {
    tracing::info!(
        rows = request.locations.len(),
        has_override = request.hierarchies.is_some(),
        has_geo_json = request.geo_json.is_some(),
        "Building location hierarchy"
    );

    let hierarchies = match request.hierarchies {
        Some(nesting) => HierarchyConfig::from_nesting(nesting),
        None => state.hierarchies.clone(),
    };

    let geo_json = match request.geo_json {
        Some(levels) => Some(validated_geo_json_index(levels)?),
        None => None,
    };

    let forest = build_options(&request.locations, &hierarchies, geo_json.as_ref())?;
    Ok(Json(forest))
}

/// Check each supplied payload is well-formed GeoJSON before it enters
/// the opaque index
fn validated_geo_json_index(
    levels: BTreeMap<GeographicLevel, BTreeMap<String, serde_json::Value>>,
) -> Result<GeoJsonIndex, ApiError> {
    for (level, by_value) in &levels {
        for (value, geometry) in by_value {
            geojson::GeoJson::from_json_value(geometry.clone()).map_err(|err| {
                ApiError::bad_request(format!("Invalid GeoJSON for {level} {value}"))
                    .with_details(err.to_string())
            })?;
        }
    }
    Ok(GeoJsonIndex::from_levels(levels))
}
