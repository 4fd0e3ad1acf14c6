use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use statfacet_core::config::HierarchyConfig;
use statfacet_core::hierarchy::{build_options, GeoJsonIndex};
use statfacet_core::models::{GeographicLevel, LocationRow};

use crate::cli::HierarchyArgs;
use crate::output::{render_forest, OutputWriter};

pub fn run(args: &HierarchyArgs, output: &OutputWriter) -> Result<()> {
    let rows_json = fs::read_to_string(&args.rows)
        .with_context(|| format!("Failed to read rows file {}", args.rows.display()))?;
    let rows: Vec<LocationRow> =
        serde_json::from_str(&rows_json).context("Rows file is not valid JSON")?;
    tracing::debug!(rows = rows.len(), "Loaded location rows");

    let hierarchies = match &args.config {
        Some(path) => HierarchyConfig::load_from_file(path)
            .with_context(|| format!("Failed to load hierarchy config {}", path.display()))?,
        None => HierarchyConfig::load()?,
    };

    let geo_json = match &args.geojson {
        Some(path) => Some(load_geo_json_index(path)?),
        None => None,
    };

    let forest = build_options(&rows, &hierarchies, geo_json.as_ref())?;

    if output.is_json() {
        println!("{}", serde_json::to_string_pretty(&forest)?);
    } else {
        output.success(format!(
            "Built options for {} levels from {} rows",
            forest.len(),
            rows.len()
        ));
        print!("{}", render_forest(&forest));
    }
    Ok(())
}

/// Load a boundary index file, checking each payload is well-formed
/// GeoJSON before it enters the opaque index
fn load_geo_json_index(path: &Path) -> Result<GeoJsonIndex> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read GeoJSON index {}", path.display()))?;
    let levels: BTreeMap<GeographicLevel, BTreeMap<String, serde_json::Value>> =
        serde_json::from_str(&content).context("GeoJSON index file is not valid JSON")?;

    for (level, by_value) in &levels {
        for (value, geometry) in by_value {
            geojson::GeoJson::from_json_value(geometry.clone())
                .with_context(|| format!("Invalid GeoJSON for {level} {value}"))?;
        }
    }
    Ok(GeoJsonIndex::from_levels(levels))
}
