//! Grouping of flat location rows into per-level option forests.
//!
//! Each geographic level present in the input becomes one forest. A
//! level without configured ancestors is a flat, sorted list of leaves;
//! a configured level is grouped recursively by each ancestor's
//! effective value in turn, outermost first, with the rows emitted as
//! sorted leaves once the ancestor list is exhausted.

use std::collections::BTreeMap;

use crate::config::HierarchyConfig;
use crate::error::{Result, StatfacetError};
use crate::models::location::{GeographicLevel, LocationRow};
use crate::models::option_tree::LocationOptionNode;

use super::disambiguate::disambiguate_labels;
use super::geojson::GeoJsonIndex;

/// Build the per-level option forest for a set of location rows.
///
/// Every input row surfaces as exactly one leaf in its own level's
/// forest; levels with no rows are omitted. Output depends only on row
/// content, never on input order.
pub fn build_options(
    rows: &[LocationRow],
    hierarchies: &HierarchyConfig,
    geo_json: Option<&GeoJsonIndex>,
) -> Result<BTreeMap<GeographicLevel, Vec<LocationOptionNode>>> {
    let mut buckets: BTreeMap<GeographicLevel, Vec<&LocationRow>> = BTreeMap::new();
    for row in rows {
        buckets.entry(row.level).or_default().push(row);
    }

    let mut forest = BTreeMap::new();
    for (level, bucket) in buckets {
        let ancestors = hierarchies.ancestors_for(level);
        let options = build_group(level, &bucket, ancestors, geo_json)?;
        forest.insert(level, options);
    }
    Ok(forest)
}

/// Group rows by the first remaining ancestor level and recurse on the
/// rest; emit sorted, disambiguated leaves once the list is exhausted.
fn build_group(
    level: GeographicLevel,
    rows: &[&LocationRow],
    ancestors: &[GeographicLevel],
    geo_json: Option<&GeoJsonIndex>,
) -> Result<Vec<LocationOptionNode>> {
    let Some((&ancestor, remaining)) = ancestors.split_first() else {
        return build_leaves(level, rows, geo_json);
    };

    // Keying the groups in a BTreeMap fixes both the grouping and the
    // sibling order from effective values alone, independent of input
    // row order.
    let mut groups: BTreeMap<String, Vec<&LocationRow>> = BTreeMap::new();
    for &row in rows {
        let attribute = row.attribute(ancestor).ok_or(StatfacetError::MissingAttribute {
            location: row.id,
            level: row.level,
            missing: ancestor,
        })?;
        groups
            .entry(attribute.effective_value().to_string())
            .or_default()
            .push(row);
    }

    let mut nodes = Vec::with_capacity(groups.len());
    for (value, members) in groups {
        // Members normally agree on the ancestor's name; the minimum is
        // a deterministic witness when they do not.
        let label = members
            .iter()
            .filter_map(|row| row.attribute(ancestor))
            .map(|attribute| attribute.name.as_str())
            .min()
            .unwrap_or_default()
            .to_string();
        let options = build_group(level, &members, remaining, geo_json)?;
        nodes.push(LocationOptionNode::group(ancestor, label, value, options));
    }
    Ok(nodes)
}

fn build_leaves(
    level: GeographicLevel,
    rows: &[&LocationRow],
    geo_json: Option<&GeoJsonIndex>,
) -> Result<Vec<LocationOptionNode>> {
    let mut leaves = Vec::with_capacity(rows.len());
    for &row in rows {
        let attribute = row.own_attribute().ok_or(StatfacetError::MissingAttribute {
            location: row.id,
            level: row.level,
            missing: row.level,
        })?;
        let value = attribute.effective_value().to_string();
        let mut leaf = LocationOptionNode::leaf(row.id, attribute.name.clone(), value);
        if let Some(geometry) = geo_json.and_then(|index| index.get(level, &leaf.value)) {
            leaf = leaf.with_geo_json(geometry.clone());
        }
        leaves.push(leaf);
    }

    // Value is the ordering key; label and id only break ties so that
    // reordered input cannot reorder output.
    leaves.sort_by(|a, b| {
        a.value
            .cmp(&b.value)
            .then_with(|| a.label.cmp(&b.label))
            .then_with(|| a.id.cmp(&b.id))
    });
    disambiguate_labels(&mut leaves);
    Ok(leaves)
}
