//! Option nodes returned to faceted filter UIs.
//!
//! A flat level serializes as a plain array of leaves; a nested level
//! serializes as a tree where only group nodes carry `level` and
//! `options` markers.

use serde::{Deserialize, Serialize};

use super::location::{GeographicLevel, LocationId};

/// A node in the per-level option forest: either a leaf standing for
/// one input row, or a synthetic group node standing for an ancestor
/// area the leaves below it share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationOptionNode {
    /// The originating row. Present on leaves only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LocationId>,

    /// Display text, possibly disambiguated with the value
    pub label: String,

    /// Effective code of the place this node stands for
    pub value: String,

    /// The ancestor level a group node represents. Absent on leaves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<GeographicLevel>,

    /// Boundary geometry. Attached to leaves only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_json: Option<serde_json::Value>,

    /// Ordered children. Present on group nodes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<LocationOptionNode>>,
}

impl LocationOptionNode {
    /// Create a leaf node for one input row
    pub fn leaf(id: LocationId, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            label: label.into(),
            value: value.into(),
            level: None,
            geo_json: None,
            options: None,
        }
    }

    /// Create a group node for an ancestor area
    pub fn group(
        level: GeographicLevel,
        label: impl Into<String>,
        value: impl Into<String>,
        options: Vec<LocationOptionNode>,
    ) -> Self {
        Self {
            id: None,
            label: label.into(),
            value: value.into(),
            level: Some(level),
            geo_json: None,
            options: Some(options),
        }
    }

    /// Attach a boundary geometry payload
    pub fn with_geo_json(mut self, geo_json: serde_json::Value) -> Self {
        self.geo_json = Some(geo_json);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.options.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_serializes_without_group_markers() {
        let leaf = LocationOptionNode::leaf(LocationId::new(), "Derby", "E06000015");
        let json = serde_json::to_value(&leaf).unwrap();

        assert!(json.get("id").is_some());
        assert!(json.get("level").is_none());
        assert!(json.get("options").is_none());
        assert!(json.get("geo_json").is_none());
    }

    #[test]
    fn test_group_serializes_with_level_and_options() {
        let leaf = LocationOptionNode::leaf(LocationId::new(), "Derby", "E06000015");
        let group = LocationOptionNode::group(
            GeographicLevel::Country,
            "England",
            "E92000001",
            vec![leaf],
        );
        let json = serde_json::to_value(&group).unwrap();

        assert!(json.get("id").is_none());
        assert_eq!(json["level"], "Country");
        assert_eq!(json["options"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_node_round_trip() {
        let node = LocationOptionNode::leaf(LocationId::new(), "Derby", "E06000015")
            .with_geo_json(serde_json::json!({"type": "Point", "coordinates": [-1.47, 52.92]}));
        let json = serde_json::to_string(&node).unwrap();
        let parsed: LocationOptionNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, parsed);
    }
}
