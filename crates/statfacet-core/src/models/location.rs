//! Geographic location rows as fetched from the reference store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a location row
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct LocationId(pub Uuid);

impl LocationId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Granularity of a geographic area.
///
/// Declaration order is containment order: a Country contains Regions,
/// a Region contains LocalAuthorities, and so on. Levels past Ward are
/// parallel subdivisions rather than strict refinements.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum GeographicLevel {
    Country,
    Region,
    LocalAuthority,
    LocalAuthorityDistrict,
    Ward,
    ParliamentaryConstituency,
    Institution,
    Provider,
    School,
}

impl GeographicLevel {
    /// All levels, in containment order
    pub const ALL: [GeographicLevel; 9] = [
        GeographicLevel::Country,
        GeographicLevel::Region,
        GeographicLevel::LocalAuthority,
        GeographicLevel::LocalAuthorityDistrict,
        GeographicLevel::Ward,
        GeographicLevel::ParliamentaryConstituency,
        GeographicLevel::Institution,
        GeographicLevel::Provider,
        GeographicLevel::School,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GeographicLevel::Country => "Country",
            GeographicLevel::Region => "Region",
            GeographicLevel::LocalAuthority => "LocalAuthority",
            GeographicLevel::LocalAuthorityDistrict => "LocalAuthorityDistrict",
            GeographicLevel::Ward => "Ward",
            GeographicLevel::ParliamentaryConstituency => "ParliamentaryConstituency",
            GeographicLevel::Institution => "Institution",
            GeographicLevel::Provider => "Provider",
            GeographicLevel::School => "School",
        }
    }

    /// Parse a level from its canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|level| level.name() == name)
    }
}

impl fmt::Display for GeographicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One named place at one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationAttribute {
    /// Display text
    pub name: String,

    /// Canonical identifier, absent for some historical areas
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Legacy identifier, consulted only when `code` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_code: Option<String>,
}

impl LocationAttribute {
    /// Create an attribute with a modern code
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: Some(code.into()),
            old_code: None,
        }
    }

    /// Create an attribute carrying only a legacy code
    pub fn with_old_code(name: impl Into<String>, old_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: None,
            old_code: Some(old_code.into()),
        }
    }

    /// Canonical identifier for this place: the code, or the legacy
    /// code when no modern code exists. Two attributes denote the same
    /// place iff their effective values are equal.
    pub fn effective_value(&self) -> &str {
        match &self.code {
            Some(code) if !code.is_empty() => code,
            _ => self.old_code.as_deref().unwrap_or(""),
        }
    }
}

/// One input record: a place at its own level, plus the attributes of
/// whichever ancestor levels the source row carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRow {
    pub id: LocationId,
    pub level: GeographicLevel,
    pub attributes: BTreeMap<GeographicLevel, LocationAttribute>,
}

impl LocationRow {
    /// Create a row with its own-level attribute set
    pub fn new(id: LocationId, level: GeographicLevel, attribute: LocationAttribute) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(level, attribute);
        Self { id, level, attributes }
    }

    /// Attach an ancestor attribute
    pub fn with_ancestor(mut self, level: GeographicLevel, attribute: LocationAttribute) -> Self {
        self.attributes.insert(level, attribute);
        self
    }

    /// The attribute this row carries for a given level, if any
    pub fn attribute(&self, level: GeographicLevel) -> Option<&LocationAttribute> {
        self.attributes.get(&level)
    }

    /// The attribute for the row's own level
    pub fn own_attribute(&self) -> Option<&LocationAttribute> {
        self.attributes.get(&self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_value_prefers_code() {
        let attribute = LocationAttribute {
            name: "Derby".to_string(),
            code: Some("E06000015".to_string()),
            old_code: Some("831".to_string()),
        };
        assert_eq!(attribute.effective_value(), "E06000015");
    }

    #[test]
    fn test_effective_value_falls_back_to_old_code() {
        let attribute =
            LocationAttribute::with_old_code("Cheshire (Pre LGR 2009)", "875");
        assert_eq!(attribute.effective_value(), "875");
    }

    #[test]
    fn test_effective_value_treats_empty_code_as_absent() {
        let attribute = LocationAttribute {
            name: "Cheshire (Pre LGR 2009)".to_string(),
            code: Some(String::new()),
            old_code: Some("875".to_string()),
        };
        assert_eq!(attribute.effective_value(), "875");
    }

    #[test]
    fn test_effective_value_empty_when_no_codes() {
        let attribute = LocationAttribute {
            name: "Unknown".to_string(),
            code: None,
            old_code: None,
        };
        assert_eq!(attribute.effective_value(), "");
    }

    #[test]
    fn test_level_name_round_trip() {
        for level in GeographicLevel::ALL {
            assert_eq!(GeographicLevel::from_name(level.name()), Some(level));
        }
        assert_eq!(GeographicLevel::from_name("Continent"), None);
    }

    #[test]
    fn test_level_containment_order() {
        assert!(GeographicLevel::Country < GeographicLevel::Region);
        assert!(GeographicLevel::Region < GeographicLevel::LocalAuthority);
        assert!(GeographicLevel::LocalAuthority < GeographicLevel::LocalAuthorityDistrict);
    }

    #[test]
    fn test_row_ancestor_attributes() {
        let row = LocationRow::new(
            LocationId::new(),
            GeographicLevel::LocalAuthority,
            LocationAttribute::new("Derby", "E06000015"),
        )
        .with_ancestor(
            GeographicLevel::Country,
            LocationAttribute::new("England", "E92000001"),
        );

        assert_eq!(row.own_attribute().unwrap().name, "Derby");
        assert_eq!(
            row.attribute(GeographicLevel::Country).unwrap().effective_value(),
            "E92000001"
        );
        assert!(row.attribute(GeographicLevel::Region).is_none());
    }
}
