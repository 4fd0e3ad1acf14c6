//! Hierarchy configuration: which ancestor levels each geographic
//! level nests under.
//!
//! The built-in nesting covers the standard publication filters; a
//! deployment can replace it with a TOML file, either loaded directly
//! or pointed at by the `STATFACET_HIERARCHY_CONFIG` environment
//! variable.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use crate::error::{Result, StatfacetError};
use crate::models::location::GeographicLevel;

/// Environment variable naming a TOML file to load the nesting from
pub const HIERARCHY_CONFIG_ENV: &str = "STATFACET_HIERARCHY_CONFIG";

/// Mapping from a geographic level to the ancestor levels its options
/// nest under, outermost first. Levels without an entry are emitted
/// flat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyConfig {
    nesting: BTreeMap<GeographicLevel, Vec<GeographicLevel>>,
}

/// On-disk shape of a hierarchy configuration file
#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    hierarchies: BTreeMap<String, Vec<String>>,
}

impl HierarchyConfig {
    /// An empty configuration: every level flat
    pub fn flat() -> Self {
        Self::default()
    }

    /// The built-in nesting used by the publication filters
    pub fn standard() -> Self {
        let mut config = Self::flat();
        config.set(
            GeographicLevel::LocalAuthority,
            vec![GeographicLevel::Country, GeographicLevel::Region],
        );
        config.set(
            GeographicLevel::LocalAuthorityDistrict,
            vec![
                GeographicLevel::Country,
                GeographicLevel::Region,
                GeographicLevel::LocalAuthority,
            ],
        );
        config.set(
            GeographicLevel::Ward,
            vec![
                GeographicLevel::Country,
                GeographicLevel::Region,
                GeographicLevel::LocalAuthority,
                GeographicLevel::LocalAuthorityDistrict,
            ],
        );
        config.set(
            GeographicLevel::School,
            vec![
                GeographicLevel::Country,
                GeographicLevel::Region,
                GeographicLevel::LocalAuthority,
            ],
        );
        config
    }

    /// Build a configuration from an already-typed nesting map
    pub fn from_nesting(nesting: BTreeMap<GeographicLevel, Vec<GeographicLevel>>) -> Self {
        let mut config = Self::flat();
        for (level, ancestors) in nesting {
            config.set(level, ancestors);
        }
        config
    }

    /// Set the ancestors for a level; an empty list makes it flat
    pub fn set(&mut self, level: GeographicLevel, ancestors: Vec<GeographicLevel>) {
        if ancestors.is_empty() {
            self.nesting.remove(&level);
        } else {
            self.nesting.insert(level, ancestors);
        }
    }

    /// Ancestor levels configured for a level, outermost first; empty
    /// when the level is emitted flat
    pub fn ancestors_for(&self, level: GeographicLevel) -> &[GeographicLevel] {
        self.nesting
            .get(&level)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Load a configuration from a TOML file.
    ///
    /// Expected shape:
    ///
    /// ```toml
    /// [hierarchies]
    /// LocalAuthority = ["Country", "Region"]
    /// ```
    ///
    /// Unknown level names are a configuration error, not silently
    /// skipped.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let file_config: FileConfig =
            toml::from_str(&content).map_err(|err| StatfacetError::ConfigInvalid {
                reason: format!("Failed to parse TOML: {}", err),
            })?;

        let mut config = Self::flat();
        for (level_name, ancestor_names) in file_config.hierarchies {
            let level = parse_level(&level_name)?;
            let ancestors = ancestor_names
                .iter()
                .map(|name| parse_level(name))
                .collect::<Result<Vec<_>>>()?;
            config.set(level, ancestors);
        }
        Ok(config)
    }

    /// The deployment configuration: the file named by
    /// `STATFACET_HIERARCHY_CONFIG` when set, the built-in nesting
    /// otherwise.
    pub fn load() -> Result<Self> {
        match env::var(HIERARCHY_CONFIG_ENV) {
            Ok(path) => Self::load_from_file(path),
            Err(_) => {
                tracing::debug!(
                    "{} not set, using built-in hierarchy configuration",
                    HIERARCHY_CONFIG_ENV
                );
                Ok(Self::standard())
            }
        }
    }
}

fn parse_level(name: &str) -> Result<GeographicLevel> {
    GeographicLevel::from_name(name).ok_or_else(|| StatfacetError::UnknownLevel {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_nesting() {
        let config = HierarchyConfig::standard();

        assert_eq!(
            config.ancestors_for(GeographicLevel::LocalAuthority),
            &[GeographicLevel::Country, GeographicLevel::Region]
        );
        assert!(config.ancestors_for(GeographicLevel::Country).is_empty());
        assert!(config.ancestors_for(GeographicLevel::Region).is_empty());
    }

    #[test]
    fn test_empty_ancestor_list_means_flat() {
        let mut config = HierarchyConfig::standard();
        config.set(GeographicLevel::LocalAuthority, vec![]);
        assert!(config.ancestors_for(GeographicLevel::LocalAuthority).is_empty());
    }
}
