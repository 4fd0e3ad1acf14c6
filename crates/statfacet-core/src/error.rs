//! Error types for statfacet

use thiserror::Error;

use crate::models::location::{GeographicLevel, LocationId};
use crate::models::time::TimeIdentifier;

#[derive(Debug, Error)]
pub enum StatfacetError {
    // Hierarchy configuration errors
    #[error("Location {location} at level {level} does not carry the {missing} attribute required by the hierarchy configuration")]
    MissingAttribute {
        location: LocationId,
        level: GeographicLevel,
        missing: GeographicLevel,
    },

    #[error("Unknown geographic level: {name}")]
    UnknownLevel { name: String },

    #[error("Invalid hierarchy configuration: {reason}")]
    ConfigInvalid { reason: String },

    // Time period query errors
    #[error("Both a start year and an end year are required")]
    MissingYear,

    #[error("Year {year} is outside the supported range {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("Start period {start} and end period {end} belong to different time period families")]
    MismatchedPeriodFamily {
        start: TimeIdentifier,
        end: TimeIdentifier,
    },

    #[error("Start period {start_year} {start} is after end period {end_year} {end}")]
    InvalidRange {
        start_year: i32,
        start: TimeIdentifier,
        end_year: i32,
        end: TimeIdentifier,
    },

    #[error("Unknown time period code: {code}")]
    UnknownTimeIdentifier { code: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StatfacetError>;
