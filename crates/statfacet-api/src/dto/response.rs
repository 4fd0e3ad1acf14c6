use serde::Serialize;

use statfacet_core::models::{TimeIdentifier, TimePeriod};

/// Expanded time period range response
#[derive(Debug, Serialize)]
pub struct RangeResponse {
    pub periods: Vec<PeriodDto>,
}

/// One expanded period with its display label
#[derive(Debug, Serialize)]
pub struct PeriodDto {
    pub year: i32,
    pub code: TimeIdentifier,
    pub label: String,
}

impl From<TimePeriod> for PeriodDto {
    fn from(period: TimePeriod) -> Self {
        Self {
            year: period.year,
            code: period.code,
            label: period.label(),
        }
    }
}
