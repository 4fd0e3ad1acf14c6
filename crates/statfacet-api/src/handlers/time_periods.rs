use axum::Json;

use statfacet_core::periods::{TimePeriodQuery, TimePeriodRange};

use crate::dto::{PeriodDto, RangeRequest, RangeResponse};
use crate::error::ApiError;

pub async fn expand_range(Json(request): Json<RangeRequest>) -> Result<Json<RangeResponse>, ApiError> {
    tracing::info!(
        start = %request.start_code,
        end = %request.end_code,
        "Expanding time period range"
    );

    let query = TimePeriodQuery {
        start_year: request.start_year,
        start_code: request.start_code,
        end_year: request.end_year,
        end_code: request.end_code,
    };
    let range = TimePeriodRange::expand(&query)?;

    let periods = range.iter().map(PeriodDto::from).collect();
    Ok(Json(RangeResponse { periods }))
}
