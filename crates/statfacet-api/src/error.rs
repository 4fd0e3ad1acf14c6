use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use statfacet_core::StatfacetError;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<StatfacetError> for ApiError {
    fn from(err: StatfacetError) -> Self {
        match &err {
            // Caller-input validation failures
            StatfacetError::MissingYear
            | StatfacetError::YearOutOfRange { .. }
            | StatfacetError::MismatchedPeriodFamily { .. }
            | StatfacetError::InvalidRange { .. }
            | StatfacetError::UnknownTimeIdentifier { .. } => {
                Self::bad_request("Invalid query").with_details(err.to_string())
            }
            // Deployment misconfiguration
            StatfacetError::MissingAttribute { .. }
            | StatfacetError::UnknownLevel { .. }
            | StatfacetError::ConfigInvalid { .. }
            | StatfacetError::Io(_) => {
                Self::internal("Invalid hierarchy configuration").with_details(err.to_string())
            }
        }
    }
}
