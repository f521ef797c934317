use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Writer, async_trait};
use serde::Serialize;
use thiserror::Error;

use printcal_core::error::CoreError;
use printcal_service::error::{ExpandError, FetchError, RangeError};

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    RangeError(#[from] RangeError),

    #[error(transparent)]
    ExpandError(#[from] ExpandError),

    #[error(transparent)]
    FetchError(#[from] FetchError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// ## Summary
    /// Maps the error to the status code returned to the client.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::RangeError(_)
            | Self::BadRequest(_)
            | Self::FetchError(FetchError::InvalidUrl(_)) => StatusCode::BAD_REQUEST,
            Self::ExpandError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::FetchError(_) => StatusCode::BAD_GATEWAY,
            Self::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[async_trait]
impl Writer for AppError {
    async fn write(self, _req: &mut Request, _depot: &mut Depot, res: &mut Response) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
        }
        res.status_code(status);
        res.render(Json(ErrorResponse {
            error: self.to_string(),
        }));
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError::from(RangeError::UnknownPeriod("winter".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(FetchError::InvalidUrl("x".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(FetchError::Status {
                url: "https://school.example/cal.ics".into(),
                status: 404
            })
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::from(CoreError::InvariantViolation("missing")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
