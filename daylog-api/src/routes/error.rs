use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    LinearNotConnected,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
}

use crate::{
    adapters::inbound::http::IssueTrackerServiceError,
    domain::{DayPlanError, IssueTrackerError, OAuthStateError},
};

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<ErrorCode>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<DayPlanError> for ApiError {
    fn from(err: DayPlanError) -> Self {
        match err {
            DayPlanError::NotFound(_) => Self::not_found(err.to_string()),
            DayPlanError::InvalidInput(message) => Self::bad_request(message),
            DayPlanError::Storage(message) => {
                tracing::error!("Day plan storage failed: {}", message);
                Self::internal(message)
            }
        }
    }
}

impl From<IssueTrackerError> for ApiError {
    fn from(err: IssueTrackerError) -> Self {
        match err {
            IssueTrackerError::NotConnected => {
                Self::unauthorized(err.to_string()).with_code(ErrorCode::LinearNotConnected)
            }
            IssueTrackerError::Provider(message) => Self::internal(message),
        }
    }
}

impl From<IssueTrackerServiceError> for ApiError {
    fn from(err: IssueTrackerServiceError) -> Self {
        let api_error = Self::new(err.status, err.message);
        if err.status == StatusCode::UNAUTHORIZED {
            api_error.with_code(ErrorCode::LinearNotConnected)
        } else {
            api_error
        }
    }
}

impl From<OAuthStateError> for ApiError {
    fn from(err: OAuthStateError) -> Self {
        match err {
            OAuthStateError::Invalid => Self::bad_request("Invalid state."),
            OAuthStateError::InvalidKey => {
                tracing::error!("OAuth state key is misconfigured");
                Self::internal(err.to_string())
            }
        }
    }
}
