use thiserror::Error;

/// Errors that can occur during day-plan operations.
#[derive(Debug, Error)]
pub enum DayPlanError {
    #[error("day plan not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Storage(String),
}

impl DayPlanError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Errors from the issue tracker integration.
#[derive(Debug, Error)]
pub enum IssueTrackerError {
    #[error("Linear is not connected. Connect your account in Settings.")]
    NotConnected,
    #[error("{0}")]
    Provider(String),
}
