pub mod cookies;
mod issue_tracker;
mod responses;

pub use issue_tracker::{IssueTrackerServiceError, IssueTrackerServiceFactory};
pub use responses::*;
