mod day_plan_repository;
mod issue_tracker_client;

pub use day_plan_repository::*;
pub use issue_tracker_client::*;
