mod day_plans;
mod issue_tracker;

pub use day_plans::*;
pub use issue_tracker::*;
