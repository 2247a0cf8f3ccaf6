mod day_plan_repo;
mod repo_error;

pub use day_plan_repo::*;
pub use repo_error::RepositoryError;
