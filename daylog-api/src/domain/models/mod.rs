mod day_plan;
mod ids;
mod summary;
mod tracker;
mod unified_project;

pub use day_plan::*;
pub use ids::*;
pub use summary::*;
pub use tracker::*;
pub use unified_project::*;
