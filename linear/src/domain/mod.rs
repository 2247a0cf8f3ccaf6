mod filters;
mod issue;
mod project;
mod viewer;

pub use filters::*;
pub use issue::*;
pub use project::*;
pub use viewer::*;
