mod error;
pub mod models;
mod oauth_state;
pub mod ports;
pub mod services;

pub use error::*;
pub use oauth_state::*;
