mod auth;
mod client;
pub mod domain;
mod linear_url;
mod oauth;

pub(crate) use linear_url::*;

pub use auth::*;
pub use client::*;
pub use oauth::*;
