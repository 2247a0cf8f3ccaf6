mod client;
mod dto;

pub use client::{ApiClient, ApiError};
