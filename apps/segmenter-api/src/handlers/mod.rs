//! HTTP handlers

pub mod error;
pub mod segment;
pub mod user_segments;

pub use error::ApiError;
