//! Request and response bodies

pub mod segment;
pub mod user_segments;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error description
    #[schema(example = "Some segments were not found, number: 1")]
    pub error: String,
    /// Slugs that caused a conflict, present on 409 responses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(example = json!(["AVITO_VOICE_MESSAGES"]))]
    pub slugs: Vec<String>,
    /// Number of unknown segments, present when a change referenced them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<usize>,
}

/// Plain acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Segment deleted")]
    pub message: String,
}
