//! DTOs for segment endpoints

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for segment creation
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSegmentRequest {
    /// Unique human-readable name of the segment
    #[schema(example = "AVITO_VOICE_MESSAGES")]
    pub slug: String,
}

/// Response body for a created segment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SegmentResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: String,
    #[schema(example = "AVITO_VOICE_MESSAGES")]
    pub slug: String,
}
