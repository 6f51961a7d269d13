//! DTOs for user membership endpoints

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Segments currently assigned to a user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserSegmentsResponse {
    #[schema(example = json!(["AVITO_DISCOUNT_30", "AVITO_VOICE_MESSAGES"]))]
    pub slugs: Vec<String>,
}

/// Request body for changing a user's segments
///
/// Both lists are optional and default to empty.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeUserSegmentsRequest {
    /// Segments to assign
    #[serde(default)]
    #[schema(example = json!(["AVITO_DISCOUNT_30"]))]
    pub add_slugs: Vec<String>,
    /// Segments to unassign
    #[serde(default)]
    #[schema(example = json!(["AVITO_VOICE_MESSAGES"]))]
    pub delete_slugs: Vec<String>,
}

/// Outcome of a segment change
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChangeUserSegmentsResponse {
    /// Memberships created
    pub added: usize,
    /// Memberships removed
    pub removed: u64,
}
