//! User membership handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use segmenter_domain::segment::{SegmentServicePort, UserId};
use tracing::info;

use crate::{
    dto::{
        user_segments::{ChangeUserSegmentsRequest, ChangeUserSegmentsResponse, UserSegmentsResponse},
        ErrorResponse,
    },
    handlers::ApiError,
    AppState,
};

/// List the segments assigned to a user
#[utoipa::path(
    get,
    path = "/segments/user/{user_id}",
    params(
        ("user_id" = String, Path, description = "UUID of the user")
    ),
    responses(
        (status = 200, description = "Current segments of the user", body = UserSegmentsResponse),
        (status = 400, description = "Bad request - user id is not a UUID", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "user-segments"
)]
pub async fn get_user_segments_handler<S: SegmentServicePort>(
    State(state): State<AppState<S>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserSegmentsResponse>, ApiError> {
    let user_id = UserId::parse(&user_id)?;

    let slugs = state.segment_service.user_segments(user_id).await?;

    Ok(Json(UserSegmentsResponse {
        slugs: slugs.into_iter().map(String::from).collect(),
    }))
}

/// Add and remove segments of a user in one atomic step
#[utoipa::path(
    put,
    path = "/segments/user/{user_id}",
    params(
        ("user_id" = String, Path, description = "UUID of the user")
    ),
    request_body = ChangeUserSegmentsRequest,
    responses(
        (status = 200, description = "Segments changed", body = ChangeUserSegmentsResponse),
        (status = 400, description = "Bad request - malformed body, slug or user id", body = ErrorResponse),
        (status = 404, description = "Some segments don't exist; nothing was changed", body = ErrorResponse),
        (status = 409, description = "User already has some segments; nothing was changed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "user-segments"
)]
pub async fn change_user_segments_handler<S: SegmentServicePort>(
    State(state): State<AppState<S>>,
    Path(user_id): Path<String>,
    payload: Result<Json<ChangeUserSegmentsRequest>, JsonRejection>,
) -> Result<Json<ChangeUserSegmentsResponse>, ApiError> {
    let user_id = UserId::parse(&user_id)?;
    let Json(payload) = payload?;
    info!(
        user_id = %user_id,
        add_slugs = ?payload.add_slugs,
        delete_slugs = ?payload.delete_slugs,
        "Received change user segments request"
    );

    let summary = state
        .segment_service
        .change_user_segments(user_id, payload.add_slugs, payload.delete_slugs)
        .await?;

    Ok(Json(ChangeUserSegmentsResponse {
        added: summary.added,
        removed: summary.removed,
    }))
}
