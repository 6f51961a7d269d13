//! Segment handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use segmenter_domain::segment::SegmentServicePort;
use tracing::info;

use crate::{
    dto::{
        segment::{CreateSegmentRequest, SegmentResponse},
        ErrorResponse, MessageResponse,
    },
    handlers::ApiError,
    AppState,
};

/// Create a segment
#[utoipa::path(
    post,
    path = "/segment",
    request_body = CreateSegmentRequest,
    responses(
        (status = 201, description = "Segment created", body = SegmentResponse),
        (status = 400, description = "Bad request - malformed body or slug", body = ErrorResponse),
        (status = 409, description = "Conflict - slug already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "segments"
)]
pub async fn create_segment_handler<S: SegmentServicePort>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CreateSegmentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    info!(slug = %payload.slug, "Received create segment request");

    let segment = state.segment_service.create_segment(payload.slug).await?;

    Ok((
        StatusCode::CREATED,
        Json(SegmentResponse {
            id: segment.id().to_string(),
            slug: segment.slug().to_string(),
        }),
    ))
}

/// Delete a segment and every membership referencing it
#[utoipa::path(
    delete,
    path = "/segment/{slug}",
    params(
        ("slug" = String, Path, description = "Slug of the segment to delete")
    ),
    responses(
        (status = 200, description = "Segment deleted", body = MessageResponse),
        (status = 400, description = "Bad request - malformed slug", body = ErrorResponse),
        (status = 404, description = "Segment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "segments"
)]
pub async fn delete_segment_handler<S: SegmentServicePort>(
    State(state): State<AppState<S>>,
    Path(slug): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    info!(slug = %slug, "Received delete segment request");

    state.segment_service.delete_segment(slug).await?;

    Ok(Json(MessageResponse {
        message: "Segment deleted".to_string(),
    }))
}
