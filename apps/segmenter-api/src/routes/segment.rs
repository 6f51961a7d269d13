//! Segment routes

use axum::{
    routing::{delete, post},
    Router,
};
use segmenter_domain::segment::SegmentServicePort;

use crate::{
    handlers::segment::{create_segment_handler, delete_segment_handler},
    AppState,
};

/// Create segment routes
pub fn routes<S: SegmentServicePort>() -> Router<AppState<S>> {
    Router::new()
        .route("/segment", post(create_segment_handler::<S>))
        .route("/segment/:slug", delete(delete_segment_handler::<S>))
}
