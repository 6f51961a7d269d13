//! User membership routes

use axum::{routing::get, Router};
use segmenter_domain::segment::SegmentServicePort;

use crate::{
    handlers::user_segments::{change_user_segments_handler, get_user_segments_handler},
    AppState,
};

/// Create user membership routes
pub fn routes<S: SegmentServicePort>() -> Router<AppState<S>> {
    Router::new().route(
        "/segments/user/:user_id",
        get(get_user_segments_handler::<S>).put(change_user_segments_handler::<S>),
    )
}
