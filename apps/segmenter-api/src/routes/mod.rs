//! API routes

pub mod segment;
pub mod user_segments;

use std::any::Any;

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use segmenter_domain::segment::SegmentServicePort;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info_span};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::HttpConfig,
    dto::{
        segment::{CreateSegmentRequest, SegmentResponse},
        user_segments::{ChangeUserSegmentsRequest, ChangeUserSegmentsResponse, UserSegmentsResponse},
        ErrorResponse, MessageResponse,
    },
    handlers::{self, error::ApiError},
    AppState,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::segment::create_segment_handler,
        handlers::segment::delete_segment_handler,
        handlers::user_segments::get_user_segments_handler,
        handlers::user_segments::change_user_segments_handler,
        health_handler
    ),
    components(
        schemas(
            CreateSegmentRequest,
            SegmentResponse,
            UserSegmentsResponse,
            ChangeUserSegmentsRequest,
            ChangeUserSegmentsResponse,
            MessageResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "segments", description = "Segment management endpoints"),
        (name = "user-segments", description = "User membership endpoints"),
        (name = "health", description = "Health check endpoints")
    ),
    info(
        title = "Segmenter API",
        version = "0.1.0",
        description = "Assign named segments to users and query their memberships"
    )
)]
pub struct ApiDoc;

/// Create the main application router
///
/// Every request gets an `x-request-id` (generated unless the client sent
/// one) that is recorded on its tracing span and echoed in the response.
/// A panicking handler is answered with a 500 and the generic error body.
pub fn create_router<S: SegmentServicePort>(state: AppState<S>, http: &HttpConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");
                info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(http.request_timeout));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(segment::routes())
        .merge(user_segments::routes())
        .route("/health", axum::routing::get(health_handler))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware)
        .with_state(state)
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    error!(panic = %message, "Handler panicked");

    ApiError::internal().into_response()
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    ),
    tag = "health"
)]
async fn health_handler() -> &'static str {
    "OK"
}
