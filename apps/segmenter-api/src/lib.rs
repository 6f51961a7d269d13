//! Segmenter API - HTTP transport for the segmentation service
//!
//! Exposes segment management and user membership changes over HTTP. The
//! handlers only decode requests and map errors; the rules live in
//! `segmenter-domain`, persistence in `segmenter-postgres`.

pub mod config;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

use segmenter_domain::segment::SegmentServicePort;

/// Application state shared across handlers
pub struct AppState<S> {
    pub segment_service: Arc<S>,
}

impl<S: SegmentServicePort> AppState<S> {
    pub fn new(segment_service: S) -> Self {
        Self {
            segment_service: Arc::new(segment_service),
        }
    }
}

// Manual impl: deriving would demand `S: Clone`
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            segment_service: Arc::clone(&self.segment_service),
        }
    }
}
