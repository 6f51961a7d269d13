//! Segment domain module
//!
//! Segments, user memberships, the errors they can produce and the service
//! that enforces the business rules around them.

mod entity;
mod error;
mod ids;
mod ports;
mod service;

pub use entity::{ChangeSummary, Segment, SegmentChange, Slug, MAX_SLUG_LEN};
pub use error::{ErrorKind, Result, SegmentError};
pub use ids::{SegmentId, UserId};
pub use ports::SegmentServicePort;
pub use service::{SegmentService, SegmentServiceConfig};
