//! Port trait for the Segment Service
//!
//! The HTTP layer depends on this trait rather than on `SegmentService<R>`
//! directly, so handlers can be exercised against a fake in tests.

use std::future::Future;

use crate::segment::{ChangeSummary, Segment, SegmentError, Slug, UserId};

/// The four segmentation operations, taking raw transport input
pub trait SegmentServicePort: Send + Sync + 'static {
    /// Create a segment named `slug`
    ///
    /// # Errors
    ///
    /// - `SegmentError::Validation` if the slug is malformed
    /// - `SegmentError::SlugTaken` if the slug is already used
    /// - `SegmentError::Internal` on store failure or timeout
    fn create_segment(
        &self,
        slug: String,
    ) -> impl Future<Output = Result<Segment, SegmentError>> + Send;

    /// Delete the segment named `slug` together with its memberships
    ///
    /// # Errors
    ///
    /// - `SegmentError::Validation` if the slug is malformed
    /// - `SegmentError::SegmentNotFound` if the slug is unknown
    /// - `SegmentError::Internal` on store failure or timeout
    fn delete_segment(&self, slug: String) -> impl Future<Output = Result<(), SegmentError>> + Send;

    /// Segments currently assigned to `user_id`
    fn user_segments(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Slug>, SegmentError>> + Send;

    /// Atomically add `add_slugs` to and remove `delete_slugs` from `user_id`
    ///
    /// # Errors
    ///
    /// - `SegmentError::Validation` if any slug is malformed
    /// - `SegmentError::MissingSegments` if any slug is unknown
    /// - `SegmentError::AlreadyAssigned` if the user already has added slugs
    /// - `SegmentError::Internal` on store failure or timeout
    fn change_user_segments(
        &self,
        user_id: UserId,
        add_slugs: Vec<String>,
        delete_slugs: Vec<String>,
    ) -> impl Future<Output = Result<ChangeSummary, SegmentError>> + Send;
}
