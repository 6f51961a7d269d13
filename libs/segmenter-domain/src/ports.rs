//! Ports (trait definitions) for the segment store
//!
//! The domain defines what it needs from persistence, adapters provide it.
//! The store is split into two narrow capabilities so a consumer only
//! depends on the half it uses.
//!
//! ## Static Dispatch
//!
//! Methods return `impl Future` instead of going through `async_trait`, so
//! every implementation is monomorphized and no trait objects are involved.

use std::future::Future;

use crate::segment::{ChangeSummary, Segment, SegmentChange, SegmentError, Slug, UserId};

/// Port for creating and deleting segments
pub trait SegmentCatalog: Send + Sync {
    /// Persist a new segment
    ///
    /// # Errors
    ///
    /// - `SegmentError::SlugTaken` if a segment with the same slug exists
    /// - `SegmentError::Internal` on store failure
    fn create_segment(
        &self,
        segment: &Segment,
    ) -> impl Future<Output = Result<(), SegmentError>> + Send;

    /// Delete a segment and, through the store's cascade, every membership
    /// referencing it
    ///
    /// # Errors
    ///
    /// - `SegmentError::SegmentNotFound` if no segment has this slug
    /// - `SegmentError::Internal` on store failure
    fn delete_segment(&self, slug: &Slug) -> impl Future<Output = Result<(), SegmentError>> + Send;
}

/// Port for reading and changing a user's segment memberships
pub trait MembershipRepository: Send + Sync {
    /// Slugs of every segment assigned to `user_id`, ordered by slug
    ///
    /// A user without memberships yields an empty list, not an error.
    fn user_segments(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Slug>, SegmentError>> + Send;

    /// Apply `change` to `user_id` in a single transaction
    ///
    /// Implementations must be all-or-nothing across both the add and the
    /// delete set: on any error no membership change may become visible.
    ///
    /// # Errors
    ///
    /// - `SegmentError::MissingSegments` if any listed slug is unknown
    /// - `SegmentError::AlreadyAssigned` naming every slug the user already had
    /// - `SegmentError::Internal` on store failure
    fn change_user_segments(
        &self,
        user_id: UserId,
        change: &SegmentChange,
    ) -> impl Future<Output = Result<ChangeSummary, SegmentError>> + Send;
}
