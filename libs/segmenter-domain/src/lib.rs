//! # Segmenter Domain Layer
//!
//! Pure business logic for the segmentation service: operators define named
//! segments and assign them to users.
//!
//! - **Entities**: `Segment`, `Slug`, `UserId`, `SegmentChange`
//! - **Ports**: `SegmentCatalog` and `MembershipRepository` for the store,
//!   `SegmentServicePort` for the transport layer
//! - **Services**: `SegmentService`, validation and timeouts around the store
//!
//! ## Architecture
//!
//! This crate has no dependency on the database or on HTTP. Adapters
//! implement the ports.
//!
//! ## Example
//!
//! ```rust
//! use segmenter_domain::ports::{MembershipRepository, SegmentCatalog};
//! use segmenter_domain::segment::{SegmentService, SegmentServicePort, UserId};
//!
//! async fn example<R: SegmentCatalog + MembershipRepository + 'static>(service: SegmentService<R>) {
//!     let user = UserId::new();
//!     service.create_segment("beta".to_string()).await.unwrap();
//!     service
//!         .change_user_segments(user, vec!["beta".to_string()], vec![])
//!         .await
//!         .unwrap();
//!     let slugs = service.user_segments(user).await.unwrap();
//!     assert_eq!(slugs.len(), 1);
//! }
//! ```

pub mod ports;
pub mod segment;

// Re-export commonly used types
pub use ports::{MembershipRepository, SegmentCatalog};
pub use segment::{
    ChangeSummary, ErrorKind, Segment, SegmentChange, SegmentError, SegmentId, SegmentService,
    SegmentServiceConfig, SegmentServicePort, Slug, UserId,
};
