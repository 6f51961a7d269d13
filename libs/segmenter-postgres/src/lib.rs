//! # Segmenter PostgreSQL Adapter
//!
//! Implements the domain's `SegmentCatalog` and `MembershipRepository` ports
//! on top of a bounded `sqlx` connection pool. Uniqueness, referential
//! integrity and cascading deletes are enforced by the database schema
//! bootstrapped in [`infrastructure::schema`].

pub mod infrastructure;

pub use infrastructure::{PgConfig, PgSegmentStore};
