//! Infrastructure adapters backed by PostgreSQL

mod config;
mod pg_repository;
pub mod schema;

pub use config::PgConfig;
pub use pg_repository::PgSegmentStore;
