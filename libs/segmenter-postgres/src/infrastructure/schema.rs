//! Idempotent schema bootstrap
//!
//! Each statement is safe to run on every startup. Segment ids and user ids
//! are UUIDs; memberships cascade away with their segment.

use sqlx::PgPool;
use tracing::debug;

/// DDL statements, executed in order
pub const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS segments (
        id   UUID PRIMARY KEY,
        slug VARCHAR(255) NOT NULL UNIQUE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS user_segments (
        user_id    UUID NOT NULL,
        segment_id UUID NOT NULL REFERENCES segments (id) ON DELETE CASCADE,
        PRIMARY KEY (user_id, segment_id)
    )"#,
    // The primary key only covers lookups by user; cascades look up by segment
    r#"CREATE INDEX IF NOT EXISTS idx_user_segments_segment_id
        ON user_segments (segment_id)"#,
];

/// Create the tables and indexes if they don't exist yet
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    debug!(statements = SCHEMA.len(), "Schema ensured");
    Ok(())
}
