//! PostgreSQL Segment Store Implementation
//!
//! This module implements the `SegmentCatalog` and `MembershipRepository`
//! ports with `sqlx`. Database errors are converted to domain errors here and
//! never travel further up as raw driver text.

use std::collections::HashSet;

use segmenter_domain::{
    ports::{MembershipRepository, SegmentCatalog},
    segment::{ChangeSummary, Segment, SegmentChange, SegmentError, Slug, UserId},
};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::{config::PgConfig, schema};

/// Row of the `segments` table
#[derive(Debug, Clone, sqlx::FromRow)]
struct SegmentRow {
    id: Uuid,
    slug: String,
}

/// PostgreSQL-backed segment store
///
/// Cheap to clone: clones share the same bounded connection pool. The store
/// keeps no state of its own, so it is safe to call from many tasks at once;
/// isolation is left to the database's transactions and constraints.
///
/// ## Error Handling
///
/// - unique violations become `SlugTaken` / `AlreadyAssigned`
/// - unknown slugs become `SegmentNotFound` / `MissingSegments`
/// - everything else becomes `SegmentError::Internal` tagged with the operation
#[derive(Clone)]
pub struct PgSegmentStore {
    pool: PgPool,
}

impl PgSegmentStore {
    /// Connect to PostgreSQL and make sure the schema exists
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use segmenter_postgres::{PgConfig, PgSegmentStore};
    ///
    /// # async fn example() {
    /// let store = PgSegmentStore::connect(&PgConfig::default()).await.unwrap();
    /// store.close().await;
    /// # }
    /// ```
    pub async fn connect(config: &PgConfig) -> Result<Self, SegmentError> {
        info!(config = ?config, "Connecting to PostgreSQL");

        let options = config
            .connect_options()
            .map_err(|err| internal("connect", err))?;

        let pool = config
            .pool_options()
            .connect_with(options)
            .await
            .map_err(|err| internal("connect", err))?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Wrap an existing pool; the schema is assumed to be in place
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), SegmentError> {
        schema::ensure_schema(&self.pool)
            .await
            .map_err(|err| internal("ensure_schema", err))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close every pooled connection; pending acquires fail afterwards
    pub async fn close(&self) {
        info!("Closing PostgreSQL pool");
        self.pool.close().await;
    }

    /// Resolve slugs to segments in one round trip
    ///
    /// `lock` takes a share lock on the resolved rows so they can't be
    /// deleted before the surrounding transaction ends.
    async fn resolve(
        conn: &mut PgConnection,
        slugs: &[Slug],
        lock: bool,
    ) -> Result<Vec<SegmentRow>, SegmentError> {
        let query = if lock {
            "SELECT id, slug FROM segments WHERE slug = ANY($1) FOR SHARE"
        } else {
            "SELECT id, slug FROM segments WHERE slug = ANY($1)"
        };
        let wanted: Vec<String> = slugs.iter().map(|slug| slug.to_string()).collect();

        let rows: Vec<SegmentRow> = sqlx::query_as(query)
            .bind(&wanted)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| internal("resolve_segments", err))?;

        match missing_count(slugs.len(), rows.len()) {
            0 => Ok(rows),
            missing => {
                warn!(requested = slugs.len(), missing, "Some segments were not found");
                Err(SegmentError::missing_segments(missing))
            }
        }
    }

    async fn add_memberships(
        conn: &mut PgConnection,
        user_id: UserId,
        slugs: &[Slug],
    ) -> Result<usize, SegmentError> {
        let segments = Self::resolve(conn, slugs, true).await?;
        let ids: Vec<Uuid> = segments.iter().map(|segment| segment.id).collect();

        // ON CONFLICT keeps the transaction usable, so every duplicate is
        // reported rather than only the first one
        let inserted: Vec<Uuid> = sqlx::query_scalar(
            "INSERT INTO user_segments (user_id, segment_id) \
             SELECT $1, UNNEST($2::uuid[]) \
             ON CONFLICT (user_id, segment_id) DO NOTHING \
             RETURNING segment_id",
        )
        .bind(*user_id.as_uuid())
        .bind(&ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| internal("add_user_segments", err))?;

        let conflicts = already_assigned(&segments, &inserted);
        if !conflicts.is_empty() {
            warn!(user_id = %user_id, conflicts = ?conflicts, "User already has segments");
            return Err(SegmentError::already_assigned(conflicts));
        }

        Ok(inserted.len())
    }

    async fn delete_memberships(
        conn: &mut PgConnection,
        user_id: UserId,
        slugs: &[Slug],
    ) -> Result<u64, SegmentError> {
        let segments = Self::resolve(conn, slugs, false).await?;
        let ids: Vec<Uuid> = segments.iter().map(|segment| segment.id).collect();

        let result =
            sqlx::query("DELETE FROM user_segments WHERE user_id = $1 AND segment_id = ANY($2)")
                .bind(*user_id.as_uuid())
                .bind(&ids)
                .execute(&mut *conn)
                .await
                .map_err(|err| internal("delete_user_segments", err))?;

        Ok(result.rows_affected())
    }

    async fn apply_change(
        conn: &mut PgConnection,
        user_id: UserId,
        change: &SegmentChange,
    ) -> Result<ChangeSummary, SegmentError> {
        let mut summary = ChangeSummary::default();

        if !change.add().is_empty() {
            summary.added = Self::add_memberships(conn, user_id, change.add()).await?;
        }

        if !change.delete().is_empty() {
            summary.removed = Self::delete_memberships(conn, user_id, change.delete()).await?;
        }

        Ok(summary)
    }
}

impl SegmentCatalog for PgSegmentStore {
    #[instrument(skip_all, fields(slug = %segment.slug(), segment_id = %segment.id()))]
    async fn create_segment(&self, segment: &Segment) -> Result<(), SegmentError> {
        debug!("Inserting segment");

        let result = sqlx::query("INSERT INTO segments (id, slug) VALUES ($1, $2)")
            .bind(*segment.id().as_uuid())
            .bind(segment.slug().as_str())
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(SegmentError::SlugTaken(segment.slug().to_string()))
            }
            Err(err) => Err(internal("create_segment", err)),
        }
    }

    #[instrument(skip_all, fields(slug = %slug))]
    async fn delete_segment(&self, slug: &Slug) -> Result<(), SegmentError> {
        // A single statement: memberships go with the segment through the
        // foreign key cascade, so no insert can slip in between
        let result = sqlx::query("DELETE FROM segments WHERE slug = $1")
            .bind(slug.as_str())
            .execute(&self.pool)
            .await
            .map_err(|err| internal("delete_segment", err))?;

        if result.rows_affected() == 0 {
            return Err(SegmentError::SegmentNotFound(slug.to_string()));
        }

        debug!("Segment row deleted");
        Ok(())
    }
}

impl MembershipRepository for PgSegmentStore {
    #[instrument(skip_all, fields(user_id = %user_id))]
    async fn user_segments(&self, user_id: UserId) -> Result<Vec<Slug>, SegmentError> {
        let slugs: Vec<String> = sqlx::query_scalar(
            "SELECT s.slug FROM user_segments us \
             INNER JOIN segments s ON us.segment_id = s.id \
             WHERE us.user_id = $1 \
             ORDER BY s.slug",
        )
        .bind(*user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|err| internal("user_segments", err))?;

        debug!(count = slugs.len(), "Fetched user segments");
        Ok(slugs.into_iter().map(Slug::from_persisted).collect())
    }

    #[instrument(
        skip_all,
        fields(user_id = %user_id, add = change.add().len(), delete = change.delete().len())
    )]
    async fn change_user_segments(
        &self,
        user_id: UserId,
        change: &SegmentChange,
    ) -> Result<ChangeSummary, SegmentError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|err| internal("change_user_segments", err))?;

        match Self::apply_change(&mut *tx, user_id, change).await {
            Ok(summary) => {
                tx.commit()
                    .await
                    .map_err(|err| internal("change_user_segments", err))?;
                debug!(added = summary.added, removed = summary.removed, "Transaction committed");
                Ok(summary)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }
}

/// Number of requested slugs that did not resolve
fn missing_count(requested: usize, resolved: usize) -> usize {
    requested.saturating_sub(resolved)
}

/// Slugs of the resolved segments the insert did not return
fn already_assigned(segments: &[SegmentRow], inserted: &[Uuid]) -> Vec<String> {
    let inserted: HashSet<&Uuid> = inserted.iter().collect();
    segments
        .iter()
        .filter(|segment| !inserted.contains(&segment.id))
        .map(|segment| segment.slug.clone())
        .collect()
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Log a driver error and hide it behind a domain error
fn internal(operation: &'static str, err: sqlx::Error) -> SegmentError {
    error!(operation, error = ?err, "PostgreSQL operation failed");
    SegmentError::internal(operation, err.to_string())
}
