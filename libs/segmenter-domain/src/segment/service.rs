//! Segment service - Business logic orchestration
//!
//! Turns raw transport input into validated domain values, bounds every
//! store call with a deadline and logs the outcome. The transactional work
//! itself belongs to the store behind the ports.

use std::future::Future;
use std::time::Duration;

use tracing::{error, info, warn};

use super::{
    ChangeSummary, ErrorKind, Segment, SegmentChange, SegmentError, SegmentServicePort, Slug,
    UserId,
};
use crate::ports::{MembershipRepository, SegmentCatalog};

/// Configuration for the segment service
#[derive(Debug, Clone)]
pub struct SegmentServiceConfig {
    /// Deadline applied to every store call (default: 5s)
    pub operation_timeout: Duration,
}

impl Default for SegmentServiceConfig {
    fn default() -> Self {
        Self {
            operation_timeout: Duration::from_secs(5),
        }
    }
}

/// Service for managing segments and user memberships
///
/// Generic over the store so the compiler specializes it per adapter. The
/// service holds no mutable state and can be shared freely across tasks.
pub struct SegmentService<R> {
    repository: R,
    config: SegmentServiceConfig,
}

impl<R> SegmentService<R>
where
    R: SegmentCatalog + MembershipRepository,
{
    /// Create a new SegmentService with the given repository and configuration
    pub fn new(repository: R, config: SegmentServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Create a new SegmentService with default configuration
    pub fn with_repository(repository: R) -> Self {
        Self::new(repository, SegmentServiceConfig::default())
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn config(&self) -> &SegmentServiceConfig {
        &self.config
    }

    /// Await `fut`, giving up once the configured deadline passes
    ///
    /// Dropping the store future on expiry is what rolls back an in-flight
    /// transaction.
    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T, SegmentError>>,
    ) -> Result<T, SegmentError> {
        let result = match tokio::time::timeout(self.config.operation_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(SegmentError::timeout(operation, self.config.operation_timeout)),
        };

        if let Err(err) = &result {
            log_failure(operation, err);
        }

        result
    }
}

fn log_failure(operation: &'static str, err: &SegmentError) {
    match err.kind() {
        ErrorKind::Internal => error!(operation, error = %err, "Segment operation failed"),
        _ => warn!(operation, error = %err, "Segment operation rejected"),
    }
}

fn validated<T>(operation: &'static str, parsed: Result<T, SegmentError>) -> Result<T, SegmentError> {
    parsed.inspect_err(|err| log_failure(operation, err))
}

impl<R> SegmentServicePort for SegmentService<R>
where
    R: SegmentCatalog + MembershipRepository + 'static,
{
    async fn create_segment(&self, slug: String) -> Result<Segment, SegmentError> {
        let slug = validated("create_segment", Slug::parse(slug))?;
        let segment = Segment::new(slug);

        self.bounded("create_segment", self.repository.create_segment(&segment))
            .await?;

        info!(slug = %segment.slug(), segment_id = %segment.id(), "Segment created");
        Ok(segment)
    }

    async fn delete_segment(&self, slug: String) -> Result<(), SegmentError> {
        let slug = validated("delete_segment", Slug::parse(slug))?;

        self.bounded("delete_segment", self.repository.delete_segment(&slug))
            .await?;

        info!(slug = %slug, "Segment deleted");
        Ok(())
    }

    async fn user_segments(&self, user_id: UserId) -> Result<Vec<Slug>, SegmentError> {
        self.bounded("user_segments", self.repository.user_segments(user_id))
            .await
    }

    async fn change_user_segments(
        &self,
        user_id: UserId,
        add_slugs: Vec<String>,
        delete_slugs: Vec<String>,
    ) -> Result<ChangeSummary, SegmentError> {
        let change = validated(
            "change_user_segments",
            SegmentChange::parse(add_slugs, delete_slugs),
        )?;

        if change.is_empty() {
            return Ok(ChangeSummary::default());
        }

        let summary = self
            .bounded(
                "change_user_segments",
                self.repository.change_user_segments(user_id, &change),
            )
            .await?;

        info!(
            user_id = %user_id,
            added = summary.added,
            removed = summary.removed,
            "User segments changed"
        );
        Ok(summary)
    }
}
