//! Domain entities for segmentation
//!
//! A Segment is a named tag that users can be assigned to. Memberships are
//! never modelled as standalone entities: they are only created and removed
//! through a [`SegmentChange`] applied to one user.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::segment::error::SegmentError;
use crate::segment::ids::SegmentId;

/// Maximum slug length, matches the `segments.slug` column
pub const MAX_SLUG_LEN: usize = 255;

/// Human-readable unique name of a segment
///
/// # Example
///
/// ```rust
/// use segmenter_domain::segment::Slug;
///
/// let slug = Slug::parse("AVITO_VOICE_MESSAGES").unwrap();
/// assert_eq!(slug.as_str(), "AVITO_VOICE_MESSAGES");
/// assert!(Slug::parse("two words").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Validate and wrap a slug supplied by a caller
    ///
    /// # Errors
    ///
    /// Returns `SegmentError::Validation` if the slug is empty, longer than
    /// [`MAX_SLUG_LEN`] characters, or contains whitespace or `/`
    pub fn parse(raw: impl Into<String>) -> Result<Self, SegmentError> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(SegmentError::validation("slug must not be empty"));
        }

        if raw.chars().count() > MAX_SLUG_LEN {
            return Err(SegmentError::validation(format!(
                "slug exceeds {} characters",
                MAX_SLUG_LEN
            )));
        }

        if raw.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(SegmentError::validation(format!(
                "slug '{}' must not contain whitespace or '/'",
                raw
            )));
        }

        Ok(Self(raw))
    }

    /// Wrap a slug read back from storage, skipping validation
    pub fn from_persisted(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

/// A named segment users can be assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Unique identifier for this segment
    id: SegmentId,

    /// Unique human-readable name
    slug: Slug,
}

impl Segment {
    /// Create a new Segment with a freshly generated id
    ///
    /// This is a pure domain constructor, nothing is persisted.
    pub fn new(slug: Slug) -> Self {
        Self {
            id: SegmentId::new(),
            slug,
        }
    }

    /// Create a Segment with explicit values (used for reconstruction)
    pub fn from_parts(id: SegmentId, slug: Slug) -> Self {
        Self { id, slug }
    }

    pub fn id(&self) -> &SegmentId {
        &self.id
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }
}

/// Segments to add to and remove from one user, applied atomically
///
/// Additions are applied before deletions. Slugs repeated within one list
/// are collapsed, keeping the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentChange {
    add: Vec<Slug>,
    delete: Vec<Slug>,
}

impl SegmentChange {
    pub fn new(add: Vec<Slug>, delete: Vec<Slug>) -> Self {
        Self {
            add: dedup(add),
            delete: dedup(delete),
        }
    }

    /// Validate raw slug lists and build a change from them
    ///
    /// # Errors
    ///
    /// Returns the first `SegmentError::Validation` met in either list
    pub fn parse(add: Vec<String>, delete: Vec<String>) -> Result<Self, SegmentError> {
        let add = add.into_iter().map(Slug::parse).collect::<Result<Vec<_>, _>>()?;
        let delete = delete
            .into_iter()
            .map(Slug::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(add, delete))
    }

    pub fn add(&self) -> &[Slug] {
        &self.add
    }

    pub fn delete(&self) -> &[Slug] {
        &self.delete
    }

    /// Nothing to add and nothing to delete
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.delete.is_empty()
    }
}

fn dedup(slugs: Vec<Slug>) -> Vec<Slug> {
    let mut seen = HashSet::with_capacity(slugs.len());
    slugs
        .into_iter()
        .filter(|slug| seen.insert(slug.clone()))
        .collect()
}

/// Outcome of a successful segment change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    /// Memberships inserted
    pub added: usize,
    /// Membership rows actually removed; deleting an absent membership is a no-op
    pub removed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slugs(raw: &[&str]) -> Vec<Slug> {
        raw.iter().map(|s| Slug::parse(*s).unwrap()).collect()
    }

    #[test]
    fn test_slug_validation() {
        assert!(Slug::parse("AVITO_PERFORMANCE_VAS").is_ok());
        assert!(Slug::parse("beta-2.0").is_ok());

        assert!(matches!(Slug::parse(""), Err(SegmentError::Validation(_))));
        assert!(matches!(
            Slug::parse("a b"),
            Err(SegmentError::Validation(_))
        ));
        assert!(matches!(
            Slug::parse("a/b"),
            Err(SegmentError::Validation(_))
        ));
        assert!(Slug::parse("x".repeat(MAX_SLUG_LEN)).is_ok());
        assert!(Slug::parse("x".repeat(MAX_SLUG_LEN + 1)).is_err());
    }

    #[test]
    fn test_segment_creation() {
        let a = Segment::new(Slug::parse("beta").unwrap());
        let b = Segment::new(Slug::parse("beta").unwrap());

        assert_eq!(a.slug().as_str(), "beta");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_segment_from_parts() {
        let id = SegmentId::new();
        let segment = Segment::from_parts(id, Slug::from_persisted("beta".into()));

        assert_eq!(segment.id(), &id);
        assert_eq!(segment.slug().as_str(), "beta");
    }

    #[test]
    fn test_change_collapses_duplicates() {
        let change = SegmentChange::new(slugs(&["a", "b", "a"]), slugs(&["c", "c"]));

        assert_eq!(change.add(), slugs(&["a", "b"]).as_slice());
        assert_eq!(change.delete(), slugs(&["c"]).as_slice());
        assert!(!change.is_empty());
    }

    #[test]
    fn test_change_parse() {
        let change = SegmentChange::parse(vec![], vec![]).unwrap();
        assert!(change.is_empty());

        let err = SegmentChange::parse(vec!["ok".into()], vec!["not ok".into()]).unwrap_err();
        assert!(matches!(err, SegmentError::Validation(_)));
    }
}
