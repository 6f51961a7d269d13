//! Identifiers for segments and users
//!
//! Both are random (v4) UUIDs: nothing about them is sequential, so they
//! can't be enumerated and two processes never mint the same one.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::segment::error::SegmentError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Mint a fresh random id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_id!(
    /// Primary key of a segment, generated when the segment is created
    SegmentId
);

uuid_id!(
    /// A user as known to the caller; users live in another system and are
    /// never stored here except as membership keys
    UserId
);

impl SegmentId {
    /// Rewrap an id read back from storage
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl UserId {
    /// Parse a user id from a URL path segment or request body
    ///
    /// # Errors
    ///
    /// Returns `SegmentError::Validation` if `raw` is not a valid UUID
    pub fn parse(raw: &str) -> Result<Self, SegmentError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|err| SegmentError::validation(format!("invalid user id '{}': {}", raw, err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_id_generation() {
        let id1 = SegmentId::new();
        let id2 = SegmentId::new();

        assert_ne!(id1, id2, "Each SegmentId should be unique");
        assert_eq!(id1.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_user_id_parse() {
        let raw = "550e8400-e29b-41d4-a716-446655440000";
        let id = UserId::parse(raw).unwrap();

        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn test_ids_convert_to_and_from_uuid() {
        let uuid = Uuid::new_v4();

        assert_eq!(Uuid::from(UserId::from(uuid)), uuid);
        assert_eq!(SegmentId::from_uuid(uuid).as_uuid(), &uuid);
        assert_eq!(UserId::new().as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_user_id_parse_rejects_garbage() {
        let err = UserId::parse("not-a-uuid").unwrap_err();

        assert!(matches!(err, SegmentError::Validation(_)));
        assert!(err.to_string().contains("not-a-uuid"));
    }
}
