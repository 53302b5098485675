//! Newtype wrappers for entity identifiers
//!
//! These types provide compile-time type safety to prevent mixing up
//! container, region and content block ids, which are all plain strings
//! in the persisted JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(id: impl Into<Arc<str>>) -> Self {
                Self(id.into())
            }

            /// Generates a fresh random id such as `container-1f3a9c0d2b4e5f60`.
            pub fn generate() -> Self {
                Self(format!("{}-{:016x}", $prefix, rand::random::<u64>()).into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.into())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.into())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Identifies a top-level container ("mother").
    ContainerId,
    "container"
);
string_id!(
    /// Identifies a region inside a container.
    RegionId,
    "region"
);
string_id!(
    /// Identifies a placed content block.
    BlockId,
    "block"
);
