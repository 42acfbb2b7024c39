//! Strongly-typed identifiers for domain entities.
//!
//! These prevent mixing up IDs from different contexts.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id!(OrderId, "Unique identifier for a player order.");
define_id!(ZoneId, "Identifier of a world zone an order targets.");
define_id!(FactionId, "Identifier of a faction involved in an order.");

impl OrderId {
    /// Generate a new unique order identifier using UUID v4.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_new_and_display() {
        let id = OrderId::new("po-123");
        assert_eq!(id.as_str(), "po-123");
        assert_eq!(format!("{id}"), "po-123");
    }

    #[test]
    fn order_id_generate_is_unique() {
        assert_ne!(OrderId::generate(), OrderId::generate());
    }

    #[test]
    fn zone_id_from_str_and_into_inner() {
        let zone: ZoneId = "watson".into();
        assert_eq!(zone.as_ref(), "watson");
        assert_eq!(zone.into_inner(), "watson");
    }

    #[test]
    fn faction_ids_order_lexicographically() {
        let mut ids = vec![FactionId::new("voodoo"), FactionId::new("arasaka")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "arasaka");
    }

    #[test]
    fn identifiers_serialize_transparently() {
        let json = serde_json::to_string(&ZoneId::new("pacifica")).unwrap();
        assert_eq!(json, "\"pacifica\"");
        let back: ZoneId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "pacifica");
    }
}
