//! Strongly-typed identifiers for runtime entities.
//!
//! These prevent mixing up IDs from different contexts.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Generate a new unique identifier using UUID v4.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
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

define_id!(BotId, "Unique identifier for a bot instance.");
define_id!(AccountId, "Identifier for the trading account a bot acts on.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_id_new_and_display() {
        let id = BotId::new("momentum-vn30");
        assert_eq!(id.as_str(), "momentum-vn30");
        assert_eq!(format!("{id}"), "momentum-vn30");
    }

    #[test]
    fn bot_id_generate_is_unique() {
        let id1 = BotId::generate();
        let id2 = BotId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn bot_id_equality() {
        let id1 = BotId::new("bot-1");
        let id2 = BotId::new("bot-1");
        let id3 = BotId::new("bot-2");
        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn bot_id_from_string() {
        let id: BotId = "bot-1".into();
        assert_eq!(id.as_str(), "bot-1");

        let id: BotId = String::from("bot-2").into();
        assert_eq!(id.as_str(), "bot-2");
    }

    #[test]
    fn bot_id_into_inner() {
        let id = BotId::new("bot-1");
        let inner = id.into_inner();
        assert_eq!(inner, "bot-1");
    }

    #[test]
    fn account_id_new_and_display() {
        let id = AccountId::new("acct-main");
        assert_eq!(id.as_str(), "acct-main");
    }

    #[test]
    fn serde_roundtrip() {
        let id = BotId::new("bot-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bot-1\"");

        let parsed: BotId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn hash_works_for_collections() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(BotId::new("bot-1"));
        set.insert(BotId::new("bot-2"));
        set.insert(BotId::new("bot-1")); // duplicate

        assert_eq!(set.len(), 2);
    }
}
