//! Pure data structures managed by the stores.
//!
//! Each record implements [`ActorEntity`](crate::framework::ActorEntity) in its
//! actor module ([`crate::lesson_actor`], [`crate::order_actor`]).

/// Declares a store identifier.
///
/// Ids are opaque comparable keys. The in-memory stores hand out sequential
/// integers; a document store would use 24-hex-digit object ids. Both forms are
/// accepted, and both serialize as strings. Ordering puts shorter keys first, so
/// integer ids sort numerically and fixed-width object ids sort by their text.
macro_rules! store_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id.to_string())
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.0
                    .len()
                    .cmp(&other.0.len())
                    .then_with(|| self.0.cmp(&other.0))
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::model::MalformedId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::model::canonical_key(s)
                    .map(Self)
                    .ok_or_else(|| $crate::model::MalformedId(s.to_string()))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                #[derive(serde::Deserialize)]
                #[serde(untagged)]
                enum Raw {
                    Number(u32),
                    Text(String),
                }

                match Raw::deserialize(deserializer)? {
                    Raw::Number(n) => Ok(Self::from(n)),
                    Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
                }
            }
        }
    };
}

const OBJECT_ID_LEN: usize = 24;

/// Normalizes a textual id: integers lose leading zeros, object ids are lowercased.
pub(crate) fn canonical_key(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u32>() {
        if raw.bytes().all(|b| b.is_ascii_digit()) {
            return Some(n.to_string());
        }
    }
    if raw.len() == OBJECT_ID_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Some(raw.to_ascii_lowercase());
    }
    None
}

pub mod lesson;
pub mod order;

pub use lesson::*;
pub use order::*;

/// An id string that is not a valid store identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed id: {0:?}")]
pub struct MalformedId(pub String);
