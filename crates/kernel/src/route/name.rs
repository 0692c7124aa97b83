//! Unique route names.
//!
//! Every node in an assembled stage carries a [`RouteName`]: an opaque token
//! minted from a process-wide counter. Two tokens minted from the same label
//! are still different tokens, and a token never compares equal to a plain
//! string.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

static NEXT_NAME_ID: AtomicU64 = AtomicU64::new(1);

/// Default length of generated name seeds.
pub const DEFAULT_SEED_LENGTH: usize = 6;

const SEED_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Opaque, process-unique route name.
///
/// Equality and hashing only consider the minted id; the label is kept for
/// display and debugging.
#[derive(Debug, Clone, Serialize)]
pub struct RouteName {
    id: u64,
    label: Arc<str>,
}

impl RouteName {
    /// Mint a fresh token for `label`.
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_NAME_ID.fetch_add(1, Ordering::Relaxed),
            label: label.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// The human-readable seed this token was minted from.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for RouteName {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RouteName {}

impl std::hash::Hash for RouteName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.label, self.id)
    }
}

/// The `name` of a route definition before assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSeed {
    /// A plain label; wrapped into a fresh token during assembly.
    Label(String),
    /// An already-minted token; preserved as is.
    Token(RouteName),
}

impl NameSeed {
    /// Mint a token up front, e.g. for hand-authored built-in views.
    pub fn unique(label: impl Into<Arc<str>>) -> Self {
        Self::Token(RouteName::new(label))
    }
}

impl From<&str> for NameSeed {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

impl From<String> for NameSeed {
    fn from(label: String) -> Self {
        Self::Label(label)
    }
}

impl From<RouteName> for NameSeed {
    fn from(name: RouteName) -> Self {
        Self::Token(name)
    }
}

/// Route files spell a plain label as `"name": "about"` and a pre-minted
/// token as `"name": {"unique": "about"}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNameSeed {
    Label(String),
    Unique { unique: String },
}

impl<'de> Deserialize<'de> for NameSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawNameSeed::deserialize(deserializer)? {
            RawNameSeed::Label(label) => NameSeed::Label(label),
            RawNameSeed::Unique { unique } => NameSeed::unique(unique),
        })
    }
}

/// Source of human-readable seeds for routes that have no name at all.
pub trait SeedGenerator {
    fn seed(&mut self) -> String;
}

/// Random lowercase alphanumeric seeds.
#[derive(Debug, Clone)]
pub struct RandomSeed {
    length: usize,
}

impl RandomSeed {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomSeed {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_LENGTH)
    }
}

impl SeedGenerator for RandomSeed {
    fn seed(&mut self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| SEED_CHARSET[rng.gen_range(0..SEED_CHARSET.len())] as char)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn same_label_mints_distinct_tokens() {
        let a = RouteName::new("about");
        let b = RouteName::new("about");
        assert_ne!(a, b);
        assert_eq!(a.label(), b.label());
    }

    #[test]
    fn clones_compare_equal() {
        let a = RouteName::new("log");
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn display_includes_label_and_id() {
        let name = RouteName::new("404");
        assert_eq!(name.to_string(), format!("404#{}", name.id()));
    }

    #[test]
    fn seed_deserializes_label_and_unique() {
        let label: NameSeed = serde_json::from_str(r#""about""#).unwrap();
        assert_eq!(label, NameSeed::Label("about".to_string()));

        let unique: NameSeed = serde_json::from_str(r#"{"unique": "about"}"#).unwrap();
        match unique {
            NameSeed::Token(name) => assert_eq!(name.label(), "about"),
            NameSeed::Label(_) => panic!("expected a minted token"),
        }
    }

    #[test]
    fn random_seed_has_requested_length_and_charset() {
        let mut seeds = RandomSeed::new(10);
        let seed = seeds.seed();
        assert_eq!(seed.len(), 10);
        assert!(seed.bytes().all(|b| SEED_CHARSET.contains(&b)));
    }
}
