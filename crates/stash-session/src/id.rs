//! Session identifiers
//!
//! An identifier is exactly 32 characters from `[a-zA-Z0-9-]`. Anything else
//! coming in from a request is discarded and replaced.

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

pub const SESSION_ID_LENGTH: usize = 32;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"-";

static SESSION_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9-]{32}$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Accept a candidate only if it is a well-formed identifier
    pub fn parse(candidate: &str) -> Option<Self> {
        Self::is_valid(candidate).then(|| Self(candidate.to_string()))
    }

    pub fn is_valid(candidate: &str) -> bool {
        SESSION_ID_PATTERN.is_match(candidate)
    }

    /// Generate an unpredictable identifier containing at least one letter,
    /// one digit and one hyphen.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let sets = [LETTERS, DIGITS, SYMBOLS];
        let alphabet = sets.concat();

        let mut chars: Vec<u8> = sets
            .iter()
            .map(|set| set[rng.random_range(0..set.len())])
            .collect();
        while chars.len() < SESSION_ID_LENGTH {
            chars.push(alphabet[rng.random_range(0..alphabet.len())]);
        }
        chars.shuffle(&mut rng);

        Self(chars.into_iter().map(char::from).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix for logs; the full identifier is a bearer credential
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(6).collect();
        format!("{}…", prefix)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
