//! Keys addressing values in a bag

use std::fmt;

/// A raw key is split into path segments by the active translator;
/// an explicit path is used as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Raw(String),
    Path(Vec<String>),
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Key::Raw(key.to_string())
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Key::Raw(key)
    }
}

impl From<&String> for Key {
    fn from(key: &String) -> Self {
        Key::Raw(key.clone())
    }
}

impl From<Vec<String>> for Key {
    fn from(segments: Vec<String>) -> Self {
        Key::Path(segments)
    }
}

impl From<Vec<&str>> for Key {
    fn from(segments: Vec<&str>) -> Self {
        Key::Path(segments.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Key {
    fn from(segments: [&str; N]) -> Self {
        Key::Path(segments.into_iter().map(String::from).collect())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Raw(raw) => write!(f, "{}", raw),
            Key::Path(segments) => write!(f, "[{}]", segments.join(", ")),
        }
    }
}
