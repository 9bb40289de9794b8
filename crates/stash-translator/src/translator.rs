//! Translators
//!
//! A translator decides how a raw string key is split into path segments.
//! The CRUD operations themselves are shared and work on whatever bag is
//! handed in, so swapping translators never touches stored data.

use serde::{Deserialize, Serialize};

use crate::error::TranslatorError;
use crate::key::Key;
use crate::path;
use crate::value::{Map, Value};

pub trait Translator: Send + Sync {
    fn kind(&self) -> TranslatorKind;

    /// Split a raw key into path segments. An empty result addresses nothing.
    fn segments(&self, key: &str) -> Vec<String>;

    fn resolve(&self, key: &Key) -> Vec<String> {
        match key {
            Key::Raw(raw) => self.segments(raw),
            Key::Path(segments) => segments.clone(),
        }
    }

    /// Store `value`, merging into an existing value (see [`Value::merge`])
    fn add(&self, bag: &mut Map, key: &Key, value: Value) {
        let segments = self.resolve(key);
        match path::lookup_mut(bag, &segments) {
            Some(existing) => existing.merge(value),
            None => {
                path::insert(bag, &segments, value);
            }
        }
    }

    /// Store `value`, overwriting whatever is there
    fn set(&self, bag: &mut Map, key: &Key, value: Value) {
        if !path::insert(bag, &self.resolve(key), value) {
            tracing::debug!(key = %key, "Ignoring write to an empty key");
        }
    }

    /// Whether anything is stored at `key`, including null and falsy values
    fn has(&self, bag: &Map, key: &Key) -> bool {
        path::lookup(bag, &self.resolve(key)).is_some()
    }

    fn get(&self, bag: &Map, key: &Key, default: Value) -> Value {
        path::lookup(bag, &self.resolve(key))
            .cloned()
            .unwrap_or(default)
    }

    /// Take the value out of the bag, or return `default` if there is none
    fn pull(&self, bag: &mut Map, key: &Key, default: Value) -> Value {
        path::remove(bag, &self.resolve(key)).unwrap_or(default)
    }

    fn remove(&self, bag: &mut Map, key: &Key) {
        path::remove(bag, &self.resolve(key));
    }
}

/// Dotted keys: `"user.name"` addresses `name` inside the `user` map
#[derive(Debug, Clone, Copy, Default)]
pub struct DotTranslator;

impl Translator for DotTranslator {
    fn kind(&self) -> TranslatorKind {
        TranslatorKind::Dot
    }

    fn segments(&self, key: &str) -> Vec<String> {
        if key.is_empty() {
            return Vec::new();
        }
        key.split('.').map(String::from).collect()
    }
}

/// Flat keys: every key is a single top-level entry, dots included
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatTranslator;

impl Translator for FlatTranslator {
    fn kind(&self) -> TranslatorKind {
        TranslatorKind::Flat
    }

    fn segments(&self, key: &str) -> Vec<String> {
        if key.is_empty() {
            return Vec::new();
        }
        vec![key.to_string()]
    }
}

/// JSON-pointer keys: `"/user/name"`, with `~1` for `/` and `~0` for `~`
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTranslator;

impl Translator for PointerTranslator {
    fn kind(&self) -> TranslatorKind {
        TranslatorKind::Pointer
    }

    fn segments(&self, key: &str) -> Vec<String> {
        if key.is_empty() {
            return Vec::new();
        }
        key.strip_prefix('/')
            .unwrap_or(key)
            .split('/')
            .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorKind {
    #[default]
    Dot,
    Flat,
    Pointer,
}

impl TranslatorKind {
    /// Construct a fresh translator of this kind
    pub fn build(self) -> Box<dyn Translator> {
        match self {
            TranslatorKind::Dot => Box::new(DotTranslator),
            TranslatorKind::Flat => Box::new(FlatTranslator),
            TranslatorKind::Pointer => Box::new(PointerTranslator),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TranslatorKind::Dot => "dot",
            TranslatorKind::Flat => "flat",
            TranslatorKind::Pointer => "pointer",
        }
    }
}

impl std::fmt::Display for TranslatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TranslatorKind {
    type Err = TranslatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "dotted" => Ok(TranslatorKind::Dot),
            "flat" => Ok(TranslatorKind::Flat),
            "pointer" | "json-pointer" => Ok(TranslatorKind::Pointer),
            _ => Err(TranslatorError::UnknownKind(s.to_string())),
        }
    }
}
