//! Session configuration

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use stash_translator::TranslatorKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cookie and query parameter name carrying the session id
    pub name: String,
    /// Look for the id in cookies
    pub use_cookies: bool,
    /// Never fall back to the query parameter
    pub use_only_cookies: bool,
    /// Directory the host persists sessions to, validated at start
    pub save_path: Option<PathBuf>,
    /// Idle lifetime after which stored sessions are collected
    pub gc_max_lifetime_secs: u64,
    /// Translator a facade builds on first data access
    pub translator: TranslatorKind,
}

impl SessionConfig {
    pub fn gc_max_lifetime(&self) -> TimeDelta {
        i64::try_from(self.gc_max_lifetime_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name: "STASHSESSID".to_string(),
            use_cookies: true,
            use_only_cookies: true,
            save_path: None,
            gc_max_lifetime_secs: 1440,
            translator: TranslatorKind::Dot,
        }
    }
}
