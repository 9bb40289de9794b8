//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use stash_session::{
    MemoryHost, MemoryStore, RequestContext, SessionConfig, SessionFacade, SessionHost,
};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// The session name doubles as a cookie name, so it must be a plain token
    pub fn validate(&self) -> Result<()> {
        let name = &self.session.name;
        if name.is_empty() {
            return Err(CoreError::Config("session name cannot be empty".to_string()));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(CoreError::Config(format!(
                "session name {:?} may only contain letters, digits and underscores",
                name
            )));
        }
        if name.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::Config(format!(
                "session name {:?} cannot be only digits",
                name
            )));
        }
        Ok(())
    }

    /// In-memory host over `store`, collecting sessions idle longer than
    /// the configured lifetime
    pub fn memory_host(&self, store: MemoryStore) -> MemoryHost {
        MemoryHost::with_store(store).with_gc_max_lifetime(self.session.gc_max_lifetime())
    }

    /// Start (or adopt) the session for one request
    pub fn open_session<H: SessionHost>(
        &self,
        host: H,
        request: &RequestContext,
    ) -> Result<SessionFacade<H>> {
        Ok(SessionFacade::start(host, &self.session, request)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}
