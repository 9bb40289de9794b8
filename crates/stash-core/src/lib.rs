//! Stash Core
//!
//! Entry point for applications: configuration, logging setup and the
//! session API re-exported from the component crates.

mod config;
mod error;

pub use config::Config;
pub use error::CoreError;

pub use stash_session::{
    MemoryHost, MemoryStore, RequestContext, SessionBag, SessionConfig, SessionError,
    SessionFacade, SessionHost, SessionId, SessionRecord, SESSION_ID_LENGTH,
};
pub use stash_translator::{
    DotTranslator, FlatTranslator, Key, Map, PointerTranslator, Translator, TranslatorError,
    TranslatorKind, Value,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging. `RUST_LOG` wins over `default_filter`.
///
/// Only the first call installs a subscriber; later calls are no-ops.
pub fn init_logging(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging already initialized");
    }
}
