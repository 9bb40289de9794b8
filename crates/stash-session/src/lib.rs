//! Stash Session
//!
//! Session-state access for one request:
//! - A session is identified by a 32 character token from a cookie or query parameter
//! - Malformed or missing tokens are replaced by a freshly generated one
//! - The host mechanism owns persistence; this crate only reads and writes the bag
//! - Data access goes through a swappable translator

mod bag;
mod config;
mod error;
mod facade;
mod host;
mod id;
mod memory;
mod request;

pub use bag::SessionBag;
pub use config::SessionConfig;
pub use error::SessionError;
pub use facade::SessionFacade;
pub use host::SessionHost;
pub use id::{SessionId, SESSION_ID_LENGTH};
pub use memory::{MemoryHost, MemoryStore, SessionRecord};
pub use request::RequestContext;

pub use stash_translator::{Key, Map, Translator, TranslatorKind, Value};

pub type Result<T> = std::result::Result<T, SessionError>;
