//! Session facade
//!
//! Establishes (or adopts) the request's session on construction and
//! routes every data operation through the active translator onto the
//! live bag.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::OnceCell;
use std::path::Path;

use stash_translator::{Key, Map, Translator, TranslatorKind, Value};

use crate::bag::SessionBag;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::host::SessionHost;
use crate::id::SessionId;
use crate::request::RequestContext;
use crate::Result;

pub struct SessionFacade<H: SessionHost> {
    host: H,
    /// Live bag of the active session
    bag: SessionBag,
    default_translator: TranslatorKind,
    /// Built on first data access
    translator: OnceCell<Box<dyn Translator>>,
}

impl<H: SessionHost> SessionFacade<H> {
    /// Bind to the host's session, starting one if none is active yet.
    ///
    /// A well-formed id from the request is reused; a missing or malformed
    /// one is replaced by a freshly generated id. Host failures propagate.
    pub fn start(host: H, config: &SessionConfig, request: &RequestContext) -> Result<Self> {
        let bag = if host.is_active() {
            tracing::debug!("Session already active, adopting it");
            host.bag().ok_or(SessionError::NoActiveSession)?
        } else {
            Self::establish(&host, config, request)?
        };

        Ok(Self {
            host,
            bag,
            default_translator: config.translator,
            translator: OnceCell::new(),
        })
    }

    fn establish(host: &H, config: &SessionConfig, request: &RequestContext) -> Result<SessionBag> {
        if let Some(directory) = &config.save_path {
            apply_save_path(host, directory, "SessionFacade::start")?;
        }

        let candidate = request.candidate_session_id(config);
        let (id, reused) = match candidate.and_then(SessionId::parse) {
            Some(id) => (id, true),
            None => {
                if let Some(rejected) = candidate {
                    tracing::warn!(length = rejected.len(), "Rejected malformed session id");
                }
                (SessionId::generate(), false)
            }
        };

        host.assign_id(id.clone())?;
        let bag = host.start()?;

        tracing::info!(session_id = %id.redacted(), reused, "Started session");

        Ok(bag)
    }

    /// Active translator, building the default one on first use
    pub fn get_translator(&self) -> &dyn Translator {
        self.translator
            .get_or_init(|| self.default_translator.build())
            .as_ref()
    }

    /// Replace the translator with a fresh instance of `kind`.
    /// The bag is untouched.
    pub fn set_translator(&mut self, kind: TranslatorKind) {
        tracing::debug!(translator = %kind, "Switched session translator");
        self.translator = OnceCell::from(kind.build());
    }

    pub fn translator_kind(&self) -> TranslatorKind {
        self.get_translator().kind()
    }

    /// Configure where the host persists sessions from now on
    pub fn set_session_save_path(&self, directory: impl AsRef<Path>) -> Result<()> {
        apply_save_path(
            &self.host,
            directory.as_ref(),
            "SessionFacade::set_session_save_path",
        )
    }

    /// Store a value, merging it into whatever is already there
    pub fn add(&self, key: impl Into<Key>, value: impl Into<Value>) {
        self.get_translator()
            .add(&mut self.bag.write(), &key.into(), value.into());
    }

    /// Store a value, overwriting whatever is already there
    pub fn set(&self, key: impl Into<Key>, value: impl Into<Value>) {
        self.get_translator()
            .set(&mut self.bag.write(), &key.into(), value.into());
    }

    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.get_translator().has(&self.bag.read(), &key.into())
    }

    pub fn remove(&self, key: impl Into<Key>) {
        self.get_translator()
            .remove(&mut self.bag.write(), &key.into());
    }

    pub fn get(&self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        self.get_translator()
            .get(&self.bag.read(), &key.into(), default.into())
    }

    /// Retrieve and delete a value in one step
    pub fn pull(&self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        self.get_translator()
            .pull(&mut self.bag.write(), &key.into(), default.into())
    }

    /// Store any serde type
    pub fn set_serialized<T: Serialize + ?Sized>(&self, key: impl Into<Key>, value: &T) -> Result<()> {
        self.set(key, Value::from_serialize(value)?);
        Ok(())
    }

    /// Read back a serde type; `None` when the key is absent
    pub fn get_deserialized<T: DeserializeOwned>(&self, key: impl Into<Key>) -> Result<Option<T>> {
        let key = key.into();
        if !self.has(key.clone()) {
            return Ok(None);
        }
        Ok(Some(self.get(key, Value::Null).deserialize_into()?))
    }

    /// Empty the bag, bypassing the translator
    pub fn flush(&self) {
        self.bag.clear();
        tracing::debug!("Flushed session data");
    }

    /// Copy of the whole bag
    pub fn all(&self) -> Map {
        self.bag.snapshot()
    }

    /// Issue a new id for the current session, keeping its data
    pub fn regenerate(&self) -> Result<SessionId> {
        let id = self.host.regenerate_id()?;
        tracing::info!(session_id = %id.redacted(), "Regenerated session id");
        Ok(id)
    }

    pub fn session_id(&self) -> Result<SessionId> {
        self.host.session_id().ok_or(SessionError::NoActiveSession)
    }

    pub fn bag(&self) -> &SessionBag {
        &self.bag
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

fn apply_save_path<H: SessionHost>(host: &H, directory: &Path, operation: &'static str) -> Result<()> {
    if !is_writable_dir(directory) {
        return Err(SessionError::InvalidSavePath {
            path: directory.to_path_buf(),
            operation,
        });
    }

    host.set_save_path(directory)?;
    tracing::info!(path = %directory.display(), "Set session save path");
    Ok(())
}

/// Writable for this process, probed by creating an anonymous file
fn is_writable_dir(directory: &Path) -> bool {
    directory.is_dir() && tempfile::tempfile_in(directory).is_ok()
}
