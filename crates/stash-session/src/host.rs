//! Host session mechanism
//!
//! The host owns ids, persistence and the live bag. A facade calls it and
//! nothing more. Implementations use interior mutability, so every
//! operation takes `&self`.

use std::path::{Path, PathBuf};

use crate::bag::SessionBag;
use crate::id::SessionId;
use crate::Result;

pub trait SessionHost {
    /// Whether a session has been started in this request context
    fn is_active(&self) -> bool;

    /// Choose the id the next `start` opens. Fails once a session is active.
    fn assign_id(&self, id: SessionId) -> Result<()>;

    /// Open the session for the assigned id, creating its bag if new.
    /// Without an assigned id the host picks one. Starting an active
    /// session returns its bag again.
    fn start(&self) -> Result<SessionBag>;

    /// Live bag of the active session
    fn bag(&self) -> Option<SessionBag>;

    fn session_id(&self) -> Option<SessionId>;

    /// Move the active session to a fresh id, keeping its data
    fn regenerate_id(&self) -> Result<SessionId>;

    /// Directory subsequent saves are written to. Callers validate it.
    fn set_save_path(&self, directory: &Path) -> Result<()>;

    fn save_path(&self) -> Option<PathBuf>;
}
