//! Stash Translator
//!
//! Resolves string keys into locations inside a session data bag and
//! performs add / set / has / get / pull / remove against them.
//! A translator owns only the access pattern; the data lives in the bag
//! it is handed on every call.

mod error;
mod key;
mod path;
mod translator;
mod value;

pub use error::TranslatorError;
pub use key::Key;
pub use translator::{DotTranslator, FlatTranslator, PointerTranslator, Translator, TranslatorKind};
pub use value::{Map, Value};

pub type Result<T> = std::result::Result<T, TranslatorError>;
