//! Filesystem and path helpers for tsvs
//!
//! Provides lexical path arithmetic with forward-slash normalization, the
//! "quote if it has a space" escaping rule used for compiler arguments, and
//! format-agnostic loading of build files.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{NormalizedPath, escape_path_if_required};
