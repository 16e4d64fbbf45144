//! Read-side file helpers

use crate::{Error, NormalizedPath, Result};
use std::fs;

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    tracing::trace!(path = %path, "reading text file");
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}
