//! Normalized path handling for cross-platform compatibility
//!
//! All operations here are lexical; nothing touches the filesystem.

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Source lists handed to the compiler are compared as plain strings, so every
/// path that ends up in one goes through this type first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether the path is rooted (`/...` or a drive letter such as `C:/...`).
    pub fn is_absolute(&self) -> bool {
        !self.root().is_empty()
    }

    /// The root prefix: `"/"`, `"C:/"`, or `""` for relative paths.
    fn root(&self) -> &str {
        let bytes = self.inner.as_bytes();
        if bytes.first() == Some(&b'/') {
            return "/";
        }
        if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
            if bytes.len() == 2 {
                return &self.inner[..2];
            }
            if bytes[2] == b'/' {
                return &self.inner[..3];
            }
        }
        ""
    }

    /// Path segments after the root, with empty and `.` segments dropped.
    fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner[self.root().len()..]
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
    }

    /// Lexically collapse `.` and `..` segments and repeated slashes.
    ///
    /// `..` never climbs above the root of an absolute path. An empty relative
    /// result becomes `"."`.
    pub fn normalize(&self) -> Self {
        let root = self.root();
        let mut stack: Vec<&str> = Vec::new();
        for segment in self.segments() {
            if segment == ".." {
                if stack.last().is_some_and(|last| *last != "..") {
                    stack.pop();
                } else if root.is_empty() {
                    stack.push(segment);
                }
            } else {
                stack.push(segment);
            }
        }

        let mut root = root.to_string();
        if root.len() == 2 {
            root.push('/');
        }
        let body = stack.join("/");
        let inner = match (root.is_empty(), body.is_empty()) {
            (true, true) => ".".to_string(),
            (true, false) => body,
            (false, _) => root + &body,
        };
        Self { inner }
    }

    /// Resolve `path` against this path, like a shell `cd self && realpath -m path`
    /// without touching the filesystem.
    ///
    /// An absolute `path` is returned normalized; a relative one is joined first.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Self {
        let candidate = Self::new(path);
        if candidate.is_absolute() {
            candidate.normalize()
        } else {
            self.join(&candidate.inner).normalize()
        }
    }

    /// Express this path relative to `from`.
    ///
    /// Both sides are normalized first. Equal paths give an empty string. When
    /// the two paths do not share a root (different drives, or one relative and
    /// one absolute) this path is returned as-is. Under a drive-letter root,
    /// segments compare case-insensitively.
    pub fn relative_to(&self, from: &NormalizedPath) -> String {
        let to = self.normalize();
        let from = from.normalize();
        let root = to.root();
        if !root.eq_ignore_ascii_case(from.root()) {
            return to.inner;
        }

        let to_segments: Vec<&str> = to.segments().collect();
        let mut from_segments: Vec<&str> = from.segments().collect();
        if root.len() == 3 {
            for (from_segment, to_segment) in from_segments.iter_mut().zip(&to_segments) {
                if !from_segment.eq_ignore_ascii_case(to_segment) {
                    break;
                }
                *from_segment = *to_segment;
            }
        }

        let to_body = to_segments.join("/");
        let from_body = from_segments.join("/");
        match pathdiff::diff_paths(Path::new(&to_body), Path::new(&from_body)) {
            Some(relative) => Self::new(relative).inner,
            None => to.inner.clone(),
        }
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let normalized = self.normalize();
        let root_len = normalized.root().len();
        let body = &normalized.inner[root_len..];
        if body.is_empty() {
            return None;
        }
        let inner = match body.rfind('/') {
            Some(idx) => normalized.inner[..root_len + idx].to_string(),
            None if root_len > 0 => normalized.inner[..root_len].to_string(),
            None if body == "." || body == ".." => return None,
            None => ".".to_string(),
        };
        Some(Self { inner })
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }
}

/// Quote a path for downstream command lines when it contains a space.
///
/// The path is trimmed and wrapped in double quotes. Paths that are already
/// quoted, or that have no space, come back unchanged.
pub fn escape_path_if_required(path: &str) -> String {
    if !path.contains(' ') {
        return path.to_string();
    }
    let trimmed = path.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed.to_string()
    } else {
        format!("\"{}\"", trimmed)
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
