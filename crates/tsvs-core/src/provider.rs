//! Project settings provider trait and related types
//!
//! Reading the Visual Studio project file itself happens behind
//! [`ProjectSettingsProvider`]; this crate only consumes what it returns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Settings extracted from a project file for one configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalProjectSettings {
    /// Path of the project file as the provider resolved it
    pub project_file: String,

    /// Source files, relative to the project file's directory
    #[serde(default)]
    pub files: Vec<String>,

    /// Raw setting values keyed by project property name
    /// (`Target`, `SourceMap`, `OutDir`, `ModuleKind`, ...)
    #[serde(default)]
    pub settings: BTreeMap<String, Value>,
}

impl ExternalProjectSettings {
    pub fn new(project_file: impl Into<String>) -> Self {
        Self {
            project_file: project_file.into(),
            ..Self::default()
        }
    }

    /// Append a source file
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.files.push(file.into());
        self
    }

    /// Set a raw setting value
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Look up a setting. `null` counts as not set.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.settings.get(key).filter(|v| !v.is_null())
    }

    /// Look up a string setting, treating the empty string as not set.
    pub fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Files with duplicates removed, first occurrence wins.
    pub fn unique_files(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.files
            .iter()
            .map(String::as_str)
            .filter(|f| seen.insert(*f))
            .collect()
    }
}

/// Failure reported by a settings provider.
///
/// Mirrors a filesystem error: a numeric code, the offending path when known,
/// and a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    pub code: i32,
    pub path: Option<String>,
    pub message: String,
}

impl ProviderError {
    /// Code meaning "no such file or directory"
    pub const NOT_FOUND: i32 = 34;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            path: None,
            message: message.into(),
        }
    }

    /// The project file does not exist
    pub fn not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            code: Self::NOT_FOUND,
            message: format!("ENOENT, no such file or directory '{}'", path),
            path: Some(path),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.code == Self::NOT_FOUND
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(err: std::io::Error) -> Self {
        let code = if err.kind() == std::io::ErrorKind::NotFound {
            Self::NOT_FOUND
        } else {
            err.raw_os_error().unwrap_or(-1)
        };
        Self::new(code, err.to_string())
    }
}

/// Source of project settings
///
/// `configuration` is `None` when the project's default configuration should
/// be used.
#[async_trait]
pub trait ProjectSettingsProvider: Send + Sync {
    async fn get_settings(
        &self,
        project_file: &str,
        configuration: Option<&str>,
    ) -> Result<ExternalProjectSettings, ProviderError>;
}

#[async_trait]
impl<T: ProjectSettingsProvider + ?Sized> ProjectSettingsProvider for std::sync::Arc<T> {
    async fn get_settings(
        &self,
        project_file: &str,
        configuration: Option<&str>,
    ) -> Result<ExternalProjectSettings, ProviderError> {
        (**self).get_settings(project_file, configuration).await
    }
}
