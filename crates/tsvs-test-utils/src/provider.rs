//! In-memory settings providers

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tsvs_core::{ExternalProjectSettings, ProjectSettingsProvider, ProviderError};

/// Arguments of one `get_settings` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupCall {
    pub project_file: String,
    pub configuration: Option<String>,
}

/// Serves canned settings keyed by project path and records every lookup.
///
/// Unknown projects fail with a not-found error carrying the requested path.
#[derive(Debug, Default)]
pub struct StaticProvider {
    projects: HashMap<String, ExternalProjectSettings>,
    calls: Mutex<Vec<LookupCall>>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register settings for `project_file`.
    pub fn with_project(
        mut self,
        project_file: impl Into<String>,
        settings: ExternalProjectSettings,
    ) -> Self {
        self.projects.insert(project_file.into(), settings);
        self
    }

    /// Every lookup made so far, in order.
    pub fn calls(&self) -> Vec<LookupCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProjectSettingsProvider for StaticProvider {
    async fn get_settings(
        &self,
        project_file: &str,
        configuration: Option<&str>,
    ) -> Result<ExternalProjectSettings, ProviderError> {
        self.calls.lock().unwrap().push(LookupCall {
            project_file: project_file.to_string(),
            configuration: configuration.map(String::from),
        });
        self.projects
            .get(project_file)
            .cloned()
            .ok_or_else(|| ProviderError::not_found(project_file))
    }
}

/// Always fails with the given error.
#[derive(Debug, Clone)]
pub struct FailingProvider {
    pub error: ProviderError,
}

impl FailingProvider {
    pub fn new(error: ProviderError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl ProjectSettingsProvider for FailingProvider {
    async fn get_settings(
        &self,
        _project_file: &str,
        _configuration: Option<&str>,
    ) -> Result<ExternalProjectSettings, ProviderError> {
        Err(self.error.clone())
    }
}
