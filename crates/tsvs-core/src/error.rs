//! Error types for tsvs-core

use crate::provider::ProviderError;

/// Result type for tsvs-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving options
///
/// The `Display` text of the two lookup variants is exactly the line that is
/// appended to `AggregateOptions::errors`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The settings provider could not find the project file
    #[error("In target \"{target}\" - could not find VS project at \"{path}\".")]
    ProjectNotFound {
        target: String,
        path: String,
        source: ProviderError,
    },

    /// Any other settings provider failure
    #[error("In target \"{target}\".  Error #{}.  {source}.", .source.code)]
    ExternalLookup {
        target: String,
        source: ProviderError,
    },

    /// A build file does not declare the requested target
    #[error("Unknown target: {name}")]
    UnknownTarget { name: String },

    /// Filesystem or build-file parse error from tsvs-fs
    #[error(transparent)]
    Fs(#[from] tsvs_fs::Error),
}

impl Error {
    /// Classify a provider failure for `target`.
    ///
    /// `project` is used as the reported path when the provider did not
    /// attach one.
    pub fn lookup_failed(target: &str, project: &str, source: ProviderError) -> Self {
        if source.is_not_found() {
            Self::ProjectNotFound {
                target: target.to_string(),
                path: source.path.clone().unwrap_or_else(|| project.to_string()),
                source,
            }
        } else {
            Self::ExternalLookup {
                target: target.to_string(),
                source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_uses_provider_path() {
        let source = ProviderError::not_found("proj/app.csproj");
        let err = Error::lookup_failed("t1", "ignored.csproj", source);
        assert_eq!(
            err.to_string(),
            "In target \"t1\" - could not find VS project at \"proj/app.csproj\"."
        );
    }

    #[test]
    fn not_found_without_path_falls_back_to_project() {
        let source = ProviderError::new(ProviderError::NOT_FOUND, "missing");
        let err = Error::lookup_failed("t1", "proj/app.csproj", source);
        assert!(err.to_string().ends_with("at \"proj/app.csproj\"."));
    }

    #[test]
    fn other_failures_report_code_and_message() {
        let source = ProviderError::new(3, "EACCES, permission denied");
        let err = Error::lookup_failed("web", "web.csproj", source);
        assert_eq!(
            err.to_string(),
            "In target \"web\".  Error #3.  EACCES, permission denied."
        );
    }
}
