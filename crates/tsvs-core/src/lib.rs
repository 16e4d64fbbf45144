//! Visual Studio project option resolution for TypeScript builds
//!
//! A build target may link to a Visual Studio project (`vs` option). This
//! crate merges that project's source files and compiler settings into the
//! target's resolved options without overriding anything the build file set
//! explicitly.
//!
//! # Example
//!
//! ```ignore
//! use tsvs_core::{BuildFile, VsOptionsResolver};
//! use tsvs_fs::NormalizedPath;
//!
//! let build = BuildFile::load(&NormalizedPath::new("build.toml"))?;
//! let mut aggregate = build.aggregate_for("app")?;
//! let resolver = VsOptionsResolver::new(my_provider)?;
//! resolver
//!     .resolve(&mut aggregate, &build.options, build.target("app")?)
//!     .await?;
//! ```

pub mod build_file;
pub mod error;
pub mod logging;
pub mod options;
pub mod provider;
pub mod resolver;
pub mod settings;

pub use build_file::BuildFile;
pub use error::{Error, Result};
pub use options::{
    AggregateOptions, CompilationTask, LinkSpec, LinkSpecRecord, RawLinkSpec, TargetOptions,
};
pub use provider::{ExternalProjectSettings, ProjectSettingsProvider, ProviderError};
pub use resolver::VsOptionsResolver;
pub use settings::SIMPLE_SETTINGS;
