//! Shared test utilities for the tsvs workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`provider`] — in-memory [`ProjectSettingsProvider`](tsvs_core::ProjectSettingsProvider)s
//! - [`build_dir`] — [`TestBuildDir`] temporary build directory

pub mod build_dir;
pub mod provider;

pub use build_dir::TestBuildDir;
pub use provider::{FailingProvider, LookupCall, StaticProvider};
