//! Build file loading
//!
//! A build file carries task-wide `options` and named `targets`. Format is
//! picked from the extension (TOML, JSON or YAML).
//!
//! ```toml
//! [options]
//! noImplicitAny = true
//!
//! [targets.app]
//! src = ["src/main.ts"]
//! vs = { project = "proj/app.csproj", config = "Release" }
//! outDir = "build"
//! ```

use crate::options::{AggregateOptions, CompilationTask, TargetOptions};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tsvs_fs::{ConfigStore, NormalizedPath};

/// Parsed build file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildFile {
    /// Task-level options shared by every target
    pub options: TargetOptions,

    /// Per-target options
    pub targets: BTreeMap<String, TargetOptions>,
}

impl BuildFile {
    /// Load a build file from disk.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        tracing::debug!(%path, "loading build file");
        Ok(ConfigStore::new().load(path)?)
    }

    /// Options for the named target.
    pub fn target(&self, name: &str) -> Result<&TargetOptions> {
        self.targets.get(name).ok_or_else(|| Error::UnknownTarget {
            name: name.to_string(),
        })
    }

    /// Seed the aggregate for a target before project resolution.
    ///
    /// Compiler settings from the task level are overlaid by the target's.
    /// The target's `src` (or the task's, if the target has none) becomes the
    /// single compilation task; with no `src` anywhere there are no tasks.
    pub fn aggregate_for(&self, name: &str) -> Result<AggregateOptions> {
        let target = self.target(name)?;
        let mut aggregate = AggregateOptions::new(name);

        aggregate.settings = self.options.settings.clone();
        aggregate
            .settings
            .extend(target.settings.iter().map(|(k, v)| (k.clone(), v.clone())));

        if let Some(src) = target.src.as_ref().or(self.options.src.as_ref()) {
            aggregate
                .compilation_tasks
                .push(CompilationTask::new(src.clone()));
        }

        Ok(aggregate)
    }
}
