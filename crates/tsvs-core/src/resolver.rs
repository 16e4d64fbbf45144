//! Merge Visual Studio project settings into a target's options
//!
//! The `VsOptionsResolver` picks the project link for a target, asks a
//! [`ProjectSettingsProvider`] for that project's settings, and folds them
//! into an [`AggregateOptions`] in a fixed order:
//!
//! 1. Link selection (task-level `vs`, overridden by target-level `vs`)
//! 2. Project lookup
//! 3. File list merge (unless `ignoreFiles`)
//! 4. Compiler settings merge (unless `ignoreSettings`)
//! 5. Explicit `out` / `outDir` from task then target options

use crate::options::{AggregateOptions, LinkSpec, TargetOptions};
use crate::provider::{ExternalProjectSettings, ProjectSettingsProvider};
use crate::settings::merge_settings;
use crate::{Error, Result};
use tsvs_fs::NormalizedPath;

/// Resolves a target's options against its linked Visual Studio project.
///
/// Relative paths written into the aggregate are expressed relative to the
/// resolver's base directory (normally the directory holding the build file).
pub struct VsOptionsResolver<P> {
    provider: P,
    base_dir: NormalizedPath,
}

impl<P: ProjectSettingsProvider> VsOptionsResolver<P> {
    /// Create a resolver rooted at the current working directory.
    pub fn new(provider: P) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| tsvs_fs::Error::io(".", e))?;
        Ok(Self::with_base_dir(provider, cwd))
    }

    /// Create a resolver rooted at an explicit directory.
    pub fn with_base_dir(provider: P, base_dir: impl Into<NormalizedPath>) -> Self {
        Self {
            provider,
            base_dir: base_dir.into().normalize(),
        }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &NormalizedPath {
        &self.base_dir
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve `aggregate` in place.
    ///
    /// Without a project link this is a no-op. When the project lookup fails
    /// the error line is appended to `aggregate.errors` and the same error is
    /// returned; the selected link stays on `aggregate.vs`.
    pub async fn resolve(
        &self,
        aggregate: &mut AggregateOptions,
        task: &TargetOptions,
        target: &TargetOptions,
    ) -> Result<()> {
        if let Some(spec) = LinkSpec::select(task.vs.as_ref(), target.vs.as_ref()) {
            tracing::debug!(
                target_name = %aggregate.target_name,
                project = %spec.project,
                config = %spec.config,
                "selected VS project link"
            );
            aggregate.vs = Some(spec);
        }

        let Some(spec) = aggregate.vs.clone() else {
            return Ok(());
        };

        let external = match self
            .provider
            .get_settings(&spec.project, spec.configuration())
            .await
        {
            Ok(external) => external,
            Err(source) => {
                let err = Error::lookup_failed(&aggregate.target_name, &spec.project, source);
                tracing::warn!(target_name = %aggregate.target_name, error = %err, "VS project lookup failed");
                aggregate.errors.push(err.to_string());
                return Err(err);
            }
        };

        let project_dir = self.project_dir(&external);

        if spec.ignore_files {
            tracing::debug!("ignoreFiles set; skipping project file list");
        } else {
            self.merge_files(aggregate, &external, &project_dir);
        }

        if spec.ignore_settings {
            tracing::debug!("ignoreSettings set; skipping project settings");
        } else {
            merge_settings(aggregate, &external, &project_dir, &self.base_dir);
        }

        apply_output_overrides(aggregate, [task, target]);
        Ok(())
    }

    /// Absolute directory containing the project file.
    fn project_dir(&self, external: &ExternalProjectSettings) -> NormalizedPath {
        let project_file = self.base_dir.resolve(&external.project_file);
        project_file.parent().unwrap_or(project_file)
    }

    /// Add the project's files to the first compilation task, skipping any
    /// already listed in absolute or base-relative form.
    fn merge_files(
        &self,
        aggregate: &mut AggregateOptions,
        external: &ExternalProjectSettings,
        project_dir: &NormalizedPath,
    ) {
        let task = aggregate.first_task_mut();
        let mut added = 0usize;
        for file in external.unique_files() {
            let absolute = project_dir.resolve(file);
            let relative = absolute.relative_to(&self.base_dir);
            if task.add_source(absolute.as_str(), relative) {
                added += 1;
            }
        }
        tracing::debug!(added, total = task.src.len(), "merged VS project file list");
    }
}

/// Explicit `out` / `outDir` options beat anything taken from the project.
///
/// Scopes are applied in order, so later ones win. Empty values are unset.
fn apply_output_overrides<'a>(
    aggregate: &mut AggregateOptions,
    scopes: impl IntoIterator<Item = &'a TargetOptions>,
) {
    for scope in scopes {
        for task in &mut aggregate.compilation_tasks {
            if let Some(out) = scope.out.as_ref().filter(|s| !s.is_empty()) {
                task.out = Some(out.clone());
            }
            if let Some(out_dir) = scope.out_dir.as_ref().filter(|s| !s.is_empty()) {
                task.out_dir = Some(out_dir.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CompilationTask;

    #[test]
    fn later_scopes_win_output_overrides() {
        let mut aggregate = AggregateOptions::new("t")
            .with_task(CompilationTask::new(vec![]))
            .with_task(CompilationTask::new(vec![]));
        let task = TargetOptions::default().with_out("task.js").with_out_dir("task");
        let target = TargetOptions::default().with_out_dir("target");

        apply_output_overrides(&mut aggregate, [&task, &target]);

        for compilation in &aggregate.compilation_tasks {
            assert_eq!(compilation.out.as_deref(), Some("task.js"));
            assert_eq!(compilation.out_dir.as_deref(), Some("target"));
        }
    }

    #[test]
    fn empty_output_overrides_are_ignored() {
        let mut aggregate = AggregateOptions::new("t").with_task(CompilationTask {
            src: vec![],
            out: Some("proj/app.js".into()),
            out_dir: Some("proj/bin".into()),
        });
        let target = TargetOptions::default().with_out("").with_out_dir("");

        apply_output_overrides(&mut aggregate, [&target]);

        assert_eq!(aggregate.compilation_tasks[0].out.as_deref(), Some("proj/app.js"));
        assert_eq!(aggregate.compilation_tasks[0].out_dir.as_deref(), Some("proj/bin"));
    }

    #[test]
    fn new_resolver_is_rooted_at_current_dir() {
        struct NoProjects;

        #[async_trait::async_trait]
        impl ProjectSettingsProvider for NoProjects {
            async fn get_settings(
                &self,
                project_file: &str,
                _configuration: Option<&str>,
            ) -> std::result::Result<ExternalProjectSettings, crate::ProviderError> {
                Err(crate::ProviderError::not_found(project_file))
            }
        }

        let resolver = VsOptionsResolver::new(NoProjects).unwrap();
        let cwd = NormalizedPath::new(std::env::current_dir().unwrap()).normalize();
        assert_eq!(resolver.base_dir(), &cwd);
    }

    #[test]
    fn output_overrides_do_not_create_tasks() {
        let mut aggregate = AggregateOptions::new("t");
        let target = TargetOptions::default().with_out("a.js");
        apply_output_overrides(&mut aggregate, [&target]);
        assert!(aggregate.compilation_tasks.is_empty());
    }
}
