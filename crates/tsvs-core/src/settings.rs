//! Mapping from project settings to compiler options

use crate::options::AggregateOptions;
use crate::provider::ExternalProjectSettings;
use serde_json::Value;
use tsvs_fs::{NormalizedPath, escape_path_if_required};

/// Project property → compiler option, copied verbatim.
pub const SIMPLE_SETTINGS: &[(&str, &str)] = &[
    ("GeneratesDeclarations", "declaration"),
    ("NoEmitOnError", "noEmitOnError"),
    ("MapRoot", "mapRoot"),
    ("NoImplicitAny", "noImplicitAny"),
    ("NoResolve", "noResolve"),
    ("PreserveConstEnums", "preserveConstEnums"),
    ("RemoveComments", "removeComments"),
    ("SourceMap", "sourceMap"),
    ("SourceRoot", "sourceRoot"),
    ("SuppressImplicitAnyIndexErrors", "suppressImplicitAnyIndexErrors"),
    ("Target", "target"),
];

const MODULE_KIND: &str = "ModuleKind";
const MODULE: &str = "module";
const OUT_DIR: &str = "OutDir";
const OUT_FILE: &str = "OutFile";

/// Copy project settings into `aggregate` without touching options it
/// already has, then point every compilation task at the project's output
/// locations.
///
/// `project_dir` is the absolute directory of the project file; output paths
/// are rewritten relative to `base_dir`.
pub fn merge_settings(
    aggregate: &mut AggregateOptions,
    external: &ExternalProjectSettings,
    project_dir: &NormalizedPath,
    base_dir: &NormalizedPath,
) {
    for (source, destination) in SIMPLE_SETTINGS {
        copy_if_absent(aggregate, external, source, destination);
    }

    if !aggregate.settings.contains_key(MODULE) {
        match external.get(MODULE_KIND) {
            Some(Value::String(kind)) if kind == "none" => {
                tracing::debug!("project module kind is \"none\"; leaving module unset");
            }
            Some(kind) => {
                aggregate.settings.insert(MODULE.to_string(), kind.clone());
            }
            None => {}
        }
    }

    if let Some(out_dir) = external.non_empty_str(OUT_DIR) {
        let out_dir = rebase_output_path(out_dir, project_dir, base_dir);
        tracing::debug!(%out_dir, "applying project OutDir to all compilation tasks");
        for task in &mut aggregate.compilation_tasks {
            task.out_dir = Some(out_dir.clone());
        }
    }

    if let Some(out_file) = external.non_empty_str(OUT_FILE) {
        let out_file = rebase_output_path(out_file, project_dir, base_dir);
        tracing::debug!(%out_file, "applying project OutFile to all compilation tasks");
        for task in &mut aggregate.compilation_tasks {
            task.out = Some(out_file.clone());
        }
    }
}

fn copy_if_absent(
    aggregate: &mut AggregateOptions,
    external: &ExternalProjectSettings,
    source: &str,
    destination: &str,
) {
    if aggregate.settings.contains_key(destination) {
        return;
    }
    if let Some(value) = external.get(source) {
        tracing::trace!(source, destination, %value, "copying project setting");
        aggregate
            .settings
            .insert(destination.to_string(), value.clone());
    }
}

/// Project-relative output path → base-relative, forward slashes, quoted if
/// it contains a space.
fn rebase_output_path(path: &str, project_dir: &NormalizedPath, base_dir: &NormalizedPath) -> String {
    let absolute = project_dir.resolve(path);
    escape_path_if_required(&absolute.relative_to(base_dir))
}
