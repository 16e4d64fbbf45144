//! Option types: raw per-scope options, the project link, and the aggregate
//! that the resolver fills in.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tsvs_fs::NormalizedPath;

/// The `vs` option as written in a build file.
///
/// Either a bare project path or a record. Converted to [`LinkSpec`] once, at
/// the edge; nothing downstream looks at this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLinkSpec {
    Path(String),
    Record(LinkSpecRecord),
}

impl RawLinkSpec {
    fn is_empty_path(&self) -> bool {
        matches!(self, Self::Path(path) if path.is_empty())
    }
}

/// Record form of [`RawLinkSpec`]; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSpecRecord {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub config: Option<String>,
    #[serde(default)]
    pub ignore_files: Option<bool>,
    #[serde(default)]
    pub ignore_settings: Option<bool>,
}

/// Link from a target to a Visual Studio project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSpec {
    /// Path to the project file
    pub project: String,
    /// Build configuration name; empty means the project default
    pub config: String,
    /// Do not merge the project's file list
    pub ignore_files: bool,
    /// Do not merge the project's compiler settings
    pub ignore_settings: bool,
}

impl LinkSpec {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            ..Self::default()
        }
    }

    /// Configuration name to pass to a provider; `None` selects the default.
    pub fn configuration(&self) -> Option<&str> {
        Some(self.config.as_str()).filter(|c| !c.is_empty())
    }

    /// Overlay `other` onto `self`, field by field.
    ///
    /// Only non-empty strings and `true` flags in `other` replace a value.
    pub fn override_with(&mut self, other: &LinkSpec) {
        if !other.project.is_empty() {
            self.project.clone_from(&other.project);
        }
        if !other.config.is_empty() {
            self.config.clone_from(&other.config);
        }
        if other.ignore_files {
            self.ignore_files = true;
        }
        if other.ignore_settings {
            self.ignore_settings = true;
        }
    }

    /// Pick the link spec for a target from the task-level and target-level
    /// `vs` options. The target's set fields win. An empty bare path counts
    /// as no link.
    pub fn select(task: Option<&RawLinkSpec>, target: Option<&RawLinkSpec>) -> Option<Self> {
        let task = task.filter(|raw| !raw.is_empty_path()).map(LinkSpec::from);
        let target = target.filter(|raw| !raw.is_empty_path()).map(LinkSpec::from);
        match (task, target) {
            (Some(mut spec), Some(target)) => {
                spec.override_with(&target);
                Some(spec)
            }
            (spec, None) | (None, spec) => spec,
        }
    }
}

impl From<&RawLinkSpec> for LinkSpec {
    fn from(raw: &RawLinkSpec) -> Self {
        match raw {
            RawLinkSpec::Path(project) => Self::new(project.as_str()),
            RawLinkSpec::Record(record) => Self {
                project: record.project.clone().unwrap_or_default(),
                config: record.config.clone().unwrap_or_default(),
                ignore_files: record.ignore_files.unwrap_or(false),
                ignore_settings: record.ignore_settings.unwrap_or(false),
            },
        }
    }
}

/// Options declared at one scope of a build file (task-wide or per target).
///
/// Keys other than the ones named here are compiler settings and land in
/// `settings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vs: Option<RawLinkSpec>,

    /// Single output file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<Vec<String>>,

    #[serde(flatten)]
    pub settings: BTreeMap<String, Value>,
}

impl TargetOptions {
    pub fn with_vs(mut self, vs: RawLinkSpec) -> Self {
        self.vs = Some(vs);
        self
    }

    pub fn with_out(mut self, out: impl Into<String>) -> Self {
        self.out = Some(out.into());
        self
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<String>) -> Self {
        self.out_dir = Some(out_dir.into());
        self
    }
}

/// One compiler invocation's inputs and outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationTask {
    pub src: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
}

impl CompilationTask {
    pub fn new(src: Vec<String>) -> Self {
        Self {
            src,
            ..Self::default()
        }
    }

    /// Append `relative` unless the file is already listed in either form.
    ///
    /// Existing entries are compared with backslashes turned into forward
    /// slashes. Returns whether the list grew.
    pub fn add_source(&mut self, absolute: &str, relative: String) -> bool {
        let listed = self.src.iter().any(|s| {
            let listed = NormalizedPath::new(s);
            listed.as_str() == absolute || listed.as_str() == relative
        });
        if !listed {
            self.src.push(relative);
        }
        !listed
    }
}

/// Everything resolved for one target.
///
/// Built by the caller, then mutated in place by
/// [`VsOptionsResolver`](crate::VsOptionsResolver).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateOptions {
    /// Target name, used in error messages
    pub target_name: String,

    pub compilation_tasks: Vec<CompilationTask>,

    /// Compiler settings keyed by option name (`declaration`, `target`, ...)
    pub settings: BTreeMap<String, Value>,

    /// User-facing error lines, in the order they were raised
    pub errors: Vec<String>,

    /// Active project link, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vs: Option<LinkSpec>,
}

impl AggregateOptions {
    pub fn new(target_name: impl Into<String>) -> Self {
        Self {
            target_name: target_name.into(),
            ..Self::default()
        }
    }

    pub fn with_task(mut self, task: CompilationTask) -> Self {
        self.compilation_tasks.push(task);
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// First compilation task, created empty if there is none yet.
    pub fn first_task_mut(&mut self) -> &mut CompilationTask {
        if self.compilation_tasks.is_empty() {
            self.compilation_tasks.push(CompilationTask::default());
        }
        &mut self.compilation_tasks[0]
    }
}
