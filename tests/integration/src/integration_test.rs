//! End-to-end: build file on disk -> seeded aggregate -> project resolution.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use tsvs_core::{
    BuildFile, Error, ExternalProjectSettings, ProjectSettingsProvider, ProviderError,
    VsOptionsResolver,
};
use tsvs_fs::NormalizedPath;
use tsvs_test_utils::{StaticProvider, TestBuildDir};

const BUILD_TOML: &str = r#"
[options]
noImplicitAny = false
removeComments = true

[targets.app]
src = ["src/main.ts"]
vs = { project = "proj/app.csproj", config = "Release" }

[targets.lib]
vs = "proj/app.csproj"
out = "dist/lib.js"

[targets.plain]
src = ["plain.ts"]
outDir = "plain-out"
"#;

fn app_settings(dir: &TestBuildDir) -> ExternalProjectSettings {
    ExternalProjectSettings::new(dir.path("proj/app.csproj").as_str())
        .with_file("src/main.ts")
        .with_file("src/util.ts")
        .with_file("../src/main.ts")
        .with_setting("NoImplicitAny", true)
        .with_setting("Target", "es5")
        .with_setting("RemoveComments", false)
        .with_setting("ModuleKind", "amd")
        .with_setting("OutDir", "out dir")
}

#[tokio::test]
async fn test_toml_build_file_resolves_against_project() {
    let dir = TestBuildDir::new();
    let build_path = dir.write("build.toml", BUILD_TOML);
    let build = BuildFile::load(&build_path).unwrap();

    let provider = StaticProvider::new().with_project("proj/app.csproj", app_settings(&dir));
    let resolver = VsOptionsResolver::with_base_dir(provider, dir.root());

    let mut aggregate = build.aggregate_for("app").unwrap();
    resolver
        .resolve(&mut aggregate, &build.options, build.target("app").unwrap())
        .await
        .unwrap();

    assert!(aggregate.errors.is_empty());
    assert_eq!(
        aggregate.compilation_tasks[0].src,
        vec!["src/main.ts", "proj/src/main.ts", "proj/src/util.ts"]
    );
    assert_eq!(aggregate.settings["noImplicitAny"], json!(false));
    assert_eq!(aggregate.settings["removeComments"], json!(true));
    assert_eq!(aggregate.settings["target"], json!("es5"));
    assert_eq!(aggregate.settings["module"], json!("amd"));
    assert_eq!(
        aggregate.compilation_tasks[0].out_dir.as_deref(),
        Some("\"proj/out dir\"")
    );
    assert_eq!(
        resolver.provider().calls()[0].configuration.as_deref(),
        Some("Release")
    );
}

#[tokio::test]
async fn test_target_out_beats_project_out_file() {
    let dir = TestBuildDir::new();
    let build = BuildFile::load(&dir.write("build.toml", BUILD_TOML)).unwrap();
    let settings = app_settings(&dir).with_setting("OutFile", "bundle.js");
    let provider = StaticProvider::new().with_project("proj/app.csproj", settings);
    let resolver = VsOptionsResolver::with_base_dir(provider, dir.root());

    let mut aggregate = build.aggregate_for("lib").unwrap();
    resolver
        .resolve(&mut aggregate, &build.options, build.target("lib").unwrap())
        .await
        .unwrap();

    assert_eq!(aggregate.compilation_tasks.len(), 1);
    assert_eq!(aggregate.compilation_tasks[0].out.as_deref(), Some("dist/lib.js"));
}

#[tokio::test]
async fn test_target_without_link_is_left_alone() {
    let dir = TestBuildDir::new();
    let build = BuildFile::load(&dir.write("build.toml", BUILD_TOML)).unwrap();
    let resolver = VsOptionsResolver::with_base_dir(StaticProvider::new(), dir.root());

    let mut aggregate = build.aggregate_for("plain").unwrap();
    let before = aggregate.clone();
    resolver
        .resolve(&mut aggregate, &build.options, build.target("plain").unwrap())
        .await
        .unwrap();

    assert_eq!(aggregate, before);
    assert!(resolver.provider().calls().is_empty());
}

#[tokio::test]
async fn test_json_build_file_is_accepted() {
    let dir = TestBuildDir::new();
    let build_path = dir.write(
        "build.json",
        r#"{
            "targets": {
                "app": {
                    "vs": {"project": "proj/app.csproj", "ignoreSettings": true},
                    "sourceMap": true
                }
            }
        }"#,
    );
    let build = BuildFile::load(&build_path).unwrap();
    let provider = StaticProvider::new().with_project("proj/app.csproj", app_settings(&dir));
    let resolver = VsOptionsResolver::with_base_dir(provider, dir.root());

    let mut aggregate = build.aggregate_for("app").unwrap();
    resolver
        .resolve(&mut aggregate, &build.options, build.target("app").unwrap())
        .await
        .unwrap();

    assert_eq!(aggregate.settings.len(), 1);
    assert_eq!(aggregate.settings["sourceMap"], json!(true));
    assert_eq!(
        aggregate.compilation_tasks[0].src,
        vec!["proj/src/main.ts", "proj/src/util.ts", "src/main.ts"]
    );
    assert_eq!(aggregate.compilation_tasks[0].out_dir, None);
}

/// Checks the project file exists on disk, then serves an empty project.
struct DiskProvider {
    base: NormalizedPath,
}

#[async_trait]
impl ProjectSettingsProvider for DiskProvider {
    async fn get_settings(
        &self,
        project_file: &str,
        _configuration: Option<&str>,
    ) -> Result<ExternalProjectSettings, ProviderError> {
        let path = self.base.resolve(project_file);
        std::fs::metadata(path.to_native())
            .map_err(|e| ProviderError::from(e).with_path(project_file))?;
        Ok(ExternalProjectSettings::new(path.as_str()))
    }
}

#[tokio::test]
async fn test_missing_project_on_disk_is_reported() {
    let dir = TestBuildDir::new();
    let build = BuildFile::load(&dir.write("build.toml", BUILD_TOML)).unwrap();
    let provider = DiskProvider { base: dir.base() };
    let resolver = VsOptionsResolver::with_base_dir(provider, dir.root());

    let mut aggregate = build.aggregate_for("app").unwrap();
    let err = resolver
        .resolve(&mut aggregate, &build.options, build.target("app").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ProjectNotFound { .. }));
    assert_eq!(
        aggregate.errors,
        vec!["In target \"app\" - could not find VS project at \"proj/app.csproj\"."]
    );
}

#[tokio::test]
async fn test_existing_project_on_disk_resolves() {
    let dir = TestBuildDir::new();
    dir.write("proj/app.csproj", "<Project />");
    let build = BuildFile::load(&dir.write("build.toml", BUILD_TOML)).unwrap();
    let provider = DiskProvider { base: dir.base() };
    let resolver = VsOptionsResolver::with_base_dir(provider, dir.root());

    let mut aggregate = build.aggregate_for("app").unwrap();
    resolver
        .resolve(&mut aggregate, &build.options, build.target("app").unwrap())
        .await
        .unwrap();

    assert!(aggregate.errors.is_empty());
    assert_eq!(aggregate.compilation_tasks[0].src, vec!["src/main.ts"]);
}
