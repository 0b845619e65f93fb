//! End-to-end rendering of the manifest table against the bundled templates.

use std::fs;
use std::path::{Path, PathBuf};

use stencil_core::{Config, Overrides};
use stencil_renderer::{pipeline, Family, RenderError, TemplateRef, WriteResult};
use tempfile::TempDir;

fn bundled_templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../templates")
}

fn bundled_config(env: &str) -> Config {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../config")
        .join(format!("{env}.yaml"));
    stencil_core::config::load_at(&path).expect("bundled config")
}

/// Copy the bundled template tree so tests can remove files from it.
fn copy_templates(dest: &Path) {
    for family in Family::all() {
        let dir = dest.join(family.subdir());
        fs::create_dir_all(&dir).expect("mkdir");
        for template in family.templates() {
            fs::copy(
                template.source_path(&bundled_templates()),
                template.source_path(dest),
            )
            .expect("copy template");
        }
    }
}

#[test]
fn renders_all_five_manifests_without_template_suffix() {
    let out = TempDir::new().unwrap();
    let output_dir = out.path().join("rendered").join("dev");

    let files = pipeline::render_all(
        &bundled_config("dev"),
        &bundled_templates(),
        &output_dir,
        false,
        |_| {},
    )
    .expect("render");

    assert_eq!(files.len(), 5);
    let mut names: Vec<String> = fs::read_dir(&output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        [
            "app-of-apps.yaml",
            "application.yaml",
            "deployment.yaml",
            "namespace.yaml",
            "service.yaml",
        ]
    );
    assert!(names.iter().all(|n| !n.ends_with(".j2")));
}

#[test]
fn every_bundled_manifest_is_valid_yaml() {
    for env in ["dev", "prod"] {
        let out = TempDir::new().unwrap();
        let files = pipeline::render_all(
            &bundled_config(env),
            &bundled_templates(),
            out.path(),
            false,
            |_| {},
        )
        .expect("render");
        for file in files {
            let content = fs::read_to_string(&file.path).unwrap();
            serde_yaml::from_str::<serde_yaml::Value>(&content).unwrap_or_else(|e| {
                panic!("{} invalid YAML for {env}: {e}\n{content}", file.path.display())
            });
            assert!(!content.contains("\n\n"), "blank line left in {}", file.path.display());
        }
    }
}

#[test]
fn image_tag_appears_in_deployment() {
    let out = TempDir::new().unwrap();
    let mut config: Config =
        serde_yaml::from_str(include_str!("../../config/dev.yaml")).expect("config");
    config.set_str("image_tag", "v1.2.3");
    config.set_str("version", "1.2.3");

    pipeline::render_all(&config, &bundled_templates(), out.path(), false, |_| {})
        .expect("render");

    let deployment = fs::read_to_string(out.path().join("deployment.yaml")).unwrap();
    assert!(deployment.contains("ghcr.io/example/gitops-demo:v1.2.3"));
    assert!(deployment.contains("replicas: 1"));
}

#[test]
fn override_replaces_config_tag_everywhere() {
    let out = TempDir::new().unwrap();
    let mut config = bundled_config("prod");
    config.apply_overrides(&Overrides {
        image_tag: Some("foo".to_string()),
        version: None,
    });

    let files = pipeline::render_all(&config, &bundled_templates(), out.path(), false, |_| {})
        .expect("render");

    for file in files {
        let content = fs::read_to_string(&file.path).unwrap();
        if content.contains("image") && file.template.family == Family::Kubernetes {
            assert!(!content.contains(":v1.0.0"), "{} kept config tag", file.path.display());
        }
    }
    let deployment = fs::read_to_string(out.path().join("deployment.yaml")).unwrap();
    assert!(deployment.contains(":foo"));
    let application = fs::read_to_string(out.path().join("application.yaml")).unwrap();
    assert!(application.contains("\"foo\""));
    assert!(!application.contains("v1.0.0"));
}

#[test]
fn progress_callback_runs_in_table_order() {
    let out = TempDir::new().unwrap();
    let mut seen = Vec::new();
    pipeline::render_all(
        &bundled_config("dev"),
        &bundled_templates(),
        out.path(),
        false,
        |file| seen.push(file.template.file_name),
    )
    .expect("render");

    let expected: Vec<&str> = TemplateRef::all().map(|t| t.file_name).collect();
    assert_eq!(seen, expected);
}

#[test]
fn rerender_is_byte_identical_and_unchanged() {
    let out = TempDir::new().unwrap();
    let config = bundled_config("dev");

    pipeline::render_all(&config, &bundled_templates(), out.path(), false, |_| {})
        .expect("first render");
    let first: Vec<Vec<u8>> = TemplateRef::all()
        .map(|t| fs::read(t.output_path(out.path())).unwrap())
        .collect();

    let second_run = pipeline::render_all(&config, &bundled_templates(), out.path(), false, |_| {})
        .expect("second render");
    let second: Vec<Vec<u8>> = TemplateRef::all()
        .map(|t| fs::read(t.output_path(out.path())).unwrap())
        .collect();

    assert_eq!(first, second);
    assert!(second_run
        .iter()
        .all(|f| matches!(f.write, WriteResult::Unchanged { .. })));
}

#[test]
fn unrelated_template_in_root_does_not_break_the_run() {
    let templates = TempDir::new().unwrap();
    copy_templates(templates.path());
    fs::write(
        templates.path().join("k8s/legacy-ingress.yaml.j2"),
        "host: {{ host | default('x') }}\n",
    )
    .unwrap();
    fs::write(templates.path().join("argocd/binary.yaml.j2"), [0xff, 0xfe, 0x00]).unwrap();

    let out = TempDir::new().unwrap();
    let files = pipeline::render_all(
        &bundled_config("dev"),
        templates.path(),
        out.path(),
        false,
        |_| {},
    )
    .expect("render");

    assert_eq!(files.len(), 5);
    assert!(!out.path().join("legacy-ingress.yaml").exists());
}

#[test]
fn missing_template_aborts_remaining_family() {
    let templates = TempDir::new().unwrap();
    copy_templates(templates.path());
    fs::remove_file(templates.path().join("k8s/service.yaml.j2")).unwrap();

    let out = TempDir::new().unwrap();
    let mut rendered = Vec::new();
    let err = pipeline::render_all(
        &bundled_config("dev"),
        templates.path(),
        out.path(),
        false,
        |file| rendered.push(file.template.file_name),
    )
    .unwrap_err();

    assert!(matches!(err, RenderError::TemplateNotFound { .. }), "got: {err}");
    assert!(err.to_string().contains("k8s/service.yaml.j2"));
    assert_eq!(rendered, ["deployment.yaml.j2"]);
    assert!(out.path().join("deployment.yaml").exists());
    assert!(!out.path().join("namespace.yaml").exists());
    assert!(!out.path().join("application.yaml").exists());
}

#[test]
fn missing_variable_is_a_render_error() {
    let out = TempDir::new().unwrap();
    let config: Config = serde_yaml::from_str("image_tag: v1\nversion: 1\n").unwrap();

    let err = pipeline::render_all(&config, &bundled_templates(), out.path(), false, |_| {})
        .unwrap_err();
    assert!(matches!(err, RenderError::Template { .. }), "got: {err}");
    assert!(err.to_string().contains("k8s/deployment.yaml.j2"));
    assert!(!out.path().join("deployment.yaml").exists());
}

#[test]
fn dry_run_writes_nothing() {
    let out = TempDir::new().unwrap();
    let output_dir = out.path().join("rendered").join("dev");

    let files = pipeline::render_all(
        &bundled_config("dev"),
        &bundled_templates(),
        &output_dir,
        true,
        |_| {},
    )
    .expect("dry run");

    assert_eq!(files.len(), 5);
    assert!(files
        .iter()
        .all(|f| matches!(f.write, WriteResult::WouldWrite { .. })));
    assert!(!output_dir.exists());
}
