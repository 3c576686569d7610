use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

const METADATA: &str = r#"
icons:
  - name: add
    output:
      - moduleName: Add16
        filepath: add/16.js
        descriptor:
          attrs: { width: 16, height: 16, viewBox: "0 0 16 16" }
          content:
            - elem: path
              attrs: { d: "M1 1" }
  - name: close
    deprecated: true
    output:
      - moduleName: Close16
        filepath: close/16.js
        descriptor:
          attrs: { width: 16, height: 16, viewBox: "0 0 16 16" }
          content: []
"#;

#[test]
fn test_init_writes_config() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("iconkit")
        .args(["init", dir.path().to_str().unwrap()])
        .assert()
        .success();

    let config = std::fs::read_to_string(dir.path().join("iconkit.yaml")).unwrap();
    assert!(config.contains("umd_name: CarbonIconsReact"));

    // A second init refuses to overwrite
    cargo_bin_cmd!("iconkit")
        .args(["init", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already contains"));
}

#[test]
fn test_generate_writes_sources() {
    let dir = tempfile::tempdir().unwrap();
    let metadata = dir.path().join("metadata.yaml");
    std::fs::write(&metadata, METADATA).unwrap();
    let out = dir.path().join("src");

    cargo_bin_cmd!("iconkit")
        .args([
            "--config",
            dir.path().to_str().unwrap(),
            "generate",
            "--metadata",
            metadata.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    let index = std::fs::read_to_string(out.join("index.js")).unwrap();
    assert!(index.contains("export { default as Add16 } from './add/16.js';"));
    assert!(index.contains("export { default as Close16 } from './close/16.js';"));

    let add = std::fs::read_to_string(out.join("add/16.js")).unwrap();
    assert!(add.contains(r#"<path d="M1 1" />"#));
    assert!(out.join("Icon.js").exists());
}

#[test]
fn test_generate_missing_metadata_fails() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("iconkit")
        .args([
            "--config",
            dir.path().to_str().unwrap(),
            "generate",
            "--metadata",
            dir.path().join("nope.json").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load icon metadata"));
}

#[cfg(unix)]
#[test]
fn test_build_surfaces_bundler_failure() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("iconkit.yaml"),
        "bundler:\n  command: sh\n  args: [\"-c\", \"echo rollup exploded >&2; exit 1\"]\n",
    )
    .unwrap();
    let metadata = dir.path().join("metadata.yaml");
    std::fs::write(&metadata, METADATA).unwrap();

    cargo_bin_cmd!("iconkit")
        .args([
            "--config",
            dir.path().to_str().unwrap(),
            "build",
            "--metadata",
            metadata.to_str().unwrap(),
            "--output",
            dir.path().join("dist").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ES module bundle failed"));
}

#[cfg(unix)]
#[test]
fn test_build_with_succeeding_bundler() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("iconkit.yaml"),
        "bundler:\n  command: \"true\"\n  args: []\n",
    )
    .unwrap();
    let metadata = dir.path().join("metadata.yaml");
    std::fs::write(&metadata, METADATA).unwrap();

    cargo_bin_cmd!("iconkit")
        .args([
            "--config",
            dir.path().to_str().unwrap(),
            "build",
            "--metadata",
            metadata.to_str().unwrap(),
            "--output",
            dir.path().join("dist").to_str().unwrap(),
            "--concurrent",
        ])
        .assert()
        .success();
}
