//! Integration tests for `shipit run`
//!
//! The pipeline contract under test: clean tolerates a missing output
//! directory, a failing step aborts everything after it, the staged
//! manifest is byte-identical to the source, and the publish tool runs
//! from inside the output directory with the access flag appended.

use crate::helpers::{BASIC_MANIFEST, TestProject, run_shipit, run_shipit_raw};
use anyhow::Result;

fn run_pipeline(project: &TestProject, extra: &[&str]) -> Result<std::process::Output> {
  let build = project.build_cmd()?;
  let publish = project.publish_cmd()?;

  let mut args = vec!["run", "--build-cmd", &build, "--publish-cmd", &publish];
  args.extend_from_slice(extra);

  run_shipit_raw(&project.path, &args)
}

#[test]
fn test_run_full_pipeline() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_pipeline(&project, &[])?;
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

  // Build artifacts plus exactly the copied manifest
  assert!(project.file_exists("dist/bundle.js"));
  assert_eq!(project.read_file("dist/package.json")?, BASIC_MANIFEST);

  // Publish ran from inside dist/ with the access flag appended
  let log = project.publish_log().expect("publish tool should have run");
  let mut lines = log.lines();
  let cwd = lines.next().unwrap_or("");
  assert!(cwd.ends_with("/dist"), "publish cwd should be dist/, got: {}", cwd);
  assert_eq!(lines.next().unwrap_or("").trim(), "--access public");

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Published x@1.0.0"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_run_with_no_existing_output_dir() -> Result<()> {
  let project = TestProject::new()?;
  assert!(!project.file_exists("dist"));

  // Removal of a nonexistent output directory must not raise
  let output = run_pipeline(&project, &[])?;
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

  Ok(())
}

#[test]
fn test_run_clears_stale_output() -> Result<()> {
  let project = TestProject::new()?;
  std::fs::create_dir_all(project.path.join("dist"))?;
  std::fs::write(project.path.join("dist/stale.js"), "old artifact")?;

  let output = run_pipeline(&project, &[])?;
  assert!(output.status.success());

  assert!(!project.file_exists("dist/stale.js"), "Stale output should be removed");
  assert!(project.file_exists("dist/bundle.js"));

  Ok(())
}

#[test]
fn test_run_twice_is_idempotent() -> Result<()> {
  let project = TestProject::new()?;

  let first = run_pipeline(&project, &[])?;
  assert!(first.status.success());
  let first_copy = project.read_file("dist/package.json")?;

  let second = run_pipeline(&project, &[])?;
  assert!(second.status.success());
  let second_copy = project.read_file("dist/package.json")?;

  assert_eq!(first_copy, second_copy);
  assert_eq!(second_copy, BASIC_MANIFEST);

  Ok(())
}

#[test]
fn test_missing_manifest_halts_before_publish() -> Result<()> {
  let project = TestProject::without_manifest()?;

  let output = run_pipeline(&project, &[])?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(
    stderr.contains("Package manifest not found"),
    "Should report a clear file-not-found error, got: {}",
    stderr
  );

  assert!(project.publish_log().is_none(), "Publish tool must not run");

  Ok(())
}

#[test]
fn test_failing_build_aborts_pipeline() -> Result<()> {
  let project = TestProject::new()?;
  let build = project.failing_build_cmd()?;
  let publish = project.publish_cmd()?;

  let output = run_shipit_raw(
    &project.path,
    &["run", "--build-cmd", &build, "--publish-cmd", &publish],
  )?;

  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(2));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("exit code 7"), "Should surface the tool's status, got: {}", stderr);

  // Nothing past the build step ran
  assert!(!project.file_exists("dist/package.json"));
  assert!(project.publish_log().is_none(), "Publish tool must not run");

  Ok(())
}

#[test]
fn test_dry_run_changes_nothing() -> Result<()> {
  let project = TestProject::new()?;
  std::fs::create_dir_all(project.path.join("dist"))?;
  std::fs::write(project.path.join("dist/stale.js"), "old artifact")?;

  let output = run_pipeline(&project, &["--dry-run"])?;
  assert!(output.status.success());

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Dry-run"), "got: {}", stdout);

  assert!(project.file_exists("dist/stale.js"), "Dry run must not touch the output dir");
  assert!(project.publish_log().is_none());

  Ok(())
}

#[test]
fn test_skip_publish_stages_manifest_only() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_pipeline(&project, &["--skip-publish"])?;
  assert!(output.status.success());

  assert_eq!(project.read_file("dist/package.json")?, BASIC_MANIFEST);
  assert!(project.publish_log().is_none(), "Publish tool must not run");

  Ok(())
}

#[test]
fn test_private_manifest_warns_but_proceeds() -> Result<()> {
  let project = TestProject::without_manifest()?;
  project.write_manifest(r#"{"name":"x","version":"1.0.0","private":true}"#)?;

  let build = project.build_cmd()?;
  let publish = project.publish_cmd()?;
  let output = run_shipit(
    &project.path,
    &["run", "--build-cmd", &build, "--publish-cmd", &publish],
  )?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("private"), "Should warn about private manifest, got: {}", stdout);

  // The external tool stays the authority; the pipeline still ran
  assert!(project.publish_log().is_some());

  Ok(())
}

#[test]
fn test_custom_dist_dir_and_access() -> Result<()> {
  let project = TestProject::new()?;

  // Stub build tool that populates out/ instead of dist/
  let script = project.path.join("fake-build-out.sh");
  std::fs::write(&script, "#!/bin/sh\nmkdir -p out\necho x > out/bundle.js\n")?;
  let build = format!("sh {}", script.display());
  let publish = project.publish_cmd()?;

  let output = run_shipit(
    &project.path,
    &[
      "run",
      "--dist-dir",
      "out",
      "--access",
      "restricted",
      "--build-cmd",
      &build,
      "--publish-cmd",
      &publish,
    ],
  )?;
  assert!(output.status.success());

  assert_eq!(project.read_file("out/package.json")?, BASIC_MANIFEST);

  let log = project.publish_log().expect("publish tool should have run");
  let mut lines = log.lines();
  assert!(lines.next().unwrap_or("").ends_with("/out"));
  assert_eq!(lines.next().unwrap_or("").trim(), "--access restricted");

  Ok(())
}
