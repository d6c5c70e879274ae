//! `shipit run` - Execute the publish pipeline
//!
//! Runs the four steps in strict order, stopping at the first failure:
//! clean, build, stage manifest, publish. Supports:
//! - `--dry-run` to show the plan without executing
//! - `--skip-publish` to stop after staging the manifest

use crate::core::error::ShipResult;
use crate::core::pipeline::{CleanOutcome, Driver, DriverConfig};
use std::path::Path;

/// Options for the run command
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
  pub dry_run: bool,
  pub skip_publish: bool,
}

/// Run the publish pipeline from the given project root
pub fn run_publish(root: &Path, config: DriverConfig, opts: RunOptions) -> ShipResult<()> {
  let driver = Driver::new(root, config);

  // Pre-flight: resolves the package spec and fails fast on a missing or
  // broken manifest before any step touches the filesystem
  let plan = driver.plan()?;

  println!("📦 Publishing {}", plan.package);
  println!();

  if plan.private {
    println!("⚠️  The manifest sets \"private\": true; the registry will refuse to publish it.");
    println!();
  }

  if opts.dry_run {
    println!("Would execute:");
    for (i, step) in plan.steps.iter().enumerate() {
      println!("  {}. {}", i + 1, step.description);
    }
    println!();
    println!("🔍 Dry-run mode (no changes applied)");
    return Ok(());
  }

  // 1. Clean
  match driver.clean()? {
    CleanOutcome::Removed => println!("🧹 Removed {}/", plan.dist_dir.display()),
    CleanOutcome::AlreadyAbsent => println!("🧹 {}/ already absent", plan.dist_dir.display()),
  }

  // 2. Build
  println!("🔨 Running `{}`", driver.build_command()?);
  driver.build()?;

  // 3. Stage manifest
  let staged = driver.stage_manifest()?;
  println!("📄 Staged manifest at {}", staged.display());

  if opts.skip_publish {
    println!();
    println!("⏭️  Skipping publish (--skip-publish)");
    println!("   Inspect {}/ and run `shipit run` to publish", plan.dist_dir.display());
    return Ok(());
  }

  // 4. Publish
  println!("🚀 Running `{}` in {}/", driver.publish_command()?, plan.dist_dir.display());
  driver.publish()?;

  println!();
  println!("✅ Published {}", plan.package);

  Ok(())
}
