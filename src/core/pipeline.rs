//! The publish pipeline: clean, build, stage manifest, publish
//!
//! A fixed four-step sequence with no retries, no rollback, and no state
//! across steps beyond the project root and config. Steps run in strict
//! order and the first failure aborts the rest:
//!
//! 1. **Clean**: remove the output directory, tolerating its absence
//! 2. **Build**: run the build tool from the project root
//! 3. **StageManifest**: copy the manifest into the output directory
//! 4. **Publish**: run the publish tool from inside the output directory

use crate::core::error::{ManifestError, ShipError, ShipResult, ValidationError};
use crate::core::manifest::{self, PackageManifest};
use crate::core::tool::ToolCommand;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;

pub const DEFAULT_DIST_DIR: &str = "dist";
pub const DEFAULT_MANIFEST: &str = "package.json";
pub const DEFAULT_BUILD_CMD: &str = "tsc";
pub const DEFAULT_PUBLISH_CMD: &str = "npm publish";
pub const DEFAULT_ACCESS: &str = "public";

/// Driver configuration
///
/// Defaults reproduce the classic publish script exactly: `rm -rf dist`,
/// `tsc`, copy `package.json`, `npm publish --access public` from `dist/`.
/// Overrides exist for testing and for projects with a different build tool.
#[derive(Debug, Clone)]
pub struct DriverConfig {
  /// Build output directory, relative to the project root
  pub dist_dir: PathBuf,
  /// Manifest filename at the project root
  pub manifest: String,
  /// Build command, run from the project root
  pub build_cmd: String,
  /// Publish command, run from the output directory; `--access` is appended
  pub publish_cmd: String,
  /// Registry access level
  pub access: String,
}

impl Default for DriverConfig {
  fn default() -> Self {
    Self {
      dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
      manifest: DEFAULT_MANIFEST.to_string(),
      build_cmd: DEFAULT_BUILD_CMD.to_string(),
      publish_cmd: DEFAULT_PUBLISH_CMD.to_string(),
      access: DEFAULT_ACCESS.to_string(),
    }
  }
}

/// The four pipeline steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
  Clean,
  Build,
  StageManifest,
  Publish,
}

/// A step together with a human-readable description of what it will do
#[derive(Debug, Clone, Serialize)]
pub struct PlannedStep {
  pub step: Step,
  pub description: String,
}

/// Serializable rendering of the pipeline for `plan` and `run --dry-run`
#[derive(Debug, Clone, Serialize)]
pub struct PublishPlan {
  /// Package spec (`name@version`) resolved from the manifest
  pub package: String,
  pub dist_dir: PathBuf,
  pub private: bool,
  pub steps: Vec<PlannedStep>,
}

/// Outcome of the clean step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanOutcome {
  Removed,
  AlreadyAbsent,
}

/// The release driver: owns the project root and config, exposes one
/// method per pipeline step plus plan generation
pub struct Driver {
  root: PathBuf,
  config: DriverConfig,
}

impl Driver {
  pub fn new(root: impl Into<PathBuf>, config: DriverConfig) -> Self {
    Self {
      root: root.into(),
      config,
    }
  }

  /// Path of the output directory under the project root
  pub fn dist_path(&self) -> PathBuf {
    self.root.join(&self.config.dist_dir)
  }

  /// Load and validate the package manifest at the project root
  pub fn load_manifest(&self) -> ShipResult<PackageManifest> {
    manifest::load(&self.root, &self.config.manifest)
  }

  /// Build the step plan without executing anything
  ///
  /// Also serves as the pre-flight check: a missing or broken manifest
  /// fails here, before any step has touched the filesystem.
  pub fn plan(&self) -> ShipResult<PublishPlan> {
    let manifest = self.load_manifest()?;
    let build = self.build_command()?;
    let publish = self.publish_command()?;
    let dist = self.config.dist_dir.display();

    let steps = vec![
      PlannedStep {
        step: Step::Clean,
        description: format!("Remove {}/ (tolerating its absence)", dist),
      },
      PlannedStep {
        step: Step::Build,
        description: format!("Run `{}` from the project root", build),
      },
      PlannedStep {
        step: Step::StageManifest,
        description: format!("Copy {} into {}/", self.config.manifest, dist),
      },
      PlannedStep {
        step: Step::Publish,
        description: format!("Run `{}` from {}/", publish, dist),
      },
    ];

    Ok(PublishPlan {
      package: manifest.spec(),
      dist_dir: self.config.dist_dir.clone(),
      private: manifest.private,
      steps,
    })
  }

  /// Step 1: remove the output directory
  ///
  /// Removal is idempotent: a missing directory is success. Any other
  /// removal failure (e.g. permission denied) is fatal.
  pub fn clean(&self) -> ShipResult<CleanOutcome> {
    let dist = self.dist_path();

    match fs::remove_dir_all(&dist) {
      Ok(()) => Ok(CleanOutcome::Removed),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(CleanOutcome::AlreadyAbsent),
      Err(e) => Err(ShipError::with_help(
        format!("Failed to remove output directory {}: {}", dist.display(), e),
        "Check permissions on the output directory.",
      )),
    }
  }

  /// Step 2: run the build tool from the project root
  pub fn build(&self) -> ShipResult<()> {
    self.build_command()?.run(&self.root)
  }

  /// Step 3: copy the manifest into the output directory
  ///
  /// The source file is never mutated. Fails if the build step did not
  /// create the output directory, or if the manifest has gone missing.
  pub fn stage_manifest(&self) -> ShipResult<PathBuf> {
    let dist = self.dist_path();
    if !dist.is_dir() {
      return Err(ValidationError::OutputDirMissing { path: dist }.into());
    }

    let source = self.root.join(&self.config.manifest);
    if !source.is_file() {
      return Err(ManifestError::NotFound { path: source }.into());
    }

    let dest = dist.join(&self.config.manifest);
    fs::copy(&source, &dest).map_err(|e| {
      ShipError::message(format!(
        "Failed to copy {} to {}: {}",
        source.display(),
        dest.display(),
        e
      ))
    })?;

    Ok(dest)
  }

  /// Step 4: run the publish tool from inside the output directory
  pub fn publish(&self) -> ShipResult<()> {
    self.publish_command()?.run(&self.dist_path())
  }

  pub fn build_command(&self) -> ShipResult<ToolCommand> {
    ToolCommand::parse(&self.config.build_cmd)
  }

  pub fn publish_command(&self) -> ShipResult<ToolCommand> {
    Ok(
      ToolCommand::parse(&self.config.publish_cmd)?
        .with_args(["--access".to_string(), self.config.access.clone()]),
    )
  }
}
