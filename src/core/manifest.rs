//! Package manifest (package.json) loading and validation
//!
//! The driver never edits the manifest. It reads it once to resolve the
//! package identity for console output and to catch obvious problems
//! (missing file, broken JSON, non-semver version) before any external
//! tool runs. The publish tool remains the authority on everything else.

use crate::core::error::{ManifestError, ShipError, ShipResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Deserialized view of the package manifest
///
/// Unknown fields are ignored; the registry cares about far more of the
/// manifest than the driver does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
  pub name: String,
  pub version: String,
  #[serde(default)]
  pub private: bool,
}

impl PackageManifest {
  /// Package spec in the `name@version` form used by the registry
  pub fn spec(&self) -> String {
    format!("{}@{}", self.name, self.version)
  }
}

/// Load and validate the manifest at the project root
pub fn load(root: &Path, filename: &str) -> ShipResult<PackageManifest> {
  let path = root.join(filename);

  let content = match fs::read_to_string(&path) {
    Ok(content) => content,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      return Err(ManifestError::NotFound { path }.into());
    }
    Err(e) => return Err(ShipError::Io(e)),
  };

  let manifest: PackageManifest = serde_json::from_str(&content).map_err(|e| ManifestError::Parse {
    path: path.clone(),
    message: e.to_string(),
  })?;

  // npm rejects non-semver versions at publish time; fail early with a
  // clearer message instead
  if let Err(e) = semver::Version::parse(&manifest.version) {
    return Err(
      ManifestError::InvalidVersion {
        value: manifest.version,
        message: e.to_string(),
      }
      .into(),
    );
  }

  Ok(manifest)
}
