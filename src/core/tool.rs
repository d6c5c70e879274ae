//! External tool invocation
//!
//! Build and publish tools run as child processes with an explicit working
//! directory (`Command::current_dir`); the driver never changes its own
//! working directory. Stdio is inherited so the tool's terminal output
//! streams through unmodified, and every exit status is checked.

use crate::core::error::{ShipError, ShipResult, ToolError};
use serde::Serialize;
use std::fmt;
use std::io;
use std::path::Path;
use std::process::Command;

/// A program plus its arguments, parsed from a command string
///
/// Command strings are split on whitespace. The commands this driver runs
/// (`tsc`, `npm publish`) carry no quoting, so no shell is involved.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCommand {
  program: String,
  args: Vec<String>,
}

impl ToolCommand {
  /// Parse a command string into program and arguments
  pub fn parse(command: &str) -> ShipResult<Self> {
    let mut parts = command.split_whitespace().map(String::from);

    let program = parts
      .next()
      .ok_or_else(|| ShipError::message("Empty command string"))?;

    Ok(Self {
      program,
      args: parts.collect(),
    })
  }

  /// Append extra arguments (e.g. `--access public`)
  pub fn with_args<I, S>(mut self, extra: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(extra.into_iter().map(Into::into));
    self
  }

  /// The program name (first word of the command string)
  #[allow(dead_code)] // Kept as convenience API alongside Display
  pub fn program(&self) -> &str {
    &self.program
  }

  /// Run the command in `cwd`, treating any nonzero exit as fatal
  pub fn run(&self, cwd: &Path) -> ShipResult<()> {
    let status = Command::new(&self.program)
      .args(&self.args)
      .current_dir(cwd)
      .status();

    match status {
      Err(e) if e.kind() == io::ErrorKind::NotFound => Err(
        ToolError::ProgramNotFound {
          program: self.program.clone(),
        }
        .into(),
      ),
      Err(e) => Err(
        ToolError::Spawn {
          command: self.to_string(),
          message: e.to_string(),
        }
        .into(),
      ),
      Ok(status) if status.success() => Ok(()),
      Ok(status) => Err(
        ToolError::Failed {
          command: self.to_string(),
          code: status.code().unwrap_or(-1),
        }
        .into(),
      ),
    }
  }
}

impl fmt::Display for ToolCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}
