//! Error types for shipit with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to users. Every error that has an obvious next step
//! carries a suggestion to guide users toward resolution.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for shipit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (missing manifest, invalid args)
  User = 1,
  /// System error (external tool, I/O)
  System = 2,
  /// Validation failure (pipeline preconditions not met)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for shipit
#[derive(Debug)]
pub enum ShipError {
  /// Package manifest errors
  Manifest(ManifestError),

  /// External tool invocation errors
  Tool(ToolError),

  /// Pipeline precondition failures
  Validation(ValidationError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ShipError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ShipError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ShipError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ShipError::Message { message, context, help } => ShipError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ShipError::Manifest(_) => ExitCode::User,
      ShipError::Tool(_) => ExitCode::System,
      ShipError::Validation(_) => ExitCode::Validation,
      ShipError::Io(_) => ExitCode::System,
      ShipError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ShipError::Manifest(e) => e.help_message(),
      ShipError::Tool(e) => e.help_message(),
      ShipError::Validation(e) => e.help_message(),
      ShipError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ShipError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ShipError::Manifest(e) => write!(f, "{}", e),
      ShipError::Tool(e) => write!(f, "{}", e),
      ShipError::Validation(e) => write!(f, "{}", e),
      ShipError::Io(e) => write!(f, "I/O error: {}", e),
      ShipError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ShipError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ShipError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ShipError {
  fn from(err: io::Error) -> Self {
    ShipError::Io(err)
  }
}

impl From<String> for ShipError {
  fn from(msg: String) -> Self {
    ShipError::message(msg)
  }
}

impl From<&str> for ShipError {
  fn from(msg: &str) -> Self {
    ShipError::message(msg)
  }
}

impl From<serde_json::Error> for ShipError {
  fn from(err: serde_json::Error) -> Self {
    ShipError::message(format!("JSON error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for ShipError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    ShipError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<ManifestError> for ShipError {
  fn from(err: ManifestError) -> Self {
    ShipError::Manifest(err)
  }
}

impl From<ToolError> for ShipError {
  fn from(err: ToolError) -> Self {
    ShipError::Tool(err)
  }
}

impl From<ValidationError> for ShipError {
  fn from(err: ValidationError) -> Self {
    ShipError::Validation(err)
  }
}

/// Package manifest errors
#[derive(Debug)]
pub enum ManifestError {
  /// Manifest file not found at the project root
  NotFound { path: PathBuf },

  /// Manifest could not be parsed
  Parse { path: PathBuf, message: String },

  /// Manifest version field is not valid semver
  InvalidVersion { value: String, message: String },
}

impl ManifestError {
  fn help_message(&self) -> Option<String> {
    match self {
      ManifestError::NotFound { path } => Some(format!(
        "The manifest must live at the project root. Run shipit from the directory containing {}.",
        path
          .file_name()
          .map(|n| n.to_string_lossy().into_owned())
          .unwrap_or_else(|| "the manifest".to_string())
      )),
      ManifestError::InvalidVersion { .. } => {
        Some("The registry expects a semver version such as \"1.0.0\".".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestError::NotFound { path } => {
        write!(f, "Package manifest not found: {}", path.display())
      }
      ManifestError::Parse { path, message } => {
        write!(f, "Failed to parse {}: {}", path.display(), message)
      }
      ManifestError::InvalidVersion { value, message } => {
        write!(f, "Invalid package version '{}': {}", value, message)
      }
    }
  }
}

/// External tool invocation errors
#[derive(Debug)]
pub enum ToolError {
  /// Program could not be found on PATH
  ProgramNotFound { program: String },

  /// Process could not be spawned
  Spawn { command: String, message: String },

  /// Tool exited with a nonzero status
  Failed { command: String, code: i32 },
}

impl ToolError {
  fn help_message(&self) -> Option<String> {
    match self {
      ToolError::ProgramNotFound { program } => {
        Some(format!("Is '{}' installed and on your PATH?", program))
      }
      ToolError::Failed { .. } => {
        Some("The tool's own output above should explain the failure.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ToolError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ToolError::ProgramNotFound { program } => {
        write!(f, "Program not found: {}", program)
      }
      ToolError::Spawn { command, message } => {
        write!(f, "Failed to run '{}': {}", command, message)
      }
      ToolError::Failed { command, code } => {
        write!(f, "Command failed with exit code {}: {}", code, command)
      }
    }
  }
}

/// Pipeline precondition failures
#[derive(Debug)]
pub enum ValidationError {
  /// Output directory missing after the build step
  OutputDirMissing { path: PathBuf },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::OutputDirMissing { path } => Some(format!(
        "The build step is expected to create '{}'. Check the build tool's output configuration (e.g. tsconfig.json outDir).",
        path.display()
      )),
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::OutputDirMissing { path } => {
        write!(f, "Output directory does not exist after build: {}", path.display())
      }
    }
  }
}

/// Result type alias for shipit
pub type ShipResult<T> = Result<T, ShipError>;

/// Helper trait to add context to Results
#[allow(dead_code)] // Kept as convenience API for layering context onto errors
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ShipResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ShipResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ShipError>,
{
  fn context(self, ctx: impl Into<String>) -> ShipResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ShipResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ShipError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
