mod commands;
mod core;

use clap::{Args, Parser, Subcommand};
use commands::RunOptions;
use crate::core::error::{ShipError, print_error};
use crate::core::pipeline::{
  DEFAULT_ACCESS, DEFAULT_BUILD_CMD, DEFAULT_DIST_DIR, DEFAULT_MANIFEST, DEFAULT_PUBLISH_CMD,
  DriverConfig,
};
use std::path::PathBuf;

/// Checked publish driver for npm packages
#[derive(Parser)]
#[command(name = "shipit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show the publish step plan without executing anything
  Plan {
    #[command(flatten)]
    config: ConfigArgs,
    /// Output the plan in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Run the pipeline: clean, build, stage manifest, publish
  Run {
    #[command(flatten)]
    config: ConfigArgs,
    /// Show what would happen without making changes
    #[arg(long)]
    dry_run: bool,
    /// Stop after staging the manifest (no publish)
    #[arg(long)]
    skip_publish: bool,
  },
}

/// Pipeline configuration flags shared by all subcommands
///
/// Defaults reproduce the classic publish script; overrides are useful for
/// testing and for projects with a different build tool.
#[derive(Args)]
struct ConfigArgs {
  /// Build output directory
  #[arg(long, default_value = DEFAULT_DIST_DIR)]
  dist_dir: PathBuf,

  /// Package manifest filename at the project root
  #[arg(long, default_value = DEFAULT_MANIFEST)]
  manifest: String,

  /// Build command, run from the project root
  #[arg(long, default_value = DEFAULT_BUILD_CMD)]
  build_cmd: String,

  /// Publish command, run from the output directory; `--access` is appended
  #[arg(long, default_value = DEFAULT_PUBLISH_CMD)]
  publish_cmd: String,

  /// Registry access level passed to the publish command
  #[arg(long, default_value = DEFAULT_ACCESS)]
  access: String,
}

impl From<ConfigArgs> for DriverConfig {
  fn from(args: ConfigArgs) -> Self {
    Self {
      dist_dir: args.dist_dir,
      manifest: args.manifest,
      build_cmd: args.build_cmd,
      publish_cmd: args.publish_cmd,
      access: args.access,
    }
  }
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  // The pipeline runs against the current working directory; the publish
  // step gets the output directory as an explicit working-directory
  // parameter instead of a process-wide chdir
  let project_root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let result = match cli.command {
    Commands::Plan { config, json } => commands::run_plan(&project_root, config.into(), json),
    Commands::Run {
      config,
      dry_run,
      skip_publish,
    } => commands::run_publish(
      &project_root,
      config.into(),
      RunOptions { dry_run, skip_publish },
    ),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ShipError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
