//! CLI commands for shipit
//!
//! - **plan**: Show the publish step plan without executing anything
//! - **run**: Execute the pipeline (clean, build, stage manifest, publish)

pub mod plan;
pub mod run;

pub use plan::run_plan;
pub use run::{RunOptions, run_publish};
