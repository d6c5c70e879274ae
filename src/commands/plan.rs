//! `shipit plan` - Show the publish step plan without executing anything

use crate::core::error::ShipResult;
use crate::core::pipeline::{Driver, DriverConfig, PublishPlan};
use std::path::Path;

/// Run the plan command
pub fn run_plan(root: &Path, config: DriverConfig, json: bool) -> ShipResult<()> {
  let driver = Driver::new(root, config);
  let plan = driver.plan()?;

  if json {
    println!("{}", serde_json::to_string_pretty(&plan)?);
  } else {
    print_plan(&plan);
  }

  Ok(())
}

fn print_plan(plan: &PublishPlan) {
  println!("📋 Publish Plan for {}", plan.package);
  println!();

  for (i, step) in plan.steps.iter().enumerate() {
    println!("  {}. {}", i + 1, step.description);
  }

  println!();

  if plan.private {
    println!("⚠️  The manifest sets \"private\": true; the registry will refuse to publish it.");
    println!();
  }

  println!("To execute:");
  println!("  shipit run");
}
