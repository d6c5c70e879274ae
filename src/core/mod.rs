//! Core engine for shipit
//!
//! This module contains the building blocks of the publish pipeline:
//!
//! - **error**: Error types with contextual help messages and exit codes
//! - **manifest**: Package manifest (package.json) loading and validation
//! - **pipeline**: The four-step publish pipeline (clean, build, stage, publish)
//! - **tool**: External tool invocation with exit-status checking

pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod tool;
