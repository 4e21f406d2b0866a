//! AWS-oriented adapters and handlers for greeting artifact generation.
//!
//! This crate owns runtime integration details (the Lambda handler, storage
//! and generator adapters, environment configuration and log setup) on top of
//! the pure primitives in `greeting_artifacts_core`.

pub mod adapters;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
