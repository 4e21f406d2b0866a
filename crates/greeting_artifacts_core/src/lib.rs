//! Shared greeting-artifact domain primitives.
//!
//! This crate owns the request contract, the spreadsheet and document layouts
//! with their renderers, and artifact key naming. It intentionally excludes
//! AWS SDK and Lambda runtime concerns.

pub mod artifact;
pub mod contract;
pub mod document;
pub mod error;
pub mod spreadsheet;
pub mod storage_keys;
