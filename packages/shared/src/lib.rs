//! Shared utilities for the sweetdash workspace.

pub mod logger;
pub mod time;
