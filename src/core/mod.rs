//! Core library modules for butterfly-stitch
//!
//! This module contains the internal implementation details of the butterfly-stitch library.

pub mod chunk;
pub mod config;
pub mod engine;
pub mod error;
pub mod mode;
pub mod resolver;
pub mod waypoint;

// Re-export main types for internal use
pub use config::EngineConfig;
pub use resolver::{DirectReason, Outcome, ProgressCallback, Resolution, ResolveOptions, RouteResolver};
