//! # Butterfly-stitch Library
//!
//! Resolves waypoint sequences into road-following paths using an OSRM
//! routing engine, with graceful degradation to straight lines.
//!
//! ## Features
//!
//! - **Chunked requests**: arbitrarily long paths are split into engine-sized batches
//! - **Seamless stitching**: each batch starts where the previous resolved path ended
//! - **Always renderable**: a missing engine, an unsupported mode or any engine
//!   failure returns the input unchanged instead of an error
//! - **Explicit configuration**: the engine address is passed in, never read from globals
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use butterfly_stitch::{EngineConfig, TravelMode, Waypoint};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = EngineConfig::new("http://localhost:5000");
//!     let waypoints = vec![Waypoint::new(50.8503, 4.3517), Waypoint::new(50.8603, 4.4017)];
//!
//!     let path = butterfly_stitch::resolve(&waypoints, TravelMode::Car, Some(&config)).await;
//!     println!("Path has {} points", path.len());
//! }
//! ```
//!
//! ## Configuration from the environment
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() {
//! use butterfly_stitch::{EngineConfig, RouteResolver, TravelMode, Waypoint};
//!
//! // OSRM_BASE_URL unset means straight lines
//! let resolver = RouteResolver::new(EngineConfig::from_env());
//! let path = resolver
//!     .resolve(&[Waypoint::new(48.85, 2.35), Waypoint::new(48.86, 2.29)], TravelMode::Foot)
//!     .await;
//! # }
//! ```

// Re-export core types that users might need
pub use crate::core::chunk::request_count;
pub use crate::core::config::DEFAULT_CHUNK_SIZE;
pub use crate::core::error::{Error, Result};
pub use crate::core::mode::TravelMode;
pub use crate::core::waypoint::Waypoint;
pub use crate::core::{
    DirectReason, EngineConfig, Outcome, ProgressCallback, Resolution, ResolveOptions, RouteResolver,
};

// Internal modules
mod core;

/// Resolve a path with default options
///
/// Never fails: when `config` is `None`, the mode is not routed, or the engine
/// misbehaves, `waypoints` is returned unchanged.
///
/// # Arguments
/// * `waypoints` - Ordered `(lat, lon)` points
/// * `mode` - Travel mode selecting the engine profile
/// * `config` - Engine location, `None` to disable routing
pub async fn resolve(
    waypoints: &[Waypoint],
    mode: TravelMode,
    config: Option<&EngineConfig>,
) -> Vec<Waypoint> {
    RouteResolver::new(config.cloned())
        .resolve(waypoints, mode)
        .await
}

/// Resolve a path with custom options and report the outcome
///
/// # Examples
/// ```rust,no_run
/// use butterfly_stitch::{EngineConfig, Outcome, ResolveOptions, TravelMode, Waypoint};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let options = ResolveOptions {
///     chunk_size: 50,
///     progress: Some(Arc::new(|done: usize, total: usize| {
///         println!("Chunk {done}/{total}");
///     })),
/// };
///
/// let waypoints: Vec<Waypoint> = (0..500)
///     .map(|i| Waypoint::new(50.0 + i as f64 * 1e-3, 4.35))
///     .collect();
/// let config = EngineConfig::new("http://localhost:5000");
/// let resolution =
///     butterfly_stitch::resolve_with_options(&waypoints, TravelMode::Truck, Some(&config), options).await;
///
/// if let Outcome::Direct(reason) = &resolution.outcome {
///     println!("Straight lines: {reason}");
/// }
/// # }
/// ```
pub async fn resolve_with_options(
    waypoints: &[Waypoint],
    mode: TravelMode,
    config: Option<&EngineConfig>,
    options: ResolveOptions,
) -> Resolution {
    RouteResolver::with_options(config.cloned(), options)
        .resolve_detailed(waypoints, mode)
        .await
}
