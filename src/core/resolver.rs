//! Chunked route resolution
//!
//! Long waypoint sequences are split into engine-sized chunks that are
//! requested one after another. Each chunk after the first is prefixed with
//! the last resolved point of the previous chunk (the seam), so consecutive
//! geometries join without a gap. Any engine failure abandons the whole
//! resolution and hands back the untouched input.

use std::fmt;
use std::sync::Arc;

use log::{info, warn};

use crate::core::chunk::{partition, request_count};
use crate::core::config::{EngineConfig, DEFAULT_CHUNK_SIZE};
use crate::core::engine::EngineClient;
use crate::core::error::Error;
use crate::core::mode::TravelMode;
use crate::core::waypoint::Waypoint;

/// Progress callback, receives (chunks_done, chunks_total)
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Options for route resolution
#[derive(Clone)]
pub struct ResolveOptions {
    /// Maximum input waypoints per engine request
    pub chunk_size: usize,

    /// Optional progress callback, invoked after every chunk
    pub progress: Option<ProgressCallback>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress: None,
        }
    }
}

impl fmt::Debug for ResolveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveOptions")
            .field("chunk_size", &self.chunk_size)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Why a path was returned as straight lines
#[derive(Debug, Clone, PartialEq)]
pub enum DirectReason {
    /// Fewer than two waypoints, nothing to route
    TooFewWaypoints,
    /// No engine configured
    EngineDisabled,
    /// Mode has no engine profile
    UnsupportedMode(TravelMode),
    /// A chunk request failed; the partial result was discarded
    EngineFailure { chunk: usize, error: String },
}

impl fmt::Display for DirectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectReason::TooFewWaypoints => write!(f, "fewer than two waypoints"),
            DirectReason::EngineDisabled => write!(f, "routing engine not configured"),
            DirectReason::UnsupportedMode(mode) => write!(f, "mode '{mode}' is not routed"),
            DirectReason::EngineFailure { chunk, error } => {
                write!(f, "chunk {} failed: {}", chunk + 1, error)
            }
        }
    }
}

/// How a resolution ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Engine geometry was stitched together
    Routed {
        /// Number of requests sent to the engine
        requests: usize,
        /// Indices of chunks that produced no route
        skipped_chunks: Vec<usize>,
    },
    /// Input returned unchanged
    Direct(DirectReason),
}

/// Resolved path together with how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub waypoints: Vec<Waypoint>,
    pub outcome: Outcome,
}

impl Resolution {
    fn direct(waypoints: &[Waypoint], reason: DirectReason) -> Self {
        Self {
            waypoints: waypoints.to_vec(),
            outcome: Outcome::Direct(reason),
        }
    }

    pub fn is_routed(&self) -> bool {
        matches!(self.outcome, Outcome::Routed { .. })
    }
}

/// Result of the fetch-and-stitch loop before fallback is applied
struct Stitched {
    waypoints: Vec<Waypoint>,
    requests: usize,
    skipped_chunks: Vec<usize>,
}

/// Resolves waypoint sequences into road-following paths
///
/// Holds only read-only state; one resolver can serve any number of
/// concurrent `resolve` calls.
#[derive(Debug, Clone)]
pub struct RouteResolver {
    engine: Option<EngineClient>,
    options: ResolveOptions,
}

impl RouteResolver {
    /// Create a resolver; `None` disables the routing engine
    pub fn new(config: Option<EngineConfig>) -> Self {
        Self::with_options(config, ResolveOptions::default())
    }

    pub fn with_options(config: Option<EngineConfig>, options: ResolveOptions) -> Self {
        Self {
            engine: config.map(EngineClient::new),
            options,
        }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolve a path, falling back to the input on any problem
    pub async fn resolve(&self, waypoints: &[Waypoint], mode: TravelMode) -> Vec<Waypoint> {
        self.resolve_detailed(waypoints, mode).await.waypoints
    }

    /// Gate check without contacting the engine
    ///
    /// Returns the reason the path would be drawn straight, or `None` when the
    /// engine would be consulted.
    pub fn direct_reason(&self, waypoints: &[Waypoint], mode: TravelMode) -> Option<DirectReason> {
        self.gate(waypoints, mode).err()
    }

    /// Gates are checked in order: input length, engine presence, mode
    fn gate(&self, waypoints: &[Waypoint], mode: TravelMode) -> std::result::Result<&EngineClient, DirectReason> {
        if waypoints.len() < 2 {
            return Err(DirectReason::TooFewWaypoints);
        }
        let engine = self.engine.as_ref().ok_or(DirectReason::EngineDisabled)?;
        if !mode.is_routable() {
            return Err(DirectReason::UnsupportedMode(mode));
        }
        Ok(engine)
    }

    /// Resolve a path and report how the result was obtained
    pub async fn resolve_detailed(&self, waypoints: &[Waypoint], mode: TravelMode) -> Resolution {
        let engine = match self.gate(waypoints, mode) {
            Ok(engine) => engine,
            Err(reason) => {
                match &reason {
                    DirectReason::EngineDisabled => {
                        info!("Routing engine not configured, using straight lines between points");
                    }
                    DirectReason::UnsupportedMode(mode) => {
                        info!("Using straight lines for travel mode '{mode}'");
                    }
                    _ => {}
                }
                return Resolution::direct(waypoints, reason);
            }
        };

        match self.stitch(engine, waypoints, mode).await {
            Ok(stitched) => {
                info!("OSRM: route found with {} points", stitched.waypoints.len());
                Resolution {
                    waypoints: stitched.waypoints,
                    outcome: Outcome::Routed {
                        requests: stitched.requests,
                        skipped_chunks: stitched.skipped_chunks,
                    },
                }
            }
            Err((chunk, error)) => {
                warn!("OSRM request failed on chunk {}: {error}; falling back to straight lines", chunk + 1);
                Resolution::direct(
                    waypoints,
                    DirectReason::EngineFailure {
                        chunk,
                        error: error.to_string(),
                    },
                )
            }
        }
    }

    /// Sequential fetch-and-stitch over all chunks
    ///
    /// On failure returns the index of the failing chunk with its error.
    async fn stitch(
        &self,
        engine: &EngineClient,
        waypoints: &[Waypoint],
        mode: TravelMode,
    ) -> std::result::Result<Stitched, (usize, Error)> {
        let total = request_count(waypoints.len(), self.options.chunk_size);
        let mut stitched = Stitched {
            waypoints: Vec::with_capacity(waypoints.len()),
            requests: 0,
            skipped_chunks: Vec::new(),
        };
        let mut seam: Option<Waypoint> = None;
        let mut request: Vec<Waypoint> = Vec::with_capacity(self.options.chunk_size + 1);

        for (index, chunk) in partition(waypoints, self.options.chunk_size).enumerate() {
            request.clear();
            request.extend(seam);
            request.extend_from_slice(chunk);

            stitched.requests += 1;
            let path = engine
                .route(mode, &request)
                .await
                .map_err(|error| (index, error))?;

            match path {
                Some(points) if !points.is_empty() => {
                    seam = points.last().copied();
                    stitched.waypoints.extend(points);
                }
                _ => {
                    warn!("OSRM: no route found for chunk {} of {}", index + 1, total);
                    stitched.skipped_chunks.push(index);
                }
            }

            if let Some(progress) = &self.options.progress {
                progress(index + 1, total);
            }
        }

        Ok(stitched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn line(n: usize) -> Vec<Waypoint> {
        (0..n).map(|i| Waypoint::new(50.0 + i as f64 * 0.001, 4.0)).collect()
    }

    #[tokio::test]
    async fn test_short_input_is_returned_unchanged() {
        let resolver = RouteResolver::new(Some(EngineConfig::new("http://127.0.0.1:1")));

        for points in [vec![], line(1)] {
            let resolution = resolver.resolve_detailed(&points, TravelMode::Car).await;
            assert_eq!(resolution.waypoints, points);
            assert_eq!(resolution.outcome, Outcome::Direct(DirectReason::TooFewWaypoints));
        }
    }

    #[tokio::test]
    async fn test_disabled_engine_is_passthrough() {
        let resolver = RouteResolver::new(None);
        let points = line(5);

        let resolution = resolver.resolve_detailed(&points, TravelMode::Foot).await;
        assert_eq!(resolution.waypoints, points);
        assert_eq!(resolution.outcome, Outcome::Direct(DirectReason::EngineDisabled));
        assert!(!resolution.is_routed());
    }

    #[tokio::test]
    async fn test_train_never_contacts_engine() {
        // Nothing listens on port 1; reaching the engine would be an EngineFailure
        let resolver = RouteResolver::new(Some(EngineConfig::new("http://127.0.0.1:1")));
        let points = line(3);

        let resolution = resolver.resolve_detailed(&points, TravelMode::Train).await;
        assert_eq!(resolution.waypoints, points);
        assert_eq!(
            resolution.outcome,
            Outcome::Direct(DirectReason::UnsupportedMode(TravelMode::Train))
        );
    }

    #[tokio::test]
    async fn test_unreachable_engine_falls_back() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let options = ResolveOptions {
            chunk_size: 2,
            progress: Some(Arc::new(move |_: usize, _: usize| {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
        };
        let resolver = RouteResolver::with_options(Some(EngineConfig::new("http://127.0.0.1:1")), options);
        let points = line(4);

        let resolution = resolver.resolve_detailed(&points, TravelMode::Car).await;
        assert_eq!(resolution.waypoints, points);
        match resolution.outcome {
            Outcome::Direct(DirectReason::EngineFailure { chunk, .. }) => assert_eq!(chunk, 0),
            other => panic!("Expected EngineFailure, got {other:?}"),
        }
        // Aborted before the first chunk completed
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_direct_reason_gate_order() {
        let disabled = RouteResolver::new(None);
        assert_eq!(
            disabled.direct_reason(&line(1), TravelMode::Train),
            Some(DirectReason::TooFewWaypoints)
        );
        assert_eq!(
            disabled.direct_reason(&line(2), TravelMode::Train),
            Some(DirectReason::EngineDisabled)
        );

        let enabled = RouteResolver::new(Some(EngineConfig::new("http://osrm")));
        assert_eq!(
            enabled.direct_reason(&line(2), TravelMode::Train),
            Some(DirectReason::UnsupportedMode(TravelMode::Train))
        );
        assert_eq!(enabled.direct_reason(&line(2), TravelMode::Bike), None);
    }

    #[test]
    fn test_direct_reason_display() {
        let reason = DirectReason::EngineFailure {
            chunk: 1,
            error: "Routing engine returned 500 Internal Server Error".to_string(),
        };
        assert_eq!(
            reason.to_string(),
            "chunk 2 failed: Routing engine returned 500 Internal Server Error"
        );
    }
}
