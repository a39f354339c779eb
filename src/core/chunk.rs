//! Request partitioning

use crate::core::waypoint::Waypoint;

/// Smallest usable chunk: a chunk must be able to form a route on its own
pub const MIN_CHUNK_SIZE: usize = 2;

/// Split waypoints into contiguous, ordered chunks of at most `chunk_size`
///
/// Every waypoint lands in exactly one chunk.
pub fn partition(waypoints: &[Waypoint], chunk_size: usize) -> std::slice::Chunks<'_, Waypoint> {
    waypoints.chunks(chunk_size.max(MIN_CHUNK_SIZE))
}

/// Number of engine requests needed for `len` waypoints
pub fn request_count(len: usize, chunk_size: usize) -> usize {
    len.div_ceil(chunk_size.max(MIN_CHUNK_SIZE))
}
