//! Waypoint input and path output formats for the CLI

use butterfly_stitch::{Error, Result, Waypoint};
use serde_json::json;

/// How the resolved path is written
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    /// `[[lat, lon], ...]`, same shape as the input
    Pairs,
    /// GeoJSON Feature with a LineString geometry (`[lon, lat]` order)
    GeoJson,
}

/// Parse a JSON array of `[lat, lon]` pairs
pub fn parse_waypoints(input: &str) -> Result<Vec<Waypoint>> {
    if input.trim().is_empty() {
        return Err(Error::InvalidInput("no waypoints given".to_string()));
    }
    Ok(serde_json::from_str(input)?)
}

/// Serialize a path in the requested format
pub fn render_path(path: &[Waypoint], format: OutputFormat) -> Result<String> {
    let value = match format {
        OutputFormat::Pairs => serde_json::to_value(path)?,
        OutputFormat::GeoJson => {
            let coordinates: Vec<[f64; 2]> = path.iter().map(|w| w.to_lon_lat()).collect();
            json!({
                "type": "Feature",
                "properties": { "points": path.len() },
                "geometry": {
                    "type": "LineString",
                    "coordinates": coordinates,
                }
            })
        }
    };
    Ok(serde_json::to_string(&value)?)
}
