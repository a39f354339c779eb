//! Mock OSRM engine shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use butterfly_stitch::Waypoint;
use serde_json::json;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// What the mock engine answers to one request
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// Route through the requested coordinates, latitude shifted
    Echo,
    /// Bare HTTP status, no body
    Status(u16),
    /// 200 with an empty `routes` array
    NoRoute,
    /// 200 with a body that is not a route response
    Garbage,
}

/// Scripted engine: the n-th request gets `replies[n]`, later ones `Echo`
pub struct MockEngine {
    calls: AtomicUsize,
    replies: Vec<Reply>,
    shift: f64,
}

impl MockEngine {
    pub fn echo() -> Self {
        Self::scripted(vec![])
    }

    pub fn scripted(replies: Vec<Reply>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            replies,
            shift: 0.0,
        }
    }

    /// Snap every returned point by `shift` degrees of latitude
    pub fn with_shift(mut self, shift: f64) -> Self {
        self.shift = shift;
        self
    }
}

impl Respond for MockEngine {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.replies.get(call).copied().unwrap_or(Reply::Echo) {
            Reply::Echo => {
                let coordinates: Vec<[f64; 2]> = request_coords(request)
                    .into_iter()
                    .map(|w| [w.lon, w.lat + self.shift])
                    .collect();
                ResponseTemplate::new(200).set_body_json(json!({
                    "code": "Ok",
                    "routes": [{
                        "geometry": { "type": "LineString", "coordinates": coordinates },
                        "distance": 1234.5,
                        "duration": 99.1
                    }],
                    "waypoints": []
                }))
            }
            Reply::Status(status) => ResponseTemplate::new(status),
            Reply::NoRoute => {
                ResponseTemplate::new(200).set_body_json(json!({ "code": "NoRoute", "routes": [] }))
            }
            Reply::Garbage => ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"),
        }
    }
}

/// Decode the `lon,lat;lon,lat` segment of a route request
pub fn request_coords(request: &Request) -> Vec<Waypoint> {
    let segment = request.url.path().rsplit('/').next().unwrap_or_default();
    segment
        .split(';')
        .map(|pair| {
            let (lon, lat) = pair.split_once(',').expect("coordinate pair");
            Waypoint::new(lat.parse().unwrap(), lon.parse().unwrap())
        })
        .collect()
}

/// Start a server answering `route/v1/{profile}` with `engine`
pub async fn start_engine(profile: &str, engine: MockEngine) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(format!("^/route/v1/{profile}/")))
        .respond_with(engine)
        .mount(&server)
        .await;
    server
}

/// `n` distinct waypoints on a quarter-degree grid (exact in binary and decimal)
pub fn track(n: usize) -> Vec<Waypoint> {
    (0..n)
        .map(|i| Waypoint::new(10.0 + i as f64 * 0.25, 4.0 + (i % 8) as f64 * 0.5))
        .collect()
}
