//! Error types for butterfly-stitch
//!
//! Route resolution itself never fails: every engine problem degrades to the
//! straight-line path. These errors cover the fallible edges around it
//! (engine calls inside the resolver, travel-mode parsing, CLI I/O).

use std::fmt;

use strsim::{jaro_winkler, normalized_levenshtein};

/// Minimum blended similarity for a "did you mean" suggestion
const SUGGESTION_THRESHOLD: f64 = 0.65;

/// Suggest the closest known travel-mode name for a misspelled input
///
/// Scores every candidate with 70% Jaro-Winkler + 30% normalized Levenshtein
/// and returns the best one above the threshold. Exact matches (ignoring
/// case) return `None` since there is nothing to correct.
pub fn suggest_mode(input: &str, candidates: &[&'static str]) -> Option<&'static str> {
    let input_lower = input.trim().to_lowercase();
    if input_lower.is_empty() {
        return None;
    }

    let mut best_match = None;
    let mut best_score = 0.0f64;

    for &candidate in candidates {
        if candidate == input_lower {
            return None;
        }

        let score = jaro_winkler(&input_lower, candidate) * 0.7
            + normalized_levenshtein(&input_lower, candidate) * 0.3;

        if score >= SUGGESTION_THRESHOLD && score > best_score {
            best_score = score;
            best_match = Some(candidate);
        }
    }

    best_match
}

/// Main error type for butterfly-stitch operations
#[derive(Debug)]
pub enum Error {
    /// Invalid waypoint input or parameters
    InvalidInput(String),

    /// Travel mode name not recognized
    UnknownMode {
        input: String,
        suggestion: Option<&'static str>,
    },

    /// Network connectivity issues (connect failure, timeout)
    NetworkError(String),

    /// Other HTTP transport failure
    HttpError(String),

    /// Routing engine answered with a non-success status
    EngineStatus { status: u16, reason: String },

    /// Routing engine body could not be decoded
    MalformedResponse(String),

    /// File I/O error
    IoError(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => {
                write!(f, "Invalid input: {}", msg)
            }
            Error::UnknownMode { input, suggestion } => {
                write!(f, "Unknown travel mode '{}'", input)?;
                if let Some(suggestion) = suggestion {
                    write!(f, " (did you mean '{}'?)", suggestion)?;
                }
                Ok(())
            }
            Error::NetworkError(msg) => {
                write!(f, "Network error: {}", msg)
            }
            Error::HttpError(msg) => {
                write!(f, "HTTP error: {}", msg)
            }
            Error::EngineStatus { status, reason } => {
                write!(f, "Routing engine returned {} {}", status, reason)
            }
            Error::MalformedResponse(msg) => {
                write!(f, "Malformed routing engine response: {}", msg)
            }
            Error::IoError(err) => {
                write!(f, "I/O error: {}", err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidInput(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Error::NetworkError(err.to_string())
        } else if err.is_decode() {
            Error::MalformedResponse(err.to_string())
        } else {
            Error::HttpError(err.to_string())
        }
    }
}

/// Convenience result type for butterfly-stitch operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: &[&str] = &["car", "truck", "foot", "bike", "train"];

    #[test]
    fn test_suggest_mode_typos() {
        assert_eq!(suggest_mode("trck", MODES), Some("truck"));
        assert_eq!(suggest_mode("trian", MODES), Some("train"));
        assert_eq!(suggest_mode("fooot", MODES), Some("foot"));
        assert_eq!(suggest_mode("TRUK", MODES), Some("truck"));
    }

    #[test]
    fn test_suggest_mode_no_match() {
        assert_eq!(suggest_mode("car", MODES), None); // Correct spelling
        assert_eq!(suggest_mode("", MODES), None);
        assert_eq!(suggest_mode("hovercraft-submarine", MODES), None);
    }

    #[test]
    fn test_unknown_mode_display() {
        let err = Error::UnknownMode {
            input: "trck".to_string(),
            suggestion: Some("truck"),
        };
        assert_eq!(err.to_string(), "Unknown travel mode 'trck' (did you mean 'truck'?)");

        let err = Error::UnknownMode {
            input: "zeppelin".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "Unknown travel mode 'zeppelin'");
    }

    #[test]
    fn test_engine_status_display() {
        let err = Error::EngineStatus {
            status: 502,
            reason: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Routing engine returned 502 Bad Gateway");
    }
}
