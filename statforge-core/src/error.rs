//! Structured error types for fetch and extract operations.
//!
//! These are designed to be displayable in CLI, TUI and log contexts, so every
//! variant carries the URL it concerns.

use thiserror::Error;

/// Classification of a transport-level failure, used by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// The connection could not be established (DNS, refused, TLS handshake).
    Connect,
    /// The connection was established but no complete response came back
    /// (closed or reset early, body cut short, timed out).
    Read,
    /// Anything else reported by the HTTP client (invalid URL, redirect loop, ...).
    Other,
}

impl TransportKind {
    pub fn label(self) -> &'static str {
        match self {
            TransportKind::Connect => "connect",
            TransportKind::Read => "read",
            TransportKind::Other => "request",
        }
    }
}

/// Errors surfaced by the fetcher and the provider extractors.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{} error fetching {url}: {message}", kind.label())]
    Transport {
        url: String,
        kind: TransportKind,
        message: String,
    },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error("failed to parse response from {url}: {detail}")]
    Parse { url: String, detail: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    pub(crate) fn parse(url: &str, detail: impl Into<String>) -> Self {
        FetchError::Parse {
            url: url.to_string(),
            detail: detail.into(),
        }
    }

    /// True for failures that happened below HTTP (no status line was received).
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }

    /// The HTTP status code, if the failure was a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
