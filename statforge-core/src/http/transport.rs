//! Transport trait and the reqwest-backed implementation.
//!
//! The transport performs exactly one HTTP exchange. Retry, status handling and
//! decoding live in the fetcher, so tests can script a transport instead of
//! standing up a server.

use std::fmt;

use crate::error::{FetchError, TransportKind};

use super::request::{FetchRequest, Method};

/// Status line and undecoded body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A failure below HTTP: no usable response was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: TransportKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(TransportKind::Connect, message)
    }

    pub fn read(message: impl Into<String>) -> Self {
        Self::new(TransportKind::Read, message)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.kind.label(), self.message)
    }
}

/// One HTTP exchange. Implementations must be shareable across threads.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &FetchRequest) -> Result<RawResponse, TransportError>;
}

/// Production transport over a pooled `reqwest::blocking::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("statforge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    /// Map a reqwest failure onto the retry taxonomy.
    ///
    /// A request error that is not a connect error means the connection was
    /// made and then closed, reset or cut short before a full response came
    /// back, which is a read failure. Builder, redirect and URL errors stay
    /// `Other` and are never retried.
    fn classify(err: &reqwest::Error) -> TransportKind {
        if err.is_connect() {
            TransportKind::Connect
        } else if err.is_timeout() || err.is_body() || err.is_decode() || err.is_request() {
            TransportKind::Read
        } else {
            TransportKind::Other
        }
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &FetchRequest) -> Result<RawResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        builder = builder.timeout(request.timeout);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder
            .send()
            .map_err(|e| TransportError::new(Self::classify(&e), e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .map_err(|e| TransportError::read(e.to_string()))?;
        Ok(RawResponse::new(status, body.to_vec()))
    }
}
