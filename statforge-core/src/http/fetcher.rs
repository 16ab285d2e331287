//! The resilient fetcher: one pooled transport plus a retry policy.
//!
//! Connection and read failures, and responses whose status is in the policy's
//! forcelist, are retried with exponential backoff. Everything else fails on
//! the first attempt. Each terminal failure is logged once with its URL.

use std::thread;

use log::{debug, error};
use serde_json::Value;

use crate::error::{FetchError, TransportKind};

use super::request::{FetchRequest, Method};
use super::retry::RetryPolicy;
use super::transport::{RawResponse, ReqwestTransport, Transport};

/// Long-lived HTTP fetcher. Create once and pass by reference to extractors.
pub struct Fetcher {
    transport: Box<dyn Transport>,
    policy: RetryPolicy,
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Fetcher {
    /// Fetcher over a fresh reqwest client.
    pub fn new(policy: RetryPolicy) -> Result<Self, FetchError> {
        Ok(Self::with_transport(ReqwestTransport::new()?, policy))
    }

    pub fn with_transport(transport: impl Transport + 'static, policy: RetryPolicy) -> Self {
        Self {
            transport: Box::new(transport),
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetch and decode JSON, choosing the verb from a string.
    ///
    /// `params` become the query string of a GET; `body` is the JSON payload of
    /// a POST. Any verb other than GET or POST fails with
    /// [`FetchError::UnsupportedMethod`] before the network is touched.
    pub fn fetch_json(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<Value, FetchError> {
        let method: Method = method.parse()?;
        let request = match method {
            Method::Get => params
                .iter()
                .fold(FetchRequest::get(url), |req, (k, v)| req.with_query(*k, *v)),
            Method::Post => FetchRequest::post(url, body.unwrap_or(Value::Null)),
        };
        self.request_json(request)
    }

    /// GET `url` with query parameters and decode the JSON body.
    pub fn get_json(&self, url: &str, params: &[(&str, &str)]) -> Result<Value, FetchError> {
        self.fetch_json("GET", url, params, None)
    }

    /// POST a JSON body to `url` and decode the JSON response.
    pub fn post_json(&self, url: &str, body: Value) -> Result<Value, FetchError> {
        self.request_json(FetchRequest::post(url, body))
    }

    /// Send a prepared request and decode the JSON body.
    pub fn request_json(&self, request: FetchRequest) -> Result<Value, FetchError> {
        let resp = self.send(&request)?;
        serde_json::from_slice(&resp.body).map_err(|e| {
            let err = FetchError::parse(&request.url, e.to_string());
            error!("Error fetching {}: {err}", request.url);
            err
        })
    }

    /// GET `url` and return the raw body, with the given timeout.
    pub fn get_bytes(
        &self,
        url: &str,
        timeout: std::time::Duration,
    ) -> Result<Vec<u8>, FetchError> {
        let request = FetchRequest::get(url).with_timeout(timeout);
        Ok(self.send(&request)?.body)
    }

    /// GET `url` and return the body as text. A body that is not valid UTF-8
    /// is a [`FetchError::Parse`]; nothing is replaced lossily.
    pub fn get_text(&self, url: &str, timeout: std::time::Duration) -> Result<String, FetchError> {
        let body = self.get_bytes(url, timeout)?;
        String::from_utf8(body).map_err(|e| {
            let err = FetchError::parse(url, e.to_string());
            error!("Error fetching {url}: {err}");
            err
        })
    }

    /// Execute a request under the retry policy.
    pub fn send(&self, request: &FetchRequest) -> Result<RawResponse, FetchError> {
        let mut retries = 0u32;

        loop {
            if retries > 0 {
                let delay = self.policy.backoff_for(retries);
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
            }

            let (err, retryable) = match self.transport.execute(request) {
                Ok(resp) if resp.is_success() => return Ok(resp),
                Ok(resp) => (
                    FetchError::HttpStatus {
                        url: request.url.clone(),
                        status: resp.status,
                    },
                    self.policy.is_forced(resp.status),
                ),
                Err(e) => {
                    let retryable = match e.kind {
                        TransportKind::Connect => self.policy.retry_connect,
                        TransportKind::Read => self.policy.retry_read,
                        TransportKind::Other => false,
                    };
                    (
                        FetchError::Transport {
                            url: request.url.clone(),
                            kind: e.kind,
                            message: e.message,
                        },
                        retryable,
                    )
                }
            };

            if retryable && retries < self.policy.max_retries {
                retries += 1;
                debug!(
                    "{} {} failed ({err}), retry {retries}/{}",
                    request.method, request.url, self.policy.max_retries
                );
                continue;
            }

            error!("Error fetching {}: {err}", request.url);
            return Err(err);
        }
    }
}
