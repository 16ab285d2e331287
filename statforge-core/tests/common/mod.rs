//! Scripted transport shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use statforge_core::http::{
    FetchRequest, Fetcher, RawResponse, RetryPolicy, Transport, TransportError,
};

type Reply = Result<RawResponse, TransportError>;

/// Replays canned replies in order and records every request it sees.
/// Once the script runs out it answers `200 {}`.
#[derive(Clone, Default)]
pub struct Scripted {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    seen: Arc<Mutex<Vec<FetchRequest>>>,
}

impl Scripted {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            seen: Arc::default(),
        }
    }

    pub fn ok(body: &str) -> Reply {
        Ok(RawResponse::new(200, body))
    }

    pub fn status(status: u16) -> Reply {
        Ok(RawResponse::new(status, ""))
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.seen.lock().unwrap().clone()
    }

    /// Fetcher with the default retry budget and no sleeping between attempts.
    pub fn fetcher(&self) -> Fetcher {
        Fetcher::with_transport(
            self.clone(),
            RetryPolicy::default().with_backoff_factor(0.0),
        )
    }
}

impl Transport for Scripted {
    fn execute(&self, request: &FetchRequest) -> Result<RawResponse, TransportError> {
        self.seen.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(200, "{}")))
    }
}
