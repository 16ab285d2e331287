//! Resilient HTTP fetching with bounded retry.

pub mod fetcher;
pub mod request;
pub mod retry;
pub mod transport;

pub use fetcher::Fetcher;
pub use request::{FetchRequest, Method, DOWNLOAD_TIMEOUT, JSON_TIMEOUT};
pub use retry::{RetryPolicy, DEFAULT_STATUS_FORCELIST};
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportError};
