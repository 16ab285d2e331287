//! The reqwest transport against loopback sockets: how each kind of wire
//! failure is classified and whether the fetcher retries it.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use statforge_core::http::{FetchRequest, ReqwestTransport};
use statforge_core::providers::Cmhc;
use statforge_core::{FetchError, Fetcher, RetryPolicy, TransportKind};

/// Accept connections on a loopback port, hand each one to `handle` on its
/// own thread, and count how many were accepted.
fn serve<F>(handle: F) -> (String, Arc<AtomicUsize>)
where
    F: Fn(TcpStream) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&accepted);
    let handle = Arc::new(handle);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            counter.fetch_add(1, Ordering::SeqCst);
            let handle = Arc::clone(&handle);
            thread::spawn(move || handle(stream));
        }
    });
    (format!("http://{addr}"), accepted)
}

/// Consume the request head so the client sees its request go out.
fn read_request(stream: &mut TcpStream) {
    let mut buf = [0u8; 4096];
    let mut head = Vec::new();
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
}

fn respond(mut stream: TcpStream, status: &str, body: &[u8]) {
    read_request(&mut stream);
    let head = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

fn fetcher(policy: RetryPolicy) -> Fetcher {
    Fetcher::with_transport(
        ReqwestTransport::new().unwrap(),
        policy.with_backoff_factor(0.0),
    )
}

fn transport_kind(err: &FetchError) -> Option<TransportKind> {
    match err {
        FetchError::Transport { kind, .. } => Some(*kind),
        _ => None,
    }
}

#[test]
fn refused_connection_is_a_connect_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = fetcher(RetryPolicy::default())
        .get_json(&format!("http://{addr}/health"), &[])
        .unwrap_err();
    assert_eq!(transport_kind(&err), Some(TransportKind::Connect), "{err:?}");
}

#[test]
fn connection_dropped_before_response_is_retried() {
    let (url, accepted) = serve(|mut stream| {
        read_request(&mut stream);
        drop(stream);
    });

    let err = fetcher(RetryPolicy::default())
        .get_json(&format!("{url}/health"), &[])
        .unwrap_err();
    assert_eq!(transport_kind(&err), Some(TransportKind::Read), "{err:?}");
    assert_eq!(accepted.load(Ordering::SeqCst), 4);
}

#[test]
fn silent_server_times_out_as_read_failure() {
    let (url, accepted) = serve(|mut stream| {
        read_request(&mut stream);
        thread::sleep(Duration::from_secs(2));
        drop(stream);
    });

    let request =
        FetchRequest::get(format!("{url}/slow")).with_timeout(Duration::from_millis(200));
    let err = fetcher(RetryPolicy::default().with_max_retries(1))
        .send(&request)
        .unwrap_err();
    assert_eq!(transport_kind(&err), Some(TransportKind::Read), "{err:?}");
    assert_eq!(accepted.load(Ordering::SeqCst), 2);
}

#[test]
fn forcelisted_status_over_the_wire() {
    let (url, accepted) = serve(|stream| respond(stream, "502 Bad Gateway", b""));

    let err = fetcher(RetryPolicy::default()).get_json(&url, &[]).unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(accepted.load(Ordering::SeqCst), 4);
}

#[test]
fn json_keeps_upstream_field_order() {
    let body = br#"{"observations":[{"d":"2024-01-02","FXUSDCAD":{"v":"1.3316"}}]}"#;
    let (url, _) = serve(move |stream| respond(stream, "200 OK", body));

    let raw = fetcher(RetryPolicy::no_retry()).get_json(&url, &[]).unwrap();
    let keys: Vec<&str> = raw["observations"][0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["d", "FXUSDCAD"]);
}

#[test]
fn latin1_csv_download_is_a_parse_error() {
    let (url, accepted) =
        serve(|stream| respond(stream, "200 OK", b"Centre,Starts\nQu\xe9bec,100\n"));

    let fetcher = fetcher(RetryPolicy::default());
    let err = Cmhc::new(&fetcher)
        .download_csv(&format!("{url}/starts.csv"))
        .unwrap_err();
    assert!(matches!(err, FetchError::Parse { .. }), "{err:?}");
    assert_eq!(accepted.load(Ordering::SeqCst), 1);
}
