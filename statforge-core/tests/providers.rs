//! Extractors against a scripted transport: URLs, payloads, retries and
//! error classification.

mod common;

use chrono::NaiveDate;
use serde_json::json;

use common::Scripted;
use statforge_core::http::{Method, TransportError};
use statforge_core::providers::{BankOfCanada, Cmhc, StatCan, VectorId};
use statforge_core::FetchError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Bank of Canada ───────────────────────────────────────────────────

#[test]
fn boc_observations_send_only_given_dates() {
    let t = Scripted::new(vec![Scripted::ok(r#"{"observations": []}"#)]);
    let fetcher = t.fetcher();
    let boc = BankOfCanada::new(&fetcher);

    boc.series_observations("FXUSDCAD", Some(date(2020, 1, 1)), None)
        .unwrap();

    let req = &t.requests()[0];
    assert_eq!(req.method, Method::Get);
    assert_eq!(
        req.url,
        "https://www.bankofcanada.ca/valet/observations/FXUSDCAD/json"
    );
    assert_eq!(
        req.query,
        vec![("start_date".to_string(), "2020-01-01".to_string())]
    );
}

#[test]
fn boc_observations_without_dates_have_no_query() {
    let t = Scripted::new(vec![Scripted::ok("{}")]);
    let fetcher = t.fetcher();
    BankOfCanada::new(&fetcher)
        .series_observations("FXUSDCAD", None, None)
        .unwrap();
    assert!(t.requests()[0].query.is_empty());
}

#[test]
fn boc_details_hit_series_endpoint() {
    let t = Scripted::new(vec![Scripted::ok(
        r#"{"series": {"name": "FXUSDCAD", "label": "USD/CAD"}}"#,
    )]);
    let fetcher = t.fetcher();
    let raw = BankOfCanada::with_base_url(&fetcher, "https://valet.test")
        .series_details("FXUSDCAD")
        .unwrap();

    assert_eq!(raw["series"]["label"], "USD/CAD");
    assert_eq!(t.requests()[0].url, "https://valet.test/series/FXUSDCAD/json");
}

// ── Statistics Canada ────────────────────────────────────────────────

#[test]
fn statcan_info_posts_vector_ids_and_filters_envelopes() {
    let t = Scripted::new(vec![Scripted::ok(
        r#"[{"status": "SUCCESS", "object": {"vectorId": "v1"}}, {"status": "FAILED"}]"#,
    )]);
    let fetcher = t.fetcher();
    let kept = StatCan::new(&fetcher)
        .series_info(&[VectorId(1), VectorId(2)])
        .unwrap();

    assert_eq!(kept, vec![json!({"vectorId": "v1"})]);

    let req = &t.requests()[0];
    assert_eq!(req.method, Method::Post);
    assert_eq!(
        req.url,
        "https://www150.statcan.gc.ca/t1/wds/rest/getSeriesInfoFromVector"
    );
    assert_eq!(req.body, Some(json!([{"vectorId": 1}, {"vectorId": 2}])));
}

#[test]
fn statcan_data_defaults_to_2000_and_open_end() {
    let t = Scripted::new(vec![Scripted::ok("[]")]);
    let fetcher = t.fetcher();
    StatCan::new(&fetcher)
        .data_from_vectors(&[VectorId(41690973)], None)
        .unwrap();

    assert_eq!(
        t.requests()[0].body,
        Some(json!([{
            "vectorId": 41690973,
            "startReferencePeriod": "2000-01-01",
            "endReferencePeriod": "2099-12-31"
        }]))
    );
}

#[test]
fn statcan_data_uses_given_start() {
    let t = Scripted::new(vec![Scripted::ok("[]")]);
    let fetcher = t.fetcher();
    StatCan::new(&fetcher)
        .data_from_vectors(&[VectorId(7)], Some(date(2021, 1, 1)))
        .unwrap();

    let body = t.requests()[0].body.clone().unwrap();
    assert_eq!(body[0]["startReferencePeriod"], "2021-01-01");
}

#[test]
fn statcan_non_list_response_is_a_parse_error() {
    let t = Scripted::new(vec![Scripted::ok(r#"{"message": "maintenance"}"#)]);
    let fetcher = t.fetcher();
    let err = StatCan::new(&fetcher)
        .series_info(&[VectorId(1)])
        .unwrap_err();
    assert!(matches!(err, FetchError::Parse { .. }));
}

// ── CMHC ─────────────────────────────────────────────────────────────

#[test]
fn cmhc_not_found_is_an_http_error() {
    let t = Scripted::new(vec![Scripted::status(404)]);
    let fetcher = t.fetcher();
    let err = Cmhc::new(&fetcher)
        .download_csv("https://cmhc.test/starts.csv")
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(t.calls(), 1);
}

#[test]
fn cmhc_ragged_csv_is_a_parse_error() {
    let t = Scripted::new(vec![Scripted::ok("a,b,c\n1,2,3\n4,5\n")]);
    let fetcher = t.fetcher();
    let err = Cmhc::new(&fetcher)
        .download_csv("https://cmhc.test/starts.csv")
        .unwrap_err();

    assert!(matches!(err, FetchError::Parse { .. }));
    assert!(!err.is_transport());
}

#[test]
fn cmhc_download_uses_long_timeout() {
    let t = Scripted::new(vec![Scripted::ok("Year,Starts\n2023,47000\n")]);
    let fetcher = t.fetcher();
    let table = Cmhc::new(&fetcher)
        .download_csv("https://cmhc.test/starts.csv")
        .unwrap();

    assert_eq!(table.headers, vec!["Year", "Starts"]);
    assert_eq!(table.len(), 1);
    assert_eq!(t.requests()[0].timeout.as_secs(), 30);
}

// ── Retry behaviour ──────────────────────────────────────────────────

#[test]
fn forcelisted_status_is_retried_then_fails() {
    let t = Scripted::new(vec![Scripted::status(500); 4]);
    let fetcher = t.fetcher();
    let err = BankOfCanada::new(&fetcher)
        .series_details("FXUSDCAD")
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    // One attempt plus three retries.
    assert_eq!(t.calls(), 4);
}

#[test]
fn forcelisted_post_is_retried_too() {
    let t = Scripted::new(vec![
        Scripted::status(502),
        Scripted::ok(r#"[{"status": "SUCCESS", "object": {}}]"#),
    ]);
    let fetcher = t.fetcher();
    let kept = StatCan::new(&fetcher).series_info(&[VectorId(1)]).unwrap();
    assert_eq!(kept.len(), 1);
    assert_eq!(t.calls(), 2);
}

#[test]
fn unlisted_statuses_fail_on_first_attempt() {
    for status in [400, 404, 503] {
        let t = Scripted::new(vec![Scripted::status(status)]);
        let fetcher = t.fetcher();
        let err = fetcher.get_json("https://x.test/a", &[]).unwrap_err();
        assert_eq!(err.status(), Some(status));
        assert_eq!(t.calls(), 1, "status {status} must not be retried");
    }
}

#[test]
fn read_timeouts_exhaust_the_budget() {
    let t = Scripted::new(vec![
        Err(TransportError::read("timed out")),
        Err(TransportError::read("timed out")),
        Err(TransportError::read("timed out")),
        Err(TransportError::read("timed out")),
    ]);
    let fetcher = t.fetcher();
    let err = fetcher.get_json("https://x.test/a", &[]).unwrap_err();
    assert!(err.is_transport());
    assert_eq!(t.calls(), 4);
}

#[test]
fn unsupported_method_never_reaches_transport() {
    let t = Scripted::new(vec![]);
    let fetcher = t.fetcher();
    for verb in ["PUT", "delete", "PATCH"] {
        match fetcher.fetch_json(verb, "https://x.test", &[], None) {
            Err(FetchError::UnsupportedMethod(m)) => assert_eq!(m, verb),
            other => panic!("expected UnsupportedMethod, got {other:?}"),
        }
    }
    assert_eq!(t.calls(), 0);
}
