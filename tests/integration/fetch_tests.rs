//! Retry, backoff and error classification of the HTML fetcher

use briefex::config::CrawlerConfig;
use briefex::crawler::{FetchError, Fetcher, HtmlFetcher};
use std::time::{Duration, Instant};
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a crawler configuration with near-zero backoff
fn fast_config(max_retries: u32) -> CrawlerConfig {
    CrawlerConfig {
        request_timeout_ms: 2000,
        connect_timeout_ms: 1000,
        max_retries,
        retry_delay_ms: 1,
        max_retry_delay_ms: 5,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_retries_transient_errors_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HtmlFetcher::new(&fast_config(3)).unwrap();
    let body = fetcher
        .fetch(&format!("{}/page", server.uri()))
        .await
        .unwrap();

    assert_eq!(body, b"<html>ok</html>");
}

#[tokio::test]
async fn test_gives_up_after_exactly_max_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let fetcher = HtmlFetcher::new(&fast_config(3)).unwrap();
    let err = fetcher
        .fetch(&format!("{}/page", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Http { status: 500, .. }));
}

#[tokio::test]
async fn test_honors_retry_after_on_429() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(2)
        .mount(&server)
        .await;

    let fetcher = HtmlFetcher::new(&fast_config(2)).unwrap();
    let err = fetcher
        .fetch(&format!("{}/page", server.uri()))
        .await
        .unwrap_err();

    assert_eq!(err.retry_after(), Some(Duration::ZERO));
}

#[tokio::test]
async fn test_waits_for_retry_after_before_next_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    // The backoff cap is 5ms, so only the header can account for the wait
    let fetcher = HtmlFetcher::new(&fast_config(3)).unwrap();
    let started = Instant::now();
    let body = fetcher
        .fetch(&format!("{}/page", server.uri()))
        .await
        .unwrap();

    assert_eq!(body, b"<html>ok</html>");
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HtmlFetcher::new(&fast_config(3)).unwrap();
    let err = fetcher
        .fetch(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::NotFound { .. }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_permanent_client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forbidden"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HtmlFetcher::new(&fast_config(3)).unwrap();
    let err = fetcher
        .fetch(&format!("{}/forbidden", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Http { status: 403, .. }));
}

#[tokio::test]
async fn test_slow_response_times_out_and_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_millis(500)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let config = CrawlerConfig {
        request_timeout_ms: 100,
        ..fast_config(2)
    };
    let fetcher = HtmlFetcher::new(&config).unwrap();
    let err = fetcher
        .fetch(&format!("{}/slow", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout { .. }));
}

#[tokio::test]
async fn test_sends_browser_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header_exists("user-agent"))
        .and(header_exists("accept"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HtmlFetcher::new(&fast_config(1)).unwrap();
    assert!(fetcher
        .fetch(&format!("{}/page", server.uri()))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_invalid_urls_fail_before_network() {
    let fetcher = HtmlFetcher::new(&fast_config(3)).unwrap();

    for url in ["", "   ", "ftp://example.com/file", "http://", "http://exa mple.com/"] {
        let err = fetcher.fetch(url).await.unwrap_err();
        assert!(
            matches!(err, FetchError::InvalidSource { .. }),
            "expected InvalidSource for {:?}, got {:?}",
            url,
            err
        );
    }
}
