//! End-to-end ingest: listing page, detail pages, persistence and dedupe

use briefex::config::parse_config;
use briefex::container::Container;
use briefex::model::{draft_id, PostStatus};
use briefex::storage::{PostFilter, PostStorage, SqliteStorage};
use briefex::workflow::Workflow;
use briefex::ConfigError;
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a configuration with one RT-layout source served by `server_uri`
fn test_config(server_uri: &str) -> String {
    format!(
        r#"
[crawler]
max-retries = 2
retry-delay-ms = 1
max-retry-delay-ms = 5
lookback-days = 3

[database]
path = ":memory:"

[[source]]
name = "RT"
code-name = "rt::html"
type = "HTML"
url = "{}/news"
"#,
        server_uri
    )
}

fn listing_page() -> String {
    let cards: String = [
        ("/news/1?utm_source=feed", "Первая новость"),
        ("/news/2", "Second&nbsp;story"),
        ("/news/3#comments", "Third story"),
    ]
    .iter()
    .map(|(href, title)| {
        format!(
            r#"<div class="listing__card">
                 <div class="card__heading"><a class="link" href="{}">  {}  </a></div>
               </div>"#,
            href, title
        )
    })
    .collect();

    format!("<html><body><div class=\"listing\">{}</div></body></html>", cards)
}

fn detail_page(text: &str) -> String {
    format!(
        r#"<html><body>
             <div class="article_article-page">
               <time class="date" datetime="2024-03-01 12:30">1 March</time>
               <div class="article__text_article-page"><p>{}</p><p>More.</p></div>
             </div>
           </body></html>"#,
        text
    )
}

async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/news/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_page("One.")))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/news/2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/news/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_page("Three.")))
        .mount(server)
        .await;
}

fn container(server: &MockServer) -> (Container, Arc<SqliteStorage>) {
    let config = parse_config(&test_config(&server.uri())).unwrap();
    let storage = Arc::new(SqliteStorage::new_in_memory().unwrap());
    let container = Container::with_storage(config, Arc::clone(&storage));
    container.seed_sources().unwrap();
    (container, storage)
}

#[tokio::test]
async fn test_failed_detail_page_drops_only_that_post() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let (container, storage) = container(&server);

    let report = container.ingest_workflow().run().await.unwrap();

    assert_eq!(report.sources, 1);
    assert_eq!(report.failed_sources, 0);
    assert_eq!(report.crawled, 2);
    assert_eq!(report.persisted, 2);

    let posts = storage
        .get_posts(&PostFilter::with_status(PostStatus::PendingSummary))
        .unwrap();
    assert_eq!(posts.len(), 2);

    let first = storage.get_post(draft_id("rt::html", "1")).unwrap();
    assert_eq!(first.title, "Первая новость");
    assert_eq!(first.content, "One.\nMore.");
    assert_eq!(first.canonical_url, format!("{}/news/1", server.uri()));
    assert_eq!(
        first.published_at,
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
    );

    let third = storage.get_post(draft_id("rt::html", "3")).unwrap();
    assert_eq!(third.canonical_url, format!("{}/news/3", server.uri()));
    assert!(storage
        .get_post(draft_id("rt::html", "2"))
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_second_run_is_fenced() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let (container, storage) = container(&server);
    let workflow = container.ingest_workflow();

    workflow.run().await.unwrap();
    let second = workflow.run().await.unwrap();

    assert_eq!(second.already_known, 2);
    assert_eq!(second.persisted, 0);
    assert_eq!(second.duplicates, 0);
    assert_eq!(storage.count_posts().unwrap(), 2);
}

#[tokio::test]
async fn test_unreachable_listing_fails_only_that_source() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;
    let (container, storage) = container(&server);

    let report = container.ingest_workflow().run().await.unwrap();

    assert_eq!(report.failed_sources, 1);
    assert_eq!(report.persisted, 0);
    assert_eq!(storage.count_posts().unwrap(), 0);
}

#[test]
fn test_invalid_source_url_is_rejected_at_load() {
    let config = test_config("ftp://files.example.com");
    let err = parse_config(&config).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl(_)));
}
