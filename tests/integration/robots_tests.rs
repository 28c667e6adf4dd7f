//! robots.txt handling during a crawl

use crate::common::*;
use catalog_crawler::crawler::Coordinator;
use catalog_crawler::output::load_dataset;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_disallowed_page_is_never_requested() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("books.csv");

    mount_robots(
        &mock_server,
        "User-agent: *\nDisallow: /catalogue/page-2.html\n",
    )
    .await;
    mount_listing(&mock_server, 1, generated_listing(1, 3), 1).await;
    mount_listing(&mock_server, 2, generated_listing(2, 3), 0).await;
    mount_listing(&mock_server, 3, generated_listing(3, 3), 1).await;

    let config = create_test_config(&mock_server.uri(), 3, false, dataset.to_str().unwrap());
    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.pages_skipped, 1);
    assert!(!report.is_partial());

    let titles: Vec<String> = load_dataset(&dataset)
        .unwrap()
        .into_iter()
        .map(|i| i.title)
        .collect();
    assert_eq!(
        titles,
        vec!["Book 1-1", "Book 1-2", "Book 1-3", "Book 3-1", "Book 3-2", "Book 3-3"]
    );
}

#[tokio::test]
async fn test_rules_for_named_agent() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("books.csv");

    mount_robots(
        &mock_server,
        "User-agent: OtherBot\nAllow: /\n\nUser-agent: TestBot\nDisallow: /catalogue/\n",
    )
    .await;
    mount_listing(&mock_server, 1, generated_listing(1, 3), 0).await;
    mount_listing(&mock_server, 2, generated_listing(2, 3), 0).await;

    let config = create_test_config(&mock_server.uri(), 2, false, dataset.to_str().unwrap());
    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.pages_fetched, 0);
    assert_eq!(report.pages_skipped, 2);
    assert_eq!(report.items_collected, 0);
    assert!(!dataset.exists());
}

#[tokio::test]
async fn test_missing_robots_fails_open() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("books.csv");

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_listing(&mock_server, 1, generated_listing(1, 4), 1).await;
    mount_listing(&mock_server, 2, generated_listing(2, 4), 1).await;

    let config = create_test_config(&mock_server.uri(), 2, false, dataset.to_str().unwrap());
    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert!(report.robots_fail_open);
    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.items_collected, 8);
}

#[tokio::test]
async fn test_undecodable_robots_fails_open() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("books.csv");

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe, 0x00, 0x9f]))
        .mount(&mock_server)
        .await;
    mount_listing(&mock_server, 1, generated_listing(1, 2), 1).await;

    let config = create_test_config(&mock_server.uri(), 1, false, dataset.to_str().unwrap());
    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert!(report.robots_fail_open);
    assert_eq!(report.items_collected, 2);
}

#[tokio::test]
async fn test_garbage_robots_allows_everything() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("books.csv");

    mount_robots(&mock_server, "<html>this is not a robots file</html>").await;
    mount_listing(&mock_server, 1, generated_listing(1, 2), 1).await;

    let config = create_test_config(&mock_server.uri(), 1, false, dataset.to_str().unwrap());
    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert!(!report.robots_fail_open);
    assert_eq!(report.pages_skipped, 0);
    assert_eq!(report.items_collected, 2);
}

#[tokio::test]
async fn test_crawl_delay_lengthens_page_interval() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("books.csv");

    mount_robots(&mock_server, "User-agent: *\nCrawl-delay: 0.05\n").await;
    mount_listing(&mock_server, 1, generated_listing(1, 1), 1).await;
    mount_listing(&mock_server, 2, generated_listing(2, 1), 1).await;

    let config = create_test_config(&mock_server.uri(), 2, false, dataset.to_str().unwrap());
    let started = std::time::Instant::now();
    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.page_interval, Duration::from_millis(50));
    assert!(started.elapsed() >= Duration::from_millis(50));
    assert_eq!(report.items_collected, 2);
}

#[tokio::test]
async fn test_crawl_delay_ignored_when_disabled() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("books.csv");

    mount_robots(&mock_server, "User-agent: *\nCrawl-delay: 30\n").await;
    mount_listing(&mock_server, 1, generated_listing(1, 1), 1).await;
    mount_listing(&mock_server, 2, generated_listing(2, 1), 1).await;

    let mut config =
        create_test_config(&mock_server.uri(), 2, false, dataset.to_str().unwrap());
    config.crawler.honor_crawl_delay = false;
    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.page_interval, Duration::ZERO);
    assert_eq!(report.pages_fetched, 2);
}

#[tokio::test]
async fn test_unrepresentable_crawl_delay_is_ignored() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("books.csv");

    mount_robots(&mock_server, "User-agent: *\nCrawl-delay: 1e20\n").await;
    mount_listing(&mock_server, 1, generated_listing(1, 2), 1).await;

    let config = create_test_config(&mock_server.uri(), 1, false, dataset.to_str().unwrap());
    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.page_interval, Duration::ZERO);
    assert_eq!(report.items_collected, 2);
    assert!(dataset.exists());
}
