//! Dataset persistence at the end of a crawl

use crate::common::*;
use catalog_crawler::crawler::Coordinator;
use catalog_crawler::output::{
    load_dataset, CsvDatasetWriter, DatasetStatistics, DatasetWriter, OutputError, OutputResult,
    WriteOutcome,
};
use catalog_crawler::{CrawlError, ItemRecord};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records every write call instead of touching the filesystem
#[derive(Clone, Default)]
struct RecordingWriter {
    calls: Arc<Mutex<Vec<usize>>>,
}

impl DatasetWriter for RecordingWriter {
    fn write(&self, items: &[ItemRecord]) -> OutputResult<WriteOutcome> {
        self.calls.lock().unwrap().push(items.len());
        Ok(WriteOutcome::SkippedEmpty)
    }
}

/// Always fails, like a full disk
struct FailingWriter;

impl DatasetWriter for FailingWriter {
    fn write(&self, _items: &[ItemRecord]) -> OutputResult<WriteOutcome> {
        Err(OutputError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "no space left on device",
        )))
    }
}

#[tokio::test]
async fn test_writer_invoked_exactly_once() {
    let mock_server = MockServer::start().await;

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;
    for page in 1..=3 {
        mount_listing(&mock_server, page, generated_listing(page, 4), 1).await;
    }

    let writer = RecordingWriter::default();
    let config = create_test_config(&mock_server.uri(), 3, false, "unused.csv");
    Coordinator::new(config)
        .unwrap()
        .with_writer(Box::new(writer.clone()))
        .run()
        .await
        .unwrap();

    assert_eq!(*writer.calls.lock().unwrap(), vec![12]);
}

#[tokio::test]
async fn test_writer_invoked_once_after_abort() {
    let mock_server = MockServer::start().await;

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;
    mount_listing(&mock_server, 1, generated_listing(1, 4), 1).await;
    Mock::given(method("GET"))
        .and(path(listing_path(2)))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let writer = RecordingWriter::default();
    let config = create_test_config(&mock_server.uri(), 3, false, "unused.csv");
    let report = Coordinator::new(config)
        .unwrap()
        .with_writer(Box::new(writer.clone()))
        .run()
        .await
        .unwrap();

    assert!(report.is_partial());
    assert_eq!(*writer.calls.lock().unwrap(), vec![4]);
}

#[tokio::test]
async fn test_persistence_failure_fails_run() {
    let mock_server = MockServer::start().await;

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;
    mount_listing(&mock_server, 1, generated_listing(1, 2), 1).await;

    let config = create_test_config(&mock_server.uri(), 1, false, "unused.csv");
    let result = Coordinator::new(config)
        .unwrap()
        .with_writer(Box::new(FailingWriter))
        .run()
        .await;

    assert!(matches!(result, Err(CrawlError::Output(_))));
}

#[tokio::test]
async fn test_rerun_replaces_dataset() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("books.csv");

    let stale = vec![ItemRecord {
        title: "Stale".to_string(),
        price: 1.0,
        availability: "In stock".to_string(),
        rating: 1,
        category: String::new(),
        price_defaulted: false,
        rating_defaulted: false,
    }];
    CsvDatasetWriter::new(&dataset).write(&stale).unwrap();

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;
    mount_listing(&mock_server, 1, generated_listing(1, 3), 1).await;

    let config = create_test_config(&mock_server.uri(), 1, false, dataset.to_str().unwrap());
    Coordinator::new(config).unwrap().run().await.unwrap();

    let items = load_dataset(&dataset).unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i.title != "Stale"));
}

#[tokio::test]
async fn test_empty_run_keeps_previous_dataset() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("books.csv");

    let previous = vec![ItemRecord {
        title: "Keep Me".to_string(),
        price: 9.99,
        availability: "In stock".to_string(),
        rating: 5,
        category: "Travel".to_string(),
        price_defaulted: false,
        rating_defaulted: false,
    }];
    CsvDatasetWriter::new(&dataset).write(&previous).unwrap();
    let before = std::fs::read_to_string(&dataset).unwrap();

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;
    Mock::given(method("GET"))
        .and(path(listing_path(1)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 1, false, dataset.to_str().unwrap());
    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.write, Some(WriteOutcome::SkippedEmpty));
    assert_eq!(std::fs::read_to_string(&dataset).unwrap(), before);
}

#[tokio::test]
async fn test_statistics_of_crawled_dataset() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("books.csv");

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;
    let listing = listing_html(&[
        product_html("One", "10.00", "One", "one_1/index.html"),
        product_html("Two", "20.00", "Five", "two_2/index.html"),
        product_html("Three", "30.00", "Five", "three_3/index.html"),
    ]);
    mount_listing(&mock_server, 1, listing, 1).await;

    let config = create_test_config(&mock_server.uri(), 1, false, dataset.to_str().unwrap());
    Coordinator::new(config).unwrap().run().await.unwrap();

    let stats = DatasetStatistics::from_items(&load_dataset(&dataset).unwrap());
    assert_eq!(stats.total_items, 3);
    assert_eq!(stats.mean_price, 20.0);
    assert_eq!(stats.min_price, 10.0);
    assert_eq!(stats.max_price, 30.0);
    assert_eq!(stats.items_by_rating[&5], 2);
    assert_eq!(stats.items_by_rating[&1], 1);
    assert!(stats.categories.is_empty());
}
