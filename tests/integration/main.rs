//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small catalog and run the full
//! crawl cycle end-to-end against it.

mod common;
mod output_tests;
mod robots_tests;
