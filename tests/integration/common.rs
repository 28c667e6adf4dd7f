//! Shared fixtures: configuration and catalog markup

use catalog_crawler::config::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USER_AGENT: &str = "TestBot/1.0.0 (+https://example.com/contact; test@example.com)";

/// Creates a test configuration for the catalog at `base_url`
pub fn create_test_config(
    base_url: &str,
    max_pages: u32,
    resolve_categories: bool,
    dataset_path: &str,
) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            listing_path: "catalogue/page-{page}.html".to_string(),
            max_pages,
        },
        crawler: CrawlerConfig {
            request_timeout_secs: 5,
            page_delay_ms: 0, // No pacing in tests
            resolve_categories,
            honor_crawl_delay: true,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig {
            dataset_path: dataset_path.to_string(),
        },
    }
}

/// Markup of one product container, as the catalog renders it
pub fn product_html(title: &str, price: &str, rating: &str, href: &str) -> String {
    format!(
        r#"<article class="product_pod">
            <div class="image_container"><a href="{href}"><img src="thumb.jpg" alt="{title}"></a></div>
            <p class="star-rating {rating}"><i class="icon-star"></i></p>
            <h3><a href="{href}" title="{title}">{title}</a></h3>
            <div class="product_price">
                <p class="price_color">£{price}</p>
                <p class="instock availability"><i class="icon-ok"></i>In stock</p>
            </div>
        </article>"#,
        href = href,
        title = title,
        price = price,
        rating = rating,
    )
}

/// Wraps product markup in a listing page
pub fn listing_html(products: &[String]) -> String {
    let items: String = products
        .iter()
        .map(|p| format!("<li class=\"col-xs-6\">{}</li>", p))
        .collect();
    format!(
        "<html><head><title>All products</title></head><body><section><ol class=\"row\">{}</ol></section></body></html>",
        items
    )
}

/// A listing page of `count` products titled `Book {page}-{n}`
pub fn generated_listing(page: u32, count: usize) -> String {
    let products: Vec<String> = (1..=count)
        .map(|n| {
            product_html(
                &format!("Book {}-{}", page, n),
                &format!("{}.{:02}", 10 + n, page),
                "Three",
                &format!("book-{}-{}_{}/index.html", page, n, page * 100 + n as u32),
            )
        })
        .collect();
    listing_html(&products)
}

/// Markup of a detail page with the given breadcrumb links
pub fn detail_html(breadcrumb: &[&str]) -> String {
    let links: String = breadcrumb
        .iter()
        .map(|text| format!("<li><a href=\"../index.html\">{}</a></li>", text))
        .collect();
    format!(
        "<html><body><ul class=\"breadcrumb\">{}<li class=\"active\">Title</li></ul></body></html>",
        links
    )
}

pub fn listing_path(page: u32) -> String {
    format!("/catalogue/page-{}.html", page)
}

/// Serves `body` as robots.txt
pub async fn mount_robots(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Serves a listing page and expects it to be requested `expected` times
pub async fn mount_listing(server: &MockServer, page: u32, body: String, expected: u64) {
    Mock::given(method("GET"))
        .and(path(listing_path(page)))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .expect(expected)
        .mount(server)
        .await;
}
