//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use samesite_crawler::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use samesite_crawler::crawler::run_crawl;
use samesite_crawler::{Coordinator, CrawlError, Link};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given request rate
fn create_test_config(max_rate: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            timeout: 2,
            max_rate,
            burst: 1,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: None,
        },
        output: OutputConfig::default(),
    }
}

/// Mounts an HTML page that must be requested exactly `expected_calls` times
async fn mount_page(server: &MockServer, route: &str, body: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn find<'a>(links: &'a [Link], url: &str) -> &'a Link {
    links
        .iter()
        .find(|link| link.self_url == url)
        .unwrap_or_else(|| panic!("no link for {}", url))
}

fn assert_unique(links: &[Link]) {
    let urls: HashSet<_> = links.iter().map(|link| link.self_url.as_str()).collect();
    assert_eq!(urls.len(), links.len(), "duplicate links in {:?}", links);
}

#[tokio::test]
async fn test_relative_link_followed_and_cross_site_link_dropped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
            <a href="/a">A</a>
            <a href="http://other.com/b">Other</a>
        </body></html>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/a", "<html><body>No links</body></html>", 1).await;

    let links = run_crawl(&create_test_config(50), &base_url)
        .await
        .expect("Crawl failed");

    let child_url = format!("{}/a", base_url);
    assert_eq!(
        links,
        vec![
            Link {
                self_url: base_url.clone(),
                visited: true,
                errored: false,
                child_urls: vec![child_url.clone()],
            },
            Link {
                self_url: child_url,
                visited: true,
                errored: false,
                child_urls: vec![],
            },
        ]
    );
    assert!(links
        .iter()
        .all(|link| !link.self_url.contains("other.com")
            && link.child_urls.iter().all(|c| !c.contains("other.com"))));
}

#[tokio::test]
async fn test_server_error_with_unparseable_body() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_bytes(vec![0xff, 0xfe, 0x00, 0x9c]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let links = run_crawl(&create_test_config(50), &base_url)
        .await
        .expect("Crawl failed");

    assert_eq!(links, vec![Link::failed(base_url)]);
}

#[tokio::test]
async fn test_error_status_still_yields_children() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/gone">Gone</a>"#, 1).await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"<html><body><a href="/home">Home</a></body></html>"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/home", r#"<a href="/gone">Gone again</a>"#, 1).await;

    let links = run_crawl(&create_test_config(50), &base_url)
        .await
        .expect("Crawl failed");

    assert_eq!(links.len(), 3);
    assert_unique(&links);

    let gone = find(&links, &format!("{}/gone", base_url));
    assert!(gone.visited);
    assert!(gone.errored);
    assert_eq!(gone.child_urls, vec![format!("{}/home", base_url)]);

    let home = find(&links, &format!("{}/home", base_url));
    assert!(!home.errored);
}

#[tokio::test]
async fn test_cyclic_graph_terminates_with_each_page_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // / -> a, b; a -> b, /, a#top; b -> a, c; c -> a
    mount_page(&mock_server, "/", r#"<a href="/a">A</a><a href="/b">B</a>"#, 1).await;
    mount_page(
        &mock_server,
        "/a",
        &format!(
            r#"<a href="/b">B</a><a href="/">Home</a><a href="{}/a#top">Top</a>"#,
            base_url
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/b", r#"<a href="a">A</a><a href="/c/">C</a>"#, 1).await;
    mount_page(&mock_server, "/c", r#"<a href="/a#section">A</a>"#, 1).await;

    let mut coordinator =
        Coordinator::new(&create_test_config(50), &base_url).expect("Failed to create coordinator");
    let links = coordinator.run().await;

    assert_eq!(links.len(), 4);
    assert_unique(&links);
    assert!(links.iter().all(|link| link.visited && !link.errored));
    assert_eq!(coordinator.waves_completed(), 2);

    let a = find(&links, &format!("{}/a", base_url));
    assert_eq!(
        a.child_urls,
        vec![format!("{}/b", base_url), format!("{}/a", base_url)]
    );
}

#[tokio::test]
async fn test_shared_child_fetched_once_per_wave() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/a">A</a><a href="/b">B</a><a href="/a">A again</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/a", r#"<a href="/shared">S</a>"#, 1).await;
    mount_page(&mock_server, "/b", r#"<a href="/shared">S</a>"#, 1).await;
    mount_page(&mock_server, "/shared", "<p>leaf</p>", 1).await;

    let links = run_crawl(&create_test_config(50), &base_url)
        .await
        .expect("Crawl failed");

    assert_eq!(links.len(), 4);
    assert_unique(&links);

    // Duplicates on a page are kept as encountered
    let root = find(&links, &base_url);
    assert_eq!(
        root.child_urls,
        vec![
            format!("{}/a", base_url),
            format!("{}/b", base_url),
            format!("{}/a", base_url)
        ]
    );
}

#[tokio::test]
async fn test_urls_are_compared_as_plain_strings() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // The seed has no trailing slash; "{base}/" is a different URL string
    // and is fetched once in its own right.
    mount_page(
        &mock_server,
        "/",
        &format!(r#"<a href="{}/">Home</a>"#, base_url),
        2,
    )
    .await;

    let links = run_crawl(&create_test_config(50), &base_url)
        .await
        .expect("Crawl failed");

    let urls: Vec<_> = links.iter().map(|link| link.self_url.clone()).collect();
    assert_eq!(urls, vec![base_url.clone(), format!("{}/", base_url)]);
}

#[tokio::test]
async fn test_requests_carry_user_agent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>hello</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let links = run_crawl(&create_test_config(50), &base_url)
        .await
        .expect("Crawl failed");

    assert_eq!(links.len(), 1);
    assert!(!links[0].errored);
}

#[tokio::test]
async fn test_rate_limit_spaces_requests() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/1">1</a><a href="/2">2</a><a href="/3">3</a><a href="/4">4</a>"#,
        1,
    )
    .await;
    for route in ["/1", "/2", "/3", "/4"] {
        mount_page(&mock_server, route, "<p>leaf</p>", 1).await;
    }

    // 5 requests at 10/s with burst 1: the last starts >= 400ms after the first
    let start = Instant::now();
    let links = run_crawl(&create_test_config(10), &base_url)
        .await
        .expect("Crawl failed");
    let elapsed = start.elapsed();

    assert_eq!(links.len(), 5);
    assert!(
        elapsed >= Duration::from_millis(380),
        "crawl took only {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_invalid_seed_fails_before_fetching() {
    let result = run_crawl(&create_test_config(50), "not a url").await;
    assert!(matches!(result, Err(CrawlError::UrlError(_))));
}
