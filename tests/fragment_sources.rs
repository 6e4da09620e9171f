use std::time::Duration;

use squad_panel::core::page::{Page, PageId};
use squad_panel::fragments::{
    DirFragments, EmbeddedFragments, FetchError, FragmentSource, HttpFragments, source_for,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// HTTP Fragments
// ============================================================================

#[tokio::test]
async fn test_http_fetch_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pages/kills.html"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"<div class="kills-list"></div>"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = HttpFragments::new(&mock_server.uri(), None);
    let html = source.fetch(&PageId::new("kills")).await.unwrap();

    assert_eq!(html, r#"<div class="kills-list"></div>"#);
}

#[tokio::test]
async fn test_http_404_is_status_error_with_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pages/missing.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let source = HttpFragments::new(&mock_server.uri(), None);
    let err = source.fetch(&PageId::new("missing")).await.unwrap_err();

    assert_eq!(
        err,
        FetchError::Status {
            status: 404,
            path: "pages/missing.html".to_string()
        }
    );
    assert!(err.to_string().contains("HTTP error! status: 404"));
}

#[tokio::test]
async fn test_http_server_error_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pages/stats.html"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<p>oops</p>"))
        .mount(&mock_server)
        .await;

    let source = HttpFragments::new(&mock_server.uri(), None);
    let result = source.fetch(&PageId::new("stats")).await;

    assert!(matches!(result, Err(FetchError::Status { status: 500, .. })));
}

#[tokio::test]
async fn test_http_timeout_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pages/console.html"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let source = HttpFragments::new(&mock_server.uri(), Some(Duration::from_millis(100)));
    let result = source.fetch(&PageId::new("console")).await;

    assert!(matches!(result, Err(FetchError::Network(_))));
}

#[tokio::test]
async fn test_source_for_url_uses_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pages/vips.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<div class=\"vips-grid\"></div>"))
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server.uri(), false, None);
    let html = source.fetch(&PageId::new("vips")).await.unwrap();

    assert!(html.contains("vips-grid"));
}

// ============================================================================
// Directory and Embedded Fragments
// ============================================================================

#[tokio::test]
async fn test_repository_pages_directory_serves_every_page() {
    let source = DirFragments::new(env!("CARGO_MANIFEST_DIR"));

    for page in Page::ALL {
        let html = source.fetch(&PageId::from(page)).await.unwrap();
        assert!(!html.trim().is_empty(), "{} is empty", page);
    }
}

#[tokio::test]
async fn test_embedded_matches_repository_pages() {
    let dir = DirFragments::new(env!("CARGO_MANIFEST_DIR"));

    for page in Page::ALL {
        let id = PageId::from(page);
        let on_disk = dir.fetch(&id).await.unwrap();
        let embedded = EmbeddedFragments.fetch(&id).await.unwrap();
        assert_eq!(on_disk, embedded, "{} differs", page);
    }
}

#[tokio::test]
async fn test_embedded_flag_wins_over_base() {
    let source = source_for("http://127.0.0.1:9", true, None);
    assert!(source.fetch(&PageId::new("console")).await.is_ok());
}
