//! Integration tests for the client
//!
//! These tests use wiremock to stand in for the site and drive
//! `WallhavenClient` end-to-end: login, listings, detail pages, actions and
//! downloads.

use std::sync::Arc;
use std::time::{Duration, Instant};
use wallhaven_client::{
    ClientConfig, Field, FieldSelection, Purity, SearchFilters, Uploader, WallhavenClient,
};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOME_PAGE: &str = r#"<html><body>
    <form id="login" method="post" action="/auth/login">
        <input type="hidden" name="_token" value="tok123">
        <input type="text" name="username">
        <input type="password" name="password">
    </form>
</body></html>"#;

const ANONYMOUS_DETAIL: &str = r##"<html><body>
    <section id="showcase"><img id="wallpaper" src="//w.example.com/full/wallhaven-abc.jpg"></section>
    <aside id="showcase-sidebar"><div><div class="sidebar-content">
        <h3 title="16x10">2560 x 1600</h3>
        <ul><li style="background-color:#000000"></li><li style="background-color:#ffffff"></li></ul>
        <ul id="tags">
            <li class="tag tag-sfw" data-tag-id="1"><a class="tagname">alpha</a></li>
            <li class="tag tag-sfw" data-tag-id="2"><a class="tagname">beta</a></li>
        </ul>
        <form id="wallpaper-purity-form"><label class="purity sketchy">Sketchy</label></form>
        <div data-storage-id="showcase-info"><dl>
            <dd class="showcase-uploader">
                <a class="avatar avatar-32"><img src="//example.com/avatar/32/x.png"></a>
                <a class="username usergroup-2">someone</a>
                <time datetime="2019-01-02T03:04:05+00:00">a while ago</time>
            </dd>
            <dd>People</dd>
            <dd>3.4 MiB</dd>
            <dd>9,876</dd>
            <dd><a>54</a></dd>
        </dl></div>
    </div></div></aside>
</body></html>"##;

const SIGNED_IN_DETAIL: &str = r##"<html><body>
    <section id="showcase"><img id="wallpaper" src="//w.example.com/full/wallhaven-abc.jpg"></section>
    <aside id="showcase-sidebar"><div><div class="sidebar-content">
        <ul id="tags">
            <li><a class="add-tag">Add tag</a></li>
            <li class="tag tag-sfw" data-tag-id="1"><a class="remove">x</a><a class="tagname">alpha</a></li>
            <li class="tag tag-sfw" data-tag-id="2"><a class="remove">x</a><a class="tagname">beta</a></li>
        </ul>
        <form id="wallpaper-purity-form">
            <input type="radio" id="sfw" name="purity"><label class="purity sfw">SFW</label>
            <input type="radio" id="sketchy" name="purity"><label class="purity sketchy">Sketchy</label>
            <input type="radio" id="nsfw" name="purity" checked><label class="purity nsfw">NSFW</label>
        </form>
    </div></div></aside>
</body></html>"##;

const LISTING: &str = r#"<html><body><div id="thumbs">
    <section class="thumb-listing-page">
        <h2>1,024 Wallpapers found <span>2</span> / 43</h2>
        <ul>
            <li><figure data-wallpaper-id="first"></figure></li>
            <li><figure data-wallpaper-id="second"></figure></li>
        </ul>
    </section>
</div></body></html>"#;

/// Points a default configuration at the mock server
fn config_for(server: &MockServer) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.site.base_url = server.uri();
    config.site.short_url_base = "https://short.example".to_string();
    config.site.asset_base_url = format!("{}/full", server.uri());
    config
}

fn credentials_config_for(server: &MockServer) -> ClientConfig {
    let mut config = config_for(server);
    config.auth.username = Some("someone".to_string());
    config.auth.password = Some("hunter2".to_string());
    config
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HOME_PAGE))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_string_contains("_token=tok123"))
        .and(body_string_contains("username=someone"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>welcome</html>"))
        .expect(1)
        .mount(server)
        .await;
}

async fn signed_in_client(server: &MockServer) -> WallhavenClient {
    mount_login(server).await;
    let client = WallhavenClient::new(credentials_config_for(server))
        .await
        .expect("Failed to create client");
    assert!(client.is_authenticated().await);
    client
}

async fn mount_detail(server: &MockServer, id: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/wallpaper/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

// ===== Session =====

#[tokio::test]
async fn test_login_at_construction() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;

    // Already signed in: no second handshake
    assert!(client.login().await.unwrap());
}

#[tokio::test]
async fn test_anonymous_construction_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = WallhavenClient::new(config_for(&server)).await.unwrap();

    assert!(!client.is_authenticated().await);
    assert!(!client.login().await.unwrap());
}

#[tokio::test]
async fn test_username_without_password_stays_anonymous() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HOME_PAGE))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.auth.username = Some("someone".to_string());
    config.auth.password = None;

    let client = WallhavenClient::new(config).await.unwrap();

    assert!(!client.is_authenticated().await);
    assert!(!client.login().await.unwrap());
}

#[tokio::test]
async fn test_login_fails_without_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>maintenance</body></html>"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = WallhavenClient::new(credentials_config_for(&server)).await.unwrap();

    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn test_login_fails_when_home_page_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = WallhavenClient::new(credentials_config_for(&server)).await.unwrap();

    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn test_login_rejected_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HOME_PAGE))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let client = WallhavenClient::new(credentials_config_for(&server)).await.unwrap();

    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn test_logout() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.logout().await.unwrap());
    assert!(!client.is_authenticated().await);

    // Not signed in anymore: nothing to do
    assert!(client.logout().await.unwrap());
}

#[tokio::test]
async fn test_failed_logout_keeps_session() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(!client.logout().await.unwrap());
    assert!(client.is_authenticated().await);
}

// ===== Listing =====

#[tokio::test]
async fn test_listing_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("categories", "101"))
        .and(query_param("purity", "110"))
        .and(query_param("order", "desc"))
        .and(query_param("page", "2"))
        .and(query_param("q", "forest"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING))
        .expect(3)
        .mount(&server)
        .await;

    let client = WallhavenClient::new(config_for(&server)).await.unwrap();
    let mut filters = SearchFilters::default().with_query("forest");
    filters.categories.anime = false;

    assert_eq!(client.get_pages_count(&filters, 2).await.unwrap(), Some(43));
    assert_eq!(
        client.get_images_numbers(&filters, 2).await.unwrap(),
        Some(vec!["first".to_string(), "second".to_string()])
    );

    let page = client.search(&filters, 2).await.unwrap().unwrap();
    assert_eq!(page.total_pages, Some(43));
    assert_eq!(page.entity_ids.map(|ids| ids.len()), Some(2));
}

#[tokio::test]
async fn test_listing_without_results_section() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body><p>No results</p></body></html>"))
        .mount(&server)
        .await;

    let client = WallhavenClient::new(config_for(&server)).await.unwrap();
    let filters = SearchFilters::default();

    assert_eq!(client.get_pages_count(&filters, 1).await.unwrap(), None);
    assert_eq!(client.get_images_numbers(&filters, 1).await.unwrap(), None);
}

#[tokio::test]
async fn test_listing_request_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string(LISTING))
        .mount(&server)
        .await;

    let client = WallhavenClient::new(config_for(&server)).await.unwrap();
    let filters = SearchFilters::default();

    assert_eq!(client.get_pages_count(&filters, 1).await.unwrap(), None);
    assert_eq!(client.get_images_numbers(&filters, 1).await.unwrap(), None);
    assert!(client.search(&filters, 1).await.unwrap().is_none());
}

// ===== Detail pages =====

#[tokio::test]
async fn test_record_uses_a_single_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallpaper/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ANONYMOUS_DETAIL))
        .expect(1)
        .mount(&server)
        .await;

    let client = WallhavenClient::new(config_for(&server)).await.unwrap();
    let record = client.get_record("abc", &FieldSelection::all()).await.unwrap();

    assert_eq!(record.id, "abc");
    assert_eq!(record.category, Field::Found("People".to_string()));
    assert_eq!(record.short_url, Field::Found("https://short.example/abc".to_string()));
    assert_eq!(record.upload_time, Field::Found("2019-01-02T03:04:05+00:00".to_string()));
    assert_eq!(record.ratio, Field::Found("16x10".to_string()));
    assert_eq!(record.resolution, Field::Found("2560x1600".to_string()));
    assert_eq!(
        record.colors,
        Field::Found(vec!["#000000".to_string(), "#ffffff".to_string()])
    );
    assert_eq!(record.favorites, Field::Found(54));
    assert_eq!(record.views, Field::Found(9876));
    assert_eq!(record.file_size, Field::Found("3.4 MiB".to_string()));
    assert_eq!(
        record.asset_url,
        Field::Found("https://w.example.com/full/wallhaven-abc.jpg".to_string())
    );
    assert_eq!(record.purity, Field::Found(Purity::Sketchy));
    assert_eq!(
        record.tags,
        Field::Found(vec!["alpha".to_string(), "beta".to_string()])
    );
    assert_eq!(record.tags_extended.found().map(Vec::len), Some(2));

    let uploader = record.uploader.found().unwrap();
    assert_eq!(uploader.username.as_deref(), Some("someone"));
    let avatar = uploader.avatar.as_ref().unwrap();
    assert_eq!(avatar.small, "example.com/avatar/32/x.png");
    assert_eq!(avatar.large, "example.com/avatar/200/x.png");
}

#[tokio::test]
async fn test_record_with_nothing_selected_still_fetches_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallpaper/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ANONYMOUS_DETAIL))
        .expect(1)
        .mount(&server)
        .await;

    let client = WallhavenClient::new(config_for(&server)).await.unwrap();
    let record = client.get_record("abc", &FieldSelection::none()).await.unwrap();

    assert!(record.is_empty());
    assert!(record.views.is_skipped());
}

#[tokio::test]
async fn test_missing_wallpaper() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallpaper/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>not found</html>"))
        .mount(&server)
        .await;

    mount_detail(&server, "blank", "<html><body><p>This wallpaper was removed</p></body></html>").await;

    let client = WallhavenClient::new(config_for(&server)).await.unwrap();

    assert!(!client.exists("gone").await.unwrap());
    assert!(!client.exists("blank").await.unwrap());

    for id in ["gone", "blank"] {
        let record = client.get_record(id, &FieldSelection::all()).await.unwrap();
        assert!(record.is_empty());
        assert!(record.category.is_missing());
        assert!(record.short_url.is_missing());
        assert!(record.tags.is_missing());
    }

    assert_eq!(client.image_views("gone").await.unwrap(), None);
    assert!(client.image_tags("blank").await.unwrap().is_empty());
    assert_eq!(client.image_uploader("blank").await.unwrap(), Uploader::default());
}

#[tokio::test]
async fn test_per_field_accessors() {
    let server = MockServer::start().await;
    mount_detail(&server, "abc", ANONYMOUS_DETAIL).await;

    let client = WallhavenClient::new(config_for(&server)).await.unwrap();

    assert!(client.exists("abc").await.unwrap());
    assert_eq!(client.image_category("abc").await.unwrap().as_deref(), Some("People"));
    assert_eq!(client.image_favorites("abc").await.unwrap(), Some(54));
    assert_eq!(client.image_purity("abc").await.unwrap(), Some(Purity::Sketchy));
    assert_eq!(client.image_resolution("abc").await.unwrap().as_deref(), Some("2560x1600"));
    assert_eq!(client.image_colors("abc").await.unwrap().len(), 2);
    assert_eq!(client.image_short_url("abc"), "https://short.example/abc");
}

#[tokio::test]
async fn test_signed_in_view() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    mount_detail(&server, "abc", SIGNED_IN_DETAIL).await;

    let record = client.get_record("abc", &FieldSelection::all()).await.unwrap();

    // The checked box wins over the SFW and Sketchy labels scanned first
    assert_eq!(record.purity, Field::Found(Purity::Nsfw));
    // Three tag items, the first is the edit control
    assert_eq!(
        record.tags,
        Field::Found(vec!["alpha".to_string(), "beta".to_string()])
    );
}

#[tokio::test]
async fn test_shared_client_across_tasks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallpaper/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ANONYMOUS_DETAIL))
        .expect(8)
        .mount(&server)
        .await;

    let client = Arc::new(WallhavenClient::new(config_for(&server)).await.unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.get_record("abc", &FieldSelection::all()).await })
        })
        .collect();

    for handle in handles {
        let record = handle.await.unwrap().unwrap();
        assert_eq!(record.views, Field::Found(9876));
    }
}

#[tokio::test]
async fn test_requests_are_serialized() {
    let server = MockServer::start().await;
    let delay = Duration::from_millis(200);

    Mock::given(method("GET"))
        .and(path("/wallpaper/abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ANONYMOUS_DETAIL)
                .set_delay(delay),
        )
        .expect(4)
        .mount(&server)
        .await;

    let client = Arc::new(WallhavenClient::new(config_for(&server)).await.unwrap());
    let started = Instant::now();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.exists("abc").await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }

    // One request in flight at a time, so the delays add up
    assert!(started.elapsed() >= delay * 4);
}

// ===== Actions =====

#[tokio::test]
async fn test_actions_require_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":true}"#))
        .expect(0)
        .mount(&server)
        .await;

    let client = WallhavenClient::new(config_for(&server)).await.unwrap();

    assert!(!client.add_tag("abc", "forest").await.unwrap());
    assert!(!client.delete_tag("abc", "37").await.unwrap());
    assert!(!client.change_purity("abc", "sfw").await.unwrap());
}

#[tokio::test]
async fn test_invalid_purity_sends_nothing() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/wallpaper/purity"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":true}"#))
        .expect(0)
        .mount(&server)
        .await;

    assert!(!client.change_purity("abc", "invalid").await.unwrap());
    assert!(!client.change_purity("abc", "SFW").await.unwrap());
}

#[tokio::test]
async fn test_change_purity() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/wallpaper/purity"))
        .and(body_string_contains("wallpaper_id=abc"))
        .and(body_string_contains("purity=sketchy"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":true}"#))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.change_purity("abc", "sketchy").await.unwrap());
}

#[tokio::test]
async fn test_add_tag() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/wallpaper/tag/add"))
        .and(body_string_contains("tag_name=forest"))
        .and(body_string_contains("wallpaper_id=abc"))
        .and(body_string_contains("_token=tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":true,"tag":{"id":5}}"#))
        .mount(&server)
        .await;

    assert!(client.add_tag("abc", "forest").await.unwrap());
}

#[tokio::test]
async fn test_delete_tag() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/wallpaper/tag/remove/37/abc"))
        .and(query_param("_token", "tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":false}"#))
        .mount(&server)
        .await;

    assert!(!client.delete_tag("abc", "37").await.unwrap());
}

#[tokio::test]
async fn test_malformed_action_response() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/wallpaper/tag/add"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Server error</html>"))
        .mount(&server)
        .await;

    assert!(!client.add_tag("abc", "forest").await.unwrap());
}

// ===== Downloads =====

#[tokio::test]
async fn test_download_falls_back_to_png() {
    let server = MockServer::start().await;
    mount_detail(&server, "abc", ANONYMOUS_DETAIL).await;

    Mock::given(method("GET"))
        .and(path("/full/wallhaven-abc.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let bytes: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
    Mock::given(method("GET"))
        .and(path("/full/wallhaven-abc.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = WallhavenClient::new(config_for(&server)).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("nested").join("deeper").join("abc.png");

    assert!(client.download("abc", &destination, 1024).await.unwrap());
    assert_eq!(std::fs::read(&destination).unwrap(), bytes);
}

#[tokio::test]
async fn test_download_prefers_primary_and_overwrites() {
    let server = MockServer::start().await;
    mount_detail(&server, "abc", ANONYMOUS_DETAIL).await;

    Mock::given(method("GET"))
        .and(path("/full/wallhaven-abc.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg bytes".to_vec()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/full/wallhaven-abc.png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = WallhavenClient::new(config_for(&server)).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("abc.jpg");
    std::fs::write(&destination, b"old contents that are longer").unwrap();

    assert!(client.download("abc", &destination, 0).await.unwrap());
    assert_eq!(std::fs::read(&destination).unwrap(), b"jpeg bytes");
}

#[tokio::test]
async fn test_download_fails_when_no_format_available() {
    let server = MockServer::start().await;
    mount_detail(&server, "abc", ANONYMOUS_DETAIL).await;

    Mock::given(method("GET"))
        .and(path("/full/wallhaven-abc.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/full/wallhaven-abc.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = WallhavenClient::new(config_for(&server)).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("sub").join("abc.png");

    assert!(!client.download("abc", &destination, 4096).await.unwrap());
    assert!(!destination.exists());
    assert!(!dir.path().join("sub").exists());
}

#[tokio::test]
async fn test_download_missing_wallpaper() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallpaper/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/full/wallhaven-gone.jpg"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = WallhavenClient::new(config_for(&server)).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("gone.jpg");

    assert!(!client.download("gone", &destination, 4096).await.unwrap());
    assert!(!destination.exists());
}
