use super::*;
use mockito::{Matcher, Server};

fn resolver_for(server: &Server) -> ApkPure {
    ApkPure::with_base_urls(
        &NetworkingConfig::default(),
        server.url(),
        format!("{}/b/APK", server.url()),
    )
    .unwrap()
}

fn query(package: &str) -> SearchQuery {
    SearchQuery::new(package, None)
}

const SEARCH_PAGE: &str = r#"
<html><body>
<div class="apk-list">
  <a class="apk-item" href="/whatsapp-business" title="WhatsApp Business"
     data-dt-pkg="com.whatsapp.w4b"></a>
  <a class="apk-item" href="/whatsapp" title="WhatsApp"
     data-dt-pkg="com.whatsapp"></a>
</div>
</body></html>
"#;

#[tokio::test]
async fn search_returns_exact_package_match_not_first_ranked() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("q".into(), "com.whatsapp".into()))
        .with_status(200)
        .with_body(SEARCH_PAGE)
        .create_async()
        .await;
    // An exact on-page match must not fall through to the CDN probe
    let cdn = server
        .mock("GET", "/b/APK/com.whatsapp")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let found = resolver
        .search(&query("com.whatsapp"))
        .await
        .unwrap()
        .expect("exact match present");

    assert_eq!(found.title, "WhatsApp");
    assert_eq!(
        found.link,
        MatchLink::Page(format!("{}/whatsapp", server.url()))
    );
    search.assert_async().await;
    cdn.assert_async().await;
}

#[tokio::test]
async fn search_without_exact_match_falls_back_to_cdn_probe() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(SEARCH_PAGE)
        .create_async()
        .await;
    let cdn = server
        .mock("GET", "/b/APK/com.example.app")
        .match_query(Matcher::UrlEncoded("version".into(), "latest".into()))
        .with_status(302)
        .with_header("Location", &format!("{}/download/abc123", server.url()))
        .create_async()
        .await;
    let head = server
        .mock("HEAD", "/download/abc123")
        .with_status(200)
        .with_header(
            "Content-Disposition",
            "attachment; filename=\"MyApp_1.2.3.apk\"",
        )
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let found = resolver
        .search(&query("com.example.app"))
        .await
        .unwrap()
        .expect("CDN fallback resolves");

    assert_eq!(found.title, "MyApp");
    assert_eq!(
        found.link,
        MatchLink::Page(format!("{}/download/abc123", server.url()))
    );
    cdn.assert_async().await;
    head.assert_async().await;
}

#[tokio::test]
async fn cdn_redirect_to_bare_domain_sentinel_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html><body></body></html>")
        .create_async()
        .await;
    server
        .mock("GET", "/b/APK/com.gone.app")
        .match_query(Matcher::Any)
        .with_status(302)
        .with_header("Location", "https://apkpure.com")
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let result = resolver.search(&query("com.gone.app")).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn cdn_response_without_location_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html><body></body></html>")
        .create_async()
        .await;
    server
        .mock("GET", "/b/APK/com.gone.app")
        .match_query(Matcher::Any)
        .with_status(200)
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let result = resolver.search(&query("com.gone.app")).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn cdn_target_without_content_disposition_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html><body></body></html>")
        .create_async()
        .await;
    server
        .mock("GET", "/b/APK/com.example.app")
        .match_query(Matcher::Any)
        .with_status(302)
        .with_header("Location", &format!("{}/download/abc123", server.url()))
        .create_async()
        .await;
    server
        .mock("HEAD", "/download/abc123")
        .with_status(200)
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let result = resolver.search(&query("com.example.app")).await.unwrap();
    assert!(result.is_none());
}

#[test]
fn title_derivation_from_content_disposition() {
    assert_eq!(
        title_from_disposition("attachment; filename=\"MyApp_1.2.3.apk\""),
        Some("MyApp".to_string())
    );
    // No underscore: the whole filename is the title
    assert_eq!(
        title_from_disposition("attachment; filename=\"MyApp.apk\""),
        Some("MyApp.apk".to_string())
    );
    assert_eq!(title_from_disposition("attachment"), None);
}

const VERSIONS_PAGE: &str = r#"
<html><body>
<ul class="version-list">
  <li class="version dt-version-item">
    <a class="dt-version-icon" href="/whatsapp/download/2.2.0"></a>
    <div class="version-info"><span class="name one-line">2.2.0</span></div>
  </li>
  <li class="version dt-version-item">
    <div class="version-info"><span class="name one-line">2.1.5-broken</span></div>
  </li>
  <li class="version dt-version-item">
    <a class="dt-version-icon" href="/whatsapp/download/2.1.0"></a>
    <div class="version-info"><span class="name one-line">2.1.0</span></div>
  </li>
</ul>
</body></html>
"#;

#[tokio::test]
async fn find_versions_preserves_listing_order_and_skips_malformed_items() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/whatsapp/versions")
        .with_status(200)
        .with_body(VERSIONS_PAGE)
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let versions = resolver
        .find_versions(&format!("{}/whatsapp", server.url()))
        .await
        .unwrap();

    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0].label, "2.2.0");
    assert_eq!(
        versions[0].download_url,
        format!("{}/whatsapp/download/2.2.0", server.url())
    );
    assert_eq!(versions[1].label, "2.1.0");
}

#[tokio::test]
async fn find_versions_with_absent_container_is_empty_not_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/whatsapp/versions")
        .with_status(200)
        .with_body("<html><body><p>nothing here</p></body></html>")
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let versions = resolver
        .find_versions(&format!("{}/whatsapp", server.url()))
        .await
        .unwrap();
    assert!(versions.is_empty());
}

#[tokio::test]
async fn find_versions_ignores_links_outside_the_site_domain() {
    let server = Server::new_async().await;
    let resolver = resolver_for(&server);

    // A CDN-fallback link is not eligible for version listing
    let versions = resolver
        .find_versions("https://files.elsewhere.example/download/abc")
        .await
        .unwrap();
    assert!(versions.is_empty());
}
