use super::*;
use mockito::{Matcher, Server};

const SEARCH_PAGE: &str = r#"
<div class="search-list">
  <div class="list" data-package="org.mozilla.focus">
    <a class="title" href="https://apkfab.com/firefox-focus/org.mozilla.focus">Firefox Focus</a>
  </div>
  <div class="list" data-package="org.mozilla.firefox">
    <a class="title" href="https://apkfab.com/firefox/org.mozilla.firefox">Firefox Browser</a>
  </div>
</div>
"#;

#[tokio::test]
async fn search_scans_entries_for_the_exact_package() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded(
            "q".into(),
            "org.mozilla.firefox".into(),
        ))
        .with_status(200)
        .with_body(SEARCH_PAGE)
        .create_async()
        .await;

    let resolver = ApkFab::with_base_url(&NetworkingConfig::default(), server.url()).unwrap();
    let found = resolver
        .search(&SearchQuery::new("org.mozilla.firefox", None))
        .await
        .unwrap()
        .expect("exact package entry present");

    assert_eq!(found.title, "Firefox Browser");
    assert_eq!(
        found.link,
        MatchLink::Page("https://apkfab.com/firefox/org.mozilla.firefox".to_string())
    );
}

#[tokio::test]
async fn search_without_result_container_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html><body>no matches</body></html>")
        .create_async()
        .await;

    let resolver = ApkFab::with_base_url(&NetworkingConfig::default(), server.url()).unwrap();
    let result = resolver
        .search(&SearchQuery::new("com.missing.app", None))
        .await
        .unwrap();
    assert!(result.is_none());
}
