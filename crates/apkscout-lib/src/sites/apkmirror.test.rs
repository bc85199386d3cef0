use super::*;
use mockito::{Matcher, Server};

const SEARCH_PAGE: &str = r#"
<div class="listWidget">
  <div class="appRow" data-package="org.telegram.plus">
    <h5 class="appRowTitle"><a href="/apk/plus/">Plus Messenger</a></h5>
  </div>
  <div class="appRow" data-package="org.telegram.messenger">
    <h5 class="appRowTitle"><a href="/apk/telegram/">Telegram</a></h5>
  </div>
</div>
"#;

#[tokio::test]
async fn search_scans_rows_for_the_exact_package() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded(
            "s".into(),
            "org.telegram.messenger".into(),
        ))
        .with_status(200)
        .with_body(SEARCH_PAGE)
        .create_async()
        .await;

    let resolver =
        ApkMirror::with_base_url(&NetworkingConfig::default(), server.url()).unwrap();
    let found = resolver
        .search(&SearchQuery::new("org.telegram.messenger", None))
        .await
        .unwrap()
        .expect("exact package row present");

    assert_eq!(found.title, "Telegram");
    assert_eq!(
        found.link,
        MatchLink::Page(format!("{}/apk/telegram/", server.url()))
    );
}

#[tokio::test]
async fn search_without_result_container_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html><body><p>No results</p></body></html>")
        .create_async()
        .await;

    let resolver =
        ApkMirror::with_base_url(&NetworkingConfig::default(), server.url()).unwrap();
    let result = resolver
        .search(&SearchQuery::new("com.missing.app", None))
        .await
        .unwrap();
    assert!(result.is_none());
}
