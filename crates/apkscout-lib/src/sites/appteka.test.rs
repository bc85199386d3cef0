use super::*;
use mockito::{Matcher, Server};

#[tokio::test]
async fn search_matches_on_the_package_attribute() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/list/")
        .match_query(Matcher::UrlEncoded("query".into(), "com.spotify.music".into()))
        .with_status(200)
        .with_body(
            r#"<ul class="app-list">
              <a class="app-item" data-package="com.spotify.lite" title="Spotify Lite"
                 href="/app/spotify-lite"></a>
              <a class="app-item" data-package="com.spotify.music" title="Spotify"
                 href="/app/spotify"></a>
            </ul>"#,
        )
        .create_async()
        .await;

    let resolver = AppTeka::with_base_url(&NetworkingConfig::default(), server.url()).unwrap();
    let found = resolver
        .search(&SearchQuery::new("com.spotify.music", None))
        .await
        .unwrap()
        .expect("exact package present");

    assert_eq!(found.title, "Spotify");
    assert_eq!(
        found.link,
        MatchLink::Page(format!("{}/app/spotify", server.url()))
    );
}

#[tokio::test]
async fn search_with_only_inexact_candidates_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/list/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"<ul class="app-list">
              <a class="app-item" data-package="com.spotify.lite" title="Spotify Lite"
                 href="/app/spotify-lite"></a>
            </ul>"#,
        )
        .create_async()
        .await;

    let resolver = AppTeka::with_base_url(&NetworkingConfig::default(), server.url()).unwrap();
    let result = resolver
        .search(&SearchQuery::new("com.spotify.music", None))
        .await
        .unwrap();
    assert!(result.is_none());
}
