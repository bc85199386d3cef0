//! End-to-end resolution through the orchestrator against a mock APKAD

use std::sync::Arc;

use apkscout_lib::sites::apkad::Apkad;
use apkscout_lib::{
    MatchLink, NetworkingConfig, SearchOrchestrator, SearchQuery, SiteOutcome, SiteResolver,
};
use apkscout_tests::fixtures;
use mockito::{Matcher, Server};

fn orchestrator(server: &Server) -> anyhow::Result<SearchOrchestrator> {
    let resolver = Apkad::with_base_urls(
        &NetworkingConfig::default(),
        format!("{}/token", server.url()),
        format!("{}/get", server.url()),
    )?;
    Ok(SearchOrchestrator::new(
        vec![Arc::new(resolver) as Arc<dyn SiteResolver>],
        1,
    ))
}

#[tokio::test]
async fn streamed_search_yields_one_artifact_per_variant() -> anyhow::Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/token")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "package": "com.example.myapp",
        })))
        .with_status(200)
        .with_body(fixtures::token_body(true, "tok-1", 1735000000))
        .create_async()
        .await;

    // Heartbeats, a malformed line, and partial progress before the
    // terminal event; everything up to it must be skipped, not fatal.
    let stream = [
        fixtures::stream_line(10, ""),
        "data: {not json}\n".to_string(),
        fixtures::stream_line(60, ""),
        fixtures::stream_line(100, fixtures::APKAD_RESULT_FRAGMENT),
    ]
    .concat();
    server
        .mock("GET", "/get")
        .match_query(Matcher::UrlEncoded("token".into(), "tok-1".into()))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(stream)
        .create_async()
        .await;

    let reports = orchestrator(&server)?
        .resolve(&SearchQuery::new("com.example.myapp", None))
        .await?;

    assert_eq!(reports.len(), 1);
    let SiteOutcome::Found { title, link } = &reports[0].outcome else {
        panic!("expected a match, got {:?}", reports[0].outcome);
    };
    assert_eq!(title, "MyApp");
    let MatchLink::Artifacts(artifacts) = link else {
        panic!("expected per-variant artifacts");
    };
    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[0].filename, "myapp_arm64.apk");
    assert_eq!(artifacts[0].url, "https://cdn.example.com/myapp_arm64.apk");
    Ok(())
}

#[tokio::test]
async fn rejected_token_skips_the_search_request_entirely() -> anyhow::Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/token")
        .with_status(200)
        .with_body(fixtures::token_body(false, "", 0))
        .create_async()
        .await;
    let search = server
        .mock("GET", "/get")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let reports = orchestrator(&server)?
        .resolve(&SearchQuery::new("com.example.myapp", None))
        .await?;

    assert_eq!(reports[0].outcome, SiteOutcome::NotFound);
    search.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn rejected_authorization_is_reported_as_unreachable() -> anyhow::Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/token")
        .with_status(403)
        .create_async()
        .await;

    let reports = orchestrator(&server)?
        .resolve(&SearchQuery::new("com.example.myapp", None))
        .await?;

    assert!(matches!(
        reports[0].outcome,
        SiteOutcome::Unreachable { .. }
    ));
    Ok(())
}
