//! One site failing at the transport layer must not stop the rest

use std::sync::Arc;

use apkscout_lib::sites::apkmirror::ApkMirror;
use apkscout_lib::sites::apkpure::ApkPure;
use apkscout_lib::{
    NetworkingConfig, SearchOrchestrator, SearchQuery, Site, SiteOutcome, SiteResolver,
};
use mockito::{Matcher, Server};

const SEARCH_PAGE: &str = r#"
<div class="listWidget">
  <div class="appRow" data-package="com.example.myapp">
    <h5 class="appRowTitle"><a href="/apk/myapp/">MyApp</a></h5>
  </div>
</div>
"#;

#[tokio::test]
async fn unreachable_site_reports_without_stopping_the_rest() -> anyhow::Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(SEARCH_PAGE)
        .create_async()
        .await;

    let config = NetworkingConfig {
        timeout_seconds: 2,
        trace_requests: false,
    };
    // Port 9 is the discard service; nothing listens there in CI, so the
    // connection is refused immediately.
    let dead = ApkPure::with_base_urls(
        &config,
        "http://127.0.0.1:9".to_string(),
        "http://127.0.0.1:9/cdn".to_string(),
    )?;
    let live = ApkMirror::with_base_url(&config, server.url())?;

    let orchestrator = SearchOrchestrator::new(
        vec![
            Arc::new(dead) as Arc<dyn SiteResolver>,
            Arc::new(live) as Arc<dyn SiteResolver>,
        ],
        2,
    );

    let reports = orchestrator
        .resolve(&SearchQuery::new("com.example.myapp", None))
        .await?;

    assert_eq!(reports[0].site, Site::ApkPure);
    assert!(matches!(
        reports[0].outcome,
        SiteOutcome::Unreachable { .. }
    ));
    assert_eq!(reports[1].site, Site::ApkMirror);
    assert!(reports[1].outcome.is_hit());
    Ok(())
}
