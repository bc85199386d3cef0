//! End-to-end resolution through the orchestrator against a mock APKPure

use std::sync::Arc;

use apkscout_lib::sites::apkpure::ApkPure;
use apkscout_lib::{
    MatchLink, NetworkingConfig, SearchOrchestrator, SearchQuery, SiteOutcome, SiteResolver,
};
use apkscout_tests::fixtures;
use mockito::{Matcher, Server};

fn orchestrator(server: &Server) -> anyhow::Result<SearchOrchestrator> {
    let resolver = ApkPure::with_base_urls(
        &NetworkingConfig::default(),
        server.url(),
        format!("{}/cdn", server.url()),
    )?;
    Ok(SearchOrchestrator::new(
        vec![Arc::new(resolver) as Arc<dyn SiteResolver>],
        1,
    ))
}

#[tokio::test]
async fn primary_search_match_resolves_to_the_detail_page() -> anyhow::Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("q".into(), "com.whatsapp".into()))
        .with_status(200)
        .with_body(fixtures::APKPURE_SEARCH_WHATSAPP)
        .create_async()
        .await;

    let reports = orchestrator(&server)?
        .resolve(&SearchQuery::new("com.whatsapp", None))
        .await?;

    assert_eq!(
        reports[0].outcome,
        SiteOutcome::Found {
            title: "WhatsApp".to_string(),
            link: MatchLink::Page(format!("{}/whatsapp/com.whatsapp", server.url())),
        }
    );
    Ok(())
}

#[tokio::test]
async fn cdn_fallback_recovers_a_title_from_the_disposition_header() -> anyhow::Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(fixtures::APKPURE_SEARCH_NO_MATCH)
        .create_async()
        .await;
    server
        .mock("GET", "/cdn/com.example.myapp")
        .match_query(Matcher::UrlEncoded("version".into(), "latest".into()))
        .with_status(302)
        .with_header("location", &format!("{}/download/MyApp_1.2.3.apk", server.url()))
        .create_async()
        .await;
    server
        .mock("HEAD", "/download/MyApp_1.2.3.apk")
        .with_status(200)
        .with_header(
            "content-disposition",
            "attachment; filename=\"MyApp_1.2.3.apk\"",
        )
        .create_async()
        .await;

    let reports = orchestrator(&server)?
        .resolve(&SearchQuery::new("com.example.myapp", None))
        .await?;

    assert_eq!(
        reports[0].outcome,
        SiteOutcome::Found {
            title: "MyApp".to_string(),
            link: MatchLink::Page(format!("{}/download/MyApp_1.2.3.apk", server.url())),
        }
    );
    Ok(())
}

#[tokio::test]
async fn cdn_redirect_to_the_bare_domain_is_not_found() -> anyhow::Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(fixtures::APKPURE_SEARCH_NO_MATCH)
        .create_async()
        .await;
    server
        .mock("GET", "/cdn/com.example.unknown")
        .match_query(Matcher::UrlEncoded("version".into(), "latest".into()))
        .with_status(302)
        .with_header("location", "https://apkpure.com")
        .create_async()
        .await;

    let reports = orchestrator(&server)?
        .resolve(&SearchQuery::new("com.example.unknown", None))
        .await?;

    assert_eq!(reports[0].outcome, SiteOutcome::NotFound);
    Ok(())
}

#[tokio::test]
async fn requested_version_is_resolved_through_the_history_listing() -> anyhow::Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(fixtures::APKPURE_SEARCH_WHATSAPP)
        .create_async()
        .await;
    server
        .mock("GET", "/whatsapp/com.whatsapp/versions")
        .with_status(200)
        .with_body(fixtures::APKPURE_VERSIONS)
        .expect(2)
        .create_async()
        .await;

    let orchestrator = orchestrator(&server)?;

    let reports = orchestrator
        .resolve(&SearchQuery::new("com.whatsapp", Some("2.1.0".to_string())))
        .await?;
    assert_eq!(
        reports[0].outcome,
        SiteOutcome::FoundVersion {
            title: "WhatsApp".to_string(),
            label: "2.1.0".to_string(),
            link: format!("{}/whatsapp/com.whatsapp/download/2.1.0", server.url()),
        }
    );

    let reports = orchestrator
        .resolve(&SearchQuery::new("com.whatsapp", Some("9.9.9".to_string())))
        .await?;
    assert_eq!(
        reports[0].outcome,
        SiteOutcome::VersionNotFound {
            title: "WhatsApp".to_string(),
            listed: 2,
        }
    );
    Ok(())
}
