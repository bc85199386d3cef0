use super::*;
use crate::sites::{AppMatch, Artifact, SiteFuture, VersionEntry};

/// Scripted resolver: fixed search result plus a fixed version listing
struct Scripted {
    site: Site,
    search: Option<AppMatch>,
    versions: Vec<VersionEntry>,
}

impl Scripted {
    fn found(site: Site, title: &str, url: &str) -> Self {
        Self {
            site,
            search: Some(AppMatch {
                title: title.to_string(),
                link: MatchLink::Page(url.to_string()),
            }),
            versions: Vec::new(),
        }
    }

    fn missing(site: Site) -> Self {
        Self {
            site,
            search: None,
            versions: Vec::new(),
        }
    }

    fn with_versions(mut self, versions: Vec<(&str, &str)>) -> Self {
        self.versions = versions
            .into_iter()
            .map(|(label, url)| VersionEntry {
                label: label.to_string(),
                download_url: url.to_string(),
            })
            .collect();
        self
    }
}

impl SiteResolver for Scripted {
    fn site(&self) -> Site {
        self.site
    }

    fn search<'a>(
        &'a self,
        _query: &'a SearchQuery,
    ) -> SiteFuture<'a, Result<Option<AppMatch>, SiteError>> {
        let found = self.search.clone();
        Box::pin(async move { Ok(found) })
    }

    fn find_versions<'a>(
        &'a self,
        _app_link: &'a str,
    ) -> SiteFuture<'a, Result<Vec<VersionEntry>, SiteError>> {
        let versions = self.versions.clone();
        Box::pin(async move { Ok(versions) })
    }
}

fn orchestrator(resolvers: Vec<Arc<dyn SiteResolver>>) -> SearchOrchestrator {
    SearchOrchestrator::new(resolvers, 2)
}

#[tokio::test]
async fn reports_follow_registry_order() {
    let orchestrator = orchestrator(vec![
        Arc::new(Scripted::missing(Site::ApkPure)),
        Arc::new(Scripted::found(
            Site::ApkMirror,
            "Telegram",
            "https://example.com/telegram",
        )),
        Arc::new(Scripted::missing(Site::AppTeka)),
    ]);

    let reports = orchestrator
        .resolve(&SearchQuery::new("org.telegram.messenger", None))
        .await
        .unwrap();

    let sites: Vec<Site> = reports.iter().map(|r| r.site).collect();
    assert_eq!(sites, vec![Site::ApkPure, Site::ApkMirror, Site::AppTeka]);
    assert_eq!(reports[0].outcome, SiteOutcome::NotFound);
    assert_eq!(
        reports[1].outcome,
        SiteOutcome::Found {
            title: "Telegram".to_string(),
            link: MatchLink::Page("https://example.com/telegram".to_string()),
        }
    );
}

#[tokio::test]
async fn version_filter_takes_the_first_matching_label_in_listed_order() {
    let orchestrator = orchestrator(vec![Arc::new(
        Scripted::found(Site::ApkPure, "MyApp", "https://example.com/myapp").with_versions(vec![
            ("2.2.0", "https://example.com/myapp/2.2.0"),
            ("2.1.0", "https://example.com/myapp/2.1.0-first"),
            ("2.1.0", "https://example.com/myapp/2.1.0-second"),
        ]),
    )]);

    let reports = orchestrator
        .resolve(&SearchQuery::new("com.example.myapp", Some("2.1.0".to_string())))
        .await
        .unwrap();

    assert_eq!(
        reports[0].outcome,
        SiteOutcome::FoundVersion {
            title: "MyApp".to_string(),
            label: "2.1.0".to_string(),
            link: "https://example.com/myapp/2.1.0-first".to_string(),
        }
    );
}

#[tokio::test]
async fn absent_label_is_distinct_from_an_empty_history() {
    let with_history = orchestrator(vec![Arc::new(
        Scripted::found(Site::ApkPure, "MyApp", "https://example.com/myapp")
            .with_versions(vec![("2.1.0", "https://example.com/myapp/2.1.0")]),
    )]);
    let reports = with_history
        .resolve(&SearchQuery::new("com.example.myapp", Some("9.9.9".to_string())))
        .await
        .unwrap();
    assert_eq!(
        reports[0].outcome,
        SiteOutcome::VersionNotFound {
            title: "MyApp".to_string(),
            listed: 1,
        }
    );

    let no_history = orchestrator(vec![Arc::new(Scripted::found(
        Site::ApkMirror,
        "MyApp",
        "https://example.com/myapp",
    ))]);
    let reports = no_history
        .resolve(&SearchQuery::new("com.example.myapp", Some("9.9.9".to_string())))
        .await
        .unwrap();
    assert_eq!(
        reports[0].outcome,
        SiteOutcome::VersionNotFound {
            title: "MyApp".to_string(),
            listed: 0,
        }
    );
}

#[tokio::test]
async fn artifact_matches_skip_the_version_flow() {
    struct ArtifactsOnly;
    impl SiteResolver for ArtifactsOnly {
        fn site(&self) -> Site {
            Site::Apkad
        }

        fn search<'a>(
            &'a self,
            _query: &'a SearchQuery,
        ) -> SiteFuture<'a, Result<Option<AppMatch>, SiteError>> {
            Box::pin(async {
                Ok(Some(AppMatch {
                    title: "MyApp".to_string(),
                    link: MatchLink::Artifacts(vec![Artifact {
                        filename: "myapp_arm64.apk".to_string(),
                        url: "https://example.com/myapp_arm64.apk".to_string(),
                    }]),
                }))
            })
        }

        fn find_versions<'a>(
            &'a self,
            _app_link: &'a str,
        ) -> SiteFuture<'a, Result<Vec<VersionEntry>, SiteError>> {
            Box::pin(async { panic!("version flow must not run for artifact matches") })
        }
    }

    let orchestrator = orchestrator(vec![Arc::new(ArtifactsOnly)]);
    let reports = orchestrator
        .resolve(&SearchQuery::new("com.example.myapp", Some("1.0".to_string())))
        .await
        .unwrap();
    assert_eq!(
        reports[0].outcome,
        SiteOutcome::VersionNotFound {
            title: "MyApp".to_string(),
            listed: 0,
        }
    );
}

#[tokio::test]
async fn transport_failure_on_one_site_does_not_stop_the_others() {
    struct Unreachable;
    impl SiteResolver for Unreachable {
        fn site(&self) -> Site {
            Site::ApkFab
        }

        fn search<'a>(
            &'a self,
            _query: &'a SearchQuery,
        ) -> SiteFuture<'a, Result<Option<AppMatch>, SiteError>> {
            Box::pin(async {
                // Nothing listens on this port, so the request fails at
                // the transport layer with a real reqwest error.
                let error = reqwest::Client::new()
                    .get("http://127.0.0.1:9/")
                    .send()
                    .await
                    .unwrap_err();
                Err(SiteError::from(error))
            })
        }
    }

    let orchestrator = orchestrator(vec![
        Arc::new(Unreachable),
        Arc::new(Scripted::found(
            Site::ApkMirror,
            "MyApp",
            "https://example.com/myapp",
        )),
    ]);

    let reports = orchestrator
        .resolve(&SearchQuery::new("com.example.myapp", None))
        .await
        .unwrap();

    assert!(matches!(
        reports[0].outcome,
        SiteOutcome::Unreachable { .. }
    ));
    assert!(reports[1].outcome.is_hit());
}

#[test]
fn only_found_outcomes_count_as_hits() {
    assert!(SiteOutcome::Found {
        title: "X".to_string(),
        link: MatchLink::Page("https://example.com".to_string()),
    }
    .is_hit());
    assert!(!SiteOutcome::NotFound.is_hit());
    assert!(!SiteOutcome::VersionNotFound {
        title: "X".to_string(),
        listed: 3,
    }
    .is_hit());
    assert!(!SiteOutcome::Unreachable {
        reason: "timeout".to_string(),
    }
    .is_hit());
}
