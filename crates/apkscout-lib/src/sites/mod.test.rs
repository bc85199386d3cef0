use super::*;

#[test]
fn site_order_is_the_reporting_order() {
    let all = Site::all();
    assert_eq!(all[0], Site::ApkPure);
    assert_eq!(all[5], Site::Apkad);
    assert_eq!(all.len(), 6);
}

#[test]
fn site_display_uses_public_branding() {
    assert_eq!(Site::ApkPure.to_string(), "APKPure");
    assert_eq!(Site::ApkMirror.to_string(), "APKMirror");
    assert_eq!(Site::AppTeka.to_string(), "AppTeka");
    assert_eq!(Site::ApkCombo.to_string(), "APKCombo");
    assert_eq!(Site::ApkFab.to_string(), "APKFab");
    assert_eq!(Site::Apkad.to_string(), "APKAD");
}

#[test]
fn page_url_is_none_for_artifact_matches() {
    let page = MatchLink::Page("https://example.com/app".to_string());
    assert_eq!(page.page_url(), Some("https://example.com/app"));

    let artifacts = MatchLink::Artifacts(vec![Artifact {
        filename: "app_arm64.apk".to_string(),
        url: "https://example.com/app_arm64.apk".to_string(),
    }]);
    assert_eq!(artifacts.page_url(), None);
}

#[test]
fn query_encoding_leaves_package_identifiers_untouched() {
    assert_eq!(encode_query("com.whatsapp"), "com.whatsapp");
    assert_eq!(encode_query("a b&c"), "a%20b%26c");
}

#[test]
fn registry_builds_one_resolver_per_requested_site() {
    let config = NetworkingConfig::default();
    let resolvers = registry(&config, &Site::all()).unwrap();
    let sites: Vec<Site> = resolvers.iter().map(|r| r.site()).collect();
    assert_eq!(sites, Site::all());
}

#[tokio::test]
async fn find_versions_defaults_to_an_empty_listing() {
    struct PageOnly;
    impl SiteResolver for PageOnly {
        fn site(&self) -> Site {
            Site::ApkMirror
        }

        fn search<'a>(
            &'a self,
            _query: &'a SearchQuery,
        ) -> SiteFuture<'a, Result<Option<AppMatch>, SiteError>> {
            Box::pin(async { Ok(None) })
        }
    }

    let versions = PageOnly.find_versions("https://example.com/app").await.unwrap();
    assert!(versions.is_empty());
}
