//! APKPure site resolver
//!
//! Two independent search paths: the on-page search (scanned for an exact
//! package-identifier match, since the site ranks imperfect matches
//! higher), and a CDN redirect probe used when the on-page search comes up
//! empty. The CDN path is a documented workaround for the site's search
//! gaps and must stay a separate second attempt, not be merged into the
//! first.

use reqwest::header::{CONTENT_DISPOSITION, LOCATION};
use scraper::{Html, Selector};
use tracing::{debug, trace};

use super::{AppMatch, MatchLink, SearchQuery, Site, SiteError, SiteFuture, SiteResolver,
            VersionEntry, browser_headers, encode_query};
use crate::networking::{NetworkingConfig, NetworkingError, SiteSession};

/// Redirecting here means the CDN does not know the package identifier
const BARE_DOMAIN_SENTINEL: &str = "https://apkpure.com";

pub struct ApkPure {
    session: SiteSession,
    base_url: String,
    cdn_url: String,
}

impl ApkPure {
    pub fn new(config: &NetworkingConfig) -> Result<Self, NetworkingError> {
        Self::with_base_urls(
            config,
            "https://apkpure.net".to_string(),
            "https://d.cdnpure.com/b/APK".to_string(),
        )
    }

    /// Create resolver with custom endpoints (for testing)
    pub fn with_base_urls(
        config: &NetworkingConfig,
        base_url: String,
        cdn_url: String,
    ) -> Result<Self, NetworkingError> {
        Ok(Self {
            session: SiteSession::new(config, browser_headers("https://apkpure.net/"))?,
            base_url,
            cdn_url,
        })
    }

    async fn search_apk(&self, query: &SearchQuery) -> Result<Option<AppMatch>, SiteError> {
        let url = format!("{}/search?q={}", self.base_url, encode_query(&query.package));
        trace!("APKPure search URL: {}", url);

        let body = self.session.client().get(&url).send().await?.text().await?;
        if let Some(found) = self.scan_results(&body, &query.package) {
            return Ok(Some(found));
        }

        // On-page search found no exact match; try the CDN redirect probe.
        debug!("APKPure search had no exact match for {}, trying CDN", query.package);
        self.cdn_fallback(&query.package).await
    }

    /// Scan the results container in document order for an exact
    /// package-identifier match; the first-ranked result is not trusted.
    fn scan_results(&self, body: &str, package: &str) -> Option<AppMatch> {
        let document = Html::parse_document(body);
        let list_selector = Selector::parse("div.apk-list").unwrap();
        let item_selector = Selector::parse("a.apk-item").unwrap();

        let list = document.select(&list_selector).next()?;
        for item in list.select(&item_selector) {
            let value = item.value();
            let (Some(href), Some(title), Some(pkg)) = (
                value.attr("href"),
                value.attr("title"),
                value.attr("data-dt-pkg"),
            ) else {
                continue;
            };
            if pkg == package {
                return Some(AppMatch {
                    title: title.to_string(),
                    link: MatchLink::Page(format!("{}{}", self.base_url, href)),
                });
            }
        }
        None
    }

    /// Probe the CDN with the literal version token "latest" and recover a
    /// title from the redirect target's Content-Disposition filename
    async fn cdn_fallback(&self, package: &str) -> Result<Option<AppMatch>, SiteError> {
        let url = format!("{}/{}?version=latest", self.cdn_url, package);
        let response = self.session.frozen().get(&url).send().await?;

        let Some(location) = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
        else {
            return Ok(None);
        };
        if location == BARE_DOMAIN_SENTINEL {
            // Identifier unknown to the CDN
            return Ok(None);
        }

        let head = self.session.frozen().head(&location).send().await?;
        let Some(disposition) = head
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
        else {
            return Ok(None);
        };
        let Some(title) = title_from_disposition(disposition) else {
            return Ok(None);
        };

        Ok(Some(AppMatch {
            title,
            link: MatchLink::Page(location),
        }))
    }

    async fn versions_for(&self, app_link: &str) -> Result<Vec<VersionEntry>, SiteError> {
        // Version listing requires the canonical detail-page URL; links
        // obtained via the CDN fallback are not eligible.
        if !app_link.starts_with(&self.base_url) {
            return Ok(Vec::new());
        }

        let url = format!("{}/versions", app_link);
        let body = self.session.client().get(&url).send().await?.text().await?;

        let document = Html::parse_document(&body);
        let list_selector = Selector::parse("ul.version-list").unwrap();
        let item_selector = Selector::parse("li.version.dt-version-item").unwrap();
        let icon_selector = Selector::parse("a.dt-version-icon").unwrap();
        let info_selector = Selector::parse("div.version-info").unwrap();
        let name_selector = Selector::parse("span.name.one-line").unwrap();

        let mut versions = Vec::new();
        let Some(list) = document.select(&list_selector).next() else {
            return Ok(versions);
        };
        for item in list.select(&item_selector) {
            // Items missing the icon or info element are malformed, not fatal
            let Some(icon) = item.select(&icon_selector).next() else {
                continue;
            };
            let Some(info) = item.select(&info_selector).next() else {
                continue;
            };
            let (Some(href), Some(name)) =
                (icon.value().attr("href"), info.select(&name_selector).next())
            else {
                continue;
            };
            versions.push(VersionEntry {
                label: name.text().collect::<String>().trim().to_string(),
                download_url: format!("{}{}", self.base_url, href),
            });
        }
        Ok(versions)
    }
}

/// Derive a display title from a Content-Disposition header: the filename
/// segment before the first underscore, or the whole filename when it has
/// no underscore
fn title_from_disposition(disposition: &str) -> Option<String> {
    let filename = disposition.split_once("filename=")?.1.trim_matches('"');
    let title = filename.split('_').next().unwrap_or(filename);
    if title.is_empty() {
        return None;
    }
    Some(title.to_string())
}

impl SiteResolver for ApkPure {
    fn site(&self) -> Site {
        Site::ApkPure
    }

    fn search<'a>(
        &'a self,
        query: &'a SearchQuery,
    ) -> SiteFuture<'a, Result<Option<AppMatch>, SiteError>> {
        Box::pin(self.search_apk(query))
    }

    fn find_versions<'a>(
        &'a self,
        app_link: &'a str,
    ) -> SiteFuture<'a, Result<Vec<VersionEntry>, SiteError>> {
        Box::pin(self.versions_for(app_link))
    }
}

#[cfg(test)]
mod tests {
    include!("apkpure.test.rs");
}
