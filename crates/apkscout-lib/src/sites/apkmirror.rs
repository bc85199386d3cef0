//! APKMirror site resolver
//!
//! Single-path search: one release-search request, scanned for an exact
//! package-identifier match. The site has no CDN fallback and no
//! machine-readable version history.

use scraper::{Html, Selector};
use tracing::trace;

use super::{AppMatch, MatchLink, SearchQuery, Site, SiteError, SiteFuture, SiteResolver,
            browser_headers, encode_query};
use crate::networking::{NetworkingConfig, NetworkingError, SiteSession};

pub struct ApkMirror {
    session: SiteSession,
    base_url: String,
}

impl ApkMirror {
    pub fn new(config: &NetworkingConfig) -> Result<Self, NetworkingError> {
        Self::with_base_url(config, "https://www.apkmirror.com".to_string())
    }

    /// Create resolver with a custom endpoint (for testing)
    pub fn with_base_url(
        config: &NetworkingConfig,
        base_url: String,
    ) -> Result<Self, NetworkingError> {
        Ok(Self {
            session: SiteSession::new(config, browser_headers("https://www.apkmirror.com/"))?,
            base_url,
        })
    }

    async fn search_apk(&self, query: &SearchQuery) -> Result<Option<AppMatch>, SiteError> {
        let url = format!(
            "{}/?post_type=app_release&searchtype=apk&s={}",
            self.base_url,
            encode_query(&query.package)
        );
        trace!("APKMirror search URL: {}", url);

        let body = self.session.client().get(&url).send().await?.text().await?;
        Ok(self.scan_results(&body, &query.package))
    }

    fn scan_results(&self, body: &str, package: &str) -> Option<AppMatch> {
        let document = Html::parse_document(body);
        let list_selector = Selector::parse("div.listWidget").unwrap();
        let row_selector = Selector::parse("div.appRow[data-package]").unwrap();
        let title_selector = Selector::parse("h5.appRowTitle a").unwrap();

        let list = document.select(&list_selector).next()?;
        for row in list.select(&row_selector) {
            if row.value().attr("data-package") != Some(package) {
                continue;
            }
            let Some(anchor) = row.select(&title_selector).next() else {
                continue;
            };
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let title = anchor.text().collect::<String>().trim().to_string();
            if title.is_empty() {
                continue;
            }
            return Some(AppMatch {
                title,
                link: MatchLink::Page(format!("{}{}", self.base_url, href)),
            });
        }
        None
    }
}

impl SiteResolver for ApkMirror {
    fn site(&self) -> Site {
        Site::ApkMirror
    }

    fn search<'a>(
        &'a self,
        query: &'a SearchQuery,
    ) -> SiteFuture<'a, Result<Option<AppMatch>, SiteError>> {
        Box::pin(self.search_apk(query))
    }
}

#[cfg(test)]
mod tests {
    include!("apkmirror.test.rs");
}
