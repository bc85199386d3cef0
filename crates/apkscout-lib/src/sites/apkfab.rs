//! APKFab site resolver

use scraper::{Html, Selector};
use tracing::trace;

use super::{AppMatch, MatchLink, SearchQuery, Site, SiteError, SiteFuture, SiteResolver,
            browser_headers, encode_query};
use crate::networking::{NetworkingConfig, NetworkingError, SiteSession};

pub struct ApkFab {
    session: SiteSession,
    base_url: String,
}

impl ApkFab {
    pub fn new(config: &NetworkingConfig) -> Result<Self, NetworkingError> {
        Self::with_base_url(config, "https://apkfab.com".to_string())
    }

    /// Create resolver with a custom endpoint (for testing)
    pub fn with_base_url(
        config: &NetworkingConfig,
        base_url: String,
    ) -> Result<Self, NetworkingError> {
        Ok(Self {
            session: SiteSession::new(config, browser_headers("https://apkfab.com/"))?,
            base_url,
        })
    }

    async fn search_apk(&self, query: &SearchQuery) -> Result<Option<AppMatch>, SiteError> {
        let url = format!("{}/search?q={}", self.base_url, encode_query(&query.package));
        trace!("APKFab search URL: {}", url);

        let body = self.session.client().get(&url).send().await?.text().await?;
        Ok(self.scan_results(&body, &query.package))
    }

    fn scan_results(&self, body: &str, package: &str) -> Option<AppMatch> {
        let document = Html::parse_document(body);
        let list_selector = Selector::parse("div.search-list").unwrap();
        let item_selector = Selector::parse("div.list[data-package]").unwrap();
        let anchor_selector = Selector::parse("a.title[href]").unwrap();

        let list = document.select(&list_selector).next()?;
        for item in list.select(&item_selector) {
            if item.value().attr("data-package") != Some(package) {
                continue;
            }
            let Some(anchor) = item.select(&anchor_selector).next() else {
                continue;
            };
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let title = anchor.text().collect::<String>().trim().to_string();
            return Some(AppMatch {
                title,
                link: MatchLink::Page(href.to_string()),
            });
        }
        None
    }
}

impl SiteResolver for ApkFab {
    fn site(&self) -> Site {
        Site::ApkFab
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
    include!("apkfab.test.rs");
}
