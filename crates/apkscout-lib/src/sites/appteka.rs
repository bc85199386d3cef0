//! AppTeka site resolver
//!
//! Single-path search against the store listing endpoint.

use scraper::{Html, Selector};
use tracing::trace;

use super::{AppMatch, MatchLink, SearchQuery, Site, SiteError, SiteFuture, SiteResolver,
            browser_headers, encode_query};
use crate::networking::{NetworkingConfig, NetworkingError, SiteSession};

pub struct AppTeka {
    session: SiteSession,
    base_url: String,
}

impl AppTeka {
    pub fn new(config: &NetworkingConfig) -> Result<Self, NetworkingError> {
        Self::with_base_url(config, "https://appteka.store".to_string())
    }

    /// Create resolver with a custom endpoint (for testing)
    pub fn with_base_url(
        config: &NetworkingConfig,
        base_url: String,
    ) -> Result<Self, NetworkingError> {
        Ok(Self {
            session: SiteSession::new(config, browser_headers("https://appteka.store/"))?,
            base_url,
        })
    }

    async fn search_apk(&self, query: &SearchQuery) -> Result<Option<AppMatch>, SiteError> {
        let url = format!("{}/list/?query={}", self.base_url, encode_query(&query.package));
        trace!("AppTeka search URL: {}", url);

        let body = self.session.client().get(&url).send().await?.text().await?;
        Ok(self.scan_results(&body, &query.package))
    }

    fn scan_results(&self, body: &str, package: &str) -> Option<AppMatch> {
        let document = Html::parse_document(body);
        let list_selector = Selector::parse("ul.app-list").unwrap();
        let item_selector = Selector::parse("a.app-item[data-package]").unwrap();

        let list = document.select(&list_selector).next()?;
        for item in list.select(&item_selector) {
            let value = item.value();
            if value.attr("data-package") != Some(package) {
                continue;
            }
            let (Some(href), Some(title)) = (value.attr("href"), value.attr("title")) else {
                continue;
            };
            return Some(AppMatch {
                title: title.to_string(),
                link: MatchLink::Page(format!("{}{}", self.base_url, href)),
            });
        }
        None
    }
}

impl SiteResolver for AppTeka {
    fn site(&self) -> Site {
        Site::AppTeka
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
    include!("appteka.test.rs");
}
