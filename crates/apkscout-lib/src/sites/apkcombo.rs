//! APKCombo site resolver
//!
//! Search results embed the package name on each result card, with the
//! display title in a nested name element.

use scraper::{Html, Selector};
use tracing::trace;

use super::{AppMatch, MatchLink, SearchQuery, Site, SiteError, SiteFuture, SiteResolver,
            browser_headers};
use crate::networking::{NetworkingConfig, NetworkingError, SiteSession};

pub struct ApkCombo {
    session: SiteSession,
    base_url: String,
}

impl ApkCombo {
    pub fn new(config: &NetworkingConfig) -> Result<Self, NetworkingError> {
        Self::with_base_url(config, "https://apkcombo.app".to_string())
    }

    /// Create resolver with a custom endpoint (for testing)
    pub fn with_base_url(
        config: &NetworkingConfig,
        base_url: String,
    ) -> Result<Self, NetworkingError> {
        Ok(Self {
            session: SiteSession::new(config, browser_headers("https://apkcombo.app/"))?,
            base_url,
        })
    }

    async fn search_apk(&self, query: &SearchQuery) -> Result<Option<AppMatch>, SiteError> {
        let url = format!("{}/search/{}/", self.base_url, query.package);
        trace!("APKCombo search URL: {}", url);

        let body = self.session.client().get(&url).send().await?.text().await?;
        Ok(self.scan_results(&body, &query.package))
    }

    fn scan_results(&self, body: &str, package: &str) -> Option<AppMatch> {
        let document = Html::parse_document(body);
        let list_selector = Selector::parse("div.content-apps").unwrap();
        let item_selector = Selector::parse("a.l_item[data-package]").unwrap();
        let name_selector = Selector::parse("div.name").unwrap();

        let list = document.select(&list_selector).next()?;
        for item in list.select(&item_selector) {
            if item.value().attr("data-package") != Some(package) {
                continue;
            }
            let Some(href) = item.value().attr("href") else {
                continue;
            };
            let Some(name) = item.select(&name_selector).next() else {
                continue;
            };
            let title = name.text().collect::<String>().trim().to_string();
            return Some(AppMatch {
                title,
                link: MatchLink::Page(format!("{}{}", self.base_url, href)),
            });
        }
        None
    }
}

impl SiteResolver for ApkCombo {
    fn site(&self) -> Site {
        Site::ApkCombo
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
    include!("apkcombo.test.rs");
}
