//! Site resolvers for APK distribution sites
//!
//! One module per site, each encapsulating that site's search endpoints,
//! fallback rule, and response-shape parsing behind the uniform
//! [`SiteResolver`] trait. The orchestrator iterates the registry and
//! never branches on a specific site.
//!
//! ## Modules
//!
//! - [`apkpure`] - on-page search with a CDN redirect fallback, plus
//!   version-history listing
//! - [`apkad`] - token-gated `text/event-stream` search protocol
//! - [`apkmirror`], [`appteka`], [`apkcombo`], [`apkfab`] - single-path
//!   search resolvers

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use thiserror::Error;

use crate::networking::{NetworkingConfig, NetworkingError};

pub mod apkad;
pub mod apkcombo;
pub mod apkfab;
pub mod apkmirror;
pub mod apkpure;
pub mod appteka;

pub use apkad::Apkad;
pub use apkcombo::ApkCombo;
pub use apkfab::ApkFab;
pub use apkmirror::ApkMirror;
pub use apkpure::ApkPure;
pub use appteka::AppTeka;

/// Boxed future type used by the dyn-safe resolver trait
pub type SiteFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Distribution sites known to the resolver registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    ApkPure,
    ApkMirror,
    AppTeka,
    ApkCombo,
    ApkFab,
    Apkad,
}

impl Site {
    /// All sites in registry order (also the reporting order)
    pub fn all() -> [Site; 6] {
        [
            Site::ApkPure,
            Site::ApkMirror,
            Site::AppTeka,
            Site::ApkCombo,
            Site::ApkFab,
            Site::Apkad,
        ]
    }
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Site::ApkPure => write!(f, "APKPure"),
            Site::ApkMirror => write!(f, "APKMirror"),
            Site::AppTeka => write!(f, "AppTeka"),
            Site::ApkCombo => write!(f, "APKCombo"),
            Site::ApkFab => write!(f, "APKFab"),
            Site::Apkad => write!(f, "APKAD"),
        }
    }
}

/// One resolution attempt: package identifier plus optional target version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Reverse-domain package identifier, compared by exact equality
    pub package: String,
    /// Requested version label, free-form
    pub version: Option<String>,
}

impl SearchQuery {
    pub fn new(package: impl Into<String>, version: Option<String>) -> Self {
        Self {
            package: package.into(),
            version,
        }
    }
}

/// A single downloadable APK variant reported by a site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub url: String,
}

/// Where a match points: a detail/download page, or a set of artifacts
/// (APKAD returns one APK per architecture/variant rather than one link)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchLink {
    Page(String),
    Artifacts(Vec<Artifact>),
}

impl MatchLink {
    /// The page URL, when the match is a single link
    pub fn page_url(&self) -> Option<&str> {
        match self {
            MatchLink::Page(url) => Some(url.as_str()),
            MatchLink::Artifacts(_) => None,
        }
    }
}

/// Successful site search result; never partially populated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMatch {
    pub title: String,
    pub link: MatchLink,
}

/// One entry from a site's version-history listing, in site order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    pub label: String,
    pub download_url: String,
}

/// Terminal failures a resolver can report
///
/// Parse failures never appear here: sites change markup without notice,
/// so an unexpected response shape degrades to a no-result inside the
/// resolver.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("transport failure: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    #[error("{site} rejected the token request (HTTP {status})")]
    Auth { site: Site, status: u16 },
}

/// Uniform contract over one distribution site
///
/// `search` returns a populated match or `None`; it never lets a raw
/// transport error escape as a panic, only as [`SiteError`]. Calls within
/// one resolution are strictly sequential: each step's output is the next
/// step's input.
pub trait SiteResolver: Send + Sync {
    /// The site this resolver encapsulates
    fn site(&self) -> Site;

    /// Locate the package on the site
    fn search<'a>(
        &'a self,
        query: &'a SearchQuery,
    ) -> SiteFuture<'a, Result<Option<AppMatch>, SiteError>>;

    /// List historical versions for a previously located app link
    ///
    /// Sites without a version-history page report an empty sequence.
    fn find_versions<'a>(
        &'a self,
        _app_link: &'a str,
    ) -> SiteFuture<'a, Result<Vec<VersionEntry>, SiteError>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

/// Characters that must not appear raw in a query-string value
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'&')
    .add(b'+')
    .add(b'?');

/// Percent-encode a value for hand-built search URLs
pub(crate) fn encode_query(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Static desktop-browser headers the sites expect, parameterized by
/// referer; sites with extra requirements append to the returned map
pub(crate) fn browser_headers(referer: &'static str) -> reqwest::header::HeaderMap {
    use reqwest::header::{HeaderMap, HeaderValue};

    let mut headers = HeaderMap::new();
    headers.insert(
        "accept",
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,\
             image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
        ),
    );
    headers.insert(
        "accept-language",
        HeaderValue::from_static("en-US,en;q=0.9,en-IN;q=0.8"),
    );
    headers.insert("cache-control", HeaderValue::from_static("no-cache"));
    headers.insert("dnt", HeaderValue::from_static("1"));
    headers.insert("pragma", HeaderValue::from_static("no-cache"));
    headers.insert("priority", HeaderValue::from_static("u=0, i"));
    headers.insert("referer", HeaderValue::from_static(referer));
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static(
            "\"Microsoft Edge\";v=\"131\", \"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"",
        ),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"Windows\""));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-origin"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers.insert(
        "upgrade-insecure-requests",
        HeaderValue::from_static("1"),
    );
    headers.insert(
        "user-agent",
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
             Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0",
        ),
    );
    headers
}

/// Build resolver instances for the requested sites, in the given order
pub fn registry(
    config: &NetworkingConfig,
    sites: &[Site],
) -> Result<Vec<Arc<dyn SiteResolver>>, NetworkingError> {
    sites
        .iter()
        .map(|site| {
            Ok(match site {
                Site::ApkPure => Arc::new(ApkPure::new(config)?) as Arc<dyn SiteResolver>,
                Site::ApkMirror => Arc::new(ApkMirror::new(config)?) as Arc<dyn SiteResolver>,
                Site::AppTeka => Arc::new(AppTeka::new(config)?) as Arc<dyn SiteResolver>,
                Site::ApkCombo => Arc::new(ApkCombo::new(config)?) as Arc<dyn SiteResolver>,
                Site::ApkFab => Arc::new(ApkFab::new(config)?) as Arc<dyn SiteResolver>,
                Site::Apkad => Arc::new(Apkad::new(config)?) as Arc<dyn SiteResolver>,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
