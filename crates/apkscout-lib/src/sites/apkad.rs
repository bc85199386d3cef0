//! APKAD site resolver
//!
//! The site resolves APKs server-side and reports progress over a
//! server-push event stream, gated by a short-lived token. One search is
//! a two-phase protocol: token acquisition, then stream consumption until
//! an event satisfies the completion predicate (progress 100 with a
//! non-empty HTML body). Heartbeat and partial lines are expected and
//! skipped.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{AppMatch, Artifact, MatchLink, SearchQuery, Site, SiteError, SiteFuture, SiteResolver};
use crate::networking::{NetworkingConfig, NetworkingError, SiteSession};

// Fixed device metadata the backend expects on both requests
const DEVICE: &str = "phone";
const ARCH: &str = "arm64-v8a";
const SDK: &str = "default";

/// Only stream lines with this prefix carry payload
const EVENT_DATA_PREFIX: &str = "data: ";

#[derive(Serialize)]
struct TokenRequest<'a> {
    package: &'a str,
    device: &'a str,
    arch: &'a str,
    vc: &'a str,
    device_id: &'a str,
    sdk: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    success: bool,
    token: Option<String>,
    timestamp: Option<i64>,
}

/// Search payload; field order matters because the serialized form is
/// base64-encoded verbatim into the query string
#[derive(Serialize)]
struct StreamRequest<'a> {
    hl: &'a str,
    package: &'a str,
    device: &'a str,
    arch: &'a str,
    vc: &'a str,
    device_id: &'a str,
    sdk: &'a str,
    timestamp: i64,
}

/// One decoded stream event; most are heartbeats or partial progress
#[derive(Debug, Deserialize)]
pub(crate) struct StreamEvent {
    pub(crate) progress: Option<u32>,
    pub(crate) html: Option<String>,
}

impl StreamEvent {
    /// Completion predicate: progress 100 AND a non-empty HTML body
    pub(crate) fn is_terminal(&self) -> bool {
        self.progress == Some(100) && self.html.as_deref().is_some_and(|h| !h.is_empty())
    }
}

/// Decode one stream line; non-data lines and malformed JSON yield None
/// (the stream carries heartbeat/partial lines that must not abort it)
pub(crate) fn parse_event_line(line: &str) -> Option<StreamEvent> {
    let payload = line.strip_prefix(EVENT_DATA_PREFIX)?;
    serde_json::from_str(payload).ok()
}

/// Compact JSON for the encoded `data` query parameter
pub(crate) fn stream_payload(package: &str, timestamp: i64) -> Option<String> {
    serde_json::to_string(&StreamRequest {
        hl: "en",
        package,
        device: DEVICE,
        arch: ARCH,
        vc: "",
        device_id: "",
        sdk: SDK,
        timestamp,
    })
    .ok()
}

fn stream_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("accept", HeaderValue::from_static("text/event-stream"));
    headers.insert(
        "accept-language",
        HeaderValue::from_static("en-US,en;q=0.9,en-IN;q=0.8"),
    );
    headers.insert("cache-control", HeaderValue::from_static("no-cache"));
    headers.insert("dnt", HeaderValue::from_static("1"));
    headers.insert(
        "origin",
        HeaderValue::from_static("https://apkdownloader.pages.dev"),
    );
    headers.insert("pragma", HeaderValue::from_static("no-cache"));
    headers.insert("priority", HeaderValue::from_static("u=1, i"));
    headers.insert(
        "referer",
        HeaderValue::from_static("https://apkdownloader.pages.dev/"),
    );
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static(
            "\"Microsoft Edge\";v=\"131\", \"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"",
        ),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"Windows\""));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-site"));
    headers.insert(
        "user-agent",
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
             Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0",
        ),
    );
    headers
}

pub struct Apkad {
    session: SiteSession,
    token_url: String,
    search_url: String,
}

impl Apkad {
    pub fn new(config: &NetworkingConfig) -> Result<Self, NetworkingError> {
        Self::with_base_urls(
            config,
            "https://token.mi9.com/".to_string(),
            "https://api.mi9.com/get".to_string(),
        )
    }

    /// Create resolver with custom endpoints (for testing)
    pub fn with_base_urls(
        config: &NetworkingConfig,
        token_url: String,
        search_url: String,
    ) -> Result<Self, NetworkingError> {
        Ok(Self {
            session: SiteSession::new(config, stream_headers())?,
            token_url,
            search_url,
        })
    }

    /// Phase one: acquire the short-lived token. No retry on failure.
    async fn get_token(&self, package: &str) -> Result<Option<(String, i64)>, SiteError> {
        let request = TokenRequest {
            package,
            device: DEVICE,
            arch: ARCH,
            vc: "",
            device_id: "",
            sdk: SDK,
        };
        let response = self
            .session
            .client()
            .post(&self.token_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SiteError::Auth {
                site: Site::Apkad,
                status: status.as_u16(),
            });
        }
        if status != StatusCode::OK {
            debug!("APKAD token endpoint returned {}", status);
            return Ok(None);
        }

        let Ok(token) = response.json::<TokenResponse>().await else {
            return Ok(None);
        };
        if !token.success {
            return Ok(None);
        }
        match (token.token, token.timestamp) {
            (Some(value), Some(timestamp)) => Ok(Some((value, timestamp))),
            _ => Ok(None),
        }
    }

    async fn search_apk(&self, query: &SearchQuery) -> Result<Option<AppMatch>, SiteError> {
        let Some((token, timestamp)) = self.get_token(&query.package).await? else {
            return Ok(None);
        };

        let Some(payload) = stream_payload(&query.package, timestamp) else {
            return Ok(None);
        };
        let data = BASE64.encode(payload.as_bytes());

        trace!("APKAD streaming search for {}", query.package);
        let mut response = self
            .session
            .client()
            .get(&self.search_url)
            .query(&[("token", token.as_str()), ("data", data.as_str())])
            .send()
            .await?;

        // Phase two: scan the push stream for the terminal event. The
        // stream length is unbounded; everything before the completion
        // predicate holds is heartbeat or partial progress.
        let mut terminal: Option<StreamEvent> = None;
        let mut buffer: Vec<u8> = Vec::new();
        'stream: while let Some(chunk) = response.chunk().await? {
            buffer.extend_from_slice(&chunk);
            while let Some(newline) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=newline).collect();
                let line = String::from_utf8_lossy(&line);
                if let Some(event) = parse_event_line(line.trim_end()) {
                    trace!(progress = ?event.progress, "APKAD stream event");
                    if event.is_terminal() {
                        terminal = Some(event);
                        break 'stream;
                    }
                }
            }
        }

        // The stream may close without terminating its last line; the
        // leftover buffer is still one event.
        if terminal.is_none() && !buffer.is_empty() {
            let line = String::from_utf8_lossy(&buffer);
            if let Some(event) = parse_event_line(line.trim_end()) {
                if event.is_terminal() {
                    terminal = Some(event);
                }
            }
        }

        let Some(event) = terminal else {
            debug!("APKAD stream ended without a terminal event");
            return Ok(None);
        };
        let html = event.html.unwrap_or_default();
        Ok(parse_result_fragment(&html, &query.package))
    }
}

/// Extract the match from the terminal event's HTML fragment. The title
/// is optional (package identifier as fallback); the artifact container
/// is not - a match needs at least one downloadable artifact.
fn parse_result_fragment(html: &str, package: &str) -> Option<AppMatch> {
    let fragment = Html::parse_fragment(html);
    let title_selector = Selector::parse("li._title").unwrap();
    let list_selector = Selector::parse("div#apkslist").unwrap();
    let anchor_selector = Selector::parse("a[href]").unwrap();
    let name_selector = Selector::parse("span.der_name").unwrap();

    let title = fragment
        .select(&title_selector)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| package.to_string());

    let list = fragment.select(&list_selector).next()?;

    let mut artifacts = Vec::new();
    for anchor in list.select(&anchor_selector) {
        let Some(url) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        let filename = anchor
            .select(&name_selector)
            .next()
            .map(|n| n.text().collect::<String>().trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| url.rsplit('/').next().unwrap_or(url).to_string());
        artifacts.push(Artifact {
            filename,
            url: url.to_string(),
        });
    }

    if artifacts.is_empty() {
        return None;
    }
    Some(AppMatch {
        title,
        link: MatchLink::Artifacts(artifacts),
    })
}

impl SiteResolver for Apkad {
    fn site(&self) -> Site {
        Site::Apkad
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
    include!("apkad.test.rs");
}
