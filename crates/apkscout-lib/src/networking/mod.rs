//! HTTP session construction for site resolvers
//!
//! Each resolver owns one [`SiteSession`]: a cookie jar shared between a
//! redirect-following client and a redirect-frozen client. The frozen
//! client exists because the APKPure CDN fallback inspects `Location`
//! headers instead of following them, and reqwest fixes the redirect
//! policy per client rather than per request.

use reqwest::cookie::Jar;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::trace;

/// Networking errors for session construction and site fan-out
#[derive(Debug, Error)]
pub enum NetworkingError {
    #[error("HTTP client construction failed: {source}")]
    ClientBuild {
        #[from]
        source: reqwest::Error,
    },

    #[error("Task join error: {source}")]
    TaskJoinError {
        #[from]
        source: tokio::task::JoinError,
    },

    #[error("Semaphore acquire error: {source}")]
    SemaphoreError {
        #[from]
        source: tokio::sync::AcquireError,
    },

    #[error("Invalid job count: {count} (must be > 0)")]
    InvalidJobCount { count: usize },

    #[error("No sites provided for resolution")]
    NoSitesProvided,
}

/// Networking configuration shared by all site sessions
#[derive(Debug, Clone)]
pub struct NetworkingConfig {
    /// HTTP client timeout in seconds
    pub timeout_seconds: u64,
    /// Enable request/response tracing
    pub trace_requests: bool,
}

impl Default for NetworkingConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            trace_requests: false,
        }
    }
}

/// Per-resolver HTTP state: one cookie jar, two redirect policies
#[derive(Debug, Clone)]
pub struct SiteSession {
    client: Client,
    frozen: Client,
}

impl SiteSession {
    /// Build a session carrying the site's static browser headers
    pub fn new(config: &NetworkingConfig, headers: HeaderMap) -> Result<Self, NetworkingError> {
        let jar = Arc::new(Jar::default());
        let timeout = Duration::from_secs(config.timeout_seconds);

        let client = Client::builder()
            .timeout(timeout)
            .cookie_provider(jar.clone())
            .default_headers(headers.clone())
            .connection_verbose(config.trace_requests)
            .build()?;

        let frozen = Client::builder()
            .timeout(timeout)
            .cookie_provider(jar)
            .default_headers(headers)
            .connection_verbose(config.trace_requests)
            .redirect(Policy::none())
            .build()?;

        Ok(Self { client, frozen })
    }

    /// Client that follows redirects (search pages, version listings)
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Client that reports redirects instead of following them
    pub fn frozen(&self) -> &Client {
        &self.frozen
    }
}

/// Run per-site tasks with bounded parallelism, preserving input order
///
/// Sites own independent sessions, so fanning out across them is safe;
/// within one site a task still awaits its steps strictly in sequence.
pub async fn fan_out<T, R, F, Fut>(
    jobs: usize,
    items: Vec<T>,
    task_fn: F,
) -> Result<Vec<R>, NetworkingError>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = R> + Send + 'static,
{
    if jobs == 0 {
        return Err(NetworkingError::InvalidJobCount { count: jobs });
    }
    if items.is_empty() {
        return Err(NetworkingError::NoSitesProvided);
    }

    trace!("Fanning out over {} sites with {} jobs", items.len(), jobs);

    let semaphore = Arc::new(Semaphore::new(jobs));
    let task_fn = Arc::new(task_fn);
    let mut tasks = Vec::with_capacity(items.len());

    for item in items {
        let semaphore = semaphore.clone();
        let task_fn = task_fn.clone();
        tasks.push(tokio::spawn(async move {
            let _permit = semaphore.acquire().await?;
            Ok::<R, NetworkingError>(task_fn(item).await)
        }));
    }

    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        results.push(task.await??);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
