//! Search orchestration across the site resolver registry
//!
//! Drives each registered [`SiteResolver`] through the full resolution
//! sequence (search, then the version flow when a target label was
//! requested) and folds the results into per-site outcomes. Site-specific
//! behavior lives entirely inside the resolvers; this module only iterates
//! the registry and applies the version filter.

use std::sync::Arc;

use tracing::debug;

use crate::networking::{self, NetworkingError};
use crate::sites::{MatchLink, SearchQuery, Site, SiteError, SiteResolver};

/// What one site reported for a resolution attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteOutcome {
    /// Package located, no specific version was requested
    Found { title: String, link: MatchLink },
    /// Package located and the requested version label is in its history
    FoundVersion {
        title: String,
        label: String,
        link: String,
    },
    /// Package located but the requested label is not in its history;
    /// `listed` distinguishes an empty history from an absent label
    VersionNotFound { title: String, listed: usize },
    /// The site answered but has no exact match for the package
    NotFound,
    /// The site could not be queried at all
    Unreachable { reason: String },
}

impl SiteOutcome {
    /// Whether this outcome carries a usable download link
    pub fn is_hit(&self) -> bool {
        matches!(self, SiteOutcome::Found { .. } | SiteOutcome::FoundVersion { .. })
    }
}

/// One site's outcome, tagged with the site it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteReport {
    pub site: Site,
    pub outcome: SiteOutcome,
}

/// Iterates the resolver registry and reports per-site outcomes
///
/// Sites are queried with bounded parallelism; within one site the
/// resolution steps stay strictly sequential. Report order always follows
/// registry order regardless of completion order.
pub struct SearchOrchestrator {
    resolvers: Vec<Arc<dyn SiteResolver>>,
    jobs: usize,
}

impl SearchOrchestrator {
    pub fn new(resolvers: Vec<Arc<dyn SiteResolver>>, jobs: usize) -> Self {
        Self { resolvers, jobs }
    }

    /// Resolve the query against every registered site
    pub async fn resolve(&self, query: &SearchQuery) -> Result<Vec<SiteReport>, NetworkingError> {
        let query = Arc::new(query.clone());
        networking::fan_out(self.jobs, self.resolvers.clone(), move |resolver| {
            let query = Arc::clone(&query);
            async move {
                let outcome = resolve_site(resolver.as_ref(), &query).await;
                debug!("{}: {:?}", resolver.site(), outcome);
                SiteReport {
                    site: resolver.site(),
                    outcome,
                }
            }
        })
        .await
    }
}

/// Full resolution sequence against one site
async fn resolve_site(resolver: &dyn SiteResolver, query: &SearchQuery) -> SiteOutcome {
    let found = match resolver.search(query).await {
        Ok(found) => found,
        Err(error) => return unreachable_outcome(error),
    };
    let Some(app) = found else {
        return SiteOutcome::NotFound;
    };

    let Some(target) = query.version.as_deref() else {
        return SiteOutcome::Found {
            title: app.title,
            link: app.link,
        };
    };

    // Artifact matches carry no history page to filter against
    let Some(page_url) = app.link.page_url() else {
        return SiteOutcome::VersionNotFound {
            title: app.title,
            listed: 0,
        };
    };

    let versions = match resolver.find_versions(page_url).await {
        Ok(versions) => versions,
        Err(error) => return unreachable_outcome(error),
    };

    // Linear scan in listed order; labels are free-form strings, so the
    // first exact equality wins and nothing is re-sorted.
    let listed = versions.len();
    for entry in versions {
        if entry.label == target {
            return SiteOutcome::FoundVersion {
                title: app.title,
                label: entry.label,
                link: entry.download_url,
            };
        }
    }

    SiteOutcome::VersionNotFound {
        title: app.title,
        listed,
    }
}

fn unreachable_outcome(error: SiteError) -> SiteOutcome {
    SiteOutcome::Unreachable {
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
