//! User-facing status output
//!
//! Renders resolution reports as styled terminal lines, distinct from the
//! tracing logs. Styling goes through a [`StyleManager`] bound to the
//! detected terminal capabilities so piped output stays plain.

use console::Style;

use crate::search::{SiteOutcome, SiteReport};
use crate::sites::MatchLink;
use crate::terminal::TerminalCapabilities;

/// Semantic styles resolved against terminal capabilities
///
/// When color is off the apply helpers pass text through untouched, so
/// `--color never` and piped output stay byte-plain rather than relying
/// on the console crate's own TTY probe.
pub struct StyleManager {
    enabled: bool,
    success: Style,
    error: Style,
    warning: Style,
    subtle: Style,
    emphasis: Style,
}

impl StyleManager {
    pub fn new(capabilities: &TerminalCapabilities) -> Self {
        Self {
            enabled: capabilities.color_enabled(),
            success: Style::new().force_styling(true).green(),
            error: Style::new().force_styling(true).red(),
            warning: Style::new().force_styling(true).yellow(),
            subtle: Style::new().force_styling(true).dim(),
            emphasis: Style::new().force_styling(true).bold(),
        }
    }

    fn apply(&self, style: &Style, text: &str) -> String {
        if self.enabled {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.apply(&self.success, "✓"), message)
    }

    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.apply(&self.error, "✗"), message)
    }

    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {}", self.apply(&self.warning, "!"), message)
    }

    pub fn style_subtle(&self, text: &str) -> String {
        self.apply(&self.subtle, text)
    }

    pub fn style_emphasis(&self, text: &str) -> String {
        self.apply(&self.emphasis, text)
    }
}

/// Status display for per-site resolution reports
pub struct StatusDisplay {
    styling: StyleManager,
}

impl StatusDisplay {
    pub fn new(capabilities: &TerminalCapabilities) -> Self {
        Self {
            styling: StyleManager::new(capabilities),
        }
    }

    /// Print one site's report
    pub fn report(&self, report: &SiteReport) {
        for line in self.render(report) {
            println!("{}", line);
        }
    }

    /// Print a header naming the package being resolved
    pub fn header(&self, package: &str) {
        println!("{}", self.styling.style_emphasis(package));
    }

    /// Print a plain message without status symbols
    pub fn message(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a subtle/secondary message
    pub fn subtle(&self, text: &str) {
        println!("{}", self.styling.style_subtle(text));
    }

    fn render(&self, report: &SiteReport) -> Vec<String> {
        match &report.outcome {
            SiteOutcome::Found { title, link } => {
                let mut lines =
                    vec![self.styling.format_success(&format!("{} on {}", title, report.site))];
                lines.extend(self.render_link(link));
                lines
            }
            SiteOutcome::FoundVersion { title, label, link } => vec![
                self.styling
                    .format_success(&format!("{} {} on {}", title, label, report.site)),
                format!("  {}", self.styling.style_subtle(link)),
            ],
            SiteOutcome::VersionNotFound { title, listed: 0 } => {
                vec![self.styling.format_warning(&format!(
                    "{}: {} found, but the site lists no versions",
                    report.site, title
                ))]
            }
            SiteOutcome::VersionNotFound { title, listed } => {
                vec![self.styling.format_warning(&format!(
                    "{}: {} found, but none of the {} listed versions match",
                    report.site, title, listed
                ))]
            }
            SiteOutcome::NotFound => {
                vec![self.styling.format_error(&format!("{}: not found", report.site))]
            }
            SiteOutcome::Unreachable { reason } => {
                vec![self
                    .styling
                    .format_warning(&format!("{}: unreachable ({})", report.site, reason))]
            }
        }
    }

    fn render_link(&self, link: &MatchLink) -> Vec<String> {
        match link {
            MatchLink::Page(url) => vec![format!("  {}", self.styling.style_subtle(url))],
            MatchLink::Artifacts(artifacts) => artifacts
                .iter()
                .map(|artifact| {
                    format!(
                        "  • {} {}",
                        artifact.filename,
                        self.styling.style_subtle(&artifact.url)
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
