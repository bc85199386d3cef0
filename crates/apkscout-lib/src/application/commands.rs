//! Command execution
//!
//! Wires configuration, terminal capabilities, logging, the resolver
//! registry, and the orchestrator together for one CLI invocation.

use anyhow::Result;
use tracing::{Instrument, info};

use crate::application::{AppConfig, CliConfig};
use crate::display::StatusDisplay;
use crate::logger::Logger;
use crate::primitives::{LogContext, LoggerError};
use crate::search::{SearchOrchestrator, SiteOutcome};
use crate::sites::{self, SearchQuery};
use crate::terminal::TerminalCapabilities;

/// Execute one CLI invocation end to end
pub async fn execute_command(cli_config: CliConfig) -> Result<()> {
    let config = AppConfig::load(&cli_config)?;
    let capabilities = TerminalCapabilities::detect(config.color);

    match Logger::init(config.to_logger_config(&capabilities)) {
        Ok(_) => {}
        // Tests drive execute_command repeatedly within one process
        Err(LoggerError::AlreadyInitialized) => {}
        Err(e) => return Err(e.into()),
    }
    let _ = AppConfig::init_global(config.clone());

    let display = StatusDisplay::new(&capabilities);

    let Some(package) = cli_config.package.clone() else {
        display.message("apkscout - locate APK packages across distribution sites");
        display.subtle("Run 'apkscout --help' for usage information");
        return Ok(());
    };

    let sites = cli_config.selected_sites();
    info!("Resolving {} across {} sites", package, sites.len());

    let resolvers = sites::registry(&config.to_networking_config(), &sites)?;
    let orchestrator = SearchOrchestrator::new(resolvers, config.site_jobs);
    let query = SearchQuery::new(package, cli_config.version.clone());

    display.header(&query.package);
    let reports = orchestrator
        .resolve(&query)
        .instrument(crate::progress_span!("resolve"))
        .await?;

    let mut hit = false;
    let mut progress = LogContext::with_progress("site resolution", reports.len() as u64);
    for (index, report) in reports.iter().enumerate() {
        progress.set_progress(index as u64 + 1);
        if let Some(logger) = Logger::global() {
            match &report.outcome {
                SiteOutcome::Unreachable { reason } => logger.warn(
                    &format!("{} unreachable: {}", report.site, reason),
                    Some(progress.clone()),
                ),
                _ => logger.info(&format!("{} resolved", report.site), Some(progress.clone())),
            }
        }
        display.report(report);
        hit |= report.outcome.is_hit();
    }

    if !hit {
        anyhow::bail!("no download link found for {}", query.package);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
