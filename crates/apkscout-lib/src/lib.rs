//! # apkscout Library
//!
//! APK package location across distribution sites.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and shared coordination
//! - [`terminal`] - Terminal color capability detection
//! - [`logger`] - Structured logging with progress tracking
//! - [`networking`] - HTTP sessions and bounded fan-out
//! - [`sites`] - One resolver per distribution site behind a uniform trait
//! - [`search`] - Orchestration and the per-site outcome taxonomy
//! - [`display`] - Styled status output, distinct from tracing logs
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     apkscout_lib::main().await
//! }
//! ```

pub mod application;
pub mod display;
pub mod logger;
pub mod networking;
pub mod primitives;
pub mod search;
pub mod sites;
pub mod terminal;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, CliConfig, execute_command};
pub use logger::Logger;
pub use networking::NetworkingConfig;
pub use primitives::{ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};
pub use search::{SearchOrchestrator, SiteOutcome, SiteReport};
pub use sites::{AppMatch, Artifact, MatchLink, SearchQuery, Site, SiteError, SiteResolver};
pub use terminal::TerminalCapabilities;

use anyhow::Result;

pub async fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Execute the command
    execute_command(config).await
}
