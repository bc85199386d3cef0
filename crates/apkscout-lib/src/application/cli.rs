use crate::primitives::ConfigError;
use crate::sites::Site;
use clap::Parser;

use super::config::AppConfig;

/// apkscout CLI - APK package location across distribution sites
#[derive(Debug, Clone, Parser)]
#[command(name = "apkscout")]
#[command(about = "Locate APK packages across distribution sites")]
#[command(version)]
pub struct Cli {
    /// Reverse-domain package identifier (e.g. com.example.app)
    pub package: Option<String>,

    /// Specific version label to locate in the site's version history
    #[arg(id = "app_version", long = "app-version")]
    pub version: Option<String>,

    /// Sites to query; repeatable, defaults to all of them
    #[arg(short, long = "site", value_enum)]
    pub sites: Vec<Site>,

    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub package: Option<String>,
    pub version: Option<String>,
    pub sites: Vec<Site>,
}

impl CliConfig {
    /// Load configuration from command line arguments
    pub fn load() -> Result<Self, ConfigError> {
        let cli = Cli::parse();
        Ok(Self {
            app_config: cli.config,
            package: cli.package,
            version: cli.version,
            sites: cli.sites,
        })
    }

    /// Sites to query, in registry order and with repeats removed
    pub fn selected_sites(&self) -> Vec<Site> {
        if self.sites.is_empty() {
            return Site::all().to_vec();
        }
        let mut selected = Vec::new();
        for site in &self.sites {
            if !selected.contains(site) {
                selected.push(*site);
            }
        }
        selected
    }
}

impl clap::ValueEnum for Site {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Site::ApkPure,
            Site::ApkMirror,
            Site::AppTeka,
            Site::ApkCombo,
            Site::ApkFab,
            Site::Apkad,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Site::ApkPure => Some(clap::builder::PossibleValue::new("apkpure")),
            Site::ApkMirror => Some(clap::builder::PossibleValue::new("apkmirror")),
            Site::AppTeka => Some(clap::builder::PossibleValue::new("appteka")),
            Site::ApkCombo => Some(clap::builder::PossibleValue::new("apkcombo")),
            Site::ApkFab => Some(clap::builder::PossibleValue::new("apkfab")),
            Site::Apkad => Some(clap::builder::PossibleValue::new("apkad")),
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            package: None,
            version: None,
            sites: Vec::new(),
            config: AppConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
