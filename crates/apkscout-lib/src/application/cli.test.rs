use super::*;
use clap::Parser;

#[test]
fn test_positional_package_and_version_flag() {
    let cli = Cli::parse_from(["apkscout", "com.whatsapp", "--app-version", "2.23.1.75"]);
    assert_eq!(cli.package.as_deref(), Some("com.whatsapp"));
    assert_eq!(cli.version.as_deref(), Some("2.23.1.75"));
    assert!(cli.sites.is_empty());
}

#[test]
fn test_site_flag_parses_registry_names() {
    let cli = Cli::parse_from(["apkscout", "com.whatsapp", "-s", "apkpure", "-s", "apkad"]);
    assert_eq!(cli.sites, vec![Site::ApkPure, Site::Apkad]);
}

#[test]
fn test_selected_sites_defaults_to_all() {
    let config = CliConfig {
        app_config: AppConfig::default(),
        package: Some("com.whatsapp".to_string()),
        version: None,
        sites: Vec::new(),
    };
    assert_eq!(config.selected_sites(), Site::all().to_vec());
}

#[test]
fn test_selected_sites_drops_repeats_but_keeps_order() {
    let config = CliConfig {
        app_config: AppConfig::default(),
        package: Some("com.whatsapp".to_string()),
        version: None,
        sites: vec![Site::Apkad, Site::ApkPure, Site::Apkad],
    };
    assert_eq!(config.selected_sites(), vec![Site::Apkad, Site::ApkPure]);
}
