use super::*;

#[test]
fn test_cli_values_override_defaults() {
    let cli_config = CliConfig {
        app_config: AppConfig {
            net_timeout: 5,
            site_jobs: 6,
            ..AppConfig::default()
        },
        package: Some("com.example.app".to_string()),
        version: None,
        sites: Vec::new(),
    };

    let config = AppConfig::load(&cli_config).unwrap();
    assert_eq!(config.net_timeout, 5);
    assert_eq!(config.site_jobs, 6);
}

#[test]
fn test_validation_rejects_zero_jobs() {
    let config = AppConfig {
        site_jobs: 0,
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn test_validation_rejects_zero_timeout() {
    let config = AppConfig {
        net_timeout: 0,
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));
}
