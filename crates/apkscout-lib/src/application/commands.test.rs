use super::*;
use crate::sites::Site;

fn cli_config(package: Option<&str>) -> CliConfig {
    CliConfig {
        app_config: AppConfig::default(),
        package: package.map(str::to_string),
        version: None,
        sites: vec![Site::ApkPure],
    }
}

#[tokio::test]
async fn test_missing_package_prints_usage_and_succeeds() {
    let result = execute_command(cli_config(None)).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_invalid_configuration_is_rejected_before_any_request() {
    let mut config = cli_config(Some("com.example.app"));
    config.app_config.site_jobs = 0;
    let result = execute_command(config).await;
    assert!(result.is_err());
}
