use crate::config::types::{Config, HttpConfig, ResultsConfig, ScanConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scan_config(&config.scan)?;
    validate_http_config(&config.http)?;
    validate_results_config(&config.results)?;
    Ok(())
}

/// Validates scan configuration
fn validate_scan_config(config: &ScanConfig) -> Result<(), ConfigError> {
    let seed = Url::parse(&config.seed_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed-url: {}", e)))?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "seed-url must be http or https, got '{}'",
            seed.scheme()
        )));
    }

    if seed.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(
            "seed-url has no host".to_string(),
        ));
    }

    if config.payloads.is_empty() {
        return Err(ConfigError::Validation(
            "at least one payload is required (payloads list or payload-file)".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates result persistence configuration
fn validate_results_config(config: &ResultsConfig) -> Result<(), ConfigError> {
    if config.target.is_empty() {
        return Err(ConfigError::Validation(
            "results target cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::StoreMode;

    fn valid_config() -> Config {
        Config {
            scan: ScanConfig {
                seed_url: "http://target.example/".to_string(),
                payloads: vec!["' OR '1'='1".to_string()],
                payload_file: None,
                same_domain_only: true,
                include_subdomains: false,
                excluded_urls: vec![],
            },
            http: HttpConfig::default(),
            results: ResultsConfig {
                mode: StoreMode::Standalone,
                target: "./results.json".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_unparseable_seed_url() {
        let mut config = valid_config();
        config.scan.seed_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_seed_url() {
        let mut config = valid_config();
        config.scan.seed_url = "ftp://target.example/".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_empty_payloads() {
        let mut config = valid_config();
        config.scan.payloads.clear();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = valid_config();
        config.http.timeout_secs = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_user_agent() {
        let mut config = valid_config();
        config.http.user_agent.clear();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_results_target() {
        let mut config = valid_config();
        config.results.target.clear();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}
