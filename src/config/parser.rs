use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads, merges, and validates a configuration file.
///
/// When the config names a payload file, its payloads are appended to the
/// inline list before validation, so either source (or both) may supply them.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let mut config: Config = toml::from_str(&content)?;

    if let Some(payload_file) = &config.scan.payload_file {
        let payloads = load_payloads(Path::new(payload_file))?;
        config.scan.payloads.extend(payloads);
    }

    validate(&config)?;

    Ok(config)
}

/// Loads payloads from a file, one per line.
///
/// Blank lines and lines starting with `#` are skipped. Lines are kept
/// otherwise verbatim: payload whitespace is significant.
pub fn load_payloads(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::PayloadFile(format!("{}: {}", path.display(), e)))?;

    Ok(content
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[scan]
seed-url = "http://target.example/"
payloads = ["' OR '1'='1", "1"]
same-domain-only = true
include-subdomains = false

[http]
timeout-secs = 10
user-agent = "sqlsweep-test"

[results]
mode = "standalone"
target = "./results.json"
"#;

        let file = create_temp_file(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.scan.seed_url, "http://target.example/");
        assert_eq!(config.scan.payloads.len(), 2);
        assert!(config.scan.same_domain_only);
        assert!(!config.scan.include_subdomains);
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(
            config.results.mode,
            crate::config::StoreMode::Standalone
        );
    }

    #[test]
    fn test_defaults_applied() {
        let config_content = r#"
[scan]
seed-url = "http://target.example/"
payloads = ["1"]

[results]
mode = "standalone"
target = "./results.json"
"#;

        let file = create_temp_file(config_content);
        let config = load_config(file.path()).unwrap();

        assert!(config.scan.same_domain_only);
        assert!(!config.scan.include_subdomains);
        assert!(config.scan.excluded_urls.is_empty());
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.user_agent.starts_with("sqlsweep/"));
    }

    #[test]
    fn test_payload_file_is_merged() {
        let payload_file = create_temp_file("' OR '1'='1\n\n# a comment\n1\n");
        let config_content = format!(
            r#"
[scan]
seed-url = "http://target.example/"
payloads = ["inline"]
payload-file = "{}"

[results]
mode = "standalone"
target = "./results.json"
"#,
            payload_file.path().display()
        );

        let file = create_temp_file(&config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(
            config.scan.payloads,
            vec![
                "inline".to_string(),
                "' OR '1'='1".to_string(),
                "1".to_string(),
            ]
        );
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_file("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_payload_file_fails() {
        let config_content = r#"
[scan]
seed-url = "http://target.example/"
payload-file = "/nonexistent/payloads.txt"

[results]
mode = "standalone"
target = "./results.json"
"#;

        let file = create_temp_file(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::PayloadFile(_))));
    }

    #[test]
    fn test_no_payloads_fails_validation() {
        let config_content = r#"
[scan]
seed-url = "http://target.example/"

[results]
mode = "standalone"
target = "./results.json"
"#;

        let file = create_temp_file(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
