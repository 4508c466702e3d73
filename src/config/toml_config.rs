use crate::adapters::hh_api::{DEFAULT_ENDPOINT, DEFAULT_PER_PAGE, DEFAULT_USER_AGENT};
use crate::adapters::json_storage::DEFAULT_FILENAME;
use crate::domain::ConfigProvider;
use crate::utils::error::{Result, VacancyError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub per_page: u32,
    pub max_pages: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            per_page: DEFAULT_PER_PAGE,
            max_pages: None,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_FILENAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VacancyError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        // Substitute environment variables
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| VacancyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let re = PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("api.endpoint", &self.api.endpoint)?;
        validation::validate_non_empty_string("api.user_agent", &self.api.user_agent)?;
        validation::validate_range("api.per_page", self.api.per_page, 1, DEFAULT_PER_PAGE)?;

        if let Some(max_pages) = self.api.max_pages {
            validation::validate_range("api.max_pages", max_pages, 1, u32::MAX)?;
        }

        validation::validate_path("storage.path", &self.storage.path)?;

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn api_endpoint(&self) -> &str {
        &self.api.endpoint
    }

    fn user_agent(&self) -> &str {
        &self.api.user_agent
    }

    fn per_page(&self) -> u32 {
        self.api.per_page
    }

    fn max_pages(&self) -> Option<u32> {
        self.api.max_pages
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.api.timeout_seconds
    }

    fn storage_path(&self) -> &str {
        &self.storage.path
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.api_endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(config.per_page(), 100);
        assert_eq!(config.max_pages(), None);
        assert_eq!(config.storage_path(), "vacancies.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
endpoint = "https://api.example.com/vacancies"
user_agent = "my-agent/1.0"
per_page = 50
max_pages = 20
timeout_seconds = 30

[storage]
path = "./data/saved.json"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_endpoint(), "https://api.example.com/vacancies");
        assert_eq!(config.user_agent(), "my-agent/1.0");
        assert_eq!(config.per_page(), 50);
        assert_eq!(config.max_pages(), Some(20));
        assert_eq!(config.timeout_seconds(), Some(30));
        assert_eq!(config.storage_path(), "./data/saved.json");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HH_TEST_STORAGE_PATH", "/tmp/hh-test.json");

        let toml_content = r#"
[storage]
path = "${HH_TEST_STORAGE_PATH}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.storage.path, "/tmp/hh-test.json");

        std::env::remove_var("HH_TEST_STORAGE_PATH");
    }

    #[test]
    fn test_config_validation() {
        let bad_endpoint = AppConfig::from_toml_str("[api]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(bad_endpoint.validate().is_err());

        let bad_page_size = AppConfig::from_toml_str("[api]\nper_page = 500\n").unwrap();
        assert!(bad_page_size.validate().is_err());

        let bad_limit = AppConfig::from_toml_str("[api]\nmax_pages = 0\n").unwrap();
        assert!(bad_limit.validate().is_err());

        let bad_path = AppConfig::from_toml_str("[storage]\npath = \"\"\n").unwrap();
        assert!(bad_path.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = AppConfig::from_toml_str("[api\nendpoint = 1").unwrap_err();
        assert!(matches!(err, VacancyError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nuser_agent = \"file-agent\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.user_agent(), "file-agent");
        assert_eq!(config.api_endpoint(), DEFAULT_ENDPOINT);
    }
}
