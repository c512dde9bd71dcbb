//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Default Gemini REST endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generative model
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// Prefix for environment overrides, e.g. `TRANSLATOR_MODEL`
const ENV_PREFIX: &str = "TRANSLATOR";

/// Configuration for translator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_target_language")]
    pub default_target_language: String,
    /// Run the unguarded and guarded translations concurrently
    #[serde(default)]
    pub concurrent_calls: bool,
    /// Extra whole-word terms the profanity classifier flags
    #[serde(default)]
    pub blocked_terms: Vec<String>,
}

fn default_api_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_ms() -> u64 {
    60000
}

fn default_target_language() -> String {
    "en".to_string()
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: api_key_from_env().unwrap_or_default(),
            api_endpoint: default_api_endpoint(),
            model: default_model(),
            timeout_ms: default_timeout_ms(),
            default_target_language: default_target_language(),
            concurrent_calls: false,
            blocked_terms: vec![],
        }
    }
}

/// Read the API key, preferring `GOOGLE_API_KEY` over `GEMINI_API_KEY`
fn api_key_from_env() -> Option<String> {
    std::env::var("GOOGLE_API_KEY")
        .or_else(|_| std::env::var("GEMINI_API_KEY"))
        .ok()
        .filter(|key| !key.is_empty())
}

impl TranslatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self::load(None)?;
        if config.api_key.is_empty() {
            return Err(anyhow::anyhow!(
                "GOOGLE_API_KEY environment variable is required"
            ));
        }
        Ok(config)
    }

    /// Load configuration: defaults, then an optional file, then `TRANSLATOR_*` env vars.
    ///
    /// The API key is taken from `GOOGLE_API_KEY` / `GEMINI_API_KEY` when the
    /// layered sources leave it empty.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("api_endpoint", DEFAULT_API_ENDPOINT)?
            .set_default("model", DEFAULT_MODEL)?
            .set_default("timeout_ms", default_timeout_ms() as i64)?
            .set_default("default_target_language", default_target_language())?
            .set_default("concurrent_calls", false)?;

        if let Some(path) = path {
            info!("Loading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let mut config: Self = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("blocked_terms"),
            )
            .build()?
            .try_deserialize()?;

        if config.api_key.trim().is_empty() {
            if let Some(key) = api_key_from_env() {
                config.api_key = key;
            }
        }
        config.api_key = config.api_key.trim().to_string();
        config.blocked_terms = config
            .blocked_terms
            .iter()
            .map(|term| term.trim().to_string())
            .filter(|term| !term.is_empty())
            .collect();

        debug!("Using model {} at {}", config.model, config.api_endpoint);

        Ok(config)
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.is_empty() {
            return Err(anyhow::anyhow!("API key is required"));
        }

        if self.api_endpoint.is_empty() {
            return Err(anyhow::anyhow!("API endpoint is required"));
        }

        if self.model.is_empty() {
            return Err(anyhow::anyhow!("Model name is required"));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        Ok(())
    }

    /// Target language to use when the user leaves the field blank
    pub fn resolve_target_language<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested.map(str::trim) {
            Some(lang) if !lang.is_empty() => lang,
            _ => &self.default_target_language,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // tests that read or write TRANSLATOR_* variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn test_config() -> TranslatorConfig {
        TranslatorConfig {
            api_key: "test_key".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_missing_key() {
        let config = TranslatorConfig {
            api_key: "".to_string(),
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let config = TranslatorConfig {
            timeout_ms: 0,
            ..test_config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = test_config();
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.default_target_language, "en");
        assert!(!config.concurrent_calls);
        assert!(config.blocked_terms.is_empty());
    }

    #[test]
    fn test_resolve_target_language() {
        let config = test_config();
        assert_eq!(config.resolve_target_language(Some("es")), "es");
        assert_eq!(config.resolve_target_language(Some(" fr ")), "fr");
        assert_eq!(config.resolve_target_language(Some("  ")), "en");
        assert_eq!(config.resolve_target_language(None), "en");
    }

    #[test]
    fn test_load_from_file() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"api_key": "file_key", "model": "gemini-1.5-flash", "blocked_terms": ["darn"]}}"#
        )
        .unwrap();

        let config = TranslatorConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.api_key, "file_key");
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.blocked_terms, vec!["darn".to_string()]);
        assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translator.json");

        let config = TranslatorConfig {
            concurrent_calls: true,
            ..test_config()
        };
        config.to_file(&path).unwrap();

        let loaded = TranslatorConfig::from_file(&path).unwrap();
        assert_eq!(loaded.api_key, "test_key");
        assert!(loaded.concurrent_calls);
    }

    #[test]
    fn test_env_overrides_blocked_terms() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("TRANSLATOR_BLOCKED_TERMS", "darn, heck");
        std::env::set_var("TRANSLATOR_MODEL", "gemini-1.5-flash");

        let loaded = TranslatorConfig::load(None);

        std::env::remove_var("TRANSLATOR_BLOCKED_TERMS");
        std::env::remove_var("TRANSLATOR_MODEL");

        let config = loaded.unwrap();
        assert_eq!(config.blocked_terms, vec!["darn".to_string(), "heck".to_string()]);
        assert_eq!(config.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_load_trims_api_key() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("TRANSLATOR_API_KEY", "  padded_key \n");

        let loaded = TranslatorConfig::load(None);

        std::env::remove_var("TRANSLATOR_API_KEY");

        assert_eq!(loaded.unwrap().api_key, "padded_key");
    }
}
