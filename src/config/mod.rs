#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{DishError, Result};
use crate::utils::validation::{
    validate_image_size, validate_non_empty_string, validate_range, validate_secret, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAPBOX_BASE_URL: &str = "https://api.mapbox.com";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub openai: OpenAiConfig,
    pub mapbox: MapboxConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_image_size")]
    pub image_size: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapboxConfig {
    pub access_token: String,
    #[serde(default = "default_mapbox_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_openai_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}

fn default_mapbox_base_url() -> String {
    DEFAULT_MAPBOX_BASE_URL.to_string()
}

fn default_chat_model() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    300
}

fn default_temperature() -> f64 {
    0.7
}

fn default_image_size() -> String {
    "512x512".to_string()
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_openai_base_url(),
            chat_model: default_chat_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            image_size: default_image_size(),
        }
    }
}

impl MapboxConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: default_mapbox_base_url(),
        }
    }
}

impl AppConfig {
    /// 從環境變數載入配置（先嘗試讀取 .env）
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        let mut openai = OpenAiConfig::new(required_env("OPENAI_API_KEY")?);
        if let Ok(base_url) = env::var("OPENAI_BASE_URL") {
            openai.base_url = base_url;
        }
        if let Ok(model) = env::var("OPENAI_CHAT_MODEL") {
            openai.chat_model = model;
        }

        let mut mapbox = MapboxConfig::new(required_env("MAPBOX_API_KEY")?);
        if let Ok(base_url) = env::var("MAPBOX_BASE_URL") {
            mapbox.base_url = base_url;
        }

        let mut server = ServerConfig::default();
        if let Ok(bind_address) = env::var("BIND_ADDRESS") {
            server.bind_address = bind_address;
        }
        if let Ok(raw) = env::var("REQUEST_TIMEOUT_SECONDS") {
            server.request_timeout_seconds =
                raw.parse().map_err(|_| DishError::InvalidConfigValueError {
                    field: "REQUEST_TIMEOUT_SECONDS".to_string(),
                    value: raw.clone(),
                    reason: "Expected a whole number of seconds".to_string(),
                })?;
        }

        Ok(Self {
            openai,
            mapbox,
            server,
        })
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DishError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，支援 ${VAR} 環境變數替換
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DishError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_seconds)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_secret("openai.api_key", &self.openai.api_key)?;
        validate_url("openai.base_url", &self.openai.base_url)?;
        validate_non_empty_string("openai.chat_model", &self.openai.chat_model)?;
        validate_range("openai.max_tokens", self.openai.max_tokens, 1, 4096)?;
        validate_range("openai.temperature", self.openai.temperature, 0.0, 2.0)?;
        validate_image_size("openai.image_size", &self.openai.image_size)?;

        validate_secret("mapbox.access_token", &self.mapbox.access_token)?;
        validate_url("mapbox.base_url", &self.mapbox.base_url)?;

        validate_non_empty_string("server.bind_address", &self.server.bind_address)?;
        validate_range(
            "server.request_timeout_seconds",
            self.server.request_timeout_seconds,
            1,
            600,
        )?;

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}

fn required_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| DishError::MissingConfigError {
        field: name.to_string(),
    })
}

/// Unknown variables are left as `${NAME}` so validation can report them.
fn substitute_env_vars(content: &str) -> String {
    use regex::{Captures, Regex};
    use std::sync::OnceLock;

    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

    re.replace_all(content, |caps: &Captures| {
        let var_name = &caps[1];
        env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL_TOML: &str = r#"
[openai]
api_key = "sk-test"

[mapbox]
access_token = "pk-test"
"#;

    #[test]
    fn test_parse_minimal_toml_applies_defaults() {
        let config = AppConfig::from_toml_str(MINIMAL_TOML).unwrap();

        assert_eq!(config.openai.base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(config.openai.chat_model, "gpt-3.5-turbo");
        assert_eq!(config.openai.max_tokens, 300);
        assert_eq!(config.openai.temperature, 0.7);
        assert_eq!(config.openai.image_size, "512x512");
        assert_eq!(config.mapbox.base_url, DEFAULT_MAPBOX_BASE_URL);
        assert_eq!(config.server.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DISH_TEST_OPENAI_KEY", "sk-from-env");

        let toml_content = r#"
[openai]
api_key = "${DISH_TEST_OPENAI_KEY}"

[mapbox]
access_token = "pk-test"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.openai.api_key, "sk-from-env");

        std::env::remove_var("DISH_TEST_OPENAI_KEY");
    }

    #[test]
    fn test_unresolved_variable_is_kept_verbatim() {
        let toml_content = r#"
[openai]
api_key = "sk-test"

[mapbox]
access_token = "${DISH_TEST_UNSET_VARIABLE}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.mapbox.access_token, "${DISH_TEST_UNSET_VARIABLE}");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[openai]
api_key = "sk-test"
base_url = "not a url"
temperature = 3.5

[mapbox]
access_token = "pk-test"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let mut config = AppConfig::from_toml_str(MINIMAL_TOML).unwrap();
        config.openai.image_size = "800x600".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::from_toml_str(MINIMAL_TOML).unwrap();
        config.mapbox.access_token = String::new();
        assert!(matches!(
            config.validate(),
            Err(DishError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_missing_section_is_a_parse_error() {
        let result = AppConfig::from_toml_str("[openai]\napi_key = \"sk\"\n");
        assert!(matches!(result, Err(DishError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[openai]
api_key = "sk-test"
chat_model = "gpt-4o-mini"

[mapbox]
access_token = "pk-test"

[server]
bind_address = "0.0.0.0:8080"
request_timeout_seconds = 10
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.openai.chat_model, "gpt-4o-mini");
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    const ENV_KEYS: [&str; 7] = [
        "OPENAI_API_KEY",
        "MAPBOX_API_KEY",
        "OPENAI_BASE_URL",
        "OPENAI_CHAT_MODEL",
        "MAPBOX_BASE_URL",
        "BIND_ADDRESS",
        "REQUEST_TIMEOUT_SECONDS",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    // 這些變數是全域的，所有情境放在同一個測試裡依序執行
    #[test]
    fn test_from_env() {
        clear_env();

        // 缺少 OPENAI_API_KEY
        match AppConfig::from_env() {
            Err(DishError::MissingConfigError { field }) => assert_eq!(field, "OPENAI_API_KEY"),
            other => panic!("unexpected result: {other:?}"),
        }

        // 缺少 MAPBOX_API_KEY
        std::env::set_var("OPENAI_API_KEY", "sk-env");
        match AppConfig::from_env() {
            Err(DishError::MissingConfigError { field }) => assert_eq!(field, "MAPBOX_API_KEY"),
            other => panic!("unexpected result: {other:?}"),
        }

        // 只有必要的金鑰時套用預設值
        std::env::set_var("MAPBOX_API_KEY", "pk-env");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.openai.api_key, "sk-env");
        assert_eq!(config.mapbox.access_token, "pk-env");
        assert_eq!(config.openai.base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(config.openai.chat_model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.server.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());

        // 可選的覆寫值
        std::env::set_var("OPENAI_BASE_URL", "http://127.0.0.1:9000/v1");
        std::env::set_var("OPENAI_CHAT_MODEL", "gpt-4o-mini");
        std::env::set_var("MAPBOX_BASE_URL", "http://127.0.0.1:9001");
        std::env::set_var("BIND_ADDRESS", "0.0.0.0:8080");
        std::env::set_var("REQUEST_TIMEOUT_SECONDS", "12");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.openai.base_url, "http://127.0.0.1:9000/v1");
        assert_eq!(config.openai.chat_model, "gpt-4o-mini");
        assert_eq!(config.mapbox.base_url, "http://127.0.0.1:9001");
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(12));

        // 逾時不是整數
        std::env::set_var("REQUEST_TIMEOUT_SECONDS", "soon");
        match AppConfig::from_env() {
            Err(DishError::InvalidConfigValueError { field, value, .. }) => {
                assert_eq!(field, "REQUEST_TIMEOUT_SECONDS");
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        clear_env();
    }
}
