use thiserror::Error;

#[derive(Error, Debug)]
pub enum DishError {
    #[error("API request failed: {0}")]
    ApiError(#[source] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{service} returned HTTP {status}: {body}")]
    UpstreamError {
        service: String,
        status: u16,
        body: String,
    },

    #[error("Malformed {service} response: {message}")]
    MalformedResponseError { service: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Upstream,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DishError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DishError::ApiError(_) => ErrorCategory::Network,
            DishError::UpstreamError { .. } | DishError::MalformedResponseError { .. } => {
                ErrorCategory::Upstream
            }
            DishError::ConfigError { .. }
            | DishError::MissingConfigError { .. }
            | DishError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DishError::ValidationError { .. } => ErrorCategory::Input,
            DishError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息，不含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            DishError::ApiError(e) if e.is_timeout() => {
                "An external service took too long to respond".to_string()
            }
            DishError::ApiError(_) => "Could not reach an external service".to_string(),
            DishError::UpstreamError {
                service, status, ..
            } => format!("{} answered with HTTP {}", service, status),
            DishError::MalformedResponseError { service, .. } => {
                format!("{} sent a response we could not understand", service)
            }
            DishError::MissingConfigError { field } => {
                format!("Required setting `{}` is not set", field)
            }
            DishError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting `{}` is invalid: {}", field, reason)
            }
            DishError::ConfigError { message } | DishError::ValidationError { message } => {
                message.clone()
            }
            DishError::IoError(e) => format!("File system error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DishError::ApiError(_) => "Check network connectivity and the configured base URLs",
            DishError::UpstreamError { status: 401, .. }
            | DishError::UpstreamError { status: 403, .. } => {
                "Check that OPENAI_API_KEY and MAPBOX_API_KEY are valid"
            }
            DishError::UpstreamError { .. } | DishError::MalformedResponseError { .. } => {
                "Try again later; the upstream service may be degraded"
            }
            DishError::ConfigError { .. }
            | DishError::MissingConfigError { .. }
            | DishError::InvalidConfigValueError { .. } => {
                "Review the environment variables or the TOML config file"
            }
            DishError::ValidationError { .. } => "Enter a dish name and submit the form again",
            DishError::IoError(_) => "Check file paths and permissions",
        }
    }
}

/// 傳輸錯誤的 Display 會帶上完整 URL（含 Mapbox access_token），一律先移除
impl From<reqwest::Error> for DishError {
    fn from(e: reqwest::Error) -> Self {
        DishError::ApiError(e.without_url())
    }
}

pub type Result<T> = std::result::Result<T, DishError>;
