//! Configuration settings structure
//!
//! Defines the main settings structure and loading logic for the pipeline.
//! Defaults target the production EdgeOne console; tests point the API
//! section at mock servers instead.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Browser user agent mirrored into every API request
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36";

/// Main configuration settings for the redemption pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Login flow configuration
    pub login: LoginSettings,
    /// Upstream API configuration
    pub api: ApiSettings,
    /// Batch orchestration configuration
    pub batch: BatchSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Browser login flow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginSettings {
    /// Login page URL, including the console redirect target
    pub url: String,
    /// Wait budget for the redirect + page load, in seconds
    pub timeout_secs: u64,
    /// Run the browser headless
    ///
    /// The login form needs a human typing credentials, so the default is
    /// a visible window.
    pub headless: bool,
}

/// Upstream API endpoints and fixed request values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Saas token endpoint
    pub token_url: String,
    /// Coupon redemption endpoint
    pub redeem_url: String,
    /// Referer header sent with every request
    pub referer: String,
    /// Fixed platform identifier in the token query
    pub platform: String,
    /// Fixed redirect target in the token query
    pub s_url: String,
    /// User-Agent header and `clientUA` query value
    pub user_agent: String,
}

/// Batch orchestration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Maximum redemption requests in flight at once
    pub concurrency: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level
    pub level: String,
    /// Enable verbose logging
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            login: LoginSettings::default(),
            api: ApiSettings::default(),
            batch: BatchSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            url: "https://edgeone.ai/login?s_url=https%3A%2F%2Fconsole.tencentcloud.com%2Fedgeone"
                .to_string(),
            timeout_secs: 30,
            headless: false,
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            token_url: "https://www.tencentcloud.com/account/login/saas/getTokenFormSass"
                .to_string(),
            redeem_url: "https://api.edgeone.ai/common/portal-user".to_string(),
            referer: "https://edgeone.ai/".to_string(),
            platform: "intlSaaSTrtc".to_string(),
            s_url: "https://trtc.io".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self { concurrency: 5 }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            verbose: false,
        }
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// The login wait budget as a [`Duration`]
    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login.timeout_secs)
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| crate::Error::config(format!("Invalid config file {path:?}: {e}")))
    }

    /// Load settings from environment variables only
    pub fn from_env() -> crate::Result<Self> {
        Self::default().merge_with_env()
    }

    /// Override settings from environment variables
    pub fn merge_with_env(mut self) -> crate::Result<Self> {
        if let Ok(url) = std::env::var("EDGEONE_LOGIN_URL") {
            self.login.url = url;
        }

        if let Ok(timeout) = std::env::var("EDGEONE_LOGIN_TIMEOUT") {
            self.login.timeout_secs = timeout
                .parse()
                .map_err(|e| crate::Error::config(format!("Invalid login timeout: {e}")))?;
        }

        if let Ok(headless) = std::env::var("EDGEONE_HEADLESS") {
            self.login.headless = headless
                .parse()
                .map_err(|e| crate::Error::config(format!("Invalid headless flag: {e}")))?;
        }

        if let Ok(concurrency) = std::env::var("EDGEONE_CONCURRENCY") {
            self.batch.concurrency = concurrency
                .parse()
                .map_err(|e| crate::Error::config(format!("Invalid concurrency: {e}")))?;
        }

        if let Ok(level) = std::env::var("EDGEONE_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(self)
    }

    /// Validate the final configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.login.url.is_empty() {
            return Err(crate::Error::config("Login URL must not be empty"));
        }

        if self.login.timeout_secs == 0 {
            return Err(crate::Error::config("Login timeout must be at least 1s"));
        }

        if self.batch.concurrency == 0 {
            return Err(crate::Error::config("Batch concurrency must be at least 1"));
        }

        for (name, url) in [
            ("token_url", &self.api.token_url),
            ("redeem_url", &self.api.redeem_url),
        ] {
            url::Url::parse(url)
                .map_err(|e| crate::Error::config(format!("Invalid {name}: {e}")))?;
        }

        Ok(())
    }
}
