//! Client configuration.

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "TICKERDASH_API_BASE_URL";

/// Local development API address used when the environment does not set one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Request timeout applied to every call except sync.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Base URL and timeout for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: normalize_base_url(Some(base_url.as_ref())),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Reads the base URL from [`BASE_URL_ENV`], falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        let configured = std::env::var(BASE_URL_ENV).ok();
        Self {
            base_url: normalize_base_url(configured.as_deref()),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Joins `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn normalize_base_url(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value.trim_end_matches('/').to_owned(),
        None => DEFAULT_BASE_URL.to_owned(),
    }
}
