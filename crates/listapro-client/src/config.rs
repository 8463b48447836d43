//! API Configuration
//!
//! Resolves the REST base URL from the environment.

/// Used when no variable is set; the companion server proxies `/api` upstream.
pub const DEFAULT_BASE_URL: &str = "/api";

/// Variables consulted in order; the first non-empty one wins.
pub const BASE_URL_VARS: [&str; 2] = ["LISTAPRO_API_URL", "BACKEND_URL"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        Self {
            base_url: trimmed.to_string(),
        }
    }

    /// Read the base URL from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the base URL through an arbitrary lookup
    ///
    /// The browser build passes values captured with `option_env!`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = BASE_URL_VARS
            .iter()
            .filter_map(|key| lookup(key))
            .find(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True when the base URL has no scheme (e.g. `/api`)
    pub fn is_relative(&self) -> bool {
        !self.base_url.contains("://")
    }

    /// Anchor a relative base URL to an origin such as `http://localhost:3000`
    pub fn resolve_against(self, origin: &str) -> Self {
        if !self.is_relative() {
            return self;
        }
        let origin = origin.trim_end_matches('/');
        let path = self.base_url.trim_start_matches('/');
        if path.is_empty() {
            Self::new(origin)
        } else {
            Self::new(format!("{}/{}", origin, path))
        }
    }

    /// Full URL for an API path like `/lists/1/tasks`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
