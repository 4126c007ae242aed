use std::env;

use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";
pub const DEFAULT_RECENT_UPDATES_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub recent_updates_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            recent_updates_limit: DEFAULT_RECENT_UPDATES_LIMIT,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads `COURSE_API_URL` and `DASHBOARD_RECENT_LIMIT`, falling back to defaults.
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let base_url = lookup("COURSE_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let recent_updates_limit = match lookup("DASHBOARD_RECENT_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                AppError::Config(format!("DASHBOARD_RECENT_LIMIT is not a number: {}", raw))
            })?,
            None => DEFAULT_RECENT_UPDATES_LIMIT,
        };

        Ok(Self {
            base_url,
            recent_updates_limit,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
