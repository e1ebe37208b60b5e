use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_SUCCESS_PATH: &str = "/donation/success";
pub const DEFAULT_PLAN_COMPLETE_PATH: &str = "/donation/plan/complete";
pub const LEGACY_PLAN_COMPLETE_PATH: &str = "/subscription/capture";
pub const DEFAULT_ERROR_TARGET: &str = "#donation";
pub const DEFAULT_POPUP_POLL_MS: u64 = 500;

/// Donation flow configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Origin server base URL, no trailing slash
    pub origin_url: String,

    /// Page the donor lands on after a confirmed donation
    pub success_path: String,

    /// Recurring completion endpoint
    pub plan_complete_path: String,

    /// Region that receives error fragments
    pub error_target: String,

    /// Approval popup poll period
    pub popup_poll_ms: u64,
}

impl FlowConfig {
    /// Defaults for everything but the origin
    pub fn new(origin_url: impl Into<String>) -> Self {
        Self {
            origin_url: origin_url.into().trim_end_matches('/').to_string(),
            success_path: DEFAULT_SUCCESS_PATH.to_string(),
            plan_complete_path: DEFAULT_PLAN_COMPLETE_PATH.to_string(),
            error_target: DEFAULT_ERROR_TARGET.to_string(),
            popup_poll_ms: DEFAULT_POPUP_POLL_MS,
        }
    }

    pub fn from_env() -> DomainResult<Arc<Self>> {
        Self::from_lookup(|key| std::env::var(key).ok()).map(Arc::new)
    }

    /// Build from any key/value lookup
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let origin_url = lookup("DONATION_ORIGIN_URL").ok_or_else(|| {
            DomainError::Configuration("DONATION_ORIGIN_URL must be set".to_string())
        })?;
        if !(origin_url.starts_with("http://") || origin_url.starts_with("https://")) {
            return Err(DomainError::Configuration(format!(
                "DONATION_ORIGIN_URL must be an http(s) URL, got {}",
                origin_url
            )));
        }

        let mut config = Self::new(origin_url);

        if let Some(path) = lookup("DONATION_SUCCESS_PATH") {
            config.success_path = require_path("DONATION_SUCCESS_PATH", path)?;
        }

        if let Some(path) = lookup("DONATION_PLAN_COMPLETE_PATH") {
            let path = require_path("DONATION_PLAN_COMPLETE_PATH", path)?;
            if path != DEFAULT_PLAN_COMPLETE_PATH && path != LEGACY_PLAN_COMPLETE_PATH {
                return Err(DomainError::Configuration(format!(
                    "unsupported plan completion path {}",
                    path
                )));
            }
            config.plan_complete_path = path;
        }

        if let Some(target) = lookup("DONATION_ERROR_TARGET") {
            config.error_target = target;
        }

        if let Some(ms) = lookup("DONATION_POPUP_POLL_MS") {
            config.popup_poll_ms = ms.parse::<u64>().ok().filter(|ms| *ms > 0).ok_or_else(|| {
                DomainError::Configuration(format!("DONATION_POPUP_POLL_MS invalid: {}", ms))
            })?;
        }

        Ok(config)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin_url, path)
    }

    pub fn popup_poll_interval(&self) -> Duration {
        Duration::from_millis(self.popup_poll_ms)
    }
}

fn require_path(key: &str, path: String) -> DomainResult<String> {
    if path.starts_with('/') {
        Ok(path)
    } else {
        Err(DomainError::Configuration(format!(
            "{} must start with '/', got {}",
            key, path
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = FlowConfig::from_lookup(lookup(&[(
            "DONATION_ORIGIN_URL",
            "https://give.example.org/",
        )]))
        .unwrap();

        assert_eq!(config.origin_url, "https://give.example.org");
        assert_eq!(config.success_path, "/donation/success");
        assert_eq!(config.plan_complete_path, "/donation/plan/complete");
        assert_eq!(config.error_target, "#donation");
        assert_eq!(config.popup_poll_interval(), Duration::from_millis(500));
        assert_eq!(
            config.url("/error"),
            "https://give.example.org/error"
        );
    }

    #[test]
    fn test_missing_origin() {
        assert!(matches!(
            FlowConfig::from_lookup(lookup(&[])),
            Err(DomainError::Configuration(_))
        ));
    }

    #[test]
    fn test_legacy_plan_path_accepted() {
        let config = FlowConfig::from_lookup(lookup(&[
            ("DONATION_ORIGIN_URL", "http://localhost:3000"),
            ("DONATION_PLAN_COMPLETE_PATH", "/subscription/capture"),
            ("DONATION_POPUP_POLL_MS", "250"),
        ]))
        .unwrap();

        assert_eq!(config.plan_complete_path, "/subscription/capture");
        assert_eq!(config.popup_poll_ms, 250);
    }

    #[test]
    fn test_invalid_values_rejected() {
        for pairs in [
            vec![("DONATION_ORIGIN_URL", "localhost")],
            vec![
                ("DONATION_ORIGIN_URL", "http://localhost"),
                ("DONATION_POPUP_POLL_MS", "0"),
            ],
            vec![
                ("DONATION_ORIGIN_URL", "http://localhost"),
                ("DONATION_SUCCESS_PATH", "done"),
            ],
            vec![
                ("DONATION_ORIGIN_URL", "http://localhost"),
                ("DONATION_PLAN_COMPLETE_PATH", "/plans"),
            ],
        ] {
            assert!(FlowConfig::from_lookup(lookup(&pairs)).is_err());
        }
    }
}
