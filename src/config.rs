use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Settings read from the environment once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Gemini credential. Empty when unset; completions then fail upstream.
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Directory whose `<template-name>.txt` files replace the built-in prompts.
    pub prompts_path: Option<PathBuf>,
    pub port: u16,
    pub cors_allowed_origin: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Tests must not pick up a developer's .env
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), e.to_string()))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: var_or("GEMINI_MODEL", DEFAULT_MODEL),
            gemini_base_url: var_or("GEMINI_API_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            prompts_path: non_empty_var("PROMPTS_PATH").map(PathBuf::from),
            port,
            cors_allowed_origin: non_empty_var("CORS_ALLOWED_ORIGIN"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn var_or(key: &str, default: &str) -> String {
    non_empty_var(key).unwrap_or_else(|| default.to_owned())
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const KEYS: &[&str] = &[
        "GEMINI_API_KEY",
        "GEMINI_MODEL",
        "GEMINI_API_BASE_URL",
        "PROMPTS_PATH",
        "PORT",
        "CORS_ALLOWED_ORIGIN",
    ];

    fn clear_env() {
        for key in KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn defaults_apply_when_unset() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");
        clear_env();

        let cfg = AppConfig::from_env().expect("defaults should parse");
        assert_eq!(cfg.gemini_api_key, "");
        assert_eq!(cfg.gemini_model, "gemini-2.5-flash");
        assert_eq!(cfg.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert!(cfg.prompts_path.is_none());
        assert_eq!(cfg.port, 3000);
        assert!(cfg.cors_allowed_origin.is_none());
    }

    #[test]
    fn reads_overrides() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");
        clear_env();
        std::env::set_var("GEMINI_API_KEY", "k-123");
        std::env::set_var("GEMINI_MODEL", "gemini-test");
        std::env::set_var("PORT", "8088");
        std::env::set_var("PROMPTS_PATH", "/etc/finguardian/prompts");

        let cfg = AppConfig::from_env().expect("should parse");
        assert_eq!(cfg.gemini_api_key, "k-123");
        assert_eq!(cfg.gemini_model, "gemini-test");
        assert_eq!(cfg.port, 8088);
        assert_eq!(cfg.prompts_path, Some(PathBuf::from("/etc/finguardian/prompts")));

        clear_env();
    }

    #[test]
    fn invalid_port_is_rejected() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");
        clear_env();
        std::env::set_var("PORT", "not-a-port");

        let result = AppConfig::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidValue(ref k, _)) if k == "PORT"));

        clear_env();
    }

    #[test]
    fn bind_addr_uses_port() {
        let cfg = AppConfig {
            gemini_api_key: String::new(),
            gemini_model: DEFAULT_MODEL.to_owned(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_owned(),
            prompts_path: None,
            port: 4000,
            cors_allowed_origin: None,
        };
        assert_eq!(cfg.bind_addr(), "0.0.0.0:4000");
    }
}
