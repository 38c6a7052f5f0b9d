use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::document::PageTextPolicy;

const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_RASTER_DPI: u32 = 200;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_api_url: String,
    pub database_url: String,
    pub template_path: PathBuf,
    pub upload_dir: PathBuf,
    pub raster_dpi: u32,
    pub pdftoppm_bin: String,
    pub page_policy: PageTextPolicy,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let strict: bool = parse_env("STRICT_PAGE_TEXT", true)?;

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            groq_api_url: env_or("GROQ_API_URL", DEFAULT_API_URL),
            database_url: require_env("DATABASE_URL")?,
            template_path: env_or("TEMPLATE_PATH", "config/extraction_template.json").into(),
            upload_dir: env_or("UPLOAD_DIR", "uploads").into(),
            raster_dpi: parse_env("RASTER_DPI", DEFAULT_RASTER_DPI)?,
            pdftoppm_bin: env_or("PDFTOPPM_BIN", "pdftoppm"),
            page_policy: if strict {
                PageTextPolicy::Strict
            } else {
                PageTextPolicy::Lenient
            },
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            port: parse_env("PORT", 8000)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} has an invalid value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_accepts_port() {
        let port: u16 = parse_value("PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_value_rejects_out_of_range_port() {
        let err = parse_value::<u16>("PORT", "70000").unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_parse_value_bool() {
        assert!(!parse_value::<bool>("STRICT_PAGE_TEXT", "false").unwrap());
        assert!(parse_value::<bool>("STRICT_PAGE_TEXT", "yes").is_err());
    }
}
