use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Client configuration loaded from environment variables.
/// Every value has a default; only malformed values are errors.
#[derive(Debug, Clone)]
pub struct Config {
    /// Prefix for every endpoint path. Never ends with `/`.
    pub api_url: String,
    pub http_timeout_secs: u64,
    /// Keep cookies across calls, the native counterpart of `credentials: "include"`.
    pub include_credentials: bool,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout_secs: DEFAULT_TIMEOUT_SECS,
            include_credentials: true,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_url = std::env::var("API_URL")
            .or_else(|_| std::env::var("NEXT_PUBLIC_API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Config {
            api_url: normalize_base_url(&api_url),
            http_timeout_secs: match std::env::var("HTTP_TIMEOUT_SECS") {
                Ok(raw) => raw
                    .parse::<u64>()
                    .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
                Err(_) => DEFAULT_TIMEOUT_SECS,
            },
            include_credentials: match std::env::var("INCLUDE_CREDENTIALS") {
                Ok(raw) => parse_flag(&raw)
                    .with_context(|| format!("INCLUDE_CREDENTIALS must be true or false, got '{raw}'"))?,
                Err(_) => true,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = normalize_base_url(api_url);
        self
    }

    /// Joins the base URL and an endpoint path with exactly one `/` between them.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognised flag value '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let config = Config::default().with_api_url("http://api.example.com/");
        assert_eq!(
            config.endpoint_url("/api/resume/analyze"),
            "http://api.example.com/api/resume/analyze"
        );
    }

    #[test]
    fn test_endpoint_url_without_leading_slash() {
        let config = Config::default().with_api_url("http://api.example.com");
        assert_eq!(
            config.endpoint_url("api/social/generate-post"),
            "http://api.example.com/api/social/generate-post"
        );
    }

    #[test]
    fn test_blank_base_url_falls_back_to_default() {
        let config = Config::default().with_api_url("  ");
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        assert!(parse_flag("TRUE").unwrap());
        assert!(parse_flag("1").unwrap());
        assert!(!parse_flag("off").unwrap());
        assert!(parse_flag("maybe").is_err());
    }
}
