use anyhow::{Context, Result, anyhow};

const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Scheme, host and port prefixed to every hypermedia link and `Location` header.
    pub public_base_url: String,
    pub cors_allowed_origins: Vec<String>,
    pub seed_on_startup: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            public_base_url: DEFAULT_PUBLIC_BASE_URL.into(),
            cors_allowed_origins: Vec::new(),
            seed_on_startup: true,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.into());
        validate_base_url(&public_base_url).context("invalid PUBLIC_BASE_URL")?;

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        let seed_on_startup = env_bool("SEED_ON_STARTUP", true);

        Ok(Self {
            public_base_url,
            cors_allowed_origins,
            seed_on_startup,
        })
    }
}

fn validate_base_url(url: &str) -> Result<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(anyhow!("'{}' must start with http:// or https://", url));
    }
    Ok(())
}

fn env_bool(var: &str, default: bool) -> bool {
    std::env::var(var)
        .ok()
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_requires_http_scheme() {
        assert!(validate_base_url("http://localhost:8080").is_ok());
        assert!(validate_base_url("https://api.example.com").is_ok());
        assert!(validate_base_url("localhost:8080").is_err());
    }

    #[test]
    fn defaults_seed_and_point_at_localhost() {
        let config = AppConfig::default();
        assert_eq!(config.public_base_url, "http://localhost:8080");
        assert!(config.seed_on_startup);
        assert!(config.cors_allowed_origins.is_empty());
    }
}
