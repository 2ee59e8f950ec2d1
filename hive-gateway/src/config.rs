//! Gateway configuration
//!
//! Loaded once at startup from the environment (with `.env` support).
//! `REDIS_URL` and `STRIPE_API_KEY` are required; the process fails fast
//! rather than deferring to the first request.

use hive_common::{HiveError, Result};

/// Gateway service configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Window store connection string
    pub redis_url: String,
    /// Billing collaborator credential
    pub stripe_api_key: String,
}

impl GatewayConfig {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let redis_url = std::env::var("REDIS_URL")
            .map_err(|_| HiveError::Config("REDIS_URL is required".to_string()))?;
        let stripe_api_key = std::env::var("STRIPE_API_KEY")
            .map_err(|_| HiveError::Config("STRIPE_API_KEY is required".to_string()))?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let mut port = 8080u16;
        if let Ok(val) = std::env::var("PORT") {
            if let Ok(p) = val.parse::<u16>() {
                port = p;
            }
        }

        Ok(Self {
            host,
            port,
            redis_url,
            stripe_api_key,
        })
    }

    /// Socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_format() {
        let config = GatewayConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            redis_url: "redis://localhost:6379".to_string(),
            stripe_api_key: "sk_test".to_string(),
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }
}
