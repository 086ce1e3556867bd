use anyhow::Context;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub recommendation_api_url: String,
    pub recommendation_api_key: Option<String>,
    pub request_timeout_secs: u64,
    pub port: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        let base_url = env::var("RECOMMENDATION_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());
        let api_key = env::var("RECOMMENDATION_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let request_timeout_secs = match env::var("RECOMMENDATION_TIMEOUT_SECS") {
            Ok(value) => value
                .parse()
                .context("RECOMMENDATION_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => 30,
        };

        Ok(Self {
            recommendation_api_url: base_url,
            recommendation_api_key: api_key,
            request_timeout_secs,
            port,
        })
    }
}
