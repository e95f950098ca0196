//! Gateway configuration
//!
//! Read once from `RESTYLE_*` environment variables at startup and passed
//! explicitly to the pieces that need it. Every knob has a development
//! default, so a bare `cargo run` serves on localhost against a local
//! media directory.

use anyhow::Context;
use ledger::CreditConfig;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub listen_addr: SocketAddr,
    /// HMAC secret the identity provider signs bearer tokens with.
    pub jwt_secret: String,
    pub media_root: PathBuf,
    /// Base URL prefixed onto media paths in API responses.
    pub public_base_url: String,
    pub generation_url: String,
    pub generation_api_key: String,
    pub generation_timeout: Duration,
    pub credits: CreditConfig,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let listen_addr = lookup("RESTYLE_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("RESTYLE_LISTEN_ADDR must be a socket address")?;

        let credits = CreditConfig {
            default_credits: parse_or(&lookup, "RESTYLE_DEFAULT_CREDITS", 5)?,
            deduction_per_render: parse_or(&lookup, "RESTYLE_RENDER_COST", 1)?,
            tx_retry_limit: parse_or(&lookup, "RESTYLE_TX_RETRY_LIMIT", 5)?,
        };

        Ok(Self {
            listen_addr,
            jwt_secret: lookup("RESTYLE_JWT_SECRET").unwrap_or_else(|| "dev-secret".to_string()),
            media_root: PathBuf::from(
                lookup("RESTYLE_MEDIA_ROOT").unwrap_or_else(|| "./media".to_string()),
            ),
            public_base_url: lookup("RESTYLE_PUBLIC_BASE_URL")
                .unwrap_or_else(|| "http://localhost:8080/media".to_string()),
            generation_url: lookup("RESTYLE_GENERATION_URL")
                .unwrap_or_else(|| "http://localhost:8081/generate".to_string()),
            generation_api_key: lookup("RESTYLE_GENERATION_API_KEY").unwrap_or_default(),
            generation_timeout: Duration::from_secs(parse_or(
                &lookup,
                "RESTYLE_GENERATION_TIMEOUT_SECS",
                30,
            )?),
            credits,
        })
    }
}

fn parse_or<T>(
    lookup: impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} must be a valid number, got {:?}", name, raw)),
        None => Ok(default),
    }
}
