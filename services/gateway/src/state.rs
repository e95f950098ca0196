use crate::clients::generation::{GenerationBackend, HttpGenerationClient};
use crate::clients::media::{FsMediaStore, MediaStore};
use crate::config::GatewayConfig;
use crate::rate_limit::RateLimiter;
use ledger::{CreditService, MemoryLedgerStore};
use std::sync::Arc;
use types::catalog::StyleCatalog;

#[derive(Clone)]
pub struct AppState {
    pub credit_service: CreditService,
    pub catalog: Arc<StyleCatalog>,
    pub media: Arc<dyn MediaStore>,
    pub generation: Arc<dyn GenerationBackend>,
    pub rate_limiter: Arc<RateLimiter>,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Result<Self, anyhow::Error> {
        let store = Arc::new(MemoryLedgerStore::new());
        let credit_service = CreditService::new(store, config.credits);
        let media = Arc::new(FsMediaStore::new(config.media_root, config.public_base_url));
        let generation = Arc::new(HttpGenerationClient::new(
            config.generation_url,
            config.generation_api_key,
            config.generation_timeout,
        )?);

        Ok(Self {
            credit_service,
            catalog: Arc::new(StyleCatalog::builtin()),
            media,
            generation,
            rate_limiter: Arc::new(RateLimiter::new()),
            jwt_secret: Arc::from(config.jwt_secret),
        })
    }
}
