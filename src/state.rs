use std::sync::Arc;

use crate::config::Config;
use crate::qa::{HttpQaBackend, QaBackend};

/// Shared application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub backend: Arc<dyn QaBackend>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(config.qa.timeout_secs))
            .build()?;
        let backend = HttpQaBackend::new(http_client, config.qa.clone());

        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    pub fn with_backend(config: Config, backend: Arc<dyn QaBackend>) -> Self {
        Self { config, backend }
    }
}
