use std::sync::Arc;

use anyhow::Result;

use crate::auth::{CredentialVerifier, StaticOperator};
use crate::config::AppConfig;
use crate::provider::FakturowniaClient;
use crate::store::{InvoiceStore, MemoryStore};

/// Shared application state handed to every handler.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn InvoiceStore>,
    pub verifier: Arc<dyn CredentialVerifier>,
    pub provider: FakturowniaClient,
}

impl AppState {
    /// Wires the default implementations: in-memory store, single-operator
    /// credential check, and the Fakturownia client from configuration.
    pub fn initialize(config: AppConfig) -> Result<Self> {
        let verifier = Arc::new(StaticOperator::from_config(&config.operator)?);
        let provider = FakturowniaClient::new(&config.provider);

        Ok(Self {
            config,
            store: MemoryStore::shared(),
            verifier,
            provider,
        })
    }
}
