//! Outbound client for the Fakturownia invoicing API, the system of record
//! for issued invoices.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::ProviderConfig;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Fakturownia API key not configured")]
    MissingApiKey,

    /// Fakturownia answered with a non-success status; `details` carries its
    /// error payload verbatim.
    #[error("Fakturownia rejected the invoice (status {status})")]
    Rejected { status: u16, details: Value },

    #[error("Fakturownia request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Thin client around the single "create invoice" endpoint. One synchronous
/// call per accept, no retries: transient and permanent failures are
/// reported identically.
#[derive(Clone)]
pub struct FakturowniaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl FakturowniaClient {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub async fn create_invoice(&self, invoice: &Value) -> Result<Value, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;
        let url = format!("{}/invoices.json", self.base_url);

        debug!("Sending invoice to Fakturownia at {url}");
        let response = self
            .http
            .post(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Token token={api_key}"),
            )
            .json(invoice)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let text = response.text().await.unwrap_or_default();
            let details = serde_json::from_str(&text).unwrap_or(Value::String(text));
            Err(ProviderError::Rejected {
                status: status.as_u16(),
                details,
            })
        }
    }
}
