//! Accept/forward flow: the operator action that finalizes edits and
//! transmits the invoice to Fakturownia.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::provider::ProviderError;
use crate::shared::error::ApiError;
use crate::shared::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptRequest {
    pub invoice_id: Option<String>,
    pub invoice_data: Option<Value>,
}

/// `POST /api/accept-invoice`: overwrites the stored record with the
/// operator's edits, marks it accepted, and forwards it to Fakturownia.
///
/// Marking and forwarding are two explicit steps: if the provider call
/// fails, the record is restored to its pre-accept snapshot so local state
/// never claims an invoice the provider does not have.
pub async fn accept_invoice(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AcceptRequest>,
) -> Result<Json<Value>, ApiError> {
    let (invoice_id, invoice_data) = match (request.invoice_id, request.invoice_data) {
        (Some(id), Some(data)) => (id, data),
        _ => {
            return Err(ApiError::BadRequest(
                "Invoice ID and data required".to_string(),
            ))
        }
    };

    let snapshot = state
        .store
        .mark_accepted(&invoice_id, invoice_data.clone())
        .await
        .ok_or_else(|| ApiError::NotFound("Invoice not found".to_string()))?;

    match state.provider.create_invoice(&invoice_data).await {
        Ok(body) => {
            info!("Invoice {invoice_id} sent to Fakturownia");
            // TODO: notify HubSpot about the created invoice once API access
            // for the CRM integration is provisioned.
            Ok(Json(json!({
                "success": true,
                "fakturowniaResponse": body,
                "message": "Invoice accepted and sent to Fakturownia"
            })))
        }
        Err(ProviderError::MissingApiKey) => {
            state.store.restore(snapshot).await;
            Err(ApiError::ProviderNotConfigured)
        }
        Err(ProviderError::Rejected { status, details }) => {
            error!("Fakturownia rejected invoice {invoice_id} with status {status}");
            state.store.restore(snapshot).await;
            Err(ApiError::Provider { details })
        }
        Err(ProviderError::Transport(source)) => {
            error!("Fakturownia request for invoice {invoice_id} failed: {source}");
            state.store.restore(snapshot).await;
            Err(ApiError::Provider {
                details: Value::String(source.to_string()),
            })
        }
    }
}
