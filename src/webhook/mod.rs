//! Webhook intake: inbound invoice-creation notifications from the CRM.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::shared::error::ApiError;
use crate::shared::state::AppState;
use crate::store::InvoiceRecord;

/// `POST /api/webhook`: accepts any well-formed JSON object from the CRM,
/// assigns a time-based identifier and parks the payload for review. No
/// schema validation of the business fields happens here; Fakturownia is
/// the authority on the invoice shape.
pub async fn receive_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    if !payload.is_object() {
        return Err(ApiError::BadRequest("Invalid payload".to_string()));
    }

    let invoice_id = Utc::now().timestamp_millis().to_string();
    let record = InvoiceRecord::pending(invoice_id.clone(), payload);

    info!("Received invoice {invoice_id} from HubSpot");
    state.store.insert(record).await;

    Ok(Json(json!({
        "success": true,
        "invoiceId": invoice_id,
        "message": "Invoice received and stored for review"
    })))
}

/// `GET /api/webhook`: the full store contents, pending and accepted alike.
/// Exempt from the auth gate together with the intake path.
pub async fn list_invoices(State(state): State<Arc<AppState>>) -> Json<Value> {
    let pending = state.store.list().await;
    Json(json!({ "pendingInvoices": pending }))
}
