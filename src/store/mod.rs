//! Pending invoice store.
//!
//! The store is the only shared state in the service: an ordered, append-only
//! list of invoice records awaiting (or having completed) operator review.
//! Records live for the process lifetime; nothing is ever deleted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Review status of an invoice record. The only defined transition is
/// `Pending -> Accepted`; there is no rejection or re-opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Accepted,
}

/// An invoice as received from the CRM webhook. `data` is an open-ended
/// mapping whose shape is dictated by the invoicing provider, not by us;
/// line items sit under `data.positions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: String,
    pub data: serde_json::Value,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
}

impl InvoiceRecord {
    pub fn pending(id: String, data: serde_json::Value) -> Self {
        Self {
            id,
            data,
            status: InvoiceStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

/// Storage interface for pending invoices, injected into handlers so a real
/// persistence backend can be substituted without touching call sites.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn insert(&self, record: InvoiceRecord);

    /// All records in intake order.
    async fn list(&self) -> Vec<InvoiceRecord>;

    async fn find(&self, id: &str) -> Option<InvoiceRecord>;

    /// Overwrites the record's data with `data` (field-level overwrite, not a
    /// merge) and flips the status to accepted. Returns the pre-update
    /// snapshot so the caller can compensate if the downstream call fails,
    /// or `None` if no record matches.
    async fn mark_accepted(&self, id: &str, data: serde_json::Value) -> Option<InvoiceRecord>;

    /// Puts a previously taken snapshot back in place, reverting both data
    /// and status. A no-op if the record has since vanished (it cannot, but
    /// the trait does not promise that).
    async fn restore(&self, snapshot: InvoiceRecord);
}

/// In-memory store; lifetime equals process lifetime. The lock serializes
/// individual operations, which is all a single-operator tool needs.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<InvoiceRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<dyn InvoiceStore> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl InvoiceStore for MemoryStore {
    async fn insert(&self, record: InvoiceRecord) {
        self.records.write().await.push(record);
    }

    async fn list(&self) -> Vec<InvoiceRecord> {
        self.records.read().await.clone()
    }

    async fn find(&self, id: &str) -> Option<InvoiceRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    async fn mark_accepted(&self, id: &str, data: serde_json::Value) -> Option<InvoiceRecord> {
        let mut records = self.records.write().await;
        let record = records.iter_mut().find(|r| r.id == id)?;
        let snapshot = record.clone();
        record.data = data;
        record.status = InvoiceStatus::Accepted;
        Some(snapshot)
    }

    async fn restore(&self, snapshot: InvoiceRecord) {
        let mut records = self.records.write().await;
        if let Some(record) = records.iter_mut().find(|r| r.id == snapshot.id) {
            *record = snapshot;
        }
    }
}
