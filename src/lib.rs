//! invoice-bridge: receives invoice webhooks from HubSpot, lets a single
//! operator review and edit them in a browser, and forwards accepted
//! invoices to the Fakturownia API.

pub mod auth;
pub mod config;
pub mod invoice;
pub mod provider;
pub mod server;
pub mod shared;
pub mod store;
pub mod ui;
pub mod webhook;
