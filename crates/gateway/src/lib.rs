//! Control-plane gateway client
//!
//! Every bot container talks to the control plane through this crate:
//! case, document and checklist access, semantic search, self-queued
//! tasks, schedule CRUD, lawyer notifications, the audit log, the
//! human-approval workflow, token metering, heartbeats, and the
//! connected-apps proxy. The control plane owns all state; this side
//! holds nothing but one client handle.

use thiserror::Error;

pub mod client;
pub mod types;

pub use client::GatewayClient;
pub use types::*;

/// Gateway errors
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Connection-level failure, including an exceeded per-request
    /// timeout (`reqwest::Error::is_timeout`).
    #[error("gateway transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `body` carries at most 200 characters of the
    /// response text so large payloads never leak into logs.
    #[error("gateway error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid gateway payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("gateway misconfigured: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
