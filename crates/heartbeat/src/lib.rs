//! Heartbeat service: periodic liveness reporting to the control plane
//!
//! Each tick POSTs a heartbeat and hands the response to the hosting
//! runtime. The `pending_approvals` count in the response is the
//! control plane's only backpressure signal; this service reports it,
//! nothing here acts on it.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, warn};

use paralegal_gateway::{GatewayClient, Heartbeat};

pub const DEFAULT_INTERVAL_S: u64 = 30 * 60; // 30 minutes

/// Heartbeat service for periodic health reporting
pub struct HeartbeatService {
    client: Arc<GatewayClient>,
    interval_s: u64,
    enabled: bool,
}

impl HeartbeatService {
    /// Create a new heartbeat service
    pub fn new(client: Arc<GatewayClient>, interval_s: Option<u64>, enabled: bool) -> Self {
        Self {
            client,
            interval_s: interval_s.unwrap_or(DEFAULT_INTERVAL_S),
            enabled,
        }
    }

    /// One heartbeat against the control plane
    pub async fn beat(&self) -> paralegal_gateway::Result<Heartbeat> {
        let heartbeat = self.client.heartbeat().await?;

        if heartbeat.pending_approvals > 0 {
            info!(
                "heartbeat: {} approval(s) awaiting review",
                heartbeat.pending_approvals
            );
        } else {
            debug!("heartbeat: ok (server time {})", heartbeat.server_time);
        }

        Ok(heartbeat)
    }

    /// Run the heartbeat loop. Every response is handed to `on_beat`;
    /// a failed call is logged and the loop continues. No retry of the
    /// individual call; the next tick is the retry.
    pub async fn run<F, Fut>(&self, mut on_beat: F)
    where
        F: FnMut(Heartbeat) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        if !self.enabled {
            info!("heartbeat service disabled");
            return;
        }

        info!("heartbeat service started (every {}s)", self.interval_s);

        let mut ticker = interval(Duration::from_secs(self.interval_s));

        loop {
            ticker.tick().await;

            match self.beat().await {
                Ok(heartbeat) => on_beat(heartbeat).await,
                Err(e) => warn!("heartbeat failed: {}", e),
            }
        }
    }
}
