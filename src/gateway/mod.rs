//! Gateway: the main event loop connecting the transport, the engine, and
//! the decision log.
//!
//! Events are handled one at a time, in arrival order, so the correlation
//! state never sees two events in flight.

mod pipeline;
mod press;


use cardsift_core::{
    config::{ButtonConfig, Config, StartupConfig},
    traits::{DecisionRecorder, Transport},
};
use cardsift_engine::{ButtonResolver, Correlator, DecisionEngine};
use std::sync::Arc;
use tracing::{info, warn};

/// The central gateway that turns profile events into button presses.
pub struct Gateway {
    pub(super) transport: Arc<dyn Transport>,
    pub(super) recorder: Arc<dyn DecisionRecorder>,
    pub(super) engine: DecisionEngine,
    pub(super) correlator: Correlator,
    pub(super) resolver: ButtonResolver,
    pub(super) buttons: ButtonConfig,
    pub(super) startup: StartupConfig,
    /// Target bot username, lower-cased, without `@`.
    pub(super) target: String,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(
        transport: Arc<dyn Transport>,
        recorder: Arc<dyn DecisionRecorder>,
        config: &Config,
    ) -> Self {
        Self {
            transport,
            recorder,
            engine: DecisionEngine::from_config(&config.filter),
            correlator: Correlator::new(config.buttons.pending_ttl()),
            resolver: ButtonResolver::from_config(&config.buttons),
            buttons: config.buttons.clone(),
            startup: config.startup.clone(),
            target: config.target.username(),
        }
    }

    /// Run the main event loop until the transport closes or Ctrl+C.
    pub async fn run(&self) -> anyhow::Result<()> {
        info!(
            "cardsift gateway running | transport: {} | target: @{} | include: {} ({:?}) | exclude: {} | min_len: {}",
            self.transport.name(),
            self.target,
            self.engine.include().len(),
            self.engine.mode(),
            self.engine.exclude().len(),
            self.engine.min_text_len(),
        );

        let mut rx = self
            .transport
            .start()
            .await
            .map_err(|e| anyhow::anyhow!("failed to start transport {}: {e}", self.transport.name()))?;

        if self.startup.auto_start {
            self.auto_start().await;
        }

        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Some(event) => {
                        self.handle_event(event).await;
                    }
                    None => {
                        warn!("transport event stream closed");
                        break;
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        if let Err(e) = self.transport.stop().await {
            warn!("transport stop failed: {e}");
        }
        info!("cardsift gateway stopped");
        Ok(())
    }

    /// Open a session with the target bot: the start command, then the
    /// "view profiles" prompt.
    pub(super) async fn auto_start(&self) {
        let steps = [&self.startup.start_text, &self.startup.start_click_text];
        for text in steps {
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            tokio::time::sleep(self.startup.start_delay()).await;
            info!("Auto-start: sending {text}");
            if let Err(e) = self.transport.send_text(&self.target, text).await {
                warn!("auto-start send failed: {e}");
            }
        }
    }
}
