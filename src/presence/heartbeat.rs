use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::hub::PresenceHub;
use crate::client::Liveness;
use crate::shared::AppError;
use crate::websockets::OutboundMessage;

/// Configuration for the heartbeat scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatConfig {
    /// How often every client is pinged
    pub interval: Duration,
    /// A client with more unanswered pings than this is evicted
    pub max_missed_pings: usize,
    /// Unanswered pings older than this many ticks are forgotten
    pub ping_expiry_ticks: u64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_missed_pings: 3,
            ping_expiry_ticks: 10,
        }
    }
}

impl HeartbeatConfig {
    /// Rejects settings under which a silent client could never be evicted
    pub fn validate(&self) -> Result<(), AppError> {
        if self.interval.is_zero() {
            return Err(AppError::Config(
                "heartbeat interval must be greater than zero".to_string(),
            ));
        }

        let Some(minimum_expiry) = (self.max_missed_pings as u64).checked_add(1) else {
            return Err(AppError::Config(format!(
                "max missed pings ({}) is out of range",
                self.max_missed_pings
            )));
        };
        if self.ping_expiry_ticks < minimum_expiry {
            return Err(AppError::Config(format!(
                "ping expiry ({} ticks) must be at least max missed pings + 1 ({})",
                self.ping_expiry_ticks, minimum_expiry
            )));
        }

        Ok(())
    }
}

/// What a single heartbeat tick did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub pinged: usize,
    pub evicted: Vec<String>,
    pub expired_pings: usize,
}

/// Periodically pings every registered client and evicts unresponsive ones
#[derive(Debug, Clone)]
pub struct HeartbeatScheduler {
    hub: PresenceHub,
    config: HeartbeatConfig,
}

impl HeartbeatScheduler {
    pub fn new(hub: PresenceHub, config: HeartbeatConfig) -> Self {
        Self { hub, config }
    }

    /// Runs one liveness pass over all clients
    ///
    /// Per client: forget expired pings, evict if too many remain unanswered,
    /// otherwise send a fresh ping.
    #[instrument(skip(self))]
    pub async fn tick(&self) -> TickReport {
        let mut state = self.hub.lock().await;
        state.ticks += 1;

        let mut report = TickReport {
            tick: state.ticks,
            ..TickReport::default()
        };

        for client_id in state.registry.ids() {
            let Some(client) = state.registry.get_mut(&client_id) else {
                continue;
            };

            report.expired_pings +=
                client.expire_pings(report.tick, self.config.ping_expiry_ticks);

            if client.liveness(self.config.max_missed_pings) == Liveness::TimedOut {
                info!(
                    client_id = %client_id,
                    outstanding = client.outstanding_pings(),
                    "Client missed too many pings, evicting"
                );
                state.remove_client(&client_id);
                report.evicted.push(client_id);
                continue;
            }

            let ping_id = Uuid::new_v4().to_string();
            client.record_ping(ping_id.clone(), report.tick);
            client.send(&OutboundMessage::Ping { id: ping_id });
            report.pinged += 1;
        }

        report.evicted.sort();

        debug!(
            tick = report.tick,
            pinged = report.pinged,
            evicted = report.evicted.len(),
            expired_pings = report.expired_pings,
            "Heartbeat tick completed"
        );

        report
    }

    /// Spawns the periodic tick loop. Dropping or cancelling the returned
    /// handle stops it.
    pub fn start(self) -> HeartbeatHandle {
        let (shutdown_sender, mut shutdown_receiver) = oneshot::channel::<()>();

        info!(
            interval_ms = self.config.interval.as_millis() as u64,
            max_missed_pings = self.config.max_missed_pings,
            ping_expiry_ticks = self.config.ping_expiry_ticks,
            "Starting heartbeat scheduler"
        );

        let task = tokio::spawn(async move {
            let mut ticker = interval(self.config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of a tokio interval completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = &mut shutdown_receiver => {
                        info!("Heartbeat scheduler stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        self.tick().await;
                    }
                }
            }
        });

        HeartbeatHandle {
            shutdown: Some(shutdown_sender),
            task,
        }
    }
}

/// Cancel handle for a running heartbeat scheduler
#[derive(Debug)]
pub struct HeartbeatHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl HeartbeatHandle {
    /// Stops the scheduler and waits for the loop to exit
    pub async fn cancel(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        let _ = (&mut self.task).await;
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
