use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::websockets::{ConnectionHandle, MemberView, OutboundMessage};

/// Liveness of a client as seen by the heartbeat scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// No outstanding pings
    Active,
    /// Some pings unanswered, but not more than the allowed maximum
    AwaitingPong,
    /// Too many unanswered pings; the client will be evicted on the next tick
    TimedOut,
}

/// A registered presence identity bound to one live connection
#[derive(Debug)]
pub struct Client {
    pub id: String,
    pub name: String,
    token: String,
    connection: ConnectionHandle,
    outstanding_pings: HashMap<String, u64>, // ping id -> tick it was sent on
    pub registered_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Client {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        token: impl Into<String>,
        connection: ConnectionHandle,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            token: token.into(),
            connection,
            outstanding_pings: HashMap::new(),
            registered_at: now,
            last_seen: now,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn connection(&self) -> &ConnectionHandle {
        &self.connection
    }

    pub fn send(&self, message: &OutboundMessage) {
        self.connection.send(message);
    }

    pub fn view(&self) -> MemberView {
        MemberView::new(self.id.clone(), self.name.clone())
    }

    pub fn summary(&self) -> ClientSummary {
        ClientSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            registered_at: self.registered_at,
            last_seen: self.last_seen,
            outstanding_pings: self.outstanding_pings.len(),
        }
    }

    /// Swaps in a new connection after a successful token check.
    /// The token itself never changes.
    pub(crate) fn reconnect(&mut self, name: impl Into<String>, connection: ConnectionHandle) {
        self.name = name.into();
        self.connection = connection;
        self.outstanding_pings.clear();
        self.last_seen = Utc::now();
    }

    pub fn outstanding_pings(&self) -> usize {
        self.outstanding_pings.len()
    }

    pub fn has_outstanding_ping(&self, ping_id: &str) -> bool {
        self.outstanding_pings.contains_key(ping_id)
    }

    pub fn record_ping(&mut self, ping_id: String, tick: u64) {
        self.outstanding_pings.insert(ping_id, tick);
    }

    /// Clears an outstanding ping; returns false for unknown or duplicate ids
    pub fn acknowledge_ping(&mut self, ping_id: &str) -> bool {
        let acknowledged = self.outstanding_pings.remove(ping_id).is_some();
        self.last_seen = Utc::now();
        acknowledged
    }

    /// Drops pings sent more than `max_age` ticks before `current_tick`
    pub fn expire_pings(&mut self, current_tick: u64, max_age: u64) -> usize {
        let before = self.outstanding_pings.len();
        self.outstanding_pings
            .retain(|_, sent_at| current_tick.saturating_sub(*sent_at) <= max_age);
        before - self.outstanding_pings.len()
    }

    pub fn liveness(&self, max_missed_pings: usize) -> Liveness {
        match self.outstanding_pings.len() {
            0 => Liveness::Active,
            n if n <= max_missed_pings => Liveness::AwaitingPong,
            _ => Liveness::TimedOut,
        }
    }
}

/// Client listing entry for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSummary {
    pub id: String,
    pub name: String,
    pub registered_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub outstanding_pings: usize,
}
