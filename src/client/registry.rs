use std::collections::{hash_map::Entry, HashMap};
use tracing::{debug, info, warn};

use super::errors::AuthError;
use super::models::Client;
use crate::websockets::{ConnectionHandle, MemberView};

/// Outcome of a successful registration
#[derive(Debug)]
pub struct Registration<'a> {
    pub client: &'a Client,
    /// True when an existing identity was reclaimed with its token
    pub reconnected: bool,
}

/// Owns every registered client, keyed by id, with a token -> id index
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: HashMap<String, Client>,
    token_index: HashMap<String, String>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client for a new id, or swaps the connection of an existing
    /// one when the token matches. On error nothing is modified.
    pub fn register_or_reconnect(
        &mut self,
        id: &str,
        name: &str,
        token: &str,
        connection: ConnectionHandle,
    ) -> Result<Registration<'_>, AuthError> {
        if let Some(existing) = self.clients.get(id) {
            if existing.token() != token {
                warn!(client_id = %id, "Token mismatch on re-registration");
                return Err(AuthError::TokenMismatch { id: id.to_string() });
            }
        } else if let Some(owner) = self.token_index.get(token) {
            warn!(
                client_id = %id,
                token_owner = %owner,
                "Token already bound to another client"
            );
            return Err(AuthError::TokenInUse { id: id.to_string() });
        }

        let (client, reconnected) = match self.clients.entry(id.to_string()) {
            Entry::Occupied(entry) => {
                let client = entry.into_mut();
                client.reconnect(name, connection);
                info!(client_id = %id, name = %name, "Client reconnected");
                (&*client, true)
            }
            Entry::Vacant(entry) => {
                self.token_index.insert(token.to_string(), id.to_string());
                let client = entry.insert(Client::new(id, name, token, connection));
                info!(client_id = %id, name = %name, "Client registered");
                (&*client, false)
            }
        };

        Ok(Registration {
            client,
            reconnected,
        })
    }

    pub fn get(&self, id: &str) -> Option<&Client> {
        self.clients.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Client> {
        self.clients.get_mut(id)
    }

    pub fn get_by_token(&self, token: &str) -> Option<&Client> {
        self.token_index
            .get(token)
            .and_then(|id| self.clients.get(id))
    }

    pub fn get_by_token_mut(&mut self, token: &str) -> Option<&mut Client> {
        let id = self.token_index.get(token)?;
        self.clients.get_mut(id)
    }

    /// Removes the identity and its token. Room membership is the caller's job.
    pub fn remove(&mut self, id: &str) -> Option<Client> {
        let client = self.clients.remove(id)?;
        self.token_index.remove(client.token());
        debug!(client_id = %id, "Client removed from registry");
        Some(client)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.clients.contains_key(id)
    }

    /// Registered ids in sorted order
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.clients.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.clients.values()
    }

    /// Public listing of all clients, sorted by id
    pub fn views(&self) -> Vec<MemberView> {
        let mut views: Vec<MemberView> = self.clients.values().map(Client::view).collect();
        views.sort_by(|a, b| a.id.cmp(&b.id));
        views
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
