//! Per-client busy flag.
//!
//! A client may have at most one generation call outstanding. The slot is
//! held by an [`InFlightGuard`], so it is released both when the handler
//! returns and when axum drops the handler future because the client went
//! away.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

#[derive(Clone, Default)]
pub struct InFlightRegistry {
    clients: Arc<DashMap<String, ()>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot for `client_id`, or `None` if it is already taken.
    pub fn try_acquire(&self, client_id: &str) -> Option<InFlightGuard> {
        match self.clients.entry(client_id.to_string()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(());
                Some(InFlightGuard {
                    clients: self.clients.clone(),
                    client_id: client_id.to_string(),
                })
            }
        }
    }

    pub fn is_busy(&self, client_id: &str) -> bool {
        self.clients.contains_key(client_id)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

pub struct InFlightGuard {
    clients: Arc<DashMap<String, ()>>,
    client_id: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.clients.remove(&self.client_id);
    }
}
