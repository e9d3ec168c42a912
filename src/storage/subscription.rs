//! Live snapshot subscriptions
//!
//! A subscriber receives the full current set of its owner's expenses on every
//! change, never a delta. The [`Subscription`] handle is the only way to stay
//! registered: cancelling it or dropping it unregisters immediately, so a view
//! that exits through an error path stops receiving updates as well.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, trace};

use crate::error::{ExpensioError, ExpensioResult};
use crate::models::{Expense, UserId};

/// Something the store pushes to a subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The complete current set of matching records
    Snapshot(Vec<Expense>),
    /// The store could not deliver an up-to-date snapshot
    Error(String),
}

struct Subscriber {
    owner: UserId,
    sender: Sender<StoreEvent>,
}

/// Registry of live subscribers, shared between a store and its handles
#[derive(Default)]
pub struct SubscriberRegistry {
    next_id: AtomicU64,
    subscribers: Mutex<HashMap<u64, Subscriber>>,
}

impl SubscriberRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a subscriber and queue its initial snapshot
    pub fn register(self: &Arc<Self>, owner: UserId, initial: Vec<Expense>) -> ExpensioResult<Subscription> {
        let (sender, receiver) = mpsc::channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        // The receiver is still in scope, so this send cannot fail
        let _ = sender.send(StoreEvent::Snapshot(initial));

        self.subscribers
            .lock()
            .map_err(|e| ExpensioError::Store(format!("Failed to acquire subscriber lock: {}", e)))?
            .insert(id, Subscriber { owner, sender });

        debug!(subscription = id, owner = %owner, "subscription opened");

        Ok(Subscription {
            id,
            owner,
            receiver,
            registry: Arc::clone(self),
        })
    }

    /// Push a fresh snapshot to every subscriber of `owner`
    pub fn publish(&self, owner: &UserId, snapshot: &[Expense]) -> ExpensioResult<()> {
        self.send_where(|s| s.owner == *owner, || StoreEvent::Snapshot(snapshot.to_vec()))
    }

    /// Report a failure to every subscriber of `owner`
    pub fn publish_error(&self, owner: &UserId, message: &str) -> ExpensioResult<()> {
        self.send_where(|s| s.owner == *owner, || StoreEvent::Error(message.to_string()))
    }

    /// Owners with at least one live subscription
    pub fn owners(&self) -> ExpensioResult<Vec<UserId>> {
        let subscribers = self
            .subscribers
            .lock()
            .map_err(|e| ExpensioError::Store(format!("Failed to acquire subscriber lock: {}", e)))?;

        let mut owners: Vec<UserId> = Vec::new();
        for subscriber in subscribers.values() {
            if !owners.contains(&subscriber.owner) {
                owners.push(subscriber.owner);
            }
        }
        Ok(owners)
    }

    /// Number of live subscriptions
    pub fn active_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }

    fn send_where(
        &self,
        matches: impl Fn(&Subscriber) -> bool,
        event: impl Fn() -> StoreEvent,
    ) -> ExpensioResult<()> {
        let mut subscribers = self
            .subscribers
            .lock()
            .map_err(|e| ExpensioError::Store(format!("Failed to acquire subscriber lock: {}", e)))?;

        // A failed send means the receiving half is gone; forget that subscriber
        subscribers.retain(|id, subscriber| {
            if !matches(subscriber) {
                return true;
            }
            let delivered = subscriber.sender.send(event()).is_ok();
            if delivered {
                trace!(subscription = *id, "event delivered");
            }
            delivered
        });

        Ok(())
    }

    fn remove(&self, id: u64) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.remove(&id);
        }
    }
}

/// Handle to a live subscription
///
/// Holds the receiving end of the snapshot channel. Dropping the handle is
/// equivalent to calling [`Subscription::cancel`].
pub struct Subscription {
    id: u64,
    owner: UserId,
    receiver: Receiver<StoreEvent>,
    registry: Arc<SubscriberRegistry>,
}

impl Subscription {
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Next pending event, without blocking
    pub fn try_next(&self) -> Option<StoreEvent> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event
    pub fn next_timeout(&self, timeout: Duration) -> Option<StoreEvent> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// All events queued so far, oldest first
    pub fn drain(&self) -> Vec<StoreEvent> {
        self.receiver.try_iter().collect()
    }

    /// Stop receiving updates
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.remove(self.id);
        debug!(subscription = self.id, owner = %self.owner, "subscription closed");
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .finish()
    }
}
