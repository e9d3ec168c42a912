//! Live record feed for a screen
//!
//! A [`LiveFeed`] owns the screen's subscription and the latest snapshot.
//! Each snapshot replaces the record list wholesale; an error event keeps the
//! list and marks the feed failed.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ExpensioError;
use crate::models::{Expense, Identity};
use crate::storage::{RecordStore, StoreEvent, Subscription};

use super::state::ViewState;

#[derive(Debug, Default)]
pub struct LiveFeed {
    subscription: Option<Subscription>,
    state: ViewState<Vec<Expense>>,
}

impl LiveFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start listening for `identity`'s records
    ///
    /// Any previous subscription is released first. Without an identity the
    /// feed fails with the sign-in prompt and subscribes to nothing.
    pub fn activate<S: RecordStore + ?Sized>(&mut self, store: &S, identity: Option<&Identity>) {
        self.deactivate();
        self.state = ViewState::Loading;

        let Some(identity) = identity else {
            self.state = ViewState::Loading.fail(ExpensioError::Unauthenticated.to_string());
            return;
        };

        match store.subscribe(&identity.user_id) {
            Ok(subscription) => {
                debug!(owner = %identity.user_id, "feed activated");
                self.subscription = Some(subscription);
                self.pump();
            }
            Err(err) => {
                warn!(error = %err, "subscribe failed");
                self.state = ViewState::Loading.fail(err.to_string());
            }
        }
    }

    /// Release the subscription; the last state stays on screen
    pub fn deactivate(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// Apply every pending event; returns whether anything arrived
    pub fn pump(&mut self) -> bool {
        let events = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => return false,
        };
        let changed = !events.is_empty();
        for event in events {
            self.apply(event);
        }
        changed
    }

    /// Block up to `timeout` for an event, then apply everything pending
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let first = match &self.subscription {
            Some(subscription) => subscription.next_timeout(timeout),
            None => return false,
        };
        match first {
            Some(event) => {
                self.apply(event);
                self.pump();
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<Expense>> {
        &self.state
    }

    /// Latest records, including stale ones kept after a failure
    pub fn records(&self) -> &[Expense] {
        self.state.data().map(Vec::as_slice).unwrap_or(&[])
    }

    fn apply(&mut self, event: StoreEvent) {
        self.state = match event {
            StoreEvent::Snapshot(records) if records.is_empty() => ViewState::Empty,
            StoreEvent::Snapshot(records) => ViewState::Ready(records),
            StoreEvent::Error(message) => {
                warn!(message = %message, "store reported an error");
                std::mem::take(&mut self.state).fail(message)
            }
        };
    }
}
