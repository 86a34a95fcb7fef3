//! Events emitted after committed mutations, for subscribers.

use serde::{Deserialize, Serialize};
use vesta_types::{AccountAddress, Timestamp, TokenAmount};
use vesta_vesting::ScheduleKind;

/// Ledger-level events that observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A distribution batch was committed.
    Distributed {
        issuer: AccountAddress,
        entries: usize,
        total: TokenAmount,
    },
    /// A vesting grant was recorded by a distribution.
    GrantRecorded {
        owner: AccountAddress,
        kind: ScheduleKind,
        amount: TokenAmount,
        created_at: Timestamp,
    },
    /// Tokens moved between two accounts.
    Transferred {
        from: AccountAddress,
        to: AccountAddress,
        amount: TokenAmount,
    },
    /// Tokens were destroyed.
    Burned {
        account: AccountAddress,
        amount: TokenAmount,
    },
}

/// Synchronous fan-out event bus for ledger events.
///
/// Listeners run inline on the mutating thread, after the state change is
/// committed; keep handlers fast.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&LedgerEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &LedgerEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn emit_all(&self, events: &[LedgerEvent]) {
        for event in events {
            self.emit(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    fn burned(amount: u128) -> LedgerEvent {
        LedgerEvent::Burned {
            account: AccountAddress::new("holder"),
            amount: TokenAmount::from_tokens(amount),
        }
    }

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));

        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&burned(1));
        assert_eq!(counter.load(Ordering::SeqCst), 11);
        assert_eq!(bus.listener_count(), 2);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::new();
        bus.emit(&burned(1));
    }

    #[test]
    fn emit_all_preserves_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        let sink = Arc::clone(&seen);
        bus.subscribe(Box::new(move |event| {
            sink.lock().unwrap().push(event.clone());
        }));

        let events = vec![burned(1), burned(2), burned(3)];
        bus.emit_all(&events);
        assert_eq!(*seen.lock().unwrap(), events);
    }
}
