//! Outbound roll events
//!
//! Economy, tutorial and UI code subscribe here instead of reaching into the
//! orchestrator. Subscribing hands back a `ListenerId`; dropping the
//! subscription is an explicit `unsubscribe`.

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use crate::sim::RollResult;

/// Event produced when a roll resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollEvent {
    /// Standard roll finished
    Resolved { total: u32, is_double: bool },
    /// Luck roll finished
    LuckResolved { gold: u32, dice: u32, clover: u32 },
    /// Every active die showed the same face (Standard only)
    DoubleRolled,
}

impl RollEvent {
    /// Events a result fans out to, in emission order
    pub fn for_result(result: &RollResult) -> Vec<RollEvent> {
        match *result {
            RollResult::Standard { total, is_double } => {
                let mut events = Vec::with_capacity(2);
                if is_double {
                    events.push(RollEvent::DoubleRolled);
                }
                events.push(RollEvent::Resolved { total, is_double });
                events
            }
            RollResult::Luck { gold, dice, clover } => {
                vec![RollEvent::LuckResolved { gold, dice, clover }]
            }
        }
    }
}

/// Roll observer
pub trait RollListener {
    fn on_event(&mut self, event: &RollEvent);
}

impl RollListener for Sender<RollEvent> {
    fn on_event(&mut self, event: &RollEvent) {
        // A hung-up receiver just stops listening
        let _ = self.send(*event);
    }
}

/// Handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

/// Registry of roll listeners
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Box<dyn RollListener>)>,
    next_id: u32,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn RollListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener, handing it back; `None` if already gone
    pub fn unsubscribe(&mut self, id: ListenerId) -> Option<Box<dyn RollListener>> {
        let index = self.listeners.iter().position(|(lid, _)| *lid == id)?;
        Some(self.listeners.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver an event to every listener in subscription order
    pub fn emit(&mut self, event: RollEvent) {
        log::debug!("emit {:?} to {} listener(s)", event, self.listeners.len());
        for (_, listener) in &mut self.listeners {
            listener.on_event(&event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_double_precedes_resolved() {
        let events = RollEvent::for_result(&RollResult::Standard {
            total: 15,
            is_double: true,
        });
        assert_eq!(
            events,
            vec![
                RollEvent::DoubleRolled,
                RollEvent::Resolved {
                    total: 15,
                    is_double: true,
                }
            ]
        );
    }

    #[test]
    fn test_luck_result_single_event() {
        let events = RollEvent::for_result(&RollResult::Luck {
            gold: 1,
            dice: 1,
            clover: 1,
        });
        assert_eq!(
            events,
            vec![RollEvent::LuckResolved {
                gold: 1,
                dice: 1,
                clover: 1,
            }]
        );
    }

    #[test]
    fn test_subscribe_unsubscribe() {
        let mut bus = EventBus::new();
        let (tx_a, rx_a) = mpsc::channel();
        let (tx_b, rx_b) = mpsc::channel();
        let a = bus.subscribe(Box::new(tx_a));
        let _b = bus.subscribe(Box::new(tx_b));

        bus.emit(RollEvent::DoubleRolled);
        assert!(bus.unsubscribe(a).is_some());
        assert!(bus.unsubscribe(a).is_none());
        bus.emit(RollEvent::Resolved {
            total: 4,
            is_double: false,
        });

        assert_eq!(rx_a.try_iter().count(), 1);
        assert_eq!(rx_b.try_iter().count(), 2);
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn test_struct_listener() {
        #[derive(Default)]
        struct Doubles(u32);
        impl RollListener for Doubles {
            fn on_event(&mut self, event: &RollEvent) {
                if *event == RollEvent::DoubleRolled {
                    self.0 += 1;
                }
            }
        }

        let mut bus = EventBus::new();
        let id = bus.subscribe(Box::new(Doubles::default()));
        bus.emit(RollEvent::DoubleRolled);
        bus.emit(RollEvent::Resolved {
            total: 2,
            is_double: true,
        });
        assert!(bus.unsubscribe(id).is_some());
        assert!(bus.is_empty());
    }
}
