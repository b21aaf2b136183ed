//! Typed publish/subscribe bus for state changes
//!
//! Events are emitted synchronously by the state mutators, so a subscriber
//! always sees the value that was just written. Handlers only receive the
//! event and cannot reach back into the game state.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::dungeon::Position;
use crate::skill::{SkillId, SkillSlot};
use crate::unit::UnitId;

/// Event topic names
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Topic {
    UnitHealthChanged,
    UnitManaChanged,
    UnitMoved,
    UnitDied,
    PlayerSkillChanged,
}

/// A state change published on the bus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    UnitHealthChanged {
        unit: UnitId,
        current: i32,
        max: i32,
    },
    UnitManaChanged {
        unit: UnitId,
        current: i32,
        max: i32,
    },
    UnitMoved {
        unit: UnitId,
        tile: Position,
    },
    UnitDied {
        unit: UnitId,
        tile: Position,
    },
    PlayerSkillChanged {
        active: Vec<SkillId>,
        passive: Vec<SkillId>,
        slots: Vec<(SkillSlot, Option<SkillId>)>,
    },
}

impl GameEvent {
    pub fn topic(&self) -> Topic {
        match self {
            GameEvent::UnitHealthChanged { .. } => Topic::UnitHealthChanged,
            GameEvent::UnitManaChanged { .. } => Topic::UnitManaChanged,
            GameEvent::UnitMoved { .. } => Topic::UnitMoved,
            GameEvent::UnitDied { .. } => Topic::UnitDied,
            GameEvent::PlayerSkillChanged { .. } => Topic::PlayerSkillChanged,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

type Handler = Box<dyn FnMut(&GameEvent)>;

struct Subscriber {
    id: SubscriptionId,
    topic: Topic,
    handler: Handler,
}

/// Synchronous event bus
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
    next_id: u32,
    recorded: Option<Vec<GameEvent>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("recording", &self.recorded.is_some())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one topic
    pub fn subscribe<F>(&mut self, topic: Topic, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            topic,
            handler: Box::new(handler),
        });
        id
    }

    /// Remove a handler. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, event: GameEvent) {
        let topic = event.topic();
        log::trace!("event {topic}: {event:?}");
        for subscriber in self.subscribers.iter_mut().filter(|s| s.topic == topic) {
            (subscriber.handler)(&event);
        }
        if let Some(recorded) = self.recorded.as_mut() {
            recorded.push(event);
        }
    }

    /// Start keeping a copy of every emitted event
    pub fn start_recording(&mut self) {
        self.recorded.get_or_insert_with(Vec::new);
    }

    /// Take the recorded events, leaving recording enabled
    pub fn drain_recorded(&mut self) -> Vec<GameEvent> {
        self.recorded.as_mut().map(std::mem::take).unwrap_or_default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_topic_names() {
        assert_eq!(Topic::UnitHealthChanged.to_string(), "unit-health-changed");
        assert_eq!(Topic::PlayerSkillChanged.to_string(), "player-skill-changed");
        assert_eq!("unit-moved".parse::<Topic>().unwrap(), Topic::UnitMoved);
    }

    #[test]
    fn test_subscribe_receives_only_its_topic() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(Topic::UnitDied, move |e| sink.borrow_mut().push(e.clone()));

        bus.emit(GameEvent::UnitMoved {
            unit: UnitId(1),
            tile: Position::new(1, 1),
        });
        bus.emit(GameEvent::UnitDied {
            unit: UnitId(1),
            tile: Position::new(1, 1),
        });

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].topic(), Topic::UnitDied);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let id = bus.subscribe(Topic::UnitMoved, move |_| *c.borrow_mut() += 1);
        let event = GameEvent::UnitMoved {
            unit: UnitId(2),
            tile: Position::new(0, 0),
        };
        bus.emit(event.clone());
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(event);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_recording() {
        let mut bus = EventBus::new();
        bus.emit(GameEvent::UnitManaChanged {
            unit: UnitId(1),
            current: 1,
            max: 2,
        });
        assert!(bus.drain_recorded().is_empty());

        bus.start_recording();
        bus.emit(GameEvent::UnitManaChanged {
            unit: UnitId(1),
            current: 2,
            max: 2,
        });
        assert_eq!(bus.drain_recorded().len(), 1);
        assert!(bus.drain_recorded().is_empty());
    }
}
