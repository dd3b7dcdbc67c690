//! Event bus: listener registration, hit-testing and terminal event polling

use crate::event::{area_contains, ComponentId, EventKind, EventType};
use crossterm::event::{self, MouseEventKind};
use ratatui::layout::Rect;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
}

/// Registry of event listeners and the screen areas they are bound to.
///
/// A component listens for an [`EventType`] by subscribing, and claims a
/// region of the screen with [`bind_area`](EventBus::bind_area). Pointer
/// events are routed to the listener whose area contains the pointer; when
/// areas overlap, the most recently bound one is on top.
///
/// Subscriptions are a set per event type, so a component can hold at most
/// one listener for each type no matter how often it subscribes.
#[derive(Debug)]
pub struct EventBus<C: ComponentId> {
    subscriptions: HashMap<EventType, HashSet<C>>,
    /// Bound areas, bottom to top
    areas: Vec<(C, Rect)>,
}

impl<C: ComponentId> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ComponentId> EventBus<C> {
    pub fn new() -> Self {
        Self {
            subscriptions: HashMap::new(),
            areas: Vec::new(),
        }
    }

    /// Subscribe a component to an event type.
    ///
    /// Returns `false` if the component was already subscribed.
    pub fn subscribe(&mut self, component: C, event_type: EventType) -> bool {
        self.subscriptions
            .entry(event_type)
            .or_default()
            .insert(component)
    }

    /// Unsubscribe a component from an event type.
    ///
    /// Returns `false` if there was nothing to remove.
    pub fn unsubscribe(&mut self, component: C, event_type: EventType) -> bool {
        self.subscriptions
            .get_mut(&event_type)
            .map(|subscribers| subscribers.remove(&component))
            .unwrap_or(false)
    }

    /// Remove every subscription and the bound area of a component.
    pub fn detach(&mut self, component: C) {
        for subscribers in self.subscriptions.values_mut() {
            subscribers.remove(&component);
        }
        self.unbind_area(component);
    }

    pub fn is_subscribed(&self, component: C, event_type: EventType) -> bool {
        self.subscriptions
            .get(&event_type)
            .is_some_and(|subscribers| subscribers.contains(&component))
    }

    /// Number of listeners registered for an event type.
    pub fn listener_count(&self, event_type: EventType) -> usize {
        self.subscriptions
            .get(&event_type)
            .map_or(0, HashSet::len)
    }

    /// Claim a screen area for hit-testing, placing it above every other
    /// bound area.
    pub fn bind_area(&mut self, component: C, area: Rect) {
        self.unbind_area(component);
        self.areas.push((component, area));
    }

    /// Release a component's area, returning it if one was bound.
    pub fn unbind_area(&mut self, component: C) -> Option<Rect> {
        let index = self.areas.iter().position(|(c, _)| *c == component)?;
        Some(self.areas.remove(index).1)
    }

    pub fn area(&self, component: C) -> Option<Rect> {
        self.areas
            .iter()
            .find(|(c, _)| *c == component)
            .map(|(_, area)| *area)
    }

    /// Find the listener for a pointer event at the given cell.
    ///
    /// Only components that both listen for `event_type` and have an area
    /// containing the cell are candidates; the topmost one wins.
    pub fn target_at(&self, event_type: EventType, column: u16, row: u16) -> Option<C> {
        let subscribers = self.subscriptions.get(&event_type)?;
        self.areas
            .iter()
            .rev()
            .find(|(component, area)| {
                subscribers.contains(component) && area_contains(*area, column, row)
            })
            .map(|(component, _)| *component)
    }

    /// Route an event: pointer events go to the component under the pointer,
    /// other events to every listener of their type.
    pub fn targets(&self, event: &EventKind) -> Vec<C> {
        let event_type = event.event_type();
        match event.position() {
            Some((column, row)) => self.target_at(event_type, column, row).into_iter().collect(),
            None => self
                .subscriptions
                .get(&event_type)
                .map(|s| s.iter().copied().collect())
                .unwrap_or_default(),
        }
    }
}

/// Spawn the event polling task with cancellation support
///
/// Polls crossterm for events and forwards them through `tx` until the token
/// is cancelled or the receiver is dropped.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        let raw = match event::read() {
                            Ok(event::Event::Key(key)) => RawEvent::Key(key),
                            Ok(event::Event::Mouse(mouse)) => RawEvent::Mouse(mouse),
                            Ok(event::Event::Resize(w, h)) => RawEvent::Resize(w, h),
                            _ => continue,
                        };
                        if tx.send(raw).is_err() {
                            debug!("Event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Process a raw event into an EventKind
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: 1,
            },
            MouseEventKind::ScrollUp => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: -1,
            },
            _ => EventKind::Mouse(mouse),
        },
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Id {
        Map,
        Panel,
    }

    fn click(column: u16, row: u16) -> EventKind {
        EventKind::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_subscribe_is_idempotent() {
        let mut bus = EventBus::new();

        assert!(bus.subscribe(Id::Map, EventType::Mouse));
        assert!(!bus.subscribe(Id::Map, EventType::Mouse));
        assert_eq!(bus.listener_count(EventType::Mouse), 1);

        assert!(bus.unsubscribe(Id::Map, EventType::Mouse));
        assert!(!bus.unsubscribe(Id::Map, EventType::Mouse));
        assert_eq!(bus.listener_count(EventType::Mouse), 0);
    }

    #[test]
    fn test_detach_removes_subscriptions_and_area() {
        let mut bus = EventBus::new();
        bus.subscribe(Id::Map, EventType::Mouse);
        bus.subscribe(Id::Map, EventType::Scroll);
        bus.bind_area(Id::Map, Rect::new(0, 0, 10, 10));

        bus.detach(Id::Map);

        assert!(!bus.is_subscribed(Id::Map, EventType::Mouse));
        assert!(!bus.is_subscribed(Id::Map, EventType::Scroll));
        assert_eq!(bus.area(Id::Map), None);
    }

    #[test]
    fn test_pointer_events_route_by_area() {
        let mut bus = EventBus::new();
        bus.subscribe(Id::Map, EventType::Mouse);
        bus.subscribe(Id::Panel, EventType::Mouse);
        bus.bind_area(Id::Map, Rect::new(0, 0, 20, 10));
        bus.bind_area(Id::Panel, Rect::new(0, 10, 20, 5));

        assert_eq!(bus.targets(&click(5, 5)), vec![Id::Map]);
        assert_eq!(bus.targets(&click(5, 12)), vec![Id::Panel]);
        assert!(bus.targets(&click(30, 30)).is_empty());
    }

    #[test]
    fn test_overlapping_areas_route_to_topmost() {
        let mut bus = EventBus::new();
        bus.subscribe(Id::Map, EventType::Mouse);
        bus.subscribe(Id::Panel, EventType::Mouse);
        bus.bind_area(Id::Map, Rect::new(0, 0, 40, 20));
        bus.bind_area(Id::Panel, Rect::new(10, 5, 10, 5));

        assert_eq!(bus.targets(&click(12, 6)), vec![Id::Panel]);
        assert_eq!(bus.targets(&click(2, 2)), vec![Id::Map]);

        // Rebinding raises the area back to the top.
        bus.bind_area(Id::Map, Rect::new(0, 0, 40, 20));
        assert_eq!(bus.targets(&click(12, 6)), vec![Id::Map]);

        assert_eq!(bus.unbind_area(Id::Map), Some(Rect::new(0, 0, 40, 20)));
        assert_eq!(bus.unbind_area(Id::Map), None);
        assert_eq!(bus.targets(&click(12, 6)), vec![Id::Panel]);
        assert!(bus.targets(&click(2, 2)).is_empty());
    }

    #[test]
    fn test_unsubscribed_area_receives_nothing() {
        let mut bus = EventBus::new();
        bus.bind_area(Id::Map, Rect::new(0, 0, 20, 10));

        assert_eq!(bus.target_at(EventType::Mouse, 5, 5), None);
    }

    #[test]
    fn test_process_raw_event_scroll() {
        let scroll_up = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 10,
            row: 20,
            modifiers: KeyModifiers::NONE,
        };

        match process_raw_event(RawEvent::Mouse(scroll_up)) {
            EventKind::Scroll { column, row, delta } => {
                assert_eq!((column, row, delta), (10, 20, -1));
            }
            other => panic!("Expected Scroll event, got {:?}", other),
        }
    }

    #[test]
    fn test_process_raw_event_resize() {
        let kind = process_raw_event(RawEvent::Resize(80, 24));
        assert!(matches!(kind, EventKind::Resize(80, 24)));
    }
}
