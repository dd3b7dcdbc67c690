//! Event types delivered to components

use std::fmt::Debug;
use std::hash::Hash;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Identifies a component that can own listeners and screen areas on the
/// [`EventBus`](crate::EventBus).
pub trait ComponentId: Copy + Eq + Hash + Debug {}

impl<T> ComponentId for T where T: Copy + Eq + Hash + Debug {}

/// Event types that components can listen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Keyboard events
    Key,
    /// Mouse press/release/drag events
    Mouse,
    /// Scroll wheel events
    Scroll,
    /// Terminal resize events
    Resize,
}

/// The actual event payload
#[derive(Debug, Clone)]
pub enum EventKind {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Scroll wheel with position and delta (positive = down)
    Scroll { column: u16, row: u16, delta: isize },
    Resize(u16, u16),
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Key(_) => EventType::Key,
            EventKind::Mouse(_) => EventType::Mouse,
            EventKind::Scroll { .. } => EventType::Scroll,
            EventKind::Resize(_, _) => EventType::Resize,
        }
    }

    /// Screen position of a primary-button press, if this event is one.
    pub fn left_click(&self) -> Option<(u16, u16)> {
        match self {
            EventKind::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some((*column, *row)),
            _ => None,
        }
    }

    /// Screen position carried by pointer events.
    pub fn position(&self) -> Option<(u16, u16)> {
        match self {
            EventKind::Mouse(mouse) => Some((mouse.column, mouse.row)),
            EventKind::Scroll { column, row, .. } => Some((*column, *row)),
            _ => None,
        }
    }
}

/// Check if a cell lies within `area`.
pub fn area_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
