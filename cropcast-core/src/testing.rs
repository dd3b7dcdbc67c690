//! Test utilities for components and reducers
//!
//! - [`char_key`], [`key_event`], [`left_click`]: build input events
//! - [`RenderHarness`]: render into an in-memory terminal and read it back
//! - [`ActionAssertions`]: fluent checks on actions returned by components
//! - [`assert_emitted!`](crate::assert_emitted) / [`assert_not_emitted!`](crate::assert_not_emitted)
//!
//! # Example
//!
//! ```ignore
//! use cropcast_core::testing::*;
//!
//! let mut render = RenderHarness::new(60, 20);
//! let output = render.render_to_string_plain(|frame| {
//!     let area = frame.area();
//!     panel.render(frame, area, props);
//! });
//! assert!(output.contains("Failed to fetch forecast."));
//! ```

use std::fmt::Debug;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

use crate::event::EventKind;

/// A key press for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    key_code(KeyCode::Char(c))
}

/// A key press for any key code with no modifiers.
pub fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// A key press wrapped as an [`EventKind`].
pub fn key_event(code: KeyCode) -> EventKind {
    EventKind::Key(key_code(code))
}

/// A primary-button press at the given cell.
pub fn left_click(column: u16, row: u16) -> EventKind {
    EventKind::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Renders into a `TestBackend` terminal of fixed size.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("failed to create test terminal: {e}"));
        Self { terminal }
    }

    /// Draw one frame and return a copy of the resulting buffer.
    ///
    /// # Panics
    ///
    /// Panics if drawing fails.
    pub fn render<F>(&mut self, draw: F) -> Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal
            .draw(draw)
            .map(|completed| completed.buffer.clone())
            .unwrap_or_else(|e| panic!("failed to draw test frame: {e}"))
    }

    /// Draw one frame and return its text content, one line per row.
    pub fn render_to_string_plain<F>(&mut self, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(&self.render(draw))
    }
}

/// Text content of a buffer without styles, rows separated by `\n`.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            out.push('\n');
        }
    }
    out
}

/// Assertions on the actions a component returned.
pub trait ActionAssertions<A> {
    fn assert_empty(&self);
    fn assert_count(&self, expected: usize);
    fn assert_first(&self, expected: A);
}

impl<A> ActionAssertions<A> for Vec<A>
where
    A: PartialEq + Debug,
{
    fn assert_empty(&self) {
        let actions = self;
        assert!(actions.is_empty(), "Expected no actions, got {:?}", actions);
    }

    fn assert_count(&self, expected: usize) {
        let actions = self;
        assert_eq!(
            actions.len(),
            expected,
            "Expected {} actions, got {:?}",
            expected,
            actions
        );
    }

    fn assert_first(&self, expected: A) {
        let actions = self;
        assert_eq!(
            actions.first(),
            Some(&expected),
            "Unexpected first action in {:?}",
            actions
        );
    }
}

/// Assert that an action matching a pattern was emitted.
///
/// ```ignore
/// assert_emitted!(actions, Action::MapClick(_));
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Foo,
        Bar(i32),
    }

    #[test]
    fn test_char_key() {
        let k = char_key('x');
        assert_eq!(k.code, KeyCode::Char('x'));
        assert_eq!(k.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_left_click_event() {
        assert_eq!(left_click(4, 2).left_click(), Some((4, 2)));
    }

    #[test]
    fn test_render_to_string_plain() {
        let mut render = RenderHarness::new(5, 2);
        let output = render.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("hi"), frame.area());
        });
        assert_eq!(output, "hi   \n     ");
    }

    #[test]
    fn test_action_assertions() {
        let actions = vec![TestAction::Foo, TestAction::Bar(42)];
        actions.assert_count(2);
        actions.assert_first(TestAction::Foo);
        Vec::<TestAction>::new().assert_empty();

        assert_emitted!(actions, TestAction::Bar(42));
        assert_not_emitted!(actions, TestAction::Bar(7));
    }
}
