//! Screen layout shared by rendering and the reducer
//!
//! The reducer needs the canvas size to pan by a fraction of the visible
//! extent, so both sides derive it from the same function.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use crate::config::DisplayMode;

/// Rows taken by the inline forecast panel, borders included.
pub const PANEL_HEIGHT: u16 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppLayout {
    /// Map including its border
    pub map: Rect,
    /// Inline forecast panel, when the display mode shows one
    pub panel: Option<Rect>,
    pub help: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, display: DisplayMode) -> Self {
        if display.shows_inline() {
            let [map, panel, help] = Layout::vertical([
                Constraint::Min(5),
                Constraint::Length(PANEL_HEIGHT),
                Constraint::Length(1),
            ])
            .areas(area);
            Self {
                map,
                panel: Some(panel),
                help,
            }
        } else {
            let [map, help] =
                Layout::vertical([Constraint::Min(5), Constraint::Length(1)]).areas(area);
            Self {
                map,
                panel: None,
                help,
            }
        }
    }

    /// Layout for a terminal of `(width, height)`.
    pub fn for_terminal(size: (u16, u16), display: DisplayMode) -> Self {
        Self::new(Rect::new(0, 0, size.0, size.1), display)
    }

    /// Drawable canvas inside the map border.
    pub fn map_canvas(&self) -> Rect {
        map_block().inner(self.map)
    }
}

/// Border drawn around the map.
pub fn map_block() -> Block<'static> {
    Block::default().borders(Borders::ALL)
}
