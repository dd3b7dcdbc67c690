//! Popup: the forecast drawn next to the clicked location
//!
//! The popup has no state of its own. Each frame it is placed from the
//! marker's screen cell, so it follows pans and zooms and disappears when
//! the selection scrolls off the map.

use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{forecast_lines, Component};
use crate::action::Action;
use crate::state::ForecastStatus;

const MIN_WIDTH: u16 = 24;
const MAX_WIDTH: u16 = 48;

/// Place a `width` x `height` box next to `anchor`, inside `bounds`.
///
/// Prefers below-right of the anchor, flips to the other side when it would
/// overflow, and finally clamps so the box never leaves `bounds`.
pub fn popup_rect(anchor: (u16, u16), width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);
    let (ax, ay) = anchor;

    let x = if ax.saturating_add(2).saturating_add(width) <= bounds.right() {
        ax + 2
    } else {
        ax.saturating_sub(width.saturating_add(1))
    };
    let y = if ay.saturating_add(1).saturating_add(height) <= bounds.bottom() {
        ay + 1
    } else {
        ay.saturating_sub(height)
    };

    Rect {
        x: x.clamp(bounds.x, bounds.right() - width),
        y: y.clamp(bounds.y, bounds.bottom() - height),
        width,
        height,
    }
}

pub struct ForecastPopup;

pub struct ForecastPopupProps<'a> {
    pub status: &'a ForecastStatus,
    /// Screen cell of the selected location, `None` when off the map
    pub anchor: Option<(u16, u16)>,
}

impl ForecastPopup {
    /// Screen rect the popup occupies inside `area`, `None` when hidden.
    pub fn placement(&self, area: Rect, props: &ForecastPopupProps<'_>) -> Option<Rect> {
        let anchor = props.anchor?;
        if matches!(props.status, ForecastStatus::Idle) {
            return None;
        }

        let lines = forecast_lines(props.status);
        let content_width = lines.iter().map(|line| line.width()).max().unwrap_or(0);
        let width = u16::try_from(content_width)
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .clamp(MIN_WIDTH, MAX_WIDTH);
        let height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2);

        let rect = popup_rect(anchor, width, height, area);
        (!rect.is_empty()).then_some(rect)
    }
}

impl Component<Action> for ForecastPopup {
    type Props<'a> = ForecastPopupProps<'a>;

    /// `area` is the region the popup must stay inside (the map canvas).
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(rect) = self.placement(area, &props) else {
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(" Forecast ", Style::default().fg(Color::Cyan).bold()));

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(forecast_lines(props.status))
                .block(block)
                .wrap(Wrap { trim: false }),
            rect,
        );
    }
}
