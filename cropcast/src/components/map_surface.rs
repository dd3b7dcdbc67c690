//! Map surface: basemap canvas, click-to-coordinate and navigation keys
//!
//! The surface is bound to a container area through [`MapSurface::mount`],
//! which registers its pointer listeners on the [`EventBus`]. Mounting is
//! idempotent for the same container; a different container (after a
//! resize) replaces the old binding. [`MapSurface::unmount`] releases it.

use crossterm::event::{KeyCode, KeyModifiers};
use cropcast_core::{EventBus, EventKind, EventType};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Map},
    Frame,
};
use tracing::{debug, info};

use super::{Component, UiId};
use crate::action::Action;
use crate::config::Basemap;
use crate::geo::{Coordinate, MapView, Pan};
use crate::layout::map_block;

/// Glyph drawn at the selected location.
pub const MARKER: &str = "✚";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MapBinding {
    container: Rect,
}

#[derive(Debug, Default)]
pub struct MapSurface {
    binding: Option<MapBinding>,
}

pub struct MapSurfaceProps<'a> {
    pub view: &'a MapView,
    pub basemap: Basemap,
    pub selection: Option<Coordinate>,
    /// Dim the marker while its forecast is loading
    pub loading: bool,
}

impl MapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the map to `container` and register its listeners.
    ///
    /// Returns `false` when already mounted on the same container.
    pub fn mount(&mut self, bus: &mut EventBus<UiId>, container: Rect) -> bool {
        if self.container() == Some(container) {
            return false;
        }
        if self.unmount(bus) {
            debug!(?container, "remounting map");
        }

        bus.bind_area(UiId::Map, container);
        bus.subscribe(UiId::Map, EventType::Mouse);
        bus.subscribe(UiId::Map, EventType::Scroll);
        self.binding = Some(MapBinding { container });
        debug!(?container, "map mounted");
        true
    }

    /// Release the binding and its listeners.
    ///
    /// Returns `true` only for the first call after a mount.
    pub fn unmount(&mut self, bus: &mut EventBus<UiId>) -> bool {
        match self.binding.take() {
            Some(binding) => {
                bus.detach(UiId::Map);
                debug!(container = ?binding.container, "map unmounted");
                true
            }
            None => false,
        }
    }

    pub fn container(&self) -> Option<Rect> {
        self.binding.map(|binding| binding.container)
    }

    pub fn is_mounted(&self) -> bool {
        self.binding.is_some()
    }

    /// Coordinate under a screen cell, if it lies on the drawn map.
    pub fn coordinate_at(&self, view: &MapView, column: u16, row: u16) -> Option<Coordinate> {
        let container = self.container()?;
        view.coordinate_at(map_block().inner(container), column, row)
    }

    fn handle_key(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        let action = match code {
            KeyCode::Up | KeyCode::Char('k') => Action::MapPan(Pan::North),
            KeyCode::Down | KeyCode::Char('j') => Action::MapPan(Pan::South),
            KeyCode::Left | KeyCode::Char('h') => Action::MapPan(Pan::West),
            KeyCode::Right | KeyCode::Char('l') => Action::MapPan(Pan::East),
            KeyCode::Char('+') | KeyCode::Char('=') => Action::MapZoomIn,
            KeyCode::Char('-') | KeyCode::Char('_') => Action::MapZoomOut,
            KeyCode::Char('c') => Action::MapRecenter,
            _ => return None,
        };
        Some(action)
    }
}

impl Component<Action> for MapSurface {
    type Props<'a> = MapSurfaceProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        match event {
            EventKind::Key(key) => self.handle_key(key.code, key.modifiers),
            EventKind::Mouse(_) => event
                .left_click()
                .and_then(|(column, row)| self.coordinate_at(props.view, column, row))
                .map(|at| {
                    info!("Clicked at {:.4}, {:.4}", at.lat, at.lon);
                    Action::MapClick(at)
                }),
            EventKind::Scroll { delta, .. } if *delta < 0 => Some(Action::MapZoomIn),
            EventKind::Scroll { delta, .. } if *delta > 0 => Some(Action::MapZoomOut),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let view = props.view;
        let canvas_area = map_block().inner(area);
        let bounds = view.bounds(canvas_area);

        let title = Line::from(vec![
            Span::styled(" cropcast ", Style::default().fg(Color::Cyan).bold()),
            Span::styled(
                format!("zoom {} · {} ", view.zoom, view.center),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        let marker_style = if props.loading {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK)
        } else {
            Style::default().fg(Color::Red).bold()
        };
        let resolution = props.basemap.resolution();
        let selection = props.selection;

        let canvas = Canvas::default()
            .block(map_block().title(title).border_style(Style::default().fg(Color::DarkGray)))
            .marker(Marker::Braille)
            .x_bounds([bounds.west, bounds.east])
            .y_bounds([bounds.south, bounds.north])
            .paint(move |ctx| {
                ctx.draw(&Map {
                    resolution,
                    color: Color::Green,
                });
                if let Some(at) = selection {
                    ctx.layer();
                    ctx.print(at.lon, at.lat, Span::styled(MARKER, marker_style));
                }
            });

        frame.render_widget(canvas, area);
    }
}
