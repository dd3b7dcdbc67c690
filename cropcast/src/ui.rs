//! Top-level UI: composes the components and routes terminal events
//!
//! The UI owns the [`EventBus`] and the map binding. Rendering mounts the
//! map on its current layout area (a no-op unless the area changed);
//! dropping the UI unmounts it. An open popup is bound above the map, so
//! pointer events over it never reach the map.

use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use cropcast_core::{EventBus, EventKind, EventOutcome, EventType};
use ratatui::{layout::Rect, Frame};
use tracing::debug;

use crate::action::Action;
use crate::components::{
    Component, ForecastPanel, ForecastPanelProps, ForecastPopup, ForecastPopupProps, HelpBar,
    HelpBarProps, MapSurface, MapSurfaceProps, UiId,
};
use crate::layout::AppLayout;
use crate::state::AppState;

pub struct ForecastUi {
    map: MapSurface,
    panel: ForecastPanel,
    popup: ForecastPopup,
    help: HelpBar,
    bus: EventBus<UiId>,
}

impl Default for ForecastUi {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastUi {
    pub fn new() -> Self {
        Self {
            map: MapSurface::new(),
            panel: ForecastPanel,
            popup: ForecastPopup,
            help: HelpBar,
            bus: EventBus::new(),
        }
    }

    pub fn bus(&self) -> &EventBus<UiId> {
        &self.bus
    }

    pub fn map(&self) -> &MapSurface {
        &self.map
    }

    /// Release the map binding early. Returns `false` if it was not mounted.
    pub fn unmount(&mut self) -> bool {
        self.release_popup();
        self.map.unmount(&mut self.bus)
    }

    /// Bind the popup's rect above the map so it absorbs pointer events.
    ///
    /// Called every frame after the map is mounted, which keeps the popup on
    /// top even when the map was just rebound.
    fn bind_popup(&mut self, rect: Rect) {
        self.bus.subscribe(UiId::Popup, EventType::Mouse);
        self.bus.subscribe(UiId::Popup, EventType::Scroll);
        self.bus.bind_area(UiId::Popup, rect);
    }

    fn release_popup(&mut self) {
        if let Some(rect) = self.bus.unbind_area(UiId::Popup) {
            self.bus.unsubscribe(UiId::Popup, EventType::Mouse);
            self.bus.unsubscribe(UiId::Popup, EventType::Scroll);
            debug!(?rect, "popup closed");
        }
    }

    fn map_props<'a>(state: &'a AppState) -> MapSurfaceProps<'a> {
        MapSurfaceProps {
            view: &state.view,
            basemap: state.basemap,
            selection: state.selection,
            loading: state.status.is_loading(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let layout = AppLayout::new(area, state.display);

        self.map.mount(&mut self.bus, layout.map);
        self.map.render(frame, layout.map, Self::map_props(state));

        if let Some(panel) = layout.panel {
            self.panel.render(
                frame,
                panel,
                ForecastPanelProps {
                    status: &state.status,
                },
            );
        }

        let popup = state.display.shows_popup().then(|| {
            let canvas = layout.map_canvas();
            let anchor = state
                .selection
                .and_then(|at| state.view.cell_of(canvas, at));
            let props = ForecastPopupProps {
                status: &state.status,
                anchor,
            };
            (canvas, self.popup.placement(canvas, &props), props)
        });
        match popup {
            Some((canvas, Some(rect), props)) => {
                self.bind_popup(rect);
                self.popup.render(frame, canvas, props);
            }
            _ => self.release_popup(),
        }

        self.help.render(
            frame,
            layout.help,
            HelpBarProps {
                display: state.display,
            },
        );
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        match event {
            EventKind::Resize(width, height) => {
                EventOutcome::action(Action::UiTerminalResize(*width, *height)).with_render()
            }
            EventKind::Key(key) if key.kind != KeyEventKind::Press => EventOutcome::ignored(),
            EventKind::Key(key) => {
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    KeyCode::Char('q') => EventOutcome::action(Action::Quit),
                    KeyCode::Char('c') if ctrl => EventOutcome::action(Action::Quit),
                    KeyCode::Esc => EventOutcome::action(Action::ForecastDismiss),
                    KeyCode::Char('r') => EventOutcome::action(Action::ForecastRefresh),
                    KeyCode::Char('p') => EventOutcome::action(Action::UiCycleDisplay),
                    _ => EventOutcome::from_actions(
                        self.map.handle_event(event, Self::map_props(state)),
                    ),
                }
            }
            EventKind::Mouse(_) | EventKind::Scroll { .. } => match self.bus.targets(event)[..] {
                [UiId::Map] => {
                    EventOutcome::from_actions(self.map.handle_event(event, Self::map_props(state)))
                }
                // Over the popup or outside the map
                _ => EventOutcome::ignored(),
            },
        }
    }
}

impl Drop for ForecastUi {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropcast_core::testing::{char_key, key_event, left_click, RenderHarness};
    use cropcast_core::{assert_emitted, EventType};

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    fn rendered_ui(state: &AppState) -> ForecastUi {
        let mut ui = ForecastUi::new();
        let mut render = RenderHarness::new(80, 24);
        render.render(|frame| ui.render(frame, SCREEN, state));
        ui
    }

    #[test]
    fn test_render_mounts_map_once() {
        let state = AppState::default();
        let mut ui = rendered_ui(&state);
        let mut render = RenderHarness::new(80, 24);
        render.render(|frame| ui.render(frame, SCREEN, &state));

        assert_eq!(ui.bus().listener_count(EventType::Mouse), 1);
        assert_eq!(ui.map().container(), Some(Rect::new(0, 0, 80, 13)));

        assert!(ui.unmount());
        assert!(!ui.unmount());
        assert_eq!(ui.bus().listener_count(EventType::Mouse), 0);
    }

    #[test]
    fn test_click_on_map_routes_to_surface() {
        let state = AppState::default();
        let mut ui = rendered_ui(&state);

        let outcome = ui.map_event(&left_click(40, 6), &state);
        assert_emitted!(outcome.actions, Action::MapClick(_));

        // Help bar row is outside the map
        let outcome = ui.map_event(&left_click(40, 23), &state);
        assert!(outcome.actions.is_empty());
    }

    #[test]
    fn test_click_on_popup_does_not_reach_map() {
        let mut state = AppState::new(
            crate::geo::MapView::default(),
            crate::config::Basemap::Low,
            crate::config::DisplayMode::Popup,
        );
        state.selection = Some(state.view.center);
        state.status = crate::state::ForecastStatus::Failure("Failed to fetch forecast.".into());
        let mut ui = rendered_ui(&state);

        let popup = ui.bus().area(UiId::Popup).unwrap();
        let outcome = ui.map_event(&left_click(popup.x + 2, popup.y + 1), &state);
        assert!(outcome.actions.is_empty());

        let scroll = EventKind::Scroll {
            column: popup.x + 2,
            row: popup.y + 1,
            delta: -1,
        };
        assert!(ui.map_event(&scroll, &state).actions.is_empty());

        // The rest of the map still takes clicks.
        let outcome = ui.map_event(&left_click(3, 3), &state);
        assert_emitted!(outcome.actions, Action::MapClick(_));

        // Once the popup closes, the same cell belongs to the map again.
        state.selection = None;
        state.status = crate::state::ForecastStatus::Idle;
        let mut render = RenderHarness::new(80, 24);
        render.render(|frame| ui.render(frame, SCREEN, &state));
        assert_eq!(ui.bus().area(UiId::Popup), None);
        assert_eq!(ui.bus().listener_count(EventType::Mouse), 1);

        let outcome = ui.map_event(&left_click(popup.x + 2, popup.y + 1), &state);
        assert_emitted!(outcome.actions, Action::MapClick(_));
    }

    #[test]
    fn test_global_keys() {
        let state = AppState::default();
        let mut ui = ForecastUi::new();

        let quit = ui.map_event(&EventKind::Key(char_key('q')), &state);
        assert_eq!(quit.actions, vec![Action::Quit]);

        let dismiss = ui.map_event(&key_event(KeyCode::Esc), &state);
        assert_eq!(dismiss.actions, vec![Action::ForecastDismiss]);

        let cycle = ui.map_event(&EventKind::Key(char_key('p')), &state);
        assert_eq!(cycle.actions, vec![Action::UiCycleDisplay]);

        let zoom = ui.map_event(&EventKind::Key(char_key('+')), &state);
        assert_eq!(zoom.actions, vec![Action::MapZoomIn]);
    }

    #[test]
    fn test_resize_forces_render() {
        let state = AppState::default();
        let mut ui = ForecastUi::new();

        let outcome = ui.map_event(&EventKind::Resize(100, 40), &state);
        assert!(outcome.needs_render);
        assert_eq!(outcome.actions, vec![Action::UiTerminalResize(100, 40)]);
    }
}
