//! Rendering of forecast states through the real components

use cropcast::components::{Component, ForecastPanel, ForecastPanelProps};
use cropcast::{
    AppState, Coordinate, DisplayMode, ForecastLocation, ForecastResult, ForecastStatus,
    ForecastUi, MapView,
};
use cropcast_core::testing::RenderHarness;
use ratatui::layout::Rect;

const PANEL: Rect = Rect {
    x: 0,
    y: 0,
    width: 60,
    height: 10,
};

const SCREEN: Rect = Rect {
    x: 0,
    y: 0,
    width: 90,
    height: 30,
};

fn sample_result() -> ForecastResult {
    serde_json::from_str(
        r#"{
            "location": {"lat": 14, "lon": 121},
            "dailyTemperatures": [30, 31, 29],
            "suggestions": ["rice", "corn"]
        }"#,
    )
    .unwrap()
}

fn render_panel(status: &ForecastStatus) -> String {
    let mut render = RenderHarness::new(PANEL.width, PANEL.height);
    render.render_to_string_plain(|frame| {
        ForecastPanel.render(frame, PANEL, ForecastPanelProps { status });
    })
}

fn render_ui(state: &AppState) -> String {
    let mut ui = ForecastUi::new();
    let mut render = RenderHarness::new(SCREEN.width, SCREEN.height);
    render.render_to_string_plain(|frame| ui.render(frame, SCREEN, state))
}

#[test]
fn success_renders_location_temperature_and_suggestions() {
    let output = render_panel(&ForecastStatus::Success(sample_result()));

    assert!(output.contains("14.00, 121.00"), "{output}");
    assert!(output.contains("30°C"), "{output}");
    assert!(output.contains("30°C  31°C  29°C"), "{output}");
    assert!(output.contains("• rice"), "{output}");
    assert!(output.contains("• corn"), "{output}");
}

#[test]
fn failure_renders_message_without_forecast() {
    let output = render_panel(&ForecastStatus::Failure("Failed to fetch forecast.".into()));

    assert!(output.contains("Failed to fetch forecast."));
    assert!(!output.contains("°C"));
    assert!(!output.contains("Suggestions"));
    assert!(!output.contains("rice"));
}

#[test]
fn idle_and_loading_hints() {
    let idle = render_panel(&ForecastStatus::Idle);
    assert!(idle.contains("Click the map"));

    let loading = render_panel(&ForecastStatus::Loading {
        at: Coordinate { lon: 120.98, lat: 14.6 },
    });
    assert!(loading.contains("Fetching forecast for 14.60, 120.98"));
}

#[test]
fn inline_mode_shows_panel_under_map() {
    let mut state = AppState::default();
    state.selection = Some(state.view.center);
    state.status = ForecastStatus::Success(sample_result());

    let output = render_ui(&state);
    let rows: Vec<&str> = output.lines().collect();

    let panel_row = rows.iter().position(|row| row.contains("Forecast")).unwrap();
    assert!(panel_row > SCREEN.height as usize / 2);
    assert!(output.contains("• rice"));
    assert!(rows[rows.len() - 1].contains("quit"));
}

#[test]
fn popup_mode_draws_next_to_selection() {
    let mut state = AppState::new(
        MapView::default(),
        cropcast::Basemap::Low,
        DisplayMode::Popup,
    );
    state.terminal_size = (SCREEN.width, SCREEN.height);
    state.selection = Some(state.view.center);
    state.status = ForecastStatus::Success(sample_result());

    let output = render_ui(&state);
    let rows: Vec<&str> = output.lines().collect();

    // The map is centered on the selection, the popup opens just below it.
    let popup_row = rows.iter().position(|row| row.contains("Forecast")).unwrap();
    assert!(popup_row >= SCREEN.height as usize / 2 - 1);
    assert!(popup_row <= SCREEN.height as usize / 2 + 1);
    assert!(output.contains("• rice"));
}

#[test]
fn popup_hidden_when_selection_is_off_screen() {
    let mut state = AppState::new(
        MapView::default(),
        cropcast::Basemap::Low,
        DisplayMode::Popup,
    );
    state.selection = Some(Coordinate { lon: -60.0, lat: 14.0 });
    state.status = ForecastStatus::Failure("Failed to fetch forecast.".into());

    let output = render_ui(&state);
    assert!(!output.contains("Failed to fetch forecast."));
}

#[test]
fn echoed_location_renders_in_panel_and_popup() {
    // Placement follows the clicked cell; the text shows the echoed location.
    let mut result = sample_result();
    result.location = ForecastLocation { lat: -33.0, lon: 18.0 };

    let mut state = AppState::new(MapView::default(), cropcast::Basemap::Low, DisplayMode::Both);
    state.selection = Some(state.view.center);
    state.status = ForecastStatus::Success(result);

    let output = render_ui(&state);
    assert!(output.matches("-33.00, 18.00").count() >= 2);
}
