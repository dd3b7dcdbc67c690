pub mod forecast_panel;
pub mod forecast_popup;
pub mod help_bar;
pub mod map_surface;

// Re-export core Component trait
pub use cropcast_core::Component;

pub use forecast_panel::{forecast_lines, ForecastPanel, ForecastPanelProps};
pub use forecast_popup::{popup_rect, ForecastPopup, ForecastPopupProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use map_surface::{MapSurface, MapSurfaceProps};

/// Components that own listeners on the event bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiId {
    Map,
    /// Absorbs pointer events over the open popup
    Popup,
}
