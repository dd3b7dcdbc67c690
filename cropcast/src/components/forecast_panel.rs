//! Forecast panel: the inline rendering of the forecast status
//!
//! [`forecast_lines`] is shared with the popup so both views always show
//! the same content.

use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::{ForecastResult, ForecastStatus};

const LABEL_WIDTH: usize = 13;

fn label(text: &str) -> Span<'static> {
    Span::styled(
        format!("{:<width$}", text, width = LABEL_WIDTH),
        Style::default().fg(Color::DarkGray),
    )
}

fn celsius(t: f64) -> String {
    format!("{t}°C")
}

fn result_lines(result: &ForecastResult) -> Vec<Line<'static>> {
    let location = format!("{:.2}, {:.2}", result.location.lat, result.location.lon);
    let temperature = result
        .representative_temperature()
        .map_or_else(|| "n/a".to_string(), celsius);

    let mut lines = vec![
        Line::from(vec![label("Location"), Span::raw(location).bold()]),
        Line::from(vec![
            label("Temperature"),
            Span::styled(temperature, Style::default().fg(Color::Yellow).bold()),
        ]),
    ];

    if result.daily_temperatures.len() > 1 {
        let series = result
            .daily_temperatures
            .iter()
            .map(|t| celsius(*t))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(Line::from(vec![label("Daily"), Span::raw(series)]));
    }

    if result.suggestions.is_empty() {
        lines.push(Line::from(vec![
            label("Suggestions"),
            Span::styled("none", Style::default().fg(Color::DarkGray)),
        ]));
    } else {
        lines.push(Line::from(label("Suggestions")));
        lines.extend(result.suggestions.iter().map(|crop| {
            Line::from(vec![
                Span::styled("  • ", Style::default().fg(Color::Green)),
                Span::raw(crop.clone()),
            ])
        }));
    }
    lines
}

/// Text for a forecast status.
pub fn forecast_lines(status: &ForecastStatus) -> Vec<Line<'static>> {
    match status {
        ForecastStatus::Idle => vec![Line::from(Span::styled(
            "Click the map to get a forecast for that location.",
            Style::default().fg(Color::DarkGray),
        ))],
        ForecastStatus::Loading { at } => vec![Line::from(vec![
            Span::styled("⟳ ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("Fetching forecast for {at}…")),
        ])],
        ForecastStatus::Success(result) => result_lines(result),
        ForecastStatus::Failure(message) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red).bold(),
        ))],
    }
}

pub struct ForecastPanel;

pub struct ForecastPanelProps<'a> {
    pub status: &'a ForecastStatus,
}

impl Component<Action> for ForecastPanel {
    type Props<'a> = ForecastPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(" Forecast ", Style::default().fg(Color::Cyan).bold()));

        let paragraph = Paragraph::new(forecast_lines(props.status))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
