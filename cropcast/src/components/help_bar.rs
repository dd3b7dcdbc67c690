use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::config::DisplayMode;

pub struct HelpBar;

pub struct HelpBarProps {
    pub display: DisplayMode,
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan).bold());
        let text = |t: String| Span::styled(t, Style::default().fg(Color::DarkGray));

        let help = Line::from(vec![
            key(" click"),
            text(" forecast  ".into()),
            key("←↑↓→"),
            text(" pan  ".into()),
            key("+/-"),
            text(" zoom  ".into()),
            key("c"),
            text(" center  ".into()),
            key("r"),
            text(" refresh  ".into()),
            key("p"),
            text(format!(" {}  ", props.display.label())),
            key("esc"),
            text(" dismiss  ".into()),
            key("q"),
            text(" quit ".into()),
        ])
        .centered();
        frame.render_widget(Paragraph::new(help), area);
    }
}
