use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;

pub struct HelpBar;

pub struct HelpBarProps {
    /// Show the dropdown keys
    pub with_suggestions: bool,
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let key = Style::default().fg(Color::Cyan).bold();
        let hint = Style::default().fg(Color::DarkGray);

        let mut spans = vec![
            Span::styled(" Enter", key),
            Span::styled(" search  ", hint),
        ];
        if props.with_suggestions {
            spans.extend([
                Span::styled("↑/↓", key),
                Span::styled(" suggestions  ", hint),
                Span::styled("Esc", key),
                Span::styled(" close/quit  ", hint),
            ]);
        } else {
            spans.extend([Span::styled("Esc", key), Span::styled(" quit  ", hint)]);
        }
        spans.extend([Span::styled("Ctrl+C", key), Span::styled(" quit ", hint)]);

        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
