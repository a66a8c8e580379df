use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::{Component, ForecastChart, ForecastChartProps, SPINNERS};
use crate::action::Action;
use crate::chart::ChartData;
use crate::state::{AppState, Fetch, Report};

pub struct WeatherPanelProps<'a> {
    pub state: &'a AppState,
}

/// Error line, weather summary and (forecast tier) chart
pub struct WeatherPanel;

enum WeatherView<'a> {
    Failed(&'a str),
    Ready(&'a Report),
    Loading,
    Empty,
}

impl<'a> WeatherView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        match &state.weather {
            Fetch::Failed(message) => WeatherView::Failed(message),
            Fetch::Loaded(report) => WeatherView::Ready(report),
            Fetch::Loading => WeatherView::Loading,
            Fetch::Idle => WeatherView::Empty,
        }
    }
}

impl Component<Action> for WeatherPanel {
    type Props<'a> = WeatherPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        match WeatherView::from_state(state) {
            WeatherView::Failed(message) => {
                let lines = vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        message.to_string(),
                        Style::default().fg(Color::Red).bold(),
                    ))
                    .centered(),
                ];
                frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
            }
            WeatherView::Ready(report) => {
                let summary = summary_lines(report);
                let chart = report
                    .forecast
                    .as_deref()
                    .map(ChartData::from_forecast)
                    .filter(|data| !data.is_empty());

                let summary_height = summary.len() as u16;
                let mut constraints = vec![Constraint::Length(summary_height)];
                if chart.is_some() {
                    constraints.push(Constraint::Length(ForecastChart::HEIGHT));
                }
                let chunks = Layout::vertical(constraints).flex(Flex::Start).split(area);

                frame.render_widget(Paragraph::new(summary), chunks[0]);
                if let (Some(data), Some(chart_area)) = (chart, chunks.get(1)) {
                    ForecastChart.render(frame, *chart_area, ForecastChartProps { data: &data });
                }
            }
            WeatherView::Loading => {
                let spinner = SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()];
                let dots = ".".repeat((state.tick_count as usize / 3) % 4);
                let line = Line::from(vec![
                    Span::styled(spinner, Style::default().fg(Color::Cyan)),
                    Span::styled(
                        format!(" Fetching weather{:<3}", dots),
                        Style::default().fg(Color::Gray),
                    ),
                ])
                .centered();
                frame.render_widget(Paragraph::new(vec![Line::from(""), line]), area);
            }
            WeatherView::Empty => {
                let line = Line::from(vec![
                    Span::styled("Type a city and press ", Style::default().fg(Color::DarkGray)),
                    Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
                    Span::styled(" to search", Style::default().fg(Color::DarkGray)),
                ])
                .centered();
                frame.render_widget(Paragraph::new(vec![Line::from(""), line]), area);
            }
        }
    }
}

fn summary_lines(report: &Report) -> Vec<Line<'static>> {
    let current = &report.current;
    let place = [current.region.as_str(), current.country.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            current.location.clone(),
            Style::default().fg(Color::White).bold(),
        ))
        .centered(),
    ];
    if !place.is_empty() {
        lines.push(Line::from(Span::styled(place, label)).centered());
    }
    lines.extend([
        Line::from(Span::styled(
            current.condition.clone(),
            Style::default().fg(Color::Gray),
        ))
        .centered(),
        Line::from(vec![
            Span::styled("Icon: ", label),
            Span::raw(current.icon.clone()),
        ])
        .centered(),
        Line::from(""),
        Line::from(Span::styled(
            format!("Temperature: {}°C", current.temp_c),
            Style::default().fg(temp_to_color(current.temp_c)).bold(),
        ))
        .centered(),
        Line::from(vec![
            Span::styled("Humidity: ", label),
            Span::raw(format!("{}%", current.humidity)),
            Span::styled("   Wind: ", label),
            Span::raw(format!("{} kph", current.wind_kph)),
        ])
        .centered(),
        Line::from(Span::styled(
            format!("Last updated: {}", current.last_updated),
            label,
        ))
        .centered(),
    ]);
    lines
}

/// Get temperature-based color
fn temp_to_color(celsius: f64) -> Color {
    match celsius as i32 {
        ..=-10 => Color::Rgb(150, 200, 255),  // Very cold - light blue
        -9..=0 => Color::Rgb(100, 180, 255),  // Cold - blue
        1..=10 => Color::Rgb(100, 220, 200),  // Cool - cyan
        11..=20 => Color::Rgb(150, 230, 150), // Mild - green
        21..=30 => Color::Rgb(255, 220, 100), // Warm - yellow
        31..=40 => Color::Rgb(255, 150, 80),  // Hot - orange
        _ => Color::Rgb(255, 100, 100),       // Very hot - red
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_colors_are_banded() {
        assert_eq!(temp_to_color(-15.0), Color::Rgb(150, 200, 255));
        assert_eq!(temp_to_color(15.0), Color::Rgb(150, 230, 150));
        assert_eq!(temp_to_color(45.0), Color::Rgb(255, 100, 100));
    }

    #[test]
    fn test_summary_skips_empty_place_line() {
        let report = Report {
            current: wxlookup_provider::CurrentConditions {
                location: "Null Island".into(),
                ..Default::default()
            },
            forecast: None,
        };
        let lines = summary_lines(&report);
        // blank, name, condition, icon, blank, temp, humidity/wind, updated
        assert_eq!(lines.len(), 8);
    }
}
