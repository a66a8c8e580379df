use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

use super::Component;
use crate::action::Action;
use crate::chart::ChartData;

pub struct ForecastChartProps<'a> {
    pub data: &'a ChartData,
}

/// Line chart of the daily average temperature
pub struct ForecastChart;

impl ForecastChart {
    pub const HEIGHT: u16 = 12;
}

impl Component<Action> for ForecastChart {
    type Props<'a> = ForecastChartProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let data = props.data;
        if data.is_empty() {
            return;
        }

        let points = data.points();
        let dataset = Dataset::default()
            .name("avg °C")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points);

        let x_labels: Vec<Span> = data
            .labels
            .iter()
            .map(|label| Span::raw(ChartData::short_label(label).to_string()))
            .collect();

        let [y_min, y_max] = data.y_bounds();
        let y_labels = vec![
            Span::raw(format!("{:.0}", y_min)),
            Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
            Span::raw(format!("{:.0}", y_max)),
        ];

        let chart = Chart::new(vec![dataset])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
                    .title(" 7-day forecast ")
                    .title_style(Style::default().fg(Color::Cyan).bold()),
            )
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds(data.x_bounds())
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title("°C")
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([y_min, y_max])
                    .labels(y_labels),
            );

        frame.render_widget(chart, area);
    }
}
