//! Forecast chart dataset
//!
//! Derived from the forecast days only; the chart widget plots `values` against
//! the day index and labels the x axis with `labels`.

use wxlookup_provider::ForecastDay;

/// Chart-ready forecast series
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartData {
    /// Forecast dates, in provider order
    pub labels: Vec<String>,
    /// Average temperature per day, same order as `labels`
    pub values: Vec<f64>,
}

impl ChartData {
    pub fn from_forecast(days: &[ForecastDay]) -> Self {
        Self {
            labels: days.iter().map(|day| day.date.clone()).collect(),
            values: days.iter().map(|day| day.avg_temp_c).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(index, value)` pairs for a ratatui `Dataset`
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.values.len().saturating_sub(1).max(1) as f64]
    }

    /// Min/max of the series padded by one degree
    pub fn y_bounds(&self) -> [f64; 2] {
        let (min, max) = self
            .values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        if min > max {
            return [0.0, 1.0];
        }
        [(min - 1.0).floor(), (max + 1.0).ceil()]
    }

    /// Short axis label: `MM-DD` for provider dates, the raw label otherwise
    pub fn short_label(label: &str) -> &str {
        match label.split_once('-') {
            Some((year, rest)) if year.len() == 4 && rest.len() == 5 => rest,
            _ => label,
        }
    }
}
