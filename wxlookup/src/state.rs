//! Application state - single source of truth
//!
//! Components receive `&AppState` through props; only the reducer mutates it.
//! Each asynchronous concern (weather, suggestions) is one tagged [`Fetch`]
//! value, so a stale result can never sit next to a fresh error.

use clap::ValueEnum;
use tui_dispatch::debug::{DebugSection, DebugState};
use wxlookup_provider::{CurrentConditions, ForecastDay};

/// Loading animation tick (`Action::Tick`) interval
pub const LOADING_ANIM_TICK_MS: u64 = 100;

/// Shown when search is submitted with an empty or whitespace-only city
pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name.";

/// Shown for every failed weather fetch, whatever the cause
pub const FETCH_ERROR_MESSAGE: &str = "Could not fetch weather data. Please try again.";

/// Capability tier, selected at start-up
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Tier {
    /// Input, search and current conditions
    Basic,
    /// Basic plus suggestion dropdown
    Autocomplete,
    /// Autocomplete plus 7-day forecast chart
    #[default]
    Forecast,
}

impl Tier {
    pub fn has_suggestions(self) -> bool {
        matches!(self, Tier::Autocomplete | Tier::Forecast)
    }

    pub fn has_forecast(self) -> bool {
        matches!(self, Tier::Forecast)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tier::Basic => "basic",
            Tier::Autocomplete => "autocomplete",
            Tier::Forecast => "forecast",
        }
    }
}

/// Lifecycle of one asynchronous request slot
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Fetch<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Fetch<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Fetch::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Fetch::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Fetch::Failed(message) => Some(message),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Fetch::Idle => "idle",
            Fetch::Loading => "loading",
            Fetch::Loaded(_) => "loaded",
            Fetch::Failed(_) => "failed",
        }
    }
}

/// Request token; only a completion carrying the latest token is applied
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(pub u64);

impl RequestSeq {
    /// Advance to a fresh token, invalidating every earlier one
    pub fn bump(&mut self) -> RequestSeq {
        self.0 = self.0.wrapping_add(1);
        *self
    }
}

/// A successful weather lookup
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub current: CurrentConditions,
    /// Daily forecast, present only in the forecast tier
    pub forecast: Option<Vec<ForecastDay>>,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug)]
pub struct AppState {
    pub tier: Tier,

    /// Text typed by the user; never cleared automatically
    pub query: String,

    pub weather: Fetch<Report>,
    pub weather_seq: RequestSeq,

    /// Suggestion dropdown; failures collapse to `Idle`
    pub suggestions: Fetch<Vec<String>>,
    pub suggest_seq: RequestSeq,

    /// Keyboard highlight inside the dropdown
    pub highlighted: Option<usize>,

    /// Animation frame counter (for loading spinner)
    pub tick_count: u32,
}

impl AppState {
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            query: String::new(),
            weather: Fetch::Idle,
            weather_seq: RequestSeq::default(),
            suggestions: Fetch::Idle,
            suggest_seq: RequestSeq::default(),
            highlighted: None,
            tick_count: 0,
        }
    }

    /// Suggestions to show in the dropdown (empty when closed)
    pub fn visible_suggestions(&self) -> &[String] {
        self.suggestions.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        self.weather.is_loading()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Tier::default())
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        let mut weather = DebugSection::new("Weather")
            .entry("state", self.weather.label())
            .entry("seq", self.weather_seq.0.to_string());
        if let Some(report) = self.weather.loaded() {
            weather.push_entry("location", &report.current.location);
            weather.push_entry("temp_c", report.current.temp_c.to_string());
            weather.push_entry(
                "forecast_days",
                report
                    .forecast
                    .as_ref()
                    .map_or_else(|| "-".to_string(), |days| days.len().to_string()),
            );
        }
        if let Some(error) = self.weather.error() {
            weather.push_entry("error", error);
        }

        vec![
            DebugSection::new("Input")
                .entry("tier", self.tier.name())
                .entry("query", format!("{:?}", self.query)),
            weather,
            DebugSection::new("Suggestions")
                .entry("state", self.suggestions.label())
                .entry("seq", self.suggest_seq.0.to_string())
                .entry("count", self.visible_suggestions().len().to_string())
                .entry("highlighted", format!("{:?}", self.highlighted)),
        ]
    }
}
