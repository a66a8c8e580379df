//! Effects - side effects declared by the reducer
//!
//! The reducer stays pure and returns [`Effect`]s; [`EffectHandler`] turns them
//! into keyed tasks on the runtime's task manager. The async bodies are plain
//! functions that return the result [`Action`], so they can be driven without
//! a terminal.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use tui_dispatch::{TaskKey, TaskManager};
use wxlookup_provider::{FORECAST_DAYS, WeatherProvider};

use crate::action::Action;
use crate::state::{Report, RequestSeq};

/// Task key for weather fetches; a new fetch aborts the previous one
pub const WEATHER_TASK: &str = "weather";

/// Task key for suggestion lookups
pub const SUGGEST_TASK: &str = "suggest";

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current conditions, plus the forecast when `with_forecast`
    FetchWeather {
        seq: RequestSeq,
        city: String,
        with_forecast: bool,
    },

    /// Look up autocomplete suggestions for a non-empty query
    FetchSuggestions { seq: RequestSeq, query: String },

    /// Abort an in-flight suggestion lookup
    CancelSuggestions,

    /// Abort an in-flight weather fetch
    CancelWeather,
}

/// Runs effects as keyed tasks; a new task under the same key aborts the old one
pub struct EffectHandler {
    provider: Arc<dyn WeatherProvider>,
    suggest_debounce: Option<Duration>,
}

impl EffectHandler {
    pub fn new(provider: Arc<dyn WeatherProvider>, suggest_debounce: Option<Duration>) -> Self {
        Self {
            provider,
            suggest_debounce,
        }
    }

    pub fn handle(&self, effect: Effect, tasks: &mut TaskManager<Action>) {
        match effect {
            Effect::FetchWeather {
                seq,
                city,
                with_forecast,
            } => {
                let provider = Arc::clone(&self.provider);
                tasks.spawn(WEATHER_TASK, fetch_weather(provider, seq, city, with_forecast));
            }
            Effect::FetchSuggestions { seq, query } => {
                let provider = Arc::clone(&self.provider);
                let task = fetch_suggestions(provider, seq, query);
                match self.suggest_debounce {
                    Some(delay) => tasks.debounce(SUGGEST_TASK, delay, task),
                    None => tasks.spawn(SUGGEST_TASK, task),
                };
            }
            Effect::CancelSuggestions => {
                tasks.cancel(&TaskKey::new(SUGGEST_TASK));
            }
            Effect::CancelWeather => {
                tasks.cancel(&TaskKey::new(WEATHER_TASK));
            }
        }
    }
}

pub async fn fetch_weather(
    provider: Arc<dyn WeatherProvider>,
    seq: RequestSeq,
    city: String,
    with_forecast: bool,
) -> Action {
    debug!(seq = seq.0, %city, with_forecast, "fetching weather");

    let result = if with_forecast {
        provider
            .forecast(&city, FORECAST_DAYS)
            .await
            .map(|report| Report {
                current: report.current,
                forecast: Some(report.days),
            })
    } else {
        provider.current(&city).await.map(|current| Report {
            current,
            forecast: None,
        })
    };

    match result {
        Ok(report) => Action::WeatherDidLoad { seq, report },
        Err(e) => {
            warn!(seq = seq.0, %city, kind = %e.kind(), error = %e, "weather fetch failed");
            Action::WeatherDidError {
                seq,
                kind: e.kind(),
            }
        }
    }
}

pub async fn fetch_suggestions(
    provider: Arc<dyn WeatherProvider>,
    seq: RequestSeq,
    query: String,
) -> Action {
    match provider.search(&query).await {
        Ok(names) => Action::SuggestDidLoad { seq, names },
        Err(e) => {
            warn!(seq = seq.0, %query, error = %e, "suggestion lookup failed");
            Action::SuggestDidError { seq }
        }
    }
}
