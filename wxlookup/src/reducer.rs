//! Reducer - pure function: (state, action) -> state + effects

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, EMPTY_CITY_MESSAGE, FETCH_ERROR_MESSAGE, Fetch};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Input =====
        Action::QueryChange(text) => {
            state.query = text;

            if !state.tier.has_suggestions() {
                return DispatchResult::changed();
            }

            let seq = state.suggest_seq.bump();
            state.highlighted = None;
            let trimmed = state.query.trim();
            if trimmed.is_empty() {
                state.suggestions = Fetch::Idle;
                DispatchResult::changed_with(Effect::CancelSuggestions)
            } else {
                let query = trimmed.to_string();
                state.suggestions = Fetch::Loading;
                DispatchResult::changed_with(Effect::FetchSuggestions { seq, query })
            }
        }

        // ===== Search =====
        Action::SearchSubmit => {
            let city = state.query.trim();
            if city.is_empty() {
                // Invalidate any in-flight lookup so it cannot replace the message
                state.weather_seq.bump();
                state.weather = Fetch::Failed(EMPTY_CITY_MESSAGE.to_string());
                return DispatchResult::changed_with(Effect::CancelWeather);
            }

            let effect = Effect::FetchWeather {
                seq: state.weather_seq.bump(),
                city: city.to_string(),
                with_forecast: state.tier.has_forecast(),
            };
            state.weather = Fetch::Loading;

            if close_suggestions(state) {
                DispatchResult::changed_with_many(vec![effect, Effect::CancelSuggestions])
            } else {
                DispatchResult::changed_with(effect)
            }
        }

        // ===== Weather results =====
        Action::WeatherDidLoad { seq, report } => {
            if seq != state.weather_seq {
                return DispatchResult::unchanged();
            }
            state.weather = Fetch::Loaded(report);
            DispatchResult::changed()
        }

        Action::WeatherDidError { seq, .. } => {
            if seq != state.weather_seq {
                return DispatchResult::unchanged();
            }
            state.weather = Fetch::Failed(FETCH_ERROR_MESSAGE.to_string());
            DispatchResult::changed()
        }

        // ===== Suggestions =====
        Action::SuggestDidLoad { seq, names } => {
            if seq != state.suggest_seq {
                return DispatchResult::unchanged();
            }
            state.suggestions = Fetch::Loaded(names);
            state.highlighted = None;
            DispatchResult::changed()
        }

        Action::SuggestDidError { seq } => {
            if seq != state.suggest_seq {
                return DispatchResult::unchanged();
            }
            state.suggestions = Fetch::Idle;
            state.highlighted = None;
            DispatchResult::changed()
        }

        Action::SuggestSelect(index) => {
            let Some(name) = state.visible_suggestions().get(index).cloned() else {
                return DispatchResult::unchanged();
            };
            state.query = name;
            close_suggestions(state);
            DispatchResult::changed()
        }

        Action::SuggestHighlightNext => {
            let count = state.visible_suggestions().len();
            if count == 0 {
                return DispatchResult::unchanged();
            }
            state.highlighted = Some(match state.highlighted {
                Some(i) => (i + 1) % count,
                None => 0,
            });
            DispatchResult::changed()
        }

        Action::SuggestHighlightPrev => {
            let count = state.visible_suggestions().len();
            if count == 0 {
                return DispatchResult::unchanged();
            }
            state.highlighted = Some(match state.highlighted {
                Some(0) | None => count - 1,
                Some(i) => i - 1,
            });
            DispatchResult::changed()
        }

        Action::SuggestDismiss => {
            if close_suggestions(state) {
                DispatchResult::changed_with(Effect::CancelSuggestions)
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Global =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            if state.is_loading() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // Handled by the runtime
        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Clear the dropdown and invalidate any in-flight lookup.
///
/// Returns whether there was anything to close.
fn close_suggestions(state: &mut AppState) -> bool {
    let was_open = !matches!(state.suggestions, Fetch::Idle);
    state.suggest_seq.bump();
    state.suggestions = Fetch::Idle;
    state.highlighted = None;
    was_open
}
