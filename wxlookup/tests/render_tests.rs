//! Whole-screen renders driven through the reducer

use tui_dispatch::testing::*;
use wxlookup::action::Action;
use wxlookup::components::{Component, LookupScreen, LookupScreenProps};
use wxlookup::reducer::reducer;
use wxlookup::state::{AppState, EMPTY_CITY_MESSAGE, FETCH_ERROR_MESSAGE, Report, Tier};
use wxlookup_provider::{CurrentConditions, ErrorKind, ForecastDay};

fn render(state: &AppState) -> String {
    let mut screen = LookupScreen::new();
    let mut render = RenderHarness::new(80, 40);
    render.render_to_string_plain(|frame| {
        screen.render(
            frame,
            frame.area(),
            LookupScreenProps {
                state,
                is_focused: true,
            },
        );
    })
}

fn oslo() -> CurrentConditions {
    CurrentConditions {
        location: "Oslo".into(),
        region: "Oslo".into(),
        country: "Norway".into(),
        condition: "Light snow".into(),
        icon: "//cdn.weatherapi.com/weather/64x64/day/326.png".into(),
        temp_c: 5.5,
        humidity: 81,
        wind_kph: 13.7,
        last_updated: "2024-03-07 10:15".into(),
    }
}

fn week() -> Vec<ForecastDay> {
    (1..=7)
        .map(|d| ForecastDay {
            date: format!("2024-03-{:02}", d),
            avg_temp_c: f64::from(d) - 2.0,
        })
        .collect()
}

/// Type `city`, submit, and resolve the fetch with `report`
fn searched(tier: Tier, city: &str, report: Report) -> AppState {
    let mut state = AppState::new(tier);
    reducer(&mut state, Action::QueryChange(city.into()));
    reducer(&mut state, Action::SearchSubmit);
    let seq = state.weather_seq;
    reducer(&mut state, Action::WeatherDidLoad { seq, report });
    state
}

#[test]
fn test_empty_submit_shows_validation_message() {
    let mut state = AppState::new(Tier::Basic);
    reducer(&mut state, Action::QueryChange("   ".into()));
    reducer(&mut state, Action::SearchSubmit);

    let output = render(&state);
    assert!(output.contains(EMPTY_CITY_MESSAGE));
}

#[test]
fn test_current_conditions_are_shown_verbatim() {
    let state = searched(
        Tier::Basic,
        "Oslo",
        Report {
            current: oslo(),
            forecast: None,
        },
    );

    let output = render(&state);
    assert!(output.contains("Oslo, Norway"));
    assert!(output.contains("Light snow"));
    assert!(output.contains("//cdn.weatherapi.com/weather/64x64/day/326.png"));
    assert!(output.contains("Temperature: 5.5°C"));
    assert!(output.contains("Humidity: 81%"));
    assert!(output.contains("Wind: 13.7 kph"));
    assert!(output.contains("Last updated: 2024-03-07 10:15"));
    assert!(!output.contains("7-day forecast"));
}

#[test]
fn test_failed_fetch_shows_fixed_message() {
    let mut state = AppState::new(Tier::Forecast);
    reducer(&mut state, Action::QueryChange("Atlantis".into()));
    reducer(&mut state, Action::SearchSubmit);
    let seq = state.weather_seq;
    reducer(
        &mut state,
        Action::WeatherDidError {
            seq,
            kind: ErrorKind::Status(400),
        },
    );

    let output = render(&state);
    assert!(output.contains(FETCH_ERROR_MESSAGE));
    assert!(!output.contains("Temperature"));
}

#[test]
fn test_suggestions_render_in_order_under_input() {
    let mut state = AppState::new(Tier::Autocomplete);
    reducer(&mut state, Action::QueryChange("San".into()));
    let seq = state.suggest_seq;
    reducer(
        &mut state,
        Action::SuggestDidLoad {
            seq,
            names: vec![
                "San Francisco".into(),
                "San Diego".into(),
                "Santiago".into(),
            ],
        },
    );

    let output = render(&state);
    let francisco = output.find("San Francisco").unwrap();
    let diego = output.find("San Diego").unwrap();
    let santiago = output.find("Santiago").unwrap();
    assert!(francisco < diego && diego < santiago);
}

#[test]
fn test_basic_tier_never_shows_suggestions() {
    let mut state = AppState::new(Tier::Basic);
    reducer(&mut state, Action::QueryChange("San".into()));

    let output = render(&state);
    assert!(!output.contains("San Francisco"));
    assert!(output.contains("(basic)"));
}

#[test]
fn test_forecast_tier_draws_chart() {
    let state = searched(
        Tier::Forecast,
        "Oslo",
        Report {
            current: oslo(),
            forecast: Some(week()),
        },
    );

    let output = render(&state);
    assert!(output.contains("Temperature: 5.5°C"));
    assert!(output.contains("7-day forecast"));
    assert!(output.contains("03-01"));
}

#[test]
fn test_later_search_replaces_earlier_result() {
    let mut state = searched(
        Tier::Basic,
        "Oslo",
        Report {
            current: oslo(),
            forecast: None,
        },
    );

    let stale = state.weather_seq;
    reducer(&mut state, Action::QueryChange("Bergen".into()));
    reducer(&mut state, Action::SearchSubmit);
    let fresh = state.weather_seq;

    let bergen = CurrentConditions {
        location: "Bergen".into(),
        region: "Vestland".into(),
        ..oslo()
    };
    reducer(
        &mut state,
        Action::WeatherDidLoad {
            seq: fresh,
            report: Report {
                current: bergen,
                forecast: None,
            },
        },
    );
    // late result of the first search
    reducer(
        &mut state,
        Action::WeatherDidLoad {
            seq: stale,
            report: Report {
                current: oslo(),
                forecast: None,
            },
        },
    );

    let output = render(&state);
    assert!(output.contains("Bergen"));
    assert!(!output.contains("Oslo"));
}
