//! Terminal weather lookup
//!
//! Built on tui-dispatch's effect runtime:
//! 1. Event -> [`components::LookupScreen`] -> [`action::Action`]s
//! 2. [`reducer::reducer`] updates [`state::AppState`] and declares [`effect::Effect`]s
//! 3. Effects run as keyed tasks against a [`wxlookup_provider::WeatherProvider`]
//! 4. Their results come back as `*Did*` actions tagged with a request token
//!
//! Three tiers ([`state::Tier`]) select how much of the UI is active.

pub mod action;
pub mod chart;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod logging;
pub mod reducer;
pub mod state;

pub use error::AppError;
