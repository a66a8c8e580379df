//! Actions
//!
//! Prefix determines category (`Query*` -> "query", `Weather*` -> "weather",
//! `Suggest*` -> "suggest"). `Did` marks the result of an async task; every
//! result carries the [`RequestSeq`] of the request that produced it.

use wxlookup_provider::ErrorKind;

use crate::state::{Report, RequestSeq};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
pub enum Action {
    // ===== Query category =====
    /// Input text edited
    QueryChange(String),

    // ===== Search category =====
    /// Search button / Enter with no highlighted suggestion
    SearchSubmit,

    // ===== Weather category =====
    WeatherDidLoad { seq: RequestSeq, report: Report },

    WeatherDidError { seq: RequestSeq, kind: ErrorKind },

    // ===== Suggest category =====
    SuggestDidLoad { seq: RequestSeq, names: Vec<String> },

    SuggestDidError { seq: RequestSeq },

    /// Pick the suggestion at this index
    SuggestSelect(usize),

    SuggestHighlightNext,

    SuggestHighlightPrev,

    /// Close the dropdown without picking
    SuggestDismiss,

    // ===== Uncategorized (global) =====
    /// Periodic tick for loading animation
    Tick,

    Quit,
}
