//! Actions for the weather panel, search and signup overlays

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{SignupField, WeatherReport};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Weather category =====
    /// Intent: look up weather for a city (triggers async task)
    WeatherSearch(String),

    /// Intent: repeat the search for the current city
    WeatherRefresh,

    /// Result: both endpoints answered and the report was built
    WeatherDidLoad(WeatherReport),

    /// Result: the provider answered with an error status and message
    WeatherDidReject(String),

    /// Result: transport or payload failure
    WeatherDidError(String),

    // ===== Search category =====
    /// Open the city search overlay
    SearchOpen,

    /// Close search overlay (cancel)
    SearchClose,

    /// Search query text changed
    SearchQueryChange(String),

    /// Submit the typed city
    SearchQuerySubmit(String),

    // ===== Signup category =====
    /// Open the signup form
    SignupOpen,

    /// Close the signup form, keeping what was typed
    SignupClose,

    /// Focused field text changed
    SignupFieldChange(SignupField, String),

    /// Move focus to the next field
    SignupFocusNext,

    /// Move focus to the previous field
    SignupFocusPrev,

    /// Validate and submit the form
    SignupSubmit,

    // ===== Notice category =====
    /// Acknowledge the blocking notice
    NoticeDismiss,

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Periodic tick for loading animation
    Tick,

    /// Exit the application
    Quit,
}
