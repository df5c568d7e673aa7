//! Reducer - pure function: (state, action) -> DispatchResult

use tracing::{error, info};
use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::api::FetchError;
use crate::effect::Effect;
use crate::state::{AppState, Notice, SignupField, LOADING_ANIM_CYCLE_TICKS};
use crate::validation::{validate_signup, SignupForm};

pub const SIGNUP_ACCEPTED: &str = "Signup details look good";

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather actions =====
        Action::WeatherSearch(city) => start_search(state, city),

        Action::WeatherRefresh => {
            let city = state.city.clone();
            start_search(state, city)
        }

        Action::WeatherDidLoad(report) => {
            state.weather = DataResource::Loaded(report);
            state.loaded_city = Some(state.city.clone());
            finish_fetch(state);
            DispatchResult::changed()
        }

        Action::WeatherDidReject(message) => {
            // Whatever was on screen before the search stays there
            if state.weather.is_loading() {
                state.weather = DataResource::Empty;
            }
            // Refresh must repeat the search that produced the shown report
            if state.weather.is_loaded() {
                if let Some(city) = state.loaded_city.clone() {
                    state.city = city;
                }
            }
            finish_fetch(state);
            state.notice = Some(Notice::error(message));
            DispatchResult::changed()
        }

        Action::WeatherDidError(message) => {
            error!(city = %state.city, %message, "error in fetching weather data");
            state.weather = DataResource::Empty;
            state.loaded_city = None;
            finish_fetch(state);
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchOpen => {
            state.search_mode = true;
            state.search_query.clear();
            DispatchResult::changed()
        }

        Action::SearchClose => {
            state.search_mode = false;
            state.search_query.clear();
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search_query = query;
            DispatchResult::changed()
        }

        Action::SearchQuerySubmit(query) => {
            state.search_mode = false;
            state.search_query.clear();
            start_search(state, query)
        }

        // ===== Signup actions =====
        Action::SignupOpen => {
            state.signup_mode = true;
            state.signup_focus = SignupField::default();
            DispatchResult::changed()
        }

        Action::SignupClose => {
            state.signup_mode = false;
            DispatchResult::changed()
        }

        Action::SignupFieldChange(field, value) => {
            state.signup.set(field, value);
            DispatchResult::changed()
        }

        Action::SignupFocusNext => {
            state.signup_focus = state.signup_focus.next();
            DispatchResult::changed()
        }

        Action::SignupFocusPrev => {
            state.signup_focus = state.signup_focus.prev();
            DispatchResult::changed()
        }

        Action::SignupSubmit => {
            match validate_signup(&state.signup) {
                Ok(()) => {
                    info!(
                        name = %state.signup.name.trim(),
                        email = %state.signup.email.trim(),
                        "signup accepted"
                    );
                    state.signup = SignupForm::default();
                    state.signup_focus = SignupField::default();
                    state.signup_mode = false;
                    state.notice = Some(Notice::info(SIGNUP_ACCEPTED));
                }
                Err(e) => {
                    state.notice = Some(Notice::error(e.to_string()));
                }
            }
            DispatchResult::changed()
        }

        // ===== Notice actions =====
        Action::NoticeDismiss => {
            if state.notice.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.loading_anim_active() {
                state.tick_count = state.tick_count.wrapping_add(1);
                if state.loading_anim_ticks_remaining > 0 {
                    state.loading_anim_ticks_remaining -= 1;
                }
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Idle → Fetching, or a notice when there is nothing to search for
fn start_search(state: &mut AppState, city: String) -> DispatchResult<Effect> {
    let city = city.trim().to_string();
    if city.is_empty() {
        state.notice = Some(Notice::error(FetchError::EmptyCity.to_string()));
        return DispatchResult::changed();
    }

    state.city = city.clone();
    if state.weather.is_loaded() {
        state.is_refreshing = true;
    } else {
        state.weather = DataResource::Loading;
    }
    state.tick_count = 0;
    state.loading_anim_ticks_remaining = 0;
    DispatchResult::changed_with(Effect::FetchWeather { city })
}

fn finish_fetch(state: &mut AppState) {
    state.is_refreshing = false;
    state.loading_anim_ticks_remaining = ticks_to_phase_zero(state.tick_count);
}

fn ticks_to_phase_zero(tick_count: u32) -> u32 {
    let cycle = LOADING_ANIM_CYCLE_TICKS.max(1);
    if tick_count == 0 {
        return cycle;
    }
    let remainder = tick_count % cycle;
    if remainder == 0 { 0 } else { cycle - remainder }
}
