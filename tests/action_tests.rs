//! Action and state tests using TestHarness
//!
//! Reducer transitions are driven through an EffectStore; component key
//! handling goes through TestHarness::send_keys.

use tui_dispatch::testing::*;
use tui_dispatch::{
    DataResource, EffectStore, NumericComponentId, assert_emitted, assert_not_emitted,
};
use weathervue::{
    action::Action,
    components::{Component, WeatherDisplay, WeatherDisplayProps},
    effect::Effect,
    icons::Icon,
    reducer::{SIGNUP_ACCEPTED, reducer},
    state::{AppState, CurrentWeatherView, ForecastDayView, NoticeKind, SignupField, WeatherReport},
};

fn report(location: &str, temperature: i32) -> WeatherReport {
    WeatherReport {
        current: CurrentWeatherView {
            humidity: 55,
            wind_speed: 4.1,
            temperature,
            location: location.into(),
            icon: Icon::Cloud,
        },
        forecast: vec![
            ForecastDayView {
                day: "Tuesday".into(),
                temperature: 18,
                icon: Icon::Rain,
            },
            ForecastDayView {
                day: "Wednesday".into(),
                temperature: 20,
                icon: Icon::Clear,
            },
        ],
    }
}

fn fill_signup(values: [&str; 5]) -> Vec<Action> {
    SignupField::ALL
        .into_iter()
        .zip(values)
        .map(|(field, value)| Action::SignupFieldChange(field, value.into()))
        .collect()
}

#[test]
fn test_reducer_weather_search() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(store.state().weather.is_empty());

    let result = store.dispatch(Action::WeatherSearch("Paris".into()));
    assert!(result.changed, "State should change");
    assert!(store.state().weather.is_loading());
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(
        &result.effects[0],
        Effect::FetchWeather { city } if city == "Paris"
    ));
}

#[test]
fn test_reducer_weather_load() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    let paris = report("Paris", 21);

    store.dispatch(Action::WeatherSearch("Paris".into()));
    store.dispatch(Action::WeatherDidLoad(paris.clone()));

    assert!(store.state().weather.is_loaded());
    assert_eq!(store.state().weather.data(), Some(&paris));
    assert!(!store.state().is_fetching());
}

#[test]
fn test_refresh_repeats_active_city() {
    let mut store = EffectStore::new(AppState::new("Oslo", Default::default()), reducer);

    let result = store.dispatch(Action::WeatherRefresh);

    assert_eq!(
        result.effects,
        vec![Effect::FetchWeather {
            city: "Oslo".into()
        }]
    );
}

#[test]
fn test_reject_keeps_previous_report() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::WeatherSearch("Paris".into()));
    store.dispatch(Action::WeatherDidLoad(report("Paris", 21)));

    store.dispatch(Action::WeatherSearch("Atlantis".into()));
    assert!(store.state().is_refreshing);
    store.dispatch(Action::WeatherDidReject("city not found".into()));

    let state = store.state();
    assert_eq!(
        state.current_view().map(|c| c.location.as_str()),
        Some("Paris")
    );
    assert!(!state.is_refreshing);
    let notice = state.notice.as_ref().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "city not found");

    store.dispatch(Action::NoticeDismiss);
    let result = store.dispatch(Action::WeatherRefresh);
    assert_eq!(
        result.effects,
        vec![Effect::FetchWeather {
            city: "Paris".into()
        }]
    );
}

#[test]
fn test_reject_with_nothing_shown_clears_loading() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::WeatherSearch("Atlantis".into()));

    store.dispatch(Action::WeatherDidReject("city not found".into()));

    assert!(store.state().weather.is_empty());
    assert!(store.state().notice.is_some());
}

#[test]
fn test_error_clears_view_without_notice() {
    let state = AppState {
        weather: DataResource::Loaded(report("Paris", 21)),
        ..Default::default()
    };
    let mut store = EffectStore::new(state, reducer);

    store.dispatch(Action::WeatherSearch("Paris".into()));
    store.dispatch(Action::WeatherDidError("request failed: timed out".into()));

    assert!(store.state().weather.is_empty());
    assert!(store.state().notice.is_none());
}

#[test]
fn test_signup_success_clears_form() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::SignupOpen);
    for action in fill_signup(["Jane", "jane@example.com", "9876543210", "secret", "secret"]) {
        store.dispatch(action);
    }

    store.dispatch(Action::SignupSubmit);

    let state = store.state();
    assert!(!state.signup_mode);
    assert_eq!(state.signup, Default::default());
    let notice = state.notice.as_ref().unwrap();
    assert_eq!(notice.kind, NoticeKind::Info);
    assert_eq!(notice.message, SIGNUP_ACCEPTED);
}

#[test]
fn test_signup_failure_keeps_form_open() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::SignupOpen);
    for action in fill_signup(["Jane", "jane@example.com", "12345", "secret", "secret"]) {
        store.dispatch(action);
    }

    store.dispatch(Action::SignupSubmit);

    let state = store.state();
    assert!(state.signup_mode);
    assert_eq!(state.signup.phone, "12345");
    assert_eq!(
        state.notice.as_ref().map(|n| n.message.as_str()),
        Some("Please enter a valid 10-digit phone number")
    );

    let result = store.dispatch(Action::NoticeDismiss);
    assert!(result.changed);
    assert!(store.state().notice.is_none());
    assert!(!store.dispatch(Action::NoticeDismiss).changed);
}

#[test]
fn test_component_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = WeatherDisplay;

    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::WeatherRefresh);
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = WeatherDisplay;

    let actions = harness.send_keys::<NumericComponentId, _, _>("r q s", |state, event| {
        let props = WeatherDisplayProps {
            state,
            is_focused: false,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    let did_load = Action::WeatherDidLoad(WeatherReport::default());
    let open = Action::SearchOpen;
    let tick = Action::Tick;

    assert_eq!(did_load.category(), Some("weather_did"));
    assert_eq!(open.category(), Some("search"));
    assert_eq!(tick.category(), None);

    assert!(did_load.is_weather_did());
    assert!(open.is_search());
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::WeatherSearch("Paris".into()),
        Action::WeatherDidLoad(WeatherReport::default()),
    ];

    assert_emitted!(actions, Action::WeatherSearch(_));
    assert_emitted!(actions, Action::WeatherDidLoad(_));
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::WeatherDidReject(_));
}
