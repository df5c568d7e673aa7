//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::icons::Icon;
use crate::validation::SignupForm;

/// Current conditions, ready to render
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentWeatherView {
    pub humidity: u8,
    pub wind_speed: f64,
    pub temperature: i32,
    pub location: String,
    pub icon: Icon,
}

/// One forecast card
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastDayView {
    pub day: String,
    pub temperature: i32,
    pub icon: Icon,
}

/// Everything one successful search produces
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    pub current: CurrentWeatherView,
    pub forecast: Vec<ForecastDayView>,
}

/// Measurement system requested from the provider
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    /// Value of the `units` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    pub fn format_temperature(&self, degrees: i32) -> String {
        match self {
            Units::Metric => format!("{}°C", degrees),
            Units::Imperial => format!("{}°F", degrees),
            Units::Standard => format!("{} K", degrees),
        }
    }

    pub fn format_speed(&self, speed: f64) -> String {
        match self {
            Units::Metric => format!("{} km/h", speed),
            Units::Imperial => format!("{} mph", speed),
            Units::Standard => format!("{} m/s", speed),
        }
    }
}

/// Severity of a blocking notice
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Blocking notification; captures input until dismissed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Signup form fields in focus order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SignupField {
    #[default]
    Name,
    Email,
    Phone,
    Password,
    ConfirmPassword,
}

impl SignupField {
    pub const ALL: [SignupField; 5] = [
        SignupField::Name,
        SignupField::Email,
        SignupField::Phone,
        SignupField::Password,
        SignupField::ConfirmPassword,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SignupField::Name => "Name",
            SignupField::Email => "Email",
            SignupField::Phone => "Phone",
            SignupField::Password => "Password",
            SignupField::ConfirmPassword => "Confirm password",
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, SignupField::Password | SignupField::ConfirmPassword)
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl SignupForm {
    pub fn value(&self, field: SignupField) -> &str {
        match field {
            SignupField::Name => &self.name,
            SignupField::Email => &self.email,
            SignupField::Phone => &self.phone,
            SignupField::Password => &self.password,
            SignupField::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, field: SignupField, value: String) {
        let slot = match field {
            SignupField::Name => &mut self.name,
            SignupField::Email => &mut self.email,
            SignupField::Phone => &mut self.phone,
            SignupField::Password => &mut self.password,
            SignupField::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value;
    }
}

/// City searched when the panel first opens
pub const DEFAULT_CITY: &str = "New Delhi";

/// Animation timing for the header gradient seam.
pub const LOADING_ANIM_TICK_MS: u64 = 15;
pub const LOADING_ANIM_CYCLE_TICKS: u32 = 60;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Weather panel ---
    /// City of the most recent accepted search
    #[debug(section = "Weather", label = "City")]
    pub city: String,

    /// City whose report is on screen; restored when a newer search is rejected
    #[debug(section = "Weather", label = "Shown city", debug_fmt)]
    pub loaded_city: Option<String>,

    /// Report lifecycle: Empty → Loading → Loaded
    #[debug(section = "Weather", label = "Report", debug_fmt)]
    pub weather: DataResource<WeatherReport>,

    /// Whether a search is in flight while a report is still shown
    #[debug(section = "Weather", label = "Refreshing")]
    pub is_refreshing: bool,

    #[debug(section = "Weather", label = "Units", debug_fmt)]
    pub units: Units,

    /// Blocking notification, if any
    #[debug(section = "Notice", label = "Message", debug_fmt)]
    pub notice: Option<Notice>,

    // --- Animation internals (skipped) ---
    #[debug(skip)]
    pub tick_count: u32,

    /// Remaining ticks to finish the current animation cycle after loading
    #[debug(skip)]
    pub loading_anim_ticks_remaining: u32,

    // --- Search overlay (skipped) ---
    #[debug(skip)]
    pub search_mode: bool,

    #[debug(skip)]
    pub search_query: String,

    // --- Signup overlay ---
    #[debug(section = "Signup", label = "Open")]
    pub signup_mode: bool,

    #[debug(section = "Signup", label = "Focus", debug_fmt)]
    pub signup_focus: SignupField,

    #[debug(skip)]
    pub signup: SignupForm,
}

impl AppState {
    /// Create state that will search for the given city
    pub fn new(city: impl Into<String>, units: Units) -> Self {
        Self {
            city: city.into(),
            loaded_city: None,
            weather: DataResource::Empty,
            is_refreshing: false,
            units,
            notice: None,
            tick_count: 0,
            loading_anim_ticks_remaining: 0,
            search_mode: false,
            search_query: String::new(),
            signup_mode: false,
            signup_focus: SignupField::default(),
            signup: SignupForm::default(),
        }
    }

    /// Current conditions, if a report is shown
    pub fn current_view(&self) -> Option<&CurrentWeatherView> {
        self.weather.data().map(|report| &report.current)
    }

    /// Forecast cards; empty when no report is shown
    pub fn forecast_view(&self) -> &[ForecastDayView] {
        self.weather
            .data()
            .map(|report| report.forecast.as_slice())
            .unwrap_or_default()
    }

    pub fn is_fetching(&self) -> bool {
        self.weather.is_loading() || self.is_refreshing
    }

    pub fn loading_anim_active(&self) -> bool {
        self.is_fetching() || self.loading_anim_ticks_remaining > 0
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_CITY, Units::default())
    }
}
