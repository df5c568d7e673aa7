pub mod forecast_strip;
pub mod gradient;
pub mod location_header;
pub mod notice_modal;
pub mod search_overlay;
pub mod signup_overlay;
pub mod weather_body;
pub mod weather_display;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use forecast_strip::{ForecastStrip, ForecastStripProps};
pub use location_header::{LocationHeader, LocationHeaderProps};
pub use notice_modal::{NoticeModal, NoticeModalProps};
pub use search_overlay::{SearchOverlay, SearchOverlayProps};
pub use signup_overlay::{SignupOverlay, SignupOverlayProps};
pub use weather_body::{WeatherBody, WeatherBodyProps};
pub use weather_display::{WeatherDisplay, WeatherDisplayProps};

/// Warning sign shown next to error notices
pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";
