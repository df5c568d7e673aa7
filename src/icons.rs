//! Icon table for provider condition codes
//!
//! OpenWeatherMap reports an icon code per sample (`"01d"`, `"10n"`, ...).
//! Codes map onto the small fixed set of icons the panel can draw; anything
//! not in the table falls back to [`Icon::Clear`].

use phf::phf_map;
use ratatui::style::Color;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Display icons available to the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Icon {
    #[default]
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
}

static ICON_MAP: phf::Map<&'static str, Icon> = phf_map! {
    "01d" => Icon::Clear,
    "01n" => Icon::Clear,
    "02d" => Icon::Cloud,
    "02n" => Icon::Cloud,
    "03d" => Icon::Cloud,
    "03n" => Icon::Cloud,
    "04d" => Icon::Drizzle,
    "04n" => Icon::Drizzle,
    "09d" => Icon::Rain,
    "09n" => Icon::Rain,
    "10d" => Icon::Rain,
    "10n" => Icon::Rain,
    "13d" => Icon::Snow,
    "13n" => Icon::Snow,
};

/// Shown beside the humidity reading
pub const HUMIDITY_GLYPH: &str = "\u{1f4a7}";
/// Shown beside the wind reading
pub const WIND_GLYPH: &str = "\u{1f32c}\u{fe0f}";

impl Icon {
    /// Resolve a provider icon code. Never fails.
    pub fn for_code(code: &str) -> Self {
        ICON_MAP.get(code).copied().unwrap_or_default()
    }

    /// Emoji representation for when sprites don't fit
    pub fn emoji(self) -> &'static str {
        match self {
            Icon::Clear => "\u{2600}\u{fe0f}",
            Icon::Cloud => "\u{2601}\u{fe0f}",
            Icon::Drizzle => "\u{1f326}\u{fe0f}",
            Icon::Rain => "\u{1f327}\u{fe0f}",
            Icon::Snow => "\u{2744}\u{fe0f}",
        }
    }

    pub fn accent(self) -> Color {
        match self {
            Icon::Clear => Color::Yellow,
            Icon::Cloud => Color::Rgb(170, 170, 185),
            Icon::Drizzle => Color::Rgb(130, 170, 200),
            Icon::Rain => Color::Rgb(80, 140, 200),
            Icon::Snow => Color::Rgb(200, 220, 255),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Icon::Clear => "Clear",
            Icon::Cloud => "Clouds",
            Icon::Drizzle => "Drizzle",
            Icon::Rain => "Rain",
            Icon::Snow => "Snow",
        }
    }
}
