//! Provider payloads and the transforms that turn them into view models

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::api::FetchError;
use crate::icons::Icon;
use crate::state::{CurrentWeatherView, ForecastDayView, WeatherReport};

/// Timestamp suffix of the daily sample used for forecast cards
pub const NOON_MARKER: &str = "12:00:00";

/// Forecast cards shown after today
pub const FORECAST_DAYS: usize = 4;

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Payloads
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// `GET /weather` response body
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentPayload {
    pub name: String,
    pub main: CurrentMain,
    pub wind: Wind,
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
}

/// One 3-hour sample of the forecast
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub dt_txt: String,
    pub main: ForecastMain,
    pub weather: Vec<Condition>,
}

/// `GET /forecast` response body
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    pub list: Vec<ForecastEntry>,
}

// ============================================================================
// Transforms
// ============================================================================

fn floor_degrees(temp: f64) -> i32 {
    temp.floor() as i32
}

fn first_icon(conditions: &[Condition]) -> Icon {
    conditions
        .first()
        .map(|c| Icon::for_code(&c.icon))
        .unwrap_or_default()
}

/// English weekday name of a `dt_txt` timestamp
pub fn weekday_name(dt_txt: &str) -> Result<String, FetchError> {
    let timestamp = NaiveDateTime::parse_from_str(dt_txt, DT_TXT_FORMAT)
        .map_err(|e| FetchError::Payload(format!("invalid dt_txt {:?}: {}", dt_txt, e)))?;
    Ok(timestamp.format("%A").to_string())
}

pub fn current_view(payload: &CurrentPayload) -> CurrentWeatherView {
    CurrentWeatherView {
        humidity: payload.main.humidity,
        wind_speed: payload.wind.speed,
        temperature: floor_degrees(payload.main.temp),
        location: payload.name.clone(),
        icon: first_icon(&payload.weather),
    }
}

/// Noon samples after the first one (today), at most [`FORECAST_DAYS`].
pub fn daily_forecast(entries: &[ForecastEntry]) -> Result<Vec<ForecastDayView>, FetchError> {
    entries
        .iter()
        .filter(|entry| entry.dt_txt.contains(NOON_MARKER))
        .skip(1)
        .take(FORECAST_DAYS)
        .map(|entry| {
            Ok(ForecastDayView {
                day: weekday_name(&entry.dt_txt)?,
                temperature: floor_degrees(entry.main.temp),
                icon: first_icon(&entry.weather),
            })
        })
        .collect()
}

pub fn build_report(
    current: &CurrentPayload,
    forecast: &ForecastPayload,
) -> Result<WeatherReport, FetchError> {
    Ok(WeatherReport {
        current: current_view(current),
        forecast: daily_forecast(&forecast.list)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(dt_txt: &str, temp: f64, icon: &str) -> ForecastEntry {
        ForecastEntry {
            dt_txt: dt_txt.into(),
            main: ForecastMain { temp },
            weather: vec![Condition { icon: icon.into() }],
        }
    }

    fn current(temp: f64, icon: &str) -> CurrentPayload {
        CurrentPayload {
            name: "New Delhi".into(),
            main: CurrentMain { temp, humidity: 64 },
            wind: Wind { speed: 3.6 },
            weather: vec![Condition { icon: icon.into() }],
        }
    }

    #[test]
    fn test_current_temperature_is_floored() {
        let view = current_view(&current(21.9, "01d"));
        assert_eq!(view.temperature, 21);
        assert_eq!(view.humidity, 64);
        assert_eq!(view.location, "New Delhi");

        let view = current_view(&current(-0.5, "01d"));
        assert_eq!(view.temperature, -1);
    }

    #[test]
    fn test_unknown_icon_uses_default() {
        assert_eq!(current_view(&current(10.0, "50d")).icon, Icon::Clear);

        let mut payload = current(10.0, "10d");
        payload.weather.clear();
        assert_eq!(current_view(&payload).icon, Icon::Clear);
    }

    #[test]
    fn test_forecast_skips_today_and_keeps_four() {
        // 2024-01-15 is a Monday
        let mut entries = Vec::new();
        for day in 15..=20 {
            entries.push(entry(&format!("2024-01-{} 09:00:00", day), 0.0, "13d"));
            entries.push(entry(
                &format!("2024-01-{} 12:00:00", day),
                f64::from(day) + 0.7,
                "10d",
            ));
        }

        let days = daily_forecast(&entries).unwrap();
        assert_eq!(days.len(), 4);
        let names: Vec<_> = days.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(names, ["Tuesday", "Wednesday", "Thursday", "Friday"]);
        assert_eq!(days[0].temperature, 16);
        assert_eq!(days[3].temperature, 19);
        assert!(days.iter().all(|d| d.icon == Icon::Rain));
    }

    #[test]
    fn test_short_forecast_yields_fewer_days() {
        let entries = vec![
            entry("2024-01-15 12:00:00", 5.0, "01d"),
            entry("2024-01-16 12:00:00", 6.0, "02d"),
        ];
        let days = daily_forecast(&entries).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].icon, Icon::Cloud);

        assert!(daily_forecast(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_bad_timestamp_is_payload_error() {
        let entries = vec![
            entry("2024-01-15 12:00:00", 5.0, "01d"),
            entry("tomorrow 12:00:00", 6.0, "01d"),
        ];
        assert!(matches!(
            daily_forecast(&entries),
            Err(FetchError::Payload(_))
        ));
    }
}
