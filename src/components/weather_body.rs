use artbox::{Alignment as ArtAlignment, Renderer, fonts, integrations::ratatui::ArtBox};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::gradient::{Palette, READOUT_ANGLE, seam_phase};
use super::location_header::HEADER_OVERHEAD;
use super::{Component, LocationHeader, LocationHeaderProps};
use crate::action::Action;
use crate::icons::{HUMIDITY_GLYPH, WIND_GLYPH};
use crate::sprites::{self, SPRITE_HEIGHT};
use crate::state::{AppState, CurrentWeatherView};

pub struct WeatherBody;

pub struct WeatherBodyProps<'a> {
    pub state: &'a AppState,
}

/// Fixed rows: blank + blank + two reading rows.
const LAYOUT_FIXED: u16 = 4;

/// Text cap tiers: (header_cap, temp_cap).
/// terminus(6), miniwi(4), plain(1); HEADER_OVERHEAD is added to the header cap.
const TEXT_TIERS: [(u16, u16); 3] = [
    (6 + HEADER_OVERHEAD, 6),
    (4 + HEADER_OVERHEAD, 4),
    (1 + HEADER_OVERHEAD, 1),
];

struct LayoutSizing {
    show_sprite: bool,
    sprite_h: u16,
    header_cap: u16,
    temp_cap: u16,
}

/// Shrink text until the sprite fits; fall back to an emoji otherwise.
fn compute_layout(area_height: u16) -> LayoutSizing {
    for &(hcap, tcap) in &TEXT_TIERS {
        let budget = area_height.saturating_sub(hcap + tcap + LAYOUT_FIXED);
        if budget >= SPRITE_HEIGHT {
            return LayoutSizing {
                show_sprite: true,
                sprite_h: SPRITE_HEIGHT,
                header_cap: hcap,
                temp_cap: tcap,
            };
        }
    }
    let (hcap, tcap) = TEXT_TIERS[0];
    LayoutSizing {
        show_sprite: false,
        sprite_h: 1,
        header_cap: hcap,
        temp_cap: tcap,
    }
}

// ============================================================================
// Component
// ============================================================================

impl Component<Action> for WeatherBody {
    type Props<'a> = WeatherBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let sizing = compute_layout(area.height);
        let chunks = make_layout(area, &sizing);
        render_header(frame, chunks[0], props.state);

        match props.state.current_view() {
            Some(current) => render_ready(frame, &chunks, props.state, current, &sizing),
            None if props.state.is_fetching() => {
                render_message(frame, chunks[5], "Loading...");
            }
            None => render_hint(frame, chunks[5]),
        }
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let current = state.current_view();
    let status = if state.is_fetching() {
        format!("Fetching weather for {}...", state.city)
    } else {
        current
            .map(|c| c.icon.label().to_string())
            .unwrap_or_default()
    };

    let mut header = LocationHeader;
    header.render(
        frame,
        area,
        LocationHeaderProps {
            name: current.map_or(state.city.as_str(), |c| c.location.as_str()),
            temperature: current.map(|c| c.temperature),
            status: &status,
            is_animating: state.loading_anim_active(),
            tick_count: state.tick_count,
        },
    );
}

fn make_layout(area: Rect, sizing: &LayoutSizing) -> std::rc::Rc<[Rect]> {
    Layout::vertical([
        Constraint::Max(sizing.header_cap),
        Constraint::Length(1),
        Constraint::Length(sizing.sprite_h),
        Constraint::Length(1),
        Constraint::Max(sizing.temp_cap),
        Constraint::Length(2),
    ])
    .flex(Flex::Center)
    .split(area)
}

fn render_ready(
    frame: &mut Frame,
    chunks: &[Rect],
    state: &AppState,
    current: &CurrentWeatherView,
    sizing: &LayoutSizing,
) {
    match sprites::icon_sprite(current.icon, chunks[2].height) {
        Some(sprite) if sizing.show_sprite => {
            frame.render_widget(
                Paragraph::new(sprite).alignment(Alignment::Center),
                chunks[2],
            );
        }
        _ => {
            frame.render_widget(
                Paragraph::new(Line::from(current.icon.emoji()).centered()),
                chunks[2],
            );
        }
    }

    let temp_text = state.units.format_temperature(current.temperature);
    // Same palette as the header, so both pulse together during a refresh
    let fill = Palette::for_temperature(Some(current.temperature)).fill(
        READOUT_ANGLE,
        seam_phase(state.loading_anim_active(), state.tick_count),
    );
    let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(fill);
    frame.render_widget(ArtBox::new(&renderer, &temp_text), chunks[4]);

    let columns = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(chunks[5]);
    render_reading(
        frame,
        columns[0],
        HUMIDITY_GLYPH,
        format!("{} %", current.humidity),
        "Humidity",
    );
    render_reading(
        frame,
        columns[1],
        WIND_GLYPH,
        state.units.format_speed(current.wind_speed),
        "Wind Speed",
    );
}

fn render_reading(frame: &mut Frame, area: Rect, glyph: &str, value: String, label: &str) {
    let lines = vec![
        Line::from(vec![
            Span::raw(format!("{} ", glyph)),
            Span::styled(value, Style::default().fg(Color::White).bold()),
        ])
        .centered(),
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(Color::Gray),
        ))
        .centered(),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_message(frame: &mut Frame, area: Rect, message: &str) {
    let msg = Line::from(vec![Span::styled(
        message.to_string(),
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(msg), area);
}

fn render_hint(frame: &mut Frame, area: Rect) {
    let hint = Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("/", Style::default().fg(Color::Cyan).bold()),
        Span::styled(" to search for a city", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), area);
}
