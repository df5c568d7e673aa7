use artbox::{Alignment as ArtAlignment, Renderer, fonts, integrations::ratatui::ArtBox};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use super::gradient::{HEADER_ANGLE, Palette, seam_phase};
use crate::action::Action;

pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    /// Provider display name, or the searched city while nothing is loaded
    pub name: &'a str,
    pub temperature: Option<i32>,
    pub status: &'a str,
    pub is_animating: bool,
    pub tick_count: u32,
}

/// Overhead inside the header area: 1 spacer + 1 status line.
/// The FIGlet city name gets `area.height - HEADER_OVERHEAD`.
pub const HEADER_OVERHEAD: u16 = 2;

impl Component<Action> for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet city name
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Status
        ])
        .split(area);

        let fill = Palette::for_temperature(props.temperature)
            .fill(HEADER_ANGLE, seam_phase(props.is_animating, props.tick_count));

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(fill);

        frame.render_widget(ArtBox::new(&renderer, props.name), chunks[0]);

        let status_line = Line::from(vec![Span::styled(
            props.status.to_string(),
            Style::default().fg(Color::DarkGray),
        )])
        .centered();
        frame.render_widget(Paragraph::new(status_line), chunks[2]);
    }
}
