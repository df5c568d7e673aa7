use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::state::{ForecastDayView, Units};

/// Rows a card needs: border + icon + day + temperature + border
pub const FORECAST_HEIGHT: u16 = 5;

pub struct ForecastStrip;

pub struct ForecastStripProps<'a> {
    pub days: &'a [ForecastDayView],
    pub units: Units,
}

impl Component<Action> for ForecastStrip {
    type Props<'a> = ForecastStripProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.days.is_empty() || area.height == 0 {
            return;
        }

        let constraints = vec![Constraint::Fill(1); props.days.len()];
        let cards = Layout::horizontal(constraints).spacing(1).split(area);

        for (day, card) in props.days.iter().zip(cards.iter()) {
            render_card(frame, *card, day, props.units);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, day: &ForecastDayView, units: Units) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(70, 70, 85)));

    let lines = vec![
        Line::from(Span::styled(
            day.icon.emoji(),
            Style::default().fg(day.icon.accent()),
        ))
        .centered(),
        Line::from(Span::styled(
            day.day.clone(),
            Style::default().fg(Color::Gray).bold(),
        ))
        .centered(),
        Line::from(units.format_temperature(day.temperature)).centered(),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
