use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::forecast_strip::FORECAST_HEIGHT;
use super::{Component, ForecastStrip, ForecastStripProps, WeatherBody, WeatherBodyProps};
use crate::action::Action;
use crate::state::AppState;

/// Props for WeatherDisplay - read-only view of state
pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main weather panel: current conditions, forecast cards, key hints
#[derive(Default)]
pub struct WeatherDisplay;

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('/') => Some(Action::SearchOpen),
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::WeatherRefresh),
                KeyCode::Char('s') => Some(Action::SignupOpen),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let days = props.state.forecast_view();
        let forecast_height = if days.is_empty() { 0 } else { FORECAST_HEIGHT };

        let chunks = Layout::vertical([
            Constraint::Min(1),                    // Current conditions
            Constraint::Length(forecast_height),   // Forecast cards
            Constraint::Length(1),                 // Help bar
        ])
        .split(area);

        let mut body = WeatherBody;
        body.render(frame, chunks[0], WeatherBodyProps { state: props.state });

        let mut forecast = ForecastStrip;
        forecast.render(
            frame,
            chunks[1],
            ForecastStripProps {
                days,
                units: props.state.units,
            },
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("/", "search"),
                    StatusBarHint::new("r", "refresh"),
                    StatusBarHint::new("s", "signup"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn actions_for(code: KeyCode, is_focused: bool) -> Vec<Action> {
        let mut component = WeatherDisplay;
        let state = AppState::default();
        let props = WeatherDisplayProps {
            state: &state,
            is_focused,
        };
        component
            .handle_event(&EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE)), props)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_handle_event_search() {
        let actions = actions_for(KeyCode::Char('/'), true);
        actions.assert_count(1);
        actions.assert_first(Action::SearchOpen);
    }

    #[test]
    fn test_handle_event_signup() {
        actions_for(KeyCode::Char('s'), true).assert_first(Action::SignupOpen);
    }

    #[test]
    fn test_handle_event_quit() {
        actions_for(KeyCode::Char('q'), true).assert_first(Action::Quit);
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        actions_for(KeyCode::Char('r'), false).assert_empty();
    }

    #[test]
    fn test_render_empty_prompts_search() {
        let mut render = RenderHarness::new(80, 24);
        let mut component = WeatherDisplay;
        let state = AppState::default();

        let output = render.render_to_string_plain(|frame| {
            let props = WeatherDisplayProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("to search for a city"));
        assert!(output.contains("signup"));
    }
}
