use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, centered_rect,
};

use super::{Component, ERROR_ICON};
use crate::action::Action;
use crate::state::{Notice, NoticeKind};

/// Blocking notification; every key is swallowed until it is dismissed
pub struct NoticeModal {
    modal: Modal,
}

impl Default for NoticeModal {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

pub struct NoticeModalProps<'a> {
    pub notice: &'a Notice,
    pub is_focused: bool,
}

impl Component<Action> for NoticeModal {
    type Props<'a> = NoticeModalProps<'a>;

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
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::NoticeDismiss),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let (icon, title, accent) = match props.notice.kind {
            NoticeKind::Error => (ERROR_ICON, "Error", Color::Red),
            NoticeKind::Info => ("\u{2139}\u{fe0f}", "Notice", Color::Cyan),
        };
        let message = props.notice.message.as_str();

        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1), // Title
                Constraint::Length(1), // blank
                Constraint::Length(2), // Message
                Constraint::Length(1), // blank
                Constraint::Length(1), // Hint
            ])
            .flex(Flex::Center)
            .split(content_area);

            frame.render_widget(
                Paragraph::new(
                    Line::from(vec![
                        Span::raw(format!("{} ", icon)),
                        Span::styled(
                            title,
                            Style::default().fg(accent).add_modifier(Modifier::BOLD),
                        ),
                    ])
                    .centered(),
                ),
                chunks[0],
            );
            frame.render_widget(
                Paragraph::new(Line::from(message).centered()).wrap(Wrap { trim: true }),
                chunks[2],
            );
            frame.render_widget(
                Paragraph::new(
                    Line::from(vec![
                        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                        Span::styled(
                            "Enter",
                            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(" to dismiss", Style::default().fg(Color::DarkGray)),
                    ])
                    .centered(),
                ),
                chunks[4],
            );
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: centered_rect(56, 8, area),
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(45, 35, 40)),
                        padding: Padding::all(1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::NoticeDismiss,
                render_content: &mut render_content,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    #[test]
    fn test_only_dismiss_keys_act() {
        let mut modal = NoticeModal::default();
        let notice = Notice::error("Please enter city name");

        let actions: Vec<_> = modal
            .handle_event(
                &EventKind::Key(key("q")),
                NoticeModalProps {
                    notice: &notice,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();

        let actions: Vec<_> = modal
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
                NoticeModalProps {
                    notice: &notice,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::NoticeDismiss);
    }

    #[test]
    fn test_render_shows_message() {
        let mut render = RenderHarness::new(80, 24);
        let mut modal = NoticeModal::default();
        let notice = Notice::error("city not found");

        let output = render.render_to_string_plain(|frame| {
            modal.render(
                frame,
                frame.area(),
                NoticeModalProps {
                    notice: &notice,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("Error"));
        assert!(output.contains("city not found"));
        assert!(output.contains("to dismiss"));
    }
}
