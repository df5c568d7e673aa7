use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, TextInput, TextInputProps,
    TextInputStyle, centered_rect,
};

use super::Component;
use crate::action::Action;
use crate::state::SignupField;
use crate::validation::SignupForm;

const MODAL_HEIGHT: u16 = 17;
const FIELD_BG: Color = Color::Rgb(50, 50, 60);

/// Five-field signup form in a modal
pub struct SignupOverlay {
    input: TextInput,
    modal: Modal,
    was_open: bool,
    last_focus: SignupField,
}

pub struct SignupOverlayProps<'a> {
    pub form: &'a SignupForm,
    pub focus: SignupField,
    pub is_focused: bool,
}

impl Default for SignupOverlay {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            modal: Modal::new(),
            was_open: false,
            last_focus: SignupField::default(),
        }
    }
}

impl SignupOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the cursor whenever the form opens or focus moves.
    pub fn sync(&mut self, is_open: bool, focus: SignupField) {
        if (is_open && !self.was_open) || focus != self.last_focus {
            self.input = TextInput::new();
        }
        self.was_open = is_open;
        self.last_focus = focus;
    }
}

fn change_action(field: SignupField) -> fn(String) -> Action {
    match field {
        SignupField::Name => |v| Action::SignupFieldChange(SignupField::Name, v),
        SignupField::Email => |v| Action::SignupFieldChange(SignupField::Email, v),
        SignupField::Phone => |v| Action::SignupFieldChange(SignupField::Phone, v),
        SignupField::Password => |v| Action::SignupFieldChange(SignupField::Password, v),
        SignupField::ConfirmPassword => {
            |v| Action::SignupFieldChange(SignupField::ConfirmPassword, v)
        }
    }
}

fn masked(value: &str) -> String {
    "•".repeat(value.chars().count())
}

/// Secret fields are edited without TextInput so the text never renders.
fn edit_secret(field: SignupField, value: &str, key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            let mut next = value.to_string();
            next.push(c);
            Some(Action::SignupFieldChange(field, next))
        }
        KeyCode::Backspace => {
            let mut next = value.to_string();
            next.pop()?;
            Some(Action::SignupFieldChange(field, next))
        }
        _ => None,
    }
}

impl Component<Action> for SignupOverlay {
    type Props<'a> = SignupOverlayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::SignupClose],
            KeyCode::Enter => return vec![Action::SignupSubmit],
            KeyCode::Tab | KeyCode::Down => return vec![Action::SignupFocusNext],
            KeyCode::BackTab | KeyCode::Up => return vec![Action::SignupFocusPrev],
            _ => {}
        }

        if props.focus.is_secret() {
            let value = props.form.value(props.focus);
            return edit_secret(props.focus, value, key).into_iter().collect();
        }

        let input_props = TextInputProps {
            value: props.form.value(props.focus),
            placeholder: props.focus.label(),
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::new(1, 0, 1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: change_action(props.focus),
            on_submit: |_| Action::SignupSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };

        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 30 || area.height < MODAL_HEIGHT {
            return;
        }

        let SignupOverlay { input, modal, .. } = self;
        let modal_area = centered_rect(60, MODAL_HEIGHT, area);
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let mut constraints = vec![Constraint::Length(1), Constraint::Length(1)];
            for _ in SignupField::ALL {
                constraints.push(Constraint::Length(1)); // Label
                constraints.push(Constraint::Length(1)); // Value
            }
            constraints.push(Constraint::Length(1));
            constraints.push(Constraint::Length(1));
            let rows = Layout::vertical(constraints).split(content_area);

            let title = Line::from(Span::styled(
                "Create account",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
            .centered();
            frame.render_widget(Paragraph::new(title), rows[0]);

            for (idx, field) in SignupField::ALL.into_iter().enumerate() {
                let label_row = rows[2 + idx * 2];
                let value_row = rows[3 + idx * 2];
                let is_current = field == props.focus;

                let label_style = if is_current {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::Gray)
                };
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        format!(" {}", field.label()),
                        label_style,
                    ))),
                    label_row,
                );

                let value = props.form.value(field);
                if is_current && field.is_secret() {
                    let caret = if props.is_focused { "▏" } else { "" };
                    frame.render_widget(
                        Paragraph::new(format!(" {}{}", masked(value), caret))
                            .style(Style::default().bg(FIELD_BG)),
                        value_row,
                    );
                } else if is_current {
                    let input_props = TextInputProps {
                        value,
                        placeholder: "",
                        is_focused: props.is_focused,
                        style: TextInputStyle {
                            base: BaseStyle {
                                border: None,
                                padding: Padding::new(1, 0, 1, 0),
                                bg: Some(FIELD_BG),
                                fg: None,
                            },
                            placeholder_style: None,
                            cursor_style: None,
                        },
                        on_change: change_action(field),
                        on_submit: |_| Action::SignupSubmit,
                        on_cursor_move: Some(|_| Action::Render),
                    };
                    input.render(frame, value_row, input_props);
                } else {
                    let shown = if field.is_secret() {
                        masked(value)
                    } else {
                        value.to_string()
                    };
                    frame.render_widget(
                        Paragraph::new(format!(" {}", shown))
                            .style(Style::default().bg(Color::Rgb(42, 42, 52))),
                        value_row,
                    );
                }
            }

            let hint = Line::from("Tab next field · Enter submit · Esc close")
                .style(Style::default().fg(Color::DarkGray))
                .centered();
            frame.render_widget(Paragraph::new(hint), rows[rows.len() - 1]);
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(35, 35, 45)),
                        padding: Padding::default(),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::SignupClose,
                render_content: &mut render_content,
            },
        );
    }
}
