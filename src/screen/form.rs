//! Add/edit modal built from an entity's field specs.

use crate::entities::{Entity, FieldSpec};
use crate::error::{Error, Result};
use crate::screen::forward_key;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use bubbletea_widgets::textinput::{self, EchoMode};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use serde_json::Value;

/// What a key press did to the form.
pub enum FormOutcome {
    /// Still editing; the command focuses or updates an input.
    Pending(Option<Cmd>),
    /// Every required field passed validation; the payload is ready to send.
    Submitted(Value),
    /// The operator backed out; nothing was sent.
    Cancelled,
}

/// A stack of labeled text inputs over one entity's [`FieldSpec`]s.
///
/// Validation happens entirely here: a submit with a blank required field
/// sets an inline error and stays open, so the caller only ever sees
/// [`FormOutcome::Submitted`] with a payload that is fit to send.
pub struct Form {
    title: String,
    fields: &'static [FieldSpec],
    inputs: Vec<textinput::Model>,
    focus: usize,
    error: Option<String>,
}

impl Form {
    /// A blank form for creating a new record.
    pub fn blank<E: Entity>() -> Self {
        Self::build::<E>(format!("New {}", E::SINGULAR), None)
    }

    /// A form prefilled from an existing record, for editing. Secret fields
    /// start blank and are omitted from the payload unless retyped.
    pub fn prefilled<E: Entity>(record: &E) -> Self {
        Self::build::<E>(format!("Edit {}", E::SINGULAR), Some(record))
    }

    fn build<E: Entity>(title: String, record: Option<&E>) -> Self {
        let inputs = E::FIELDS
            .iter()
            .map(|spec| {
                let mut input = textinput::new();
                if spec.secret {
                    input.set_echo_mode(EchoMode::EchoPassword);
                    if record.is_some() {
                        input.set_placeholder("(unchanged)");
                    }
                } else if let Some(r) = record {
                    input.set_value(&r.field_value(spec.key));
                }
                input
            })
            .collect();
        Self {
            title,
            fields: E::FIELDS,
            inputs,
            focus: 0,
            error: None,
        }
    }

    /// Focuses the first input. Call once when the form opens.
    pub fn focus_first(&mut self) -> Cmd {
        self.inputs[0].focus()
    }

    /// Routes a message into the form.
    pub fn update(&mut self, msg: &Msg) -> FormOutcome {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            match key.key {
                KeyCode::Esc => return FormOutcome::Cancelled,
                KeyCode::Enter => return self.submit(),
                KeyCode::Tab | KeyCode::Down => {
                    return FormOutcome::Pending(Some(self.cycle(1)));
                }
                KeyCode::BackTab | KeyCode::Up => {
                    return FormOutcome::Pending(Some(self.cycle(-1)));
                }
                _ => {}
            }
            let cmd = self.inputs[self.focus].update(forward_key(key));
            return FormOutcome::Pending(cmd);
        }
        FormOutcome::Pending(None)
    }

    fn cycle(&mut self, step: isize) -> Cmd {
        self.inputs[self.focus].blur();
        let len = self.inputs.len() as isize;
        self.focus = ((self.focus as isize + step + len) % len) as usize;
        self.inputs[self.focus].focus()
    }

    fn submit(&mut self) -> FormOutcome {
        match self.payload() {
            Ok(body) => FormOutcome::Submitted(body),
            Err(e) => {
                self.error = Some(e.to_string());
                FormOutcome::Pending(None)
            }
        }
    }

    /// Collects trimmed input values into a JSON object, rejecting blank
    /// required fields. Blank optional fields are omitted, which is what
    /// leaves an existing password untouched on edit.
    fn payload(&self) -> Result<Value> {
        let mut map = serde_json::Map::new();
        for (spec, input) in self.fields.iter().zip(&self.inputs) {
            let raw = input.value();
            let value = raw.trim();
            if value.is_empty() {
                if spec.required {
                    return Err(Error::Validation(format!("{} is required", spec.label)));
                }
                continue;
            }
            map.insert(spec.key.to_string(), Value::String(value.to_string()));
        }
        Ok(Value::Object(map))
    }

    pub fn view(&self) -> String {
        let title = Style::new()
            .foreground(AdaptiveColor {
                Light: "#874BFD",
                Dark: "#7D56F4",
            })
            .bold(true)
            .render(&self.title);
        let mut out = format!("{title}\n\n");
        for (i, (spec, input)) in self.fields.iter().zip(&self.inputs).enumerate() {
            let marker = if i == self.focus { "▸" } else { " " };
            let label = if spec.required {
                format!("{}*", spec.label)
            } else {
                spec.label.to_string()
            };
            out.push_str(&format!("{marker} {label}\n  {}\n", input.view()));
        }
        if let Some(err) = &self.error {
            let err = Style::new()
                .foreground(AdaptiveColor {
                    Light: "#D70000",
                    Dark: "#FF5F5F",
                })
                .render(err);
            out.push_str(&format!("\n{err}\n"));
        }
        let hint = Style::new()
            .foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            })
            .render("enter save • tab next field • esc cancel");
        out.push_str(&format!("\n{hint}"));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Category, Teacher};
    use crossterm::event::KeyModifiers;

    fn press(form: &mut Form, code: KeyCode) -> FormOutcome {
        let msg: Msg = Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        });
        form.update(&msg)
    }

    fn type_text(form: &mut Form, text: &str) {
        for c in text.chars() {
            press(form, KeyCode::Char(c));
        }
    }

    #[test]
    fn blank_required_field_blocks_submit() {
        let mut form = Form::blank::<Category>();
        let _ = form.focus_first();

        match press(&mut form, KeyCode::Enter) {
            FormOutcome::Pending(_) => {}
            _ => panic!("blank form must not submit"),
        }
        assert!(form.error.is_some());
    }

    #[test]
    fn filled_form_submits_trimmed_payload() {
        let mut form = Form::blank::<Category>();
        let _ = form.focus_first();
        type_text(&mut form, "  Clothing  ");

        match press(&mut form, KeyCode::Enter) {
            FormOutcome::Submitted(body) => {
                assert_eq!(body["name"], "Clothing");
            }
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn esc_cancels_without_payload() {
        let mut form = Form::blank::<Category>();
        let _ = form.focus_first();
        assert!(matches!(press(&mut form, KeyCode::Esc), FormOutcome::Cancelled));
    }

    #[test]
    fn edit_prefills_and_omits_blank_secret() {
        let teacher = Teacher::new("t1", "Ada", "ada@example.com");
        let mut form = Form::prefilled(&teacher);
        let _ = form.focus_first();

        match press(&mut form, KeyCode::Enter) {
            FormOutcome::Submitted(body) => {
                assert_eq!(body["name"], "Ada");
                assert_eq!(body["email"], "ada@example.com");
                assert!(body.get("password").is_none());
                assert!(body.get("contact").is_none());
            }
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn tab_moves_focus_between_fields() {
        let mut form = Form::prefilled(&Teacher::new("t1", "Ada", "ada@example.com"));
        let _ = form.focus_first();

        press(&mut form, KeyCode::Tab);
        assert_eq!(form.focus, 1);
        press(&mut form, KeyCode::BackTab);
        assert_eq!(form.focus, 0);
        press(&mut form, KeyCode::BackTab);
        assert_eq!(form.focus, form.fields.len() - 1);
    }
}
