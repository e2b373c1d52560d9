//! Modal confirmation gate for destructive actions.
//!
//! While a gate is open the owning screen routes every key here and nothing
//! else; the action it guards only proceeds once [`Confirm::update`] returns
//! [`Decision::Confirmed`].

use bubbletea_rs::KeyMsg;
use bubbletea_widgets::key;
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;

/// Outcome of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Aborted,
}

struct ConfirmKeys {
    yes: key::Binding,
    no: key::Binding,
}

impl Default for ConfirmKeys {
    fn default() -> Self {
        Self {
            yes: key::Binding::new(vec![KeyCode::Char('y'), KeyCode::Enter])
                .with_help("y/enter", "confirm"),
            no: key::Binding::new(vec![KeyCode::Char('n'), KeyCode::Esc])
                .with_help("n/esc", "cancel"),
        }
    }
}

/// A yes/no prompt over one pending action.
pub struct Confirm {
    prompt: String,
    keys: ConfirmKeys,
}

impl Confirm {
    /// Creates a gate with the given prompt, e.g.
    /// `"Delete teacher \"Ada\"?"`.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            keys: ConfirmKeys::default(),
        }
    }

    /// Resolves the prompt from a key press. Keys bound to neither answer
    /// return `None` and leave the gate open.
    pub fn update(&self, msg: &KeyMsg) -> Option<Decision> {
        if self.keys.yes.matches(msg) {
            Some(Decision::Confirmed)
        } else if self.keys.no.matches(msg) {
            Some(Decision::Aborted)
        } else {
            None
        }
    }

    pub fn view(&self) -> String {
        let prompt = Style::new()
            .foreground(AdaptiveColor {
                Light: "#D70000",
                Dark: "#FF5F5F",
            })
            .bold(true)
            .render(&self.prompt);
        let hint = Style::new()
            .foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            })
            .render("y/enter confirm • n/esc cancel");
        format!("{prompt}\n{hint}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn yes_keys_confirm() {
        let gate = Confirm::new("Delete?");
        assert_eq!(gate.update(&press(KeyCode::Char('y'))), Some(Decision::Confirmed));
        assert_eq!(gate.update(&press(KeyCode::Enter)), Some(Decision::Confirmed));
    }

    #[test]
    fn no_keys_abort() {
        let gate = Confirm::new("Delete?");
        assert_eq!(gate.update(&press(KeyCode::Char('n'))), Some(Decision::Aborted));
        assert_eq!(gate.update(&press(KeyCode::Esc)), Some(Decision::Aborted));
    }

    #[test]
    fn unbound_keys_leave_the_gate_open() {
        let gate = Confirm::new("Delete?");
        assert_eq!(gate.update(&press(KeyCode::Char('x'))), None);
        assert_eq!(gate.update(&press(KeyCode::Up)), None);
    }

    #[test]
    fn view_shows_the_prompt() {
        let gate = Confirm::new("Delete course \"Algebra\"?");
        assert!(gate.view().contains("Algebra"));
    }
}
