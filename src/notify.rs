//! Transient status notices shown under a screen's list.

use lipgloss_extras::prelude::*;

/// Severity of a [`Notice`], controlling its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Info,
}

/// A one-line status message, replaced by the next one.
///
/// Screens keep at most one notice; every completed action (or failure)
/// overwrites it, so stale feedback never lingers next to fresh state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            text: text.into(),
        }
    }

    /// Renders the notice with its severity color.
    pub fn view(&self) -> String {
        let color = match self.level {
            Level::Success => AdaptiveColor {
                Light: "#03A550",
                Dark: "#04B575",
            },
            Level::Error => AdaptiveColor {
                Light: "#D70000",
                Dark: "#FF5F5F",
            },
            Level::Info => AdaptiveColor {
                Light: "#874BFD",
                Dark: "#7D56F4",
            },
        };
        Style::new().foreground(color).render(&self.text)
    }
}
