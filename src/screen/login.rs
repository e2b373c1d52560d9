//! Admin login screen, the entry point of the console.

use crate::notify::Notice;
use crate::remote::RestClient;
use crate::screen::forward_key;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use bubbletea_widgets::textinput::{self, EchoMode};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;

/// Outcome of the login call. The app switches away from the login screen
/// when it sees `Ok`.
pub struct LoggedIn(pub crate::error::Result<()>);

/// Email/password prompt. A successful submit establishes the session
/// cookie on the shared client; every other screen rides on it afterwards.
pub struct LoginScreen {
    client: RestClient,
    email: textinput::Model,
    password: textinput::Model,
    focus: usize,
    submitting: bool,
    notice: Option<Notice>,
}

impl LoginScreen {
    pub fn new(client: RestClient) -> Self {
        let mut email = textinput::new();
        email.set_placeholder("admin email");
        let mut password = textinput::new();
        password.set_placeholder("password");
        password.set_echo_mode(EchoMode::EchoPassword);
        Self {
            client,
            email,
            password,
            focus: 0,
            submitting: false,
            notice: None,
        }
    }

    /// Focuses the email field. Call once when the screen opens.
    pub fn focus_first(&mut self) -> Cmd {
        self.email.focus()
    }

    fn cycle(&mut self) -> Cmd {
        if self.focus == 0 {
            self.email.blur();
            self.focus = 1;
            self.password.focus()
        } else {
            self.password.blur();
            self.focus = 0;
            self.email.focus()
        }
    }

    fn submit(&mut self) -> Option<Cmd> {
        let email = self.email.value().trim().to_string();
        let password = self.password.value();
        if email.is_empty() || password.is_empty() {
            self.notice = Some(Notice::error("email and password are required"));
            return None;
        }
        self.submitting = true;
        self.notice = None;
        let client = self.client.clone();
        Some(Box::pin(async move {
            Some(Box::new(LoggedIn(client.login(&email, &password).await)) as Msg)
        }))
    }

    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(LoggedIn(result)) = msg.downcast_ref::<LoggedIn>() {
            self.submitting = false;
            if let Err(e) = result {
                self.notice = Some(Notice::error(format!("login failed: {e}")));
            }
            return None;
        }
        let key = msg.downcast_ref::<KeyMsg>()?;
        if self.submitting {
            return None;
        }
        match key.key {
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => Some(self.cycle()),
            _ => {
                let input = if self.focus == 0 {
                    &mut self.email
                } else {
                    &mut self.password
                };
                input.update(forward_key(key))
            }
        }
    }

    pub fn view(&self) -> String {
        let title = Style::new()
            .foreground(AdaptiveColor {
                Light: "#874BFD",
                Dark: "#7D56F4",
            })
            .bold(true)
            .render("Admin Login");
        let mut out = format!(
            "{title}\n\n  Email\n  {}\n\n  Password\n  {}\n",
            self.email.view(),
            self.password.view()
        );
        if self.submitting {
            out.push_str("\nsigning in…\n");
        }
        if let Some(notice) = &self.notice {
            out.push_str(&format!("\n{}\n", notice.view()));
        }
        let hint = Style::new()
            .foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            })
            .render("enter sign in • tab switch field");
        out.push_str(&format!("\n{hint}"));
        out
    }
}
