//! Top-level program model: login first, then screen switching.

use crate::config::Config;
use crate::entities::{Ad, Category, Company, Course, Student, Teacher, User};
use crate::remote::{
    RestClient, RestRelation, RestSource, STUDENT_COURSES, TEACHER_COURSES, TEACHER_STUDENTS,
};
use crate::screen::{AssignScreen, ListScreen, LoggedIn, LoginScreen};
use bubbletea_rs::{Cmd, KeyMsg, Model as TeaModel, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use std::sync::Arc;

enum Screen {
    /// Startup failed before a screen could be built; see `App::fatal`.
    Fatal,
    Login(LoginScreen),
    Categories(ListScreen<Category>),
    Companies(ListScreen<Company>),
    Users(ListScreen<User>),
    Ads(ListScreen<Ad>),
    Teachers(ListScreen<Teacher>),
    Students(ListScreen<Student>),
    Courses(ListScreen<Course>),
    TeacherCourses(AssignScreen<Teacher, Course>),
    StudentCourses(AssignScreen<Student, Course>),
    TeacherStudents(AssignScreen<Teacher, Student>),
}

/// The whole console. Starts on the login screen; once the session cookie is
/// established, number keys jump between the management screens.
pub struct App {
    client: Option<RestClient>,
    config: Config,
    screen: Screen,
    logged_in: bool,
    fatal: Option<String>,
}

impl App {
    fn with_config(config: Config) -> (Self, Option<Cmd>) {
        match RestClient::new(&config) {
            Ok(client) => {
                let mut login = LoginScreen::new(client.clone());
                let cmd = login.focus_first();
                (
                    Self {
                        client: Some(client),
                        config,
                        screen: Screen::Login(login),
                        logged_in: false,
                        fatal: None,
                    },
                    Some(cmd),
                )
            }
            Err(e) => (
                Self {
                    client: None,
                    config,
                    screen: Screen::Fatal,
                    logged_in: false,
                    fatal: Some(e.to_string()),
                },
                None,
            ),
        }
    }

    fn list_screen<R: crate::entities::Entity>(&self, client: &RestClient) -> ListScreen<R> {
        ListScreen::new(
            Arc::new(RestSource::<R>::new(client.clone())),
            self.config.page_size,
        )
    }

    /// Switches to the screen behind a number key and starts its fetch.
    fn goto(&mut self, digit: char) -> Option<Cmd> {
        let client = self.client.clone()?;
        let page_size = self.config.page_size;
        match digit {
            '1' => {
                let mut s = self.list_screen::<Category>(&client);
                let cmd = s.refresh();
                self.screen = Screen::Categories(s);
                Some(cmd)
            }
            '2' => {
                let mut s = self.list_screen::<Company>(&client);
                let cmd = s.refresh();
                self.screen = Screen::Companies(s);
                Some(cmd)
            }
            '3' => {
                let mut s = self.list_screen::<User>(&client);
                let cmd = s.refresh();
                self.screen = Screen::Users(s);
                Some(cmd)
            }
            '4' => {
                let mut s = self.list_screen::<Ad>(&client);
                let cmd = s.refresh();
                self.screen = Screen::Ads(s);
                Some(cmd)
            }
            '5' => {
                let mut s = self.list_screen::<Teacher>(&client);
                let cmd = s.refresh();
                self.screen = Screen::Teachers(s);
                Some(cmd)
            }
            '6' => {
                let mut s = self.list_screen::<Student>(&client);
                let cmd = s.refresh();
                self.screen = Screen::Students(s);
                Some(cmd)
            }
            '7' => {
                let mut s = self.list_screen::<Course>(&client);
                let cmd = s.refresh();
                self.screen = Screen::Courses(s);
                Some(cmd)
            }
            '8' => {
                let mut s = AssignScreen::<Teacher, Course>::new(
                    Arc::new(RestSource::new(client.clone())),
                    Arc::new(RestSource::new(client.clone())),
                    Arc::new(RestRelation::new(client.clone(), TEACHER_COURSES)),
                    "Teacher Courses",
                    page_size,
                );
                let cmd = s.refresh();
                self.screen = Screen::TeacherCourses(s);
                Some(cmd)
            }
            '9' => {
                let mut s = AssignScreen::<Student, Course>::new(
                    Arc::new(RestSource::new(client.clone())),
                    Arc::new(RestSource::new(client.clone())),
                    Arc::new(RestRelation::new(client.clone(), STUDENT_COURSES)),
                    "Student Courses",
                    page_size,
                );
                let cmd = s.refresh();
                self.screen = Screen::StudentCourses(s);
                Some(cmd)
            }
            '0' => {
                let mut s = AssignScreen::<Teacher, Student>::new(
                    Arc::new(RestSource::new(client.clone())),
                    Arc::new(RestSource::new(client.clone())),
                    Arc::new(RestRelation::new(client.clone(), TEACHER_STUDENTS)),
                    "Teacher Students",
                    page_size,
                );
                let cmd = s.refresh();
                self.screen = Screen::TeacherStudents(s);
                Some(cmd)
            }
            _ => None,
        }
    }

    fn wants_text_input(&self) -> bool {
        match &self.screen {
            Screen::Fatal => false,
            Screen::Login(_) => true,
            Screen::Categories(s) => s.wants_text_input(),
            Screen::Companies(s) => s.wants_text_input(),
            Screen::Users(s) => s.wants_text_input(),
            Screen::Ads(s) => s.wants_text_input(),
            Screen::Teachers(s) => s.wants_text_input(),
            Screen::Students(s) => s.wants_text_input(),
            Screen::Courses(s) => s.wants_text_input(),
            Screen::TeacherCourses(s) => s.wants_text_input(),
            Screen::StudentCourses(s) => s.wants_text_input(),
            Screen::TeacherStudents(s) => s.wants_text_input(),
        }
    }

    fn forward(&mut self, msg: &Msg) -> Option<Cmd> {
        match &mut self.screen {
            Screen::Fatal => None,
            Screen::Login(s) => s.update(msg),
            Screen::Categories(s) => s.update(msg),
            Screen::Companies(s) => s.update(msg),
            Screen::Users(s) => s.update(msg),
            Screen::Ads(s) => s.update(msg),
            Screen::Teachers(s) => s.update(msg),
            Screen::Students(s) => s.update(msg),
            Screen::Courses(s) => s.update(msg),
            Screen::TeacherCourses(s) => s.update(msg),
            Screen::StudentCourses(s) => s.update(msg),
            Screen::TeacherStudents(s) => s.update(msg),
        }
    }
}

impl TeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        App::with_config(Config::from_env())
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            if key.key == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Some(bubbletea_rs::quit());
            }
            if self.fatal.is_some() {
                return Some(bubbletea_rs::quit());
            }
            if !self.wants_text_input() {
                match key.key {
                    KeyCode::Char('q') => return Some(bubbletea_rs::quit()),
                    KeyCode::Char(d @ ('0'..='9')) if self.logged_in => {
                        return self.goto(d);
                    }
                    _ => {}
                }
            }
        }
        if let Some(LoggedIn(result)) = msg.downcast_ref::<LoggedIn>() {
            if result.is_ok() {
                self.logged_in = true;
                return self.goto('1');
            }
        }
        self.forward(&msg)
    }

    fn view(&self) -> String {
        if let Some(fatal) = &self.fatal {
            return Style::new()
                .foreground(AdaptiveColor {
                    Light: "#D70000",
                    Dark: "#FF5F5F",
                })
                .render(&format!("startup failed: {fatal}\npress any key to exit"));
        }
        let body = match &self.screen {
            Screen::Fatal => String::new(),
            Screen::Login(s) => s.view(),
            Screen::Categories(s) => s.view(),
            Screen::Companies(s) => s.view(),
            Screen::Users(s) => s.view(),
            Screen::Ads(s) => s.view(),
            Screen::Teachers(s) => s.view(),
            Screen::Students(s) => s.view(),
            Screen::Courses(s) => s.view(),
            Screen::TeacherCourses(s) => s.view(),
            Screen::StudentCourses(s) => s.view(),
            Screen::TeacherStudents(s) => s.view(),
        };
        if self.logged_in {
            let nav = Style::new()
                .foreground(AdaptiveColor {
                    Light: "#909090",
                    Dark: "#626262",
                })
                .render(
                    "1 categories • 2 companies • 3 users • 4 ads • 5 teachers • \
                     6 students • 7 courses • 8 t/courses • 9 s/courses • 0 t/students • q quit",
                );
            format!("{body}\n\n{nav}\n")
        } else {
            format!("{body}\n")
        }
    }
}
