//! The console's screens.
//!
//! Every entity collection is served by the same generic [`ListScreen`];
//! relationship management by the generic [`AssignScreen`]. Both follow the
//! Elm loop: key presses either mutate local view state directly or spawn a
//! remote call as a `Cmd`, and the collection itself only changes when the
//! call's completion message comes back successful.

mod assign;
mod form;
mod list;
mod login;

pub use assign::AssignScreen;
pub use form::{Form, FormOutcome};
pub use list::ListScreen;
pub use login::{LoggedIn, LoginScreen};

use bubbletea_rs::KeyMsg;

/// Rebuilds a key message so it can be handed to a child widget after the
/// parent has already downcast the original.
pub(crate) fn forward_key(key: &KeyMsg) -> bubbletea_rs::Msg {
    Box::new(KeyMsg {
        key: key.key,
        modifiers: key.modifiers,
    })
}
