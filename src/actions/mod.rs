//! Declarative triggers and their handlers.
//!
//! A [`Trigger`] names an action (or a form whose submission maps to one);
//! [`ActionDispatcher`] resolves it to the closed [`Action`] set and runs the
//! matching handler against the [`Session`].

pub mod action;
pub mod dispatcher;
pub mod handlers;
pub mod session;

pub use action::{Action, FormName, Trigger, UnknownName};
pub use dispatcher::{ActionDispatcher, Dispatch};
pub use handlers::{apply, logout};
pub use session::{Controls, Session, CLIENT_MODAL, REPORT_MODAL, SHARE_MODAL};
