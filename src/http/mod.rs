//! Talking to the audit workspace.
//!
//! - [`FormClient`] sends JSON forms with the anti-forgery token attached
//! - [`SubmitControl`] is the busy/restore contract of a submit button
//! - [`classify`] turns replies into [`Reply`] or [`SubmitFailure`]

pub mod client;
pub mod control;
pub mod reply;

pub use client::{CsrfSettings, FormClient};
pub use control::{BusyGuard, SubmitControl};
pub use reply::{classify, FieldErrors, Reply, SubmitFailure};
