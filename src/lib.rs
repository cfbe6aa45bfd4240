//! Audit Console - terminal client for the internal auditing workspace.
//!
//! The console logs in to the workspace, drives the three-step report
//! wizard, edits client contacts and shares reports, talking to the same
//! JSON endpoints the web pages use.
//!
//! # Modules
//!
//! - [`actions`] - Triggers, the closed action set and their handlers
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`http`] - Form submission with anti-forgery token and busy controls
//! - [`inactivity`] - Idle timeout that logs the session out
//! - [`metadata`] - Wire types answered and accepted by the workspace
//! - [`page`] - Message slots, visibility and navigation of the current page
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//! - [`wizard`] - Field rendering, step assembly and the report wizard
//!
//! # Example
//!
//! ```
//! use audit_console::metadata::{FieldDescriptor, MetadataDocument};
//! use audit_console::page::Page;
//! use audit_console::wizard::Wizard;
//!
//! let doc = MetadataDocument {
//!     fields: vec![FieldDescriptor::text("project")],
//!     ..Default::default()
//! };
//! let mut wizard = Wizard::from_metadata(&doc);
//! let mut page = Page::new("/reports/");
//!
//! // Required Basic Info fields block the first step
//! assert!(!wizard.next(&mut page));
//! assert!(page.message().unwrap().starts_with("Please fill required fields"));
//! ```

pub mod actions;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod inactivity;
pub mod metadata;
pub mod page;
pub mod ui;
pub mod wizard;

pub use error::{ConsoleError, Result};
