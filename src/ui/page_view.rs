//! Rendering a [`Page`] after a trigger has run.

use crate::page::{Navigation, Page};

use super::UserInterface;

/// Show the page's pending navigation, shared message and field errors.
///
/// Navigation is consumed. The message and error slots stay filled until
/// the next trigger is dispatched.
pub fn render_page(page: &mut Page, ui: &mut dyn UserInterface) {
    match page.take_navigation() {
        Some(Navigation::Redirect(location)) => ui.message(&format!("→ {}", location)),
        Some(Navigation::Reload) => ui.message(&format!("↻ {}", page.location())),
        None => {}
    }

    if let Some(message) = page.message() {
        ui.error(message);
    }
    for (field, message) in page.field_errors() {
        ui.error(&format!("{}: {}", field, message));
    }
}
