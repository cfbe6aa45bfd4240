//! Handlers for each [`Action`](super::Action).
//!
//! Handlers run to completion on the console thread. Server and network
//! failures end up on the page; only a broken user interface is an `Err`.

use crate::error::Result;
use crate::http::{FormClient, SubmitControl};
use crate::metadata::{ClientRecord, ClientUpdate, Credentials, ShareRequest};
use crate::page::{Navigation, Page};
use crate::ui::{Prompt, UserInterface};
use crate::wizard::{run_wizard, Wizard, WizardOutcome};

use super::session::{Session, CLIENT_MODAL, REPORT_MODAL, SHARE_MODAL};

/// Shown by share-send when no report was picked.
pub const NO_SHARE_TARGET: &str = "Choose a report to share first.";

/// Error slots of the login form.
const LOGIN_SLOTS: [&str; 2] = ["username", "password"];
/// Error slots of the share form.
const SHARE_SLOTS: [&str; 2] = ["to_email", "message"];

pub fn client_location(id: &str) -> String {
    format!("/clients/{}/", id)
}

pub fn client_update_path(id: &str) -> String {
    format!("/clients/{}/update/", id)
}

pub fn share_path(report_id: &str) -> String {
    format!("/reports/{}/share/", report_id)
}

/// Log the session out.
///
/// Success follows the server's redirect; any failure falls back to a
/// reload, which sends the user to the login page once the session is gone.
/// Used both by the logout action and by the inactivity monitor.
pub fn logout(client: &FormClient, control: &mut SubmitControl, path: &str) -> Navigation {
    let empty = serde_json::Map::new();
    match client.submit(control, path, &empty) {
        Ok(reply) => Navigation::Redirect(reply.redirect_or_root().to_string()),
        Err(failure) => {
            tracing::warn!("Logout failed ({}), reloading", failure);
            Navigation::Reload
        }
    }
}

pub(crate) fn toggle(session: &mut Session, ui: &mut dyn UserInterface, target: &str) {
    let shown = session.page.toggle(target);
    ui.message(&format!("{} {}", target, if shown { "shown" } else { "hidden" }));
}

pub(crate) fn login(session: &mut Session, ui: &mut dyn UserInterface) -> Result<()> {
    let mut username = Prompt::input("username", "Username");
    if let Some(default) = &session.config.username {
        username = username.with_default(default.clone());
    }
    let credentials = Credentials {
        username: ui.prompt(&username)?.as_string(),
        password: ui.prompt(&Prompt::password("password", "Password"))?.as_string(),
    };
    tracing::debug!("Logging in as {:?}", credentials);

    if !session.client.prime() {
        tracing::debug!("No anti-forgery token known, sending login without one");
    }

    session.page.clear_errors();
    let mut spinner = ui.start_spinner(session.controls.login.busy_label());
    let result = session.client.submit(
        &mut session.controls.login,
        &session.config.login_path,
        &credentials,
    );

    match result {
        Ok(reply) => {
            spinner.finish_success(&format!("Logged in as {}", credentials.username));
            session.page.navigate(reply.redirect_or_root());
        }
        Err(failure) => {
            spinner.finish_clear();
            session.page.show_failure(&failure, &LOGIN_SLOTS);
        }
    }
    Ok(())
}

pub(crate) fn logout_action(session: &mut Session, ui: &mut dyn UserInterface) {
    let mut spinner = ui.start_spinner(session.controls.logout.busy_label());
    let navigation = logout(
        &session.client,
        &mut session.controls.logout,
        &session.config.logout_path,
    );
    spinner.finish_clear();

    session.open_client = None;
    session.share_target = None;
    apply(&mut session.page, navigation);
}

/// Apply a navigation to the page.
pub fn apply(page: &mut Page, navigation: Navigation) {
    match navigation {
        Navigation::Redirect(location) => page.navigate(location),
        Navigation::Reload => page.reload(),
    }
}

fn fetch_client(session: &mut Session, id: &str) -> Option<ClientRecord> {
    match session.client.get_json::<ClientRecord>(&client_location(id)) {
        Ok(record) => Some(record),
        Err(failure) => {
            tracing::warn!("Could not load client {}: {}", id, failure);
            session.page.show_failure(&failure, &[]);
            None
        }
    }
}

fn show_client(record: &ClientRecord, ui: &mut dyn UserInterface) {
    ui.show_header(&record.name);
    let contact = record.contact();
    for field in ClientUpdate::FIELDS {
        ui.show_detail(field, contact.get(field).unwrap_or_default());
    }
}

pub(crate) fn client_view(session: &mut Session, ui: &mut dyn UserInterface, id: &str) {
    let Some(record) = fetch_client(session, id) else {
        return;
    };

    show_client(&record, ui);
    session.page.show(CLIENT_MODAL);
    session.open_client = Some(record);
}

pub(crate) fn client_save(
    session: &mut Session,
    ui: &mut dyn UserInterface,
    target: Option<&str>,
) -> Result<()> {
    let open_id = session.open_client.as_ref().map(|c| c.id.to_string());
    let Some(id) = target.map(str::to_string).or(open_id) else {
        session.page.set_message("Choose a client to edit first.");
        return Ok(());
    };

    let cached = session
        .open_client
        .clone()
        .filter(|c| c.id.to_string() == id);
    let record = match cached {
        Some(record) => record,
        None => match fetch_client(session, &id) {
            Some(record) => record,
            None => return Ok(()),
        },
    };

    let mut update = record.contact();
    for field in ClientUpdate::FIELDS {
        let current = update.get(field).unwrap_or_default().to_string();
        let prompt = Prompt::input(field, crate::wizard::label_for(field)).with_default(current);
        let answer = ui.prompt(&prompt)?.as_string();
        update.set(field, answer);
    }

    session.page.clear_errors();
    let mut spinner = ui.start_spinner(session.controls.client_save.busy_label());
    let result = session.client.submit(
        &mut session.controls.client_save,
        &client_update_path(&id),
        &update,
    );

    match result {
        Ok(_) => {
            spinner.finish_success("Client updated");
            let updated = ClientRecord {
                contact_name: update.contact_name,
                contact_email: update.contact_email,
                contact_phone: update.contact_phone,
                address: update.address,
                ..record
            };
            show_client(&updated, ui);
            session.page.hide(CLIENT_MODAL);
            session.open_client = None;
        }
        Err(failure) => {
            spinner.finish_clear();
            session.page.show(CLIENT_MODAL);
            session.open_client = Some(record);
            session.page.show_failure(&failure, &ClientUpdate::FIELDS);
        }
    }
    Ok(())
}

pub(crate) fn report_create(session: &mut Session, ui: &mut dyn UserInterface) -> Result<()> {
    let Some(mut wizard) = Wizard::open(&session.client, &mut session.page) else {
        return Ok(());
    };

    session.page.show(REPORT_MODAL);
    let outcome = run_wizard(&mut wizard, &session.client, &mut session.page, ui);
    // Any dismissal drops the wizard; a created report already navigated away.
    session.page.hide(REPORT_MODAL);

    match outcome? {
        WizardOutcome::Created { id: Some(id) } => ui.success(&format!("Report {} created", id)),
        WizardOutcome::Created { id: None } => ui.success("Report created"),
        WizardOutcome::Cancelled => ui.message("Report wizard closed"),
        WizardOutcome::Abandoned => ui.warning("Report not created"),
    }
    Ok(())
}

pub(crate) fn report_share(session: &mut Session, ui: &mut dyn UserInterface, id: &str) {
    session.share_target = Some(id.to_string());
    session.page.show(SHARE_MODAL);
    ui.message(&format!("Sharing report {}", id));
}

pub(crate) fn share_send(session: &mut Session, ui: &mut dyn UserInterface) -> Result<()> {
    let target = session
        .share_target
        .clone()
        .filter(|_| session.page.is_shown(SHARE_MODAL));
    let Some(report_id) = target else {
        session.page.set_message(NO_SHARE_TARGET);
        return Ok(());
    };

    let request = ShareRequest {
        to_email: ui.prompt(&Prompt::input("to_email", "Send to"))?.as_string(),
        message: ui
            .prompt(&Prompt::input("message", "Message").with_default(""))?
            .as_string(),
    };

    session.page.clear_errors();
    let mut spinner = ui.start_spinner(session.controls.share_send.busy_label());
    let result = session.client.submit(
        &mut session.controls.share_send,
        &share_path(&report_id),
        &request,
    );

    match result {
        Ok(_) => {
            spinner.finish_success("Report shared");
            session.page.hide(SHARE_MODAL);
            session.share_target = None;
        }
        Err(failure) => {
            spinner.finish_clear();
            session.page.show_failure(&failure, &SHARE_SLOTS);
        }
    }
    Ok(())
}
