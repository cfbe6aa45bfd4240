//! Report wizard and action dispatch through the public API.

use audit_console::actions::{Action, ActionDispatcher, Dispatch, Session, Trigger};
use audit_console::config::ConsoleConfig;
use audit_console::http::{CsrfSettings, FormClient};
use audit_console::page::Page;
use audit_console::ui::MockUI;
use audit_console::wizard::{SubmitOutcome, Widget, Wizard, CREATE_PATH};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn metadata() -> serde_json::Value {
    json!({
        "fields": [
            {"name": "project", "type": "text"},
            {"name": "client", "choices": [{"value": 1, "label": "Harbour Works"}, {"value": 2}]},
            {"name": "audit_date", "type": "date"},
            {"name": "audit_number", "type": "text"},
            {"name": "performed_by", "type": "text"},
            {"name": "report_number", "type": "text"}
        ],
        "score_fields": [{"name": "overall_score_percentage", "type": "number"}],
        "notice_fields": null
    })
}

fn client_for(server: &MockServer) -> FormClient {
    FormClient::with_csrf(
        &server.base_url(),
        Duration::from_secs(5),
        CsrfSettings {
            fixed: Some("token-123".into()),
            ..Default::default()
        },
    )
    .unwrap()
}

fn fill_basic_info(wizard: &mut Wizard) {
    wizard.set_input("project", "North Pier");
    wizard.set_input("client", "2");
    wizard.set_input("audit_date", "2026-10-01");
    wizard.set_input("audit_number", "A-17");
    wizard.set_input("performed_by", "Lerato");
    wizard.set_input("report_number", "R-204");
}

#[test]
fn wizard_opens_from_metadata_and_creates_a_report() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(CREATE_PATH);
        then.status(200).json_body(metadata());
    });
    let create = server.mock(|when, then| {
        when.method(POST)
            .path(CREATE_PATH)
            .header("X-CSRFToken", "token-123")
            .json_body(json!({
                "project": "North Pier",
                "client": "2",
                "audit_date": "2026-10-01",
                "audit_number": "A-17",
                "performed_by": "Lerato",
                "report_number": "R-204",
                "overall_score_percentage": 87.5
            }));
        then.status(200).json_body(json!({"success": true, "id": 31}));
    });

    let client = client_for(&server);
    let mut page = Page::new("/reports/");
    let mut wizard = Wizard::open(&client, &mut page).expect("metadata loads");

    assert_eq!(wizard.steps().len(), 3);
    assert!(wizard.steps()[2].fields.is_empty());
    let Some(select) = wizard.field("client") else {
        panic!("client field missing");
    };
    let Widget::Select { options } = &select.widget else {
        panic!("client should be a select");
    };
    assert_eq!(options.len(), 3);
    assert_eq!(options[2].label, "2");

    fill_basic_info(&mut wizard);
    assert!(wizard.next(&mut page));
    wizard.set_input("overall_score_percentage", "87.5");
    assert!(wizard.next(&mut page));
    assert_eq!(wizard.view().position(), "3/3");
    assert!(wizard.view().submit_visible);

    let outcome = wizard.submit(&client, &mut page);
    create.assert();
    assert_eq!(
        outcome,
        SubmitOutcome::Created {
            id: Some("31".into())
        }
    );
    assert_eq!(page.location(), "/reports/31/");
}

#[test]
fn wizard_sends_back_to_basic_info_when_required_fields_are_cleared() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path(CREATE_PATH);
        then.status(200).json_body(json!({"success": true}));
    });

    let client = client_for(&server);
    let doc = serde_json::from_value(metadata()).unwrap();
    let mut wizard = Wizard::from_metadata(&doc);
    let mut page = Page::new("/reports/");

    fill_basic_info(&mut wizard);
    assert!(wizard.next(&mut page));
    assert!(wizard.next(&mut page));
    wizard.set_input("project", "   ");

    let outcome = wizard.submit(&client, &mut page);
    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert_eq!(wizard.state().current_step(), 0);
    assert_eq!(page.message(), Some("Please fill required fields: project"));
    create.assert_hits(0);
}

#[test]
fn wizard_routes_server_rejections_to_field_slots() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(CREATE_PATH);
        then.status(400).json_body(json!({
            "errors": {
                "report_number": ["Report number already used."],
                "__all__": ["Check the highlighted fields."]
            }
        }));
    });

    let client = client_for(&server);
    let doc = serde_json::from_value(metadata()).unwrap();
    let mut wizard = Wizard::from_metadata(&doc);
    let mut page = Page::new("/reports/");
    fill_basic_info(&mut wizard);

    let outcome = wizard.submit(&client, &mut page);
    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(
        page.field_error("report_number"),
        Some("Report number already used.")
    );
    assert_eq!(page.message(), Some("Check the highlighted fields."));
    assert!(wizard.control().is_enabled());
    assert_eq!(wizard.control().label(), "Create Report");
}

#[test]
fn dispatcher_runs_the_report_wizard_end_to_end() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(CREATE_PATH);
        then.status(200).json_body(metadata());
    });
    let create = server.mock(|when, then| {
        when.method(POST).path(CREATE_PATH);
        then.status(200).json_body(json!({"success": true, "id": "31"}));
    });

    let config = ConsoleConfig {
        base_url: server.base_url(),
        csrf_token: Some("token-123".into()),
        ..Default::default()
    };
    let mut dispatcher = ActionDispatcher::new(Session::new(config).unwrap());
    let mut ui = MockUI::new();
    ui.set_interactive(true);
    ui.set_prompt_response("project", "North Pier");
    ui.set_prompt_response("client", "1");
    ui.set_prompt_response("audit_date", "2026-10-01");
    ui.set_prompt_response("audit_number", "A-17");
    ui.set_prompt_response("performed_by", "Lerato");
    ui.set_prompt_response("report_number", "R-204");
    ui.set_prompt_response("overall_score_percentage", "90");
    ui.queue_prompt_responses("wizard_nav", vec!["next", "next", "submit"]);

    let dispatched = dispatcher
        .dispatch(&Trigger::action("report-create", None), &mut ui)
        .unwrap();

    assert_eq!(dispatched, Dispatch::Handled(Action::ReportCreate));
    create.assert();
    assert!(ui.has_success("Report 31 created"));
    assert_eq!(dispatcher.session().page().location(), "/reports/31/");
}

#[test]
fn dispatcher_ignores_unknown_forms() {
    let config = ConsoleConfig {
        base_url: "http://127.0.0.1:9".into(),
        ..Default::default()
    };
    let mut dispatcher = ActionDispatcher::new(Session::new(config).unwrap());
    let mut ui = MockUI::new();

    let dispatched = dispatcher
        .dispatch(&Trigger::form("newsletter"), &mut ui)
        .unwrap();
    assert_eq!(dispatched, Dispatch::Ignored);
    assert!(ui.prompts_shown().is_empty());
}
