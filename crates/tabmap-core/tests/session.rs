//! End-to-end tests for the import session.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use proptest::prelude::*;
use tabmap_core::{ImportEvent, ImportSession, ImportStep, SessionError, SessionOptions};
use tabmap_model::ModelError;

const EMAIL_TEMPLATE: &str = r#"{"columns": [{"key": "email", "required": true}]}"#;

fn email_session(options: SessionOptions) -> ImportSession {
    ImportSession::new(EMAIL_TEMPLATE, options).unwrap()
}

/// Records events as short strings.
fn record(session: &mut ImportSession) -> Rc<RefCell<Vec<String>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    session.subscribe(move |event: &ImportEvent<'_>| {
        let entry = match event {
            ImportEvent::StepChanged { to, .. } => format!("step:{to}"),
            ImportEvent::Completed(result) => format!("completed:{}", result.num_rows),
            ImportEvent::Error(message) => format!("error:{message}"),
            ImportEvent::Closed => "closed".to_string(),
        };
        sink.borrow_mut().push(entry);
    });
    log
}

#[test]
fn email_import_end_to_end() {
    let mut session = email_session(SessionOptions::default());
    let events = record(&mut session);

    assert_eq!(
        session.upload("contacts.csv", b"Email\na@b.com\n").unwrap(),
        ImportStep::RowSelection
    );
    assert_eq!(session.confirm_header_row().unwrap(), ImportStep::MapColumns);

    let mapping = session.editor().unwrap().mapping(0).unwrap();
    assert_eq!(mapping.key, "email");
    assert!(mapping.include);
    assert!(mapping.selected);

    let result = session.submit().unwrap();
    assert_eq!(session.step(), ImportStep::Complete);

    insta::assert_json_snapshot!(result, @r#"
    {
      "num_rows": 1,
      "num_columns": 1,
      "error": null,
      "columns": [
        {
          "key": "email",
          "name": "email"
        }
      ],
      "rows": [
        {
          "index": 0,
          "values": {
            "email": "a@b.com"
          }
        }
      ]
    }
    "#);

    assert_eq!(
        *events.borrow(),
        vec![
            "step:row-selection",
            "step:map-columns",
            "completed:1",
            "step:complete"
        ]
    );
}

#[test]
fn cleared_required_mapping_blocks_submission() {
    let mut session = email_session(SessionOptions::default());
    let events = record(&mut session);
    session.upload("contacts.csv", b"Email\na@b.com\n").unwrap();
    session.confirm_header_row().unwrap();

    session.set_destination(0, "").unwrap();
    assert!(!session.editor().unwrap().validate_required());

    let err = session.submit().unwrap_err();
    match err {
        SessionError::Validation { missing, message } => {
            assert_eq!(missing, vec!["email"]);
            assert_eq!(message, "Please include all required columns");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(session.step(), ImportStep::MapColumns);
    assert!(
        !events
            .borrow()
            .iter()
            .any(|entry| entry.starts_with("completed"))
    );
}

#[test]
fn unsupported_upload_stays_in_upload() {
    let options = SessionOptions::default().with_language("de").with_translations(
        "de",
        BTreeMap::from([(
            "Only CSV, TSV, XLS, and XLSX files can be uploaded".to_string(),
            "Nur CSV-, TSV-, XLS- und XLSX-Dateien".to_string(),
        )]),
    );
    let mut session = email_session(options);
    let events = record(&mut session);

    let err = session.upload("notes.txt", b"hello").unwrap_err();
    assert!(matches!(
        err,
        SessionError::UnsupportedFormat { ref extension, .. } if extension == "txt"
    ));
    assert_eq!(session.step(), ImportStep::Upload);
    assert_eq!(session.error(), Some("Nur CSV-, TSV-, XLS- und XLSX-Dateien"));
    assert_eq!(
        *events.borrow(),
        vec!["error:Nur CSV-, TSV-, XLS- und XLSX-Dateien"]
    );

    // A later good upload clears the error.
    session.upload("contacts.csv", b"Email\na@b.com\n").unwrap();
    assert_eq!(session.error(), None);
}

#[test]
fn failed_read_stays_in_upload() {
    let mut session = email_session(SessionOptions::default());
    let err = session.fail_upload("file could not be read");
    assert_eq!(err, SessionError::Decode("file could not be read".to_string()));
    assert_eq!(session.step(), ImportStep::Upload);
    assert_eq!(session.error(), Some("file could not be read"));
}

#[test]
fn invalid_template_blocks_session() {
    let err = ImportSession::new("{not json", SessionOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Initialization(ModelError::InvalidJson(_))
    ));
    let err = ImportSession::new(r#"{"columns": []}"#, SessionOptions::default()).unwrap_err();
    assert_eq!(err, SessionError::Initialization(ModelError::NoColumns));
}

#[test]
fn header_row_offsets_data() {
    let template = r#"{"columns": [
        {"name": "First Name", "multiple": true},
        {"key": "age"}
    ]}"#;
    let mut session = ImportSession::new(template, SessionOptions::default()).unwrap();
    session
        .upload(
            "people.csv",
            b"Staff export,,\n,,\nFirst Name,Last,Age\nAda,Lovelace,36\nGrace,Hopper,85\n",
        )
        .unwrap();

    assert!(matches!(
        session.select_header_row(9),
        Err(SessionError::HeaderRowOutOfRange { row: 9, rows: 4 })
    ));
    session.select_header_row(1).unwrap();
    assert_eq!(session.data_start_offset(), 2);
    let columns = session.upload_columns();
    assert_eq!(columns[1].name, "Last");
    assert_eq!(columns[1].sample_data, vec!["Lovelace", "Hopper"]);

    session.confirm_header_row().unwrap();
    // "Last" is not suggested and "age" is taken by column 2.
    assert_eq!(
        session
            .available_destinations(1)
            .iter()
            .map(|column| column.key.as_str())
            .collect::<Vec<_>>(),
        vec!["first_name"]
    );
    session.set_destination(1, "first_name").unwrap();

    let result = session.submit().unwrap();
    assert_eq!(result.num_rows, 2);
    assert_eq!(result.rows[0].index, 0);
    assert_eq!(result.rows[0].get("first_name"), Some("Ada Lovelace"));
    assert_eq!(result.rows[1].get("age"), Some("85"));
}

#[test]
fn retreat_from_mapping() {
    let mut session = email_session(SessionOptions::default());
    session.upload("contacts.csv", b"Email\na@b.com\n").unwrap();
    session.confirm_header_row().unwrap();

    assert_eq!(session.retreat(), ImportStep::RowSelection);
    assert!(session.data().is_some());
    assert!(session.editor().is_none());

    assert_eq!(session.retreat(), ImportStep::Upload);
    assert!(session.data().is_none());
}

#[test]
fn retreat_resets_when_header_selection_is_skipped() {
    let mut session = email_session(SessionOptions::default().with_skip_header_row_selection(true));
    assert_eq!(
        session.upload("contacts.csv", b"Email\na@b.com\n").unwrap(),
        ImportStep::MapColumns
    );
    assert!(session.editor().is_some());

    assert_eq!(session.retreat(), ImportStep::Upload);
    assert!(session.data().is_none());
    assert!(session.editor().is_none());
}

#[test]
fn editing_outside_mapping_step_is_rejected() {
    let mut session = email_session(SessionOptions::default());
    assert_eq!(
        session.set_destination(0, "email").unwrap_err(),
        SessionError::InvalidStep {
            expected: ImportStep::MapColumns,
            actual: ImportStep::Upload,
        }
    );
    assert!(matches!(
        session.submit(),
        Err(SessionError::InvalidStep { .. })
    ));
    assert!(matches!(
        session.confirm_header_row(),
        Err(SessionError::InvalidStep { .. })
    ));
}

#[test]
fn taken_destination_is_refused() {
    let mut session = email_session(SessionOptions::default());
    session
        .upload("contacts.csv", b"Email,Other\na@b.com,x@y.z\n")
        .unwrap();
    session.confirm_header_row().unwrap();
    assert!(session.available_destinations(1).is_empty());

    assert_eq!(
        session.set_destination(1, "email").unwrap_err(),
        SessionError::DestinationTaken {
            key: "email".to_string(),
            column: 0,
        }
    );
    let editor = session.editor().unwrap();
    assert!(!editor.mapping(1).unwrap().selected);

    // Re-selecting its own key and freeing it for another column both work.
    session.set_destination(0, "email").unwrap();
    session.set_destination(0, "").unwrap();
    session.set_destination(1, "email").unwrap();

    let result = session.submit().unwrap();
    assert_eq!(result.rows[0].get("email"), Some("x@y.z"));
}

#[test]
fn advance_needs_an_uploaded_file() {
    let mut session = email_session(SessionOptions::default());
    assert_eq!(session.advance().unwrap_err(), SessionError::NoFile);
    assert_eq!(session.step(), ImportStep::Upload);
    assert!(matches!(
        session.confirm_header_row(),
        Err(SessionError::InvalidStep { .. })
    ));

    session.upload("contacts.csv", b"Email\na@b.com\n").unwrap();
    assert_eq!(session.advance().unwrap(), ImportStep::MapColumns);
    assert!(session.editor().is_some());

    // Leaving the mapping step still validates required columns.
    session.set_destination(0, "").unwrap();
    assert!(matches!(
        session.advance(),
        Err(SessionError::Validation { .. })
    ));
    assert_eq!(session.step(), ImportStep::MapColumns);

    session.set_destination(0, "email").unwrap();
    assert_eq!(session.advance().unwrap(), ImportStep::Complete);
}

#[test]
fn close_resets_only_when_complete() {
    let mut session = email_session(SessionOptions::default());
    let events = record(&mut session);
    session.upload("contacts.csv", b"Email\na@b.com\n").unwrap();

    session.close();
    assert_eq!(session.step(), ImportStep::RowSelection);
    assert!(session.data().is_some());

    session.confirm_header_row().unwrap();
    session.submit().unwrap();
    session.close();
    assert_eq!(session.step(), ImportStep::Upload);
    assert!(session.data().is_none());

    let events = events.borrow();
    assert_eq!(events.iter().filter(|entry| *entry == "closed").count(), 2);
    assert_eq!(events.last().map(String::as_str), Some("step:upload"));
}

#[test]
fn step_labels_follow_options() {
    let session = email_session(
        SessionOptions::default()
            .with_skip_header_row_selection(true)
            .with_language("de")
            .with_translations(
                "de",
                BTreeMap::from([("Upload".to_string(), "Hochladen".to_string())]),
            ),
    );
    let labels = session.step_labels();
    assert_eq!(labels.len(), 3);
    assert_eq!(labels[0].1, "Hochladen");
    assert_eq!(labels[1], (ImportStep::RowSelection, "Select Header".to_string(), false));
    assert!(labels[2].2);
}

#[derive(Debug, Clone)]
enum Action {
    Upload(bool),
    SelectHeader(usize),
    Confirm,
    Advance,
    Retreat,
    Submit,
    Reset,
    Close,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        any::<bool>().prop_map(Action::Upload),
        (0usize..3).prop_map(Action::SelectHeader),
        Just(Action::Confirm),
        Just(Action::Advance),
        Just(Action::Retreat),
        Just(Action::Submit),
        Just(Action::Reset),
        Just(Action::Close),
    ]
}

proptest! {
    #[test]
    fn skipping_never_enters_row_selection(actions in prop::collection::vec(action(), 0..30)) {
        let mut session =
            email_session(SessionOptions::default().with_skip_header_row_selection(true));
        let visited = Rc::new(RefCell::new(vec![session.step()]));
        let sink = Rc::clone(&visited);
        session.subscribe(move |event: &ImportEvent<'_>| {
            if let ImportEvent::StepChanged { to, .. } = event {
                sink.borrow_mut().push(*to);
            }
        });

        for action in actions {
            let _ = match action {
                Action::Upload(valid) => {
                    let name = if valid { "contacts.csv" } else { "contacts.pdf" };
                    session.upload(name, b"Email\na@b.com\n").map(|_| ())
                }
                Action::SelectHeader(row) => session.select_header_row(row),
                Action::Confirm => session.confirm_header_row().map(|_| ()),
                Action::Advance => session.advance().map(|_| ()),
                Action::Retreat => {
                    session.retreat();
                    Ok(())
                }
                Action::Submit => session.submit().map(|_| ()),
                Action::Reset => {
                    session.reset();
                    Ok(())
                }
                Action::Close => {
                    session.close();
                    Ok(())
                }
            };
            prop_assert_ne!(session.step(), ImportStep::RowSelection);
        }
        prop_assert!(!visited.borrow().contains(&ImportStep::RowSelection));
    }
}
