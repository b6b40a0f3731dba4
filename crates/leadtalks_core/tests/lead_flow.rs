use chrono::{NaiveDate, NaiveTime};
use leadtalks_core::{
    CoreConfig, CrmStore, EventKind, FlowContext, FlowError, LeadFlow, ManualClock, NoteKind,
    RequiredField, StageForm, StoreError,
};

fn store_with_acme() -> (CrmStore<ManualClock>, String) {
    let clock = ManualClock::new(
        NaiveDate::from_ymd_opt(2025, 10, 27)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
    );
    let mut store = CrmStore::with_clock(CoreConfig::default(), clock);
    store
        .save_stage(StageForm {
            id: Some("novo".to_string()),
            label: "Contato Inicial".to_string(),
            ..StageForm::default()
        })
        .unwrap();

    let mut lead = store.new_lead("novo");
    lead.name = "Acme".to_string();
    let lead_id = lead.id.clone();
    store.save_lead(lead).unwrap();
    (store, lead_id)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn creating_a_task_from_a_lead_adds_a_linked_event_and_note() {
    let (mut store, acme) = store_with_acme();
    let mut flow = LeadFlow::new();
    flow.open_lead_detail(&store, &acme).unwrap();

    let draft = flow.on_create_task(&store, &acme).unwrap();
    assert_eq!(draft.kind, EventKind::Task);
    assert_eq!(draft.lead_id.as_deref(), Some(acme.as_str()));
    draft.title = "Call back".to_string();
    draft.date = Some(date(2025, 11, 1));
    assert!(matches!(flow.context(), FlowContext::EventDraft { .. }));

    let events_before = store.events().len();
    let notes_before = store.notes().len();
    let (event, note) = flow.confirm_event(&mut store).unwrap();

    assert_eq!(store.events().len(), events_before + 1);
    assert_eq!(store.notes().len(), notes_before + 1);

    assert_eq!(event.kind, EventKind::Task);
    assert_eq!(event.lead_id.as_deref(), Some(acme.as_str()));
    assert_eq!(event.lead_name.as_deref(), Some("Acme"));
    assert_eq!(event.date, date(2025, 11, 1));

    assert_eq!(note.kind, NoteKind::Task);
    assert_eq!(note.text, "Tarefa: Call back");
    assert_eq!(note.lead_id, acme);
    assert_eq!(note.calendar_event_id.as_deref(), Some(event.id.as_str()));
    assert_eq!(note.author, "Agência Brakeel");

    assert_eq!(
        flow.context(),
        &FlowContext::LeadDetail {
            lead_id: acme.clone()
        }
    );
}

#[test]
fn meeting_drafts_keep_both_times_and_label_the_note() {
    let (mut store, acme) = store_with_acme();
    let mut flow = LeadFlow::new();

    let draft = flow.on_create_meeting(&store, &acme).unwrap();
    draft.title = "Kickoff".to_string();
    draft.date = Some(date(2025, 11, 3));
    draft.start_time = NaiveTime::from_hms_opt(14, 0, 0);
    draft.end_time = NaiveTime::from_hms_opt(14, 30, 0);

    let (event, note) = flow.confirm_event(&mut store).unwrap();
    assert_eq!(event.kind, EventKind::Meeting);
    assert_eq!(event.start_time, NaiveTime::from_hms_opt(14, 0, 0));
    assert_eq!(event.end_time, NaiveTime::from_hms_opt(14, 30, 0));
    assert!(event.status.is_none());
    assert_eq!(note.kind, NoteKind::Meeting);
    assert_eq!(note.text, "Reunião: Kickoff");
}

#[test]
fn cancelling_the_draft_creates_nothing_and_returns_to_the_lead() {
    let (mut store, acme) = store_with_acme();
    let events = store.events().clone();
    let notes = store.notes().clone();
    let mut flow = LeadFlow::new();
    flow.open_lead_detail(&store, &acme).unwrap();

    let draft = flow.on_create_task(&store, &acme).unwrap();
    draft.title = "Nunca salvo".to_string();
    flow.cancel_event().unwrap();

    assert!(store.events().ptr_eq(&events));
    assert!(store.notes().ptr_eq(&notes));
    assert_eq!(
        flow.context(),
        &FlowContext::LeadDetail {
            lead_id: acme.clone()
        }
    );
    assert!(store.drain_notices().is_empty());
}

#[test]
fn invalid_draft_stays_open_and_creates_nothing() {
    let (mut store, acme) = store_with_acme();
    let events = store.events().clone();
    let mut flow = LeadFlow::new();
    flow.on_create_task(&store, &acme).unwrap().date = Some(date(2025, 11, 1));

    let error = flow.confirm_event(&mut store).unwrap_err();
    assert!(matches!(
        error,
        FlowError::Store(StoreError::MissingField(RequiredField::EventTitle))
    ));
    assert!(matches!(flow.context(), FlowContext::EventDraft { .. }));
    assert!(store.events().ptr_eq(&events));

    flow.draft_mut().unwrap().title = "Call back".to_string();
    assert!(flow.confirm_event(&mut store).is_ok());
}

#[test]
fn lead_name_on_the_event_is_the_snapshot_taken_when_the_draft_opened() {
    let (mut store, acme) = store_with_acme();
    let mut flow = LeadFlow::new();
    let draft = flow.on_create_task(&store, &acme).unwrap();
    draft.title = "Call back".to_string();
    draft.date = Some(date(2025, 11, 1));

    let mut renamed = store.leads().get(&acme).unwrap().clone();
    renamed.name = "Acme Holdings".to_string();
    store.save_lead(renamed).unwrap();

    let (event, _) = flow.confirm_event(&mut store).unwrap();
    assert_eq!(event.lead_name.as_deref(), Some("Acme"));
}

#[test]
fn unknown_leads_and_missing_drafts_are_rejected() {
    let (mut store, _) = store_with_acme();
    let mut flow = LeadFlow::new();

    assert!(matches!(
        flow.on_create_task(&store, "404"),
        Err(FlowError::LeadNotFound(_))
    ));
    assert!(matches!(
        flow.open_lead_detail(&store, "404"),
        Err(FlowError::LeadNotFound(_))
    ));
    assert!(matches!(
        flow.confirm_event(&mut store),
        Err(FlowError::NoEventDraft)
    ));
    assert!(matches!(flow.cancel_event(), Err(FlowError::NoEventDraft)));
    assert_eq!(flow.context(), &FlowContext::Closed);
}

#[test]
fn confirming_after_the_lead_was_deleted_creates_nothing() {
    let (mut store, acme) = store_with_acme();
    let mut flow = LeadFlow::new();
    let draft = flow.on_create_task(&store, &acme).unwrap();
    draft.title = "Call back".to_string();
    draft.date = Some(date(2025, 11, 1));

    store.delete_lead(&acme);
    let events = store.events().clone();
    let notes = store.notes().clone();

    let error = flow.confirm_event(&mut store).unwrap_err();
    assert!(matches!(error, FlowError::LeadNotFound(ref lead_id) if *lead_id == acme));
    assert!(store.events().ptr_eq(&events));
    assert!(store.notes().ptr_eq(&notes));
    assert!(store.notes_for(&acme).is_empty());
    assert_eq!(flow.context(), &FlowContext::Closed);
}
