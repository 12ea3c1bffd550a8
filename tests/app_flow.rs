//! End-to-end flows through the app controller with a recording data client.
//!
//! Every scenario drives `Ofrenda::dispatch` with the same events the UI emits
//! and then checks the resulting state and the exact sequence of API calls.

use std::sync::Mutex;

use async_trait::async_trait;
use ofrenda::app::{execute_command, AppCommand, NoticeLevel};
use ofrenda::client::ApiResult;
use ofrenda::dialog::{DialogState, DELETE_PROMPT};
use ofrenda::{
    ApiError, AppEvent, AppState, ClientConfig, DataClient, Entry, EntryId, Ofrenda, ReadyStatus,
    MAX_SLOTS,
};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── Recording client ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Call {
    List,
    Create(Entry),
    Update(EntryId, Entry),
    Remove(EntryId),
}

#[derive(Default)]
struct RecordingClient {
    entries: Mutex<Vec<Entry>>,
    calls: Mutex<Vec<Call>>,
    list_error: Mutex<Option<ApiError>>,
    save_error: Mutex<Option<ApiError>>,
    next_id: Mutex<u64>,
}

impl RecordingClient {
    fn with_entries(entries: Vec<Entry>) -> Self {
        let client = Self::default();
        *client.next_id.lock().unwrap() = entries.len() as u64;
        *client.entries.lock().unwrap() = entries;
        client
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn list_count(&self) -> usize {
        self.calls().iter().filter(|c| **c == Call::List).count()
    }

    fn fail_list(&self, error: ApiError) {
        *self.list_error.lock().unwrap() = Some(error);
    }

    fn fail_save(&self, error: ApiError) {
        *self.save_error.lock().unwrap() = Some(error);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DataClient for RecordingClient {
    async fn list(&self) -> ApiResult<Vec<Entry>> {
        self.record(Call::List);
        match self.list_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(self.entries.lock().unwrap().clone()),
        }
    }

    async fn create(&self, entry: &Entry) -> ApiResult<Entry> {
        self.record(Call::Create(entry.clone()));
        if let Some(err) = self.save_error.lock().unwrap().clone() {
            return Err(err);
        }
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let mut created = entry.clone();
        created.id = Some(EntryId::from(*next_id));
        self.entries.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &EntryId, entry: &Entry) -> ApiResult<Entry> {
        self.record(Call::Update(id.clone(), entry.clone()));
        if let Some(err) = self.save_error.lock().unwrap().clone() {
            return Err(err);
        }
        let mut entries = self.entries.lock().unwrap();
        if let Some(existing) = entries.iter_mut().find(|e| e.id.as_ref() == Some(id)) {
            *existing = entry.clone();
        }
        Ok(entry.clone())
    }

    async fn remove(&self, id: &EntryId) -> ApiResult<serde_json::Value> {
        self.record(Call::Remove(id.clone()));
        self.entries
            .lock()
            .unwrap()
            .retain(|e| e.id.as_ref() != Some(id));
        Ok(json!({ "deleted": id.as_str() }))
    }
}

// ── Helpers ────────────────────────────────────────────────────

fn ana() -> Entry {
    let mut e = Entry::draft("Ana");
    e.id = Some(EntryId::from(1u64));
    e.birth_date = Some("1950-01-01T00:00:00.000Z".into());
    e
}

fn app(client: RecordingClient) -> Ofrenda<RecordingClient> {
    Ofrenda::new(AppState::new(&ClientConfig::default()), client)
}

// ── Load / status ──────────────────────────────────────────────

#[tokio::test]
async fn ana_fills_first_slot_and_leaves_eleven_empty() {
    let mut app = app(RecordingClient::with_entries(vec![ana()]));
    assert_eq!(app.bootstrap().await, ReadyStatus::Ready);

    let grid = app.state().grid();
    assert_eq!(grid.slots().len(), MAX_SLOTS);
    assert_eq!(grid.filled_count(), 1);
    assert_eq!(grid.empty_count(), 11);

    let click = grid.slots()[0].click_event();
    app.dispatch(click).await;
    let view = app.state().detail_view().unwrap();
    assert_eq!(view.display_name, "Ana");
    assert_eq!(view.dates_line(), "01/01/1950 - ?");
    assert_eq!(view.image, "assets/skull.svg");
}

#[tokio::test]
async fn unavailable_backend_puts_app_in_not_ready_mode() {
    let client = RecordingClient::with_entries(vec![ana()]);
    client.fail_list(ApiError::Status {
        status: 503,
        status_text: "Service Unavailable".into(),
    });
    let mut app = app(client);

    assert_eq!(app.bootstrap().await, ReadyStatus::NotReady);
    let state = app.state();
    assert!(state.entries.is_empty());
    assert!(!state.status.shows_grid());
    assert!(!state.status.shows_create());
    assert_eq!(state.notice, None);
}

#[tokio::test]
async fn refresh_recovers_from_not_ready() {
    let client = RecordingClient::with_entries(vec![ana()]);
    client.fail_list(ApiError::Transport("connection refused".into()));
    let mut app = app(client);
    app.bootstrap().await;

    *app.client().list_error.lock().unwrap() = None;
    app.dispatch(AppEvent::Refresh).await;
    assert_eq!(app.state().status, ReadyStatus::Ready);
    assert_eq!(app.state().grid().filled_count(), 1);
}

// ── Save ───────────────────────────────────────────────────────

#[tokio::test]
async fn new_draft_is_created_and_refreshed_once() {
    let mut app = app(RecordingClient::with_entries(vec![ana()]));
    app.bootstrap().await;

    app.dispatch(AppEvent::OpenCreate).await;
    let form = app.state_mut().dialog.form_mut();
    form.set_value("name", "Frida");
    form.set_value("birthDate", "1907-07-06");
    app.dispatch(AppEvent::SubmitForm).await;

    let calls = app.client().calls();
    assert_eq!(calls.len(), 3);
    let Call::Create(sent) = &calls[1] else {
        panic!("expected create, got {:?}", calls[1]);
    };
    assert_eq!(sent.id, None);
    assert_eq!(sent.name, "Frida");
    assert_eq!(sent.birth_date.as_deref(), Some("1907-07-06T00:00:00.000Z"));
    assert_eq!(sent.death_date, None);
    assert_eq!(calls[2], Call::List);

    assert_eq!(app.state().dialog.state(), &DialogState::Closed);
    assert_eq!(app.state().grid().filled_count(), 2);
}

#[tokio::test]
async fn persisted_entry_is_updated_with_its_id() {
    let mut app = app(RecordingClient::with_entries(vec![ana()]));
    app.bootstrap().await;

    app.dispatch(AppEvent::OpenDetail(ana())).await;
    app.dispatch(AppEvent::EditEntry(ana())).await;
    app.state_mut()
        .dialog
        .form_mut()
        .set_value("lastName", "Reyes");
    app.dispatch(AppEvent::SubmitForm).await;

    let calls = app.client().calls();
    assert_eq!(app.client().list_count(), 2);
    match &calls[1] {
        Call::Update(id, entry) => {
            assert_eq!(id, &EntryId::from(1u64));
            assert_eq!(entry.display_name(), "Ana Reyes");
            assert_eq!(entry.birth_date, ana().birth_date);
        }
        other => panic!("expected update, got {:?}", other),
    }
    assert_eq!(app.state().entries[0].last_name.as_deref(), Some("Reyes"));
}

#[tokio::test]
async fn rejected_save_shows_server_message_and_keeps_dialog() {
    let client = RecordingClient::default();
    client.fail_save(ApiError::Rejected {
        status: 400,
        message: "name is required".into(),
    });
    let mut app = app(client);
    app.bootstrap().await;

    app.dispatch(AppEvent::OpenCreate).await;
    app.state_mut()
        .dialog
        .form_mut()
        .set_value("description", "Loved marigolds");
    app.dispatch(AppEvent::SubmitForm).await;

    let state = app.state();
    let notice = state.notice.clone().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "name is required");
    assert_eq!(state.dialog.state(), &DialogState::EditingNew);
    assert_eq!(
        state.dialog.form().value("description"),
        Some("Loved marigolds")
    );
    assert!(!state.dialog.is_busy());
    assert_eq!(app.client().list_count(), 1);
}

#[tokio::test]
async fn transport_failure_on_save_shows_generic_notice() {
    let client = RecordingClient::default();
    client.fail_save(ApiError::Transport("timed out".into()));
    let mut app = app(client);
    app.bootstrap().await;

    app.dispatch(AppEvent::OpenCreate).await;
    app.state_mut().dialog.form_mut().set_value("name", "Ana");
    app.dispatch(AppEvent::SubmitForm).await;

    assert_eq!(
        app.state().notice.as_ref().map(|n| n.message.as_str()),
        Some("An error occurred while saving")
    );
}

#[tokio::test]
async fn second_submit_while_in_flight_is_rejected() {
    let mut state = AppState::new(&ClientConfig::default());
    state.handle_event(AppEvent::Bootstrap);
    let load = state.take_commands();
    let client = RecordingClient::default();
    for command in load {
        let event = execute_command(&client, command).await;
        state.handle_event(event);
    }

    state.handle_event(AppEvent::OpenCreate);
    state.dialog.form_mut().set_value("name", "Ana");
    state.handle_event(AppEvent::SubmitForm);
    state.handle_event(AppEvent::SubmitForm);

    let commands = state.take_commands();
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], AppCommand::CreateEntry(_)));
    assert_eq!(
        state.notice.as_ref().map(|n| n.level),
        Some(NoticeLevel::Info)
    );
}

// ── Delete ─────────────────────────────────────────────────────

#[tokio::test]
async fn declining_delete_changes_nothing() {
    let mut app = app(RecordingClient::with_entries(vec![ana()]));
    app.bootstrap().await;

    app.dispatch(AppEvent::OpenDetail(ana())).await;
    app.dispatch(AppEvent::RequestDelete(ana())).await;
    assert_eq!(app.state().dialog.state(), &DialogState::Closed);
    assert_eq!(
        app.state().dialog.confirmation().map(|c| c.message()),
        Some(DELETE_PROMPT)
    );

    app.dispatch(AppEvent::ConfirmDeclined).await;
    assert_eq!(app.client().calls(), vec![Call::List]);
    assert_eq!(app.state().entries, vec![ana()]);
    assert_eq!(app.state().dialog.confirmation(), None);
}

#[tokio::test]
async fn accepting_delete_removes_once_and_refreshes_once() {
    let mut app = app(RecordingClient::with_entries(vec![ana()]));
    app.bootstrap().await;

    app.dispatch(AppEvent::OpenDetail(ana())).await;
    app.dispatch(AppEvent::RequestDelete(ana())).await;
    app.dispatch(AppEvent::ConfirmAccepted).await;

    assert_eq!(
        app.client().calls(),
        vec![Call::List, Call::Remove(EntryId::from(1u64)), Call::List]
    );
    assert!(app.state().entries.is_empty());
    assert_eq!(app.state().grid().empty_count(), MAX_SLOTS);
}

// ── Ordering ───────────────────────────────────────────────────

#[tokio::test]
async fn out_of_order_refresh_results_keep_newest_list() {
    let client = RecordingClient::with_entries(vec![ana()]);
    let mut state = AppState::new(&ClientConfig::default());

    state.handle_event(AppEvent::Refresh);
    let older = execute_command(&client, state.take_commands().remove(0)).await;

    client.entries.lock().unwrap().clear();
    state.handle_event(AppEvent::Refresh);
    let newer = execute_command(&client, state.take_commands().remove(0)).await;

    state.handle_event(newer);
    state.handle_event(older);
    assert_eq!(state.generation(), 2);
    assert!(state.entries.is_empty());
    assert_eq!(state.status, ReadyStatus::Ready);
}
