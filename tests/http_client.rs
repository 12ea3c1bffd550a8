//! `HttpDataClient` against the in-memory mock `/data` server.
//!
//! Each test binds its own server on `127.0.0.1:0`.

use ofrenda::mock_rest_api::{MockAppState, MockData, MockRestApiConfig, MockRestApiServer};
use ofrenda::{
    ApiError, AppEvent, AppState, ClientConfig, DataClient, Entry, EntryId, HttpDataClient,
    Ofrenda, ReadyStatus,
};
use pretty_assertions::assert_eq;

async fn start(entries: Vec<Entry>) -> (HttpDataClient, MockAppState) {
    let server = MockRestApiServer::with_data(MockRestApiConfig::default(), MockData::seeded(entries));
    let state = server.state();
    let addr = server.spawn_local().await.unwrap();
    let client = HttpDataClient::new(&ClientConfig::new(format!("http://{}", addr))).unwrap();
    (client, state)
}

fn ana() -> Entry {
    let mut e = Entry::draft("Ana");
    e.birth_date = Some("1950-01-01T00:00:00.000Z".into());
    e
}

#[tokio::test]
async fn crud_round_trip() {
    let (client, _) = start(vec![ana()]).await;

    let listed = client.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, Some(EntryId::from(1u64)));
    assert_eq!(listed[0].birth_date, ana().birth_date);
    assert_eq!(listed[0].death_date, None);

    let mut draft = Entry::draft("Frida");
    draft.id = Some(EntryId::new("ignored"));
    let created = client.create(&draft).await.unwrap();
    assert_eq!(created.id, Some(EntryId::from(2u64)));

    let mut edited = created.clone();
    edited.last_name = Some("Kahlo".into());
    let updated = client
        .update(&EntryId::from(2u64), &edited)
        .await
        .unwrap();
    assert_eq!(updated.display_name(), "Frida Kahlo");

    let confirmation = client.remove(&EntryId::from(1u64)).await.unwrap();
    assert_eq!(confirmation["deleted"], "1");

    let names: Vec<String> = client
        .list()
        .await
        .unwrap()
        .iter()
        .map(Entry::display_name)
        .collect();
    assert_eq!(names, vec!["Frida Kahlo".to_string()]);
}

#[tokio::test]
async fn structured_rejection_is_surfaced() {
    let (client, _) = start(vec![]).await;
    let err = client.create(&Entry::draft("")).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 400,
            message: "name is required".into()
        }
    );
}

#[tokio::test]
async fn unknown_id_is_rejected_with_not_found() {
    let (client, _) = start(vec![]).await;
    let err = client.remove(&EntryId::new("42")).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn bare_503_uses_status_text() {
    let (client, state) = start(vec![ana()]).await;
    state.set_available(false);
    let err = client.list().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 503,
            status_text: "Service Unavailable".into()
        }
    );
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    let client = HttpDataClient::new(&ClientConfig::new("http://127.0.0.1:1")).unwrap();
    let err = client.list().await.unwrap_err();
    assert!(err.is_transport(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn app_flow_over_http() {
    let (client, state) = start(vec![ana()]).await;
    let mut app = Ofrenda::new(AppState::new(&ClientConfig::default()), client);
    assert_eq!(app.bootstrap().await, ReadyStatus::Ready);

    app.dispatch(AppEvent::OpenCreate).await;
    app.state_mut().dialog.form_mut().set_value("name", "Frida");
    app.dispatch(AppEvent::SubmitForm).await;
    assert_eq!(app.state().grid().filled_count(), 2);

    state.set_available(false);
    app.dispatch(AppEvent::Refresh).await;
    assert_eq!(app.state().status, ReadyStatus::NotReady);
    assert!(app.state().entries.is_empty());
}
