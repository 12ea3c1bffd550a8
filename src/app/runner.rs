//! Command execution
//!
//! `execute_command` turns one `AppCommand` into its result `AppEvent`.
//! `Ofrenda` drives a sequential queue on top of it for the CLI and tests;
//! the browser app spawns commands itself and feeds results back per frame.

use super::event::{AppCommand, AppEvent};
use super::state::AppState;
use super::status::ReadyStatus;
use crate::client::DataClient;
use std::collections::VecDeque;
use tracing::debug;

/// Run one command against the data client
pub async fn execute_command<C>(client: &C, command: AppCommand) -> AppEvent
where
    C: DataClient + ?Sized,
{
    debug!("Executing {:?}", command);
    match command {
        AppCommand::LoadEntries { generation } => AppEvent::EntriesLoaded {
            generation,
            result: client.list().await,
        },
        AppCommand::CreateEntry(entry) => AppEvent::EntrySaved(client.create(&entry).await),
        AppCommand::UpdateEntry { id, entry } => {
            AppEvent::EntrySaved(client.update(&id, &entry).await)
        }
        AppCommand::DeleteEntry(id) => AppEvent::EntryDeleted(client.remove(&id).await),
    }
}

/// App state bound to a data client
pub struct Ofrenda<C> {
    state: AppState,
    client: C,
}

impl<C: DataClient> Ofrenda<C> {
    pub fn new(state: AppState, client: C) -> Self {
        Self { state, client }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Handle `event` and every command it causes, awaiting each in turn,
    /// until no commands remain.
    pub async fn dispatch(&mut self, event: AppEvent) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            self.state.handle_event(event);
            for command in self.state.take_commands() {
                queue.push_back(execute_command(&self.client, command).await);
            }
        }
    }

    /// Initial load
    pub async fn bootstrap(&mut self) -> ReadyStatus {
        self.dispatch(AppEvent::Bootstrap).await;
        self.state.status
    }
}
