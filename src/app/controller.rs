//! Event handling: the only place `AppState` changes.
//!
//! `handle_event` is synchronous and never performs I/O; it queues
//! `AppCommand`s for the caller to execute.

use super::event::{AppCommand, AppEvent};
use super::state::{AppState, TaskStatus};
use super::status::{Notice, ReadyStatus};
use crate::dialog::{SaveRequest, SubmitRejected};
use crate::error::{ApiError, Operation};
use crate::model::Entry;
use tracing::{debug, error, info, warn};

const BUSY_NOTICE: &str = "Please wait for the current request to finish";

impl AppState {
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Bootstrap | AppEvent::Refresh => self.queue_load(),

            AppEvent::OpenCreate => {
                if self.status.shows_create() {
                    self.dialog.open_create();
                } else {
                    debug!("OpenCreate ignored while {}", self.status);
                }
            }
            AppEvent::OpenDetail(entry) => self.dialog.open_detail(entry),
            AppEvent::CloseDetail => self.dialog.close_detail(),
            AppEvent::EditEntry(entry) => self.dialog.edit(entry),
            AppEvent::CancelEdit => self.dialog.cancel(),
            AppEvent::RemovePhoto => self.dialog.remove_photo(),
            AppEvent::SubmitForm => self.submit_form(),

            AppEvent::RequestDelete(entry) => {
                self.dialog.request_delete(&entry);
            }
            AppEvent::ConfirmAccepted => match self.dialog.accept() {
                Some(id) => {
                    self.tasks.mutation = TaskStatus::InProgress;
                    self.pending_commands.push(AppCommand::DeleteEntry(id));
                }
                None if self.dialog.is_busy() => self.notice = Some(Notice::info(BUSY_NOTICE)),
                None => debug!("ConfirmAccepted with nothing to confirm"),
            },
            AppEvent::ConfirmDeclined => self.dialog.decline(),
            AppEvent::DismissNotice => self.notice = None,

            AppEvent::EntriesLoaded { generation, result } => {
                self.entries_loaded(generation, result)
            }
            AppEvent::EntrySaved(result) => match result {
                Ok(entry) => {
                    info!("Saved entry '{}'", entry.display_name());
                    self.tasks.mutation = TaskStatus::Finished(Ok(()));
                    self.dialog.save_succeeded();
                    self.queue_load();
                }
                Err(err) => {
                    warn!("Save failed: {}", err);
                    self.dialog.save_failed();
                    self.mutation_failed(err, Operation::Save);
                }
            },
            AppEvent::EntryDeleted(result) => {
                self.dialog.delete_finished();
                match result {
                    Ok(_) => {
                        info!("Deleted entry");
                        self.tasks.mutation = TaskStatus::Finished(Ok(()));
                        self.queue_load();
                    }
                    Err(err) => {
                        warn!("Delete failed: {}", err);
                        self.mutation_failed(err, Operation::Delete);
                    }
                }
            }
        }
    }

    fn queue_load(&mut self) {
        self.generation += 1;
        self.tasks.entries = TaskStatus::InProgress;
        self.pending_commands.push(AppCommand::LoadEntries {
            generation: self.generation,
        });
    }

    fn submit_form(&mut self) {
        match self.dialog.submit() {
            Ok(SaveRequest::Create(entry)) => {
                self.tasks.mutation = TaskStatus::InProgress;
                self.pending_commands.push(AppCommand::CreateEntry(entry));
            }
            Ok(SaveRequest::Update(id, entry)) => {
                self.tasks.mutation = TaskStatus::InProgress;
                self.pending_commands.push(AppCommand::UpdateEntry { id, entry });
            }
            Err(SubmitRejected::Busy) => self.notice = Some(Notice::info(BUSY_NOTICE)),
            Err(SubmitRejected::NotEditing) => debug!("SubmitForm ignored: no form open"),
            Err(SubmitRejected::Invalid(err)) => {
                debug!("Form rejected: {}", err);
                self.notice = Some(Notice::error(err.to_string()));
            }
        }
    }

    fn entries_loaded(&mut self, generation: u64, result: Result<Vec<Entry>, ApiError>) {
        if generation < self.generation {
            debug!(
                "Dropping stale entry list (generation {} < {})",
                generation, self.generation
            );
            return;
        }

        match result {
            Ok(entries) => {
                info!("Loaded {} entries", entries.len());
                self.tasks.entries = TaskStatus::Finished(Ok(entries.len()));
                self.entries = entries;
                self.status = ReadyStatus::Ready;
            }
            Err(err) => {
                error!("Failed to load entries: {}", err);
                self.tasks.entries = TaskStatus::Finished(Err(err));
                self.entries.clear();
                self.status = ReadyStatus::NotReady;
            }
        }
    }

    fn mutation_failed(&mut self, err: ApiError, operation: Operation) {
        self.notice = Some(Notice::error(err.user_message(operation)));
        self.tasks.mutation = TaskStatus::Finished(Err(err));
    }
}
