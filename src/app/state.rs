//! Application state
//!
//! - **AppState**: entries, readiness, dialog and notice, plus the command queue
//! - **BackgroundTasks**: in-progress tracking for the list fetch and mutations
//! - **TaskStatus**: background task lifecycle

use super::event::AppCommand;
use super::status::{Notice, ReadyStatus};
use crate::config::{Assets, ClientConfig};
use crate::detail::DetailView;
use crate::dialog::DialogController;
use crate::error::ApiError;
use crate::form::{FormCodec, FormSchema};
use crate::grid::SlotGrid;
use crate::model::Entry;

/// Status of a background task.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TaskStatus<T, E> {
    /// No task running
    #[default]
    Idle,
    /// Task is in progress
    InProgress,
    /// Task completed with result
    Finished(Result<T, E>),
}

impl<T, E> TaskStatus<T, E> {
    pub fn is_idle(&self) -> bool {
        matches!(self, TaskStatus::Idle)
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, TaskStatus::InProgress)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, TaskStatus::Finished(_))
    }
}

/// Background task tracking.
#[derive(Debug, Clone, Default)]
pub struct BackgroundTasks {
    /// Entry list fetch; finishes with the number of entries loaded
    pub entries: TaskStatus<usize, ApiError>,

    /// Create, update or delete
    pub mutation: TaskStatus<(), ApiError>,
}

impl BackgroundTasks {
    pub fn any_in_progress(&self) -> bool {
        self.entries.is_in_progress() || self.mutation.is_in_progress()
    }
}

/// Combined application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub status: ReadyStatus,
    /// Server order; the grid is projected from this on demand
    pub entries: Vec<Entry>,
    pub dialog: DialogController,
    pub notice: Option<Notice>,
    pub tasks: BackgroundTasks,
    pub assets: Assets,
    pub(super) generation: u64,
    pub(super) pending_commands: Vec<AppCommand>,
}

impl AppState {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_codec(
            config.assets.clone(),
            FormCodec::new(config.assets.default_photo.clone()),
        )
    }

    /// State whose form codec was built by the caller, e.g. with a preview hook
    pub fn with_codec(assets: Assets, codec: FormCodec) -> Self {
        Self {
            status: ReadyStatus::default(),
            entries: Vec::new(),
            dialog: DialogController::new(codec, FormSchema::ofrenda()),
            notice: None,
            tasks: BackgroundTasks::default(),
            assets,
            generation: 0,
            pending_commands: Vec::new(),
        }
    }

    /// Fresh projection of the current entries
    pub fn grid(&self) -> SlotGrid {
        SlotGrid::project(&self.entries, &self.assets)
    }

    pub fn detail_view(&self) -> Option<DetailView> {
        self.dialog
            .detail_entry()
            .map(|entry| DetailView::from_entry(entry, &self.assets))
    }

    /// Newest list fetch issued so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drain the commands queued by `handle_event`
    pub fn take_commands(&mut self) -> Vec<AppCommand> {
        std::mem::take(&mut self.pending_commands)
    }

    pub fn has_pending_async(&self) -> bool {
        self.tasks.any_in_progress()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}
