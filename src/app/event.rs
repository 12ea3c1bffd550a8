//! Events (user intent and task results) and commands (I/O to perform)
//!
//! UI code emits `AppEvent`s rather than mutating state directly. Events are
//! processed by `AppState::handle_event`, which may queue `AppCommand`s.

use crate::error::ApiError;
use crate::model::{Entry, EntryId};

/// Application events representing user intent.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------
    /// Initial page load
    Bootstrap,

    /// Re-fetch the entry list
    Refresh,

    // -------------------------------------------------------------------------
    // Grid / dialog
    // -------------------------------------------------------------------------
    /// Create affordance or an empty slot was clicked
    OpenCreate,

    /// A filled slot was clicked
    OpenDetail(Entry),

    CloseDetail,

    /// "Edit" chosen for an entry
    EditEntry(Entry),

    CancelEdit,

    SubmitForm,

    /// Drop the photo from the open form
    RemovePhoto,

    // -------------------------------------------------------------------------
    // Delete confirmation
    // -------------------------------------------------------------------------
    RequestDelete(Entry),

    ConfirmAccepted,

    ConfirmDeclined,

    DismissNotice,

    // -------------------------------------------------------------------------
    // Task results (from background task completion)
    // -------------------------------------------------------------------------
    EntriesLoaded {
        generation: u64,
        result: Result<Vec<Entry>, ApiError>,
    },

    EntrySaved(Result<Entry, ApiError>),

    EntryDeleted(Result<serde_json::Value, ApiError>),
}

/// Application commands for the `/data` API.
///
/// Emitted by `handle_event`, executed by `execute_command`.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Fetch the list; `generation` identifies the fetch so stale results can be dropped
    LoadEntries { generation: u64 },

    CreateEntry(Entry),

    UpdateEntry { id: EntryId, entry: Entry },

    DeleteEntry(EntryId),
}
