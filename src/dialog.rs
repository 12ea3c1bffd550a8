//! Dialog controller
//!
//! Owns the create/edit form, the detail surface and the pending delete
//! confirmation, and enforces the transitions between them. It performs no I/O:
//! `submit` and `accept` hand back what should be sent, and the caller reports
//! the outcome through `save_succeeded`/`save_failed`/`delete_finished`.

use crate::error::FormError;
use crate::form::{FormCodec, FormSchema, FormState};
use crate::model::{Entry, EntryId};
use thiserror::Error;
use tracing::debug;

pub const CREATE_HEADING: &str = "Add someone to the ofrenda";
pub const EDIT_HEADING: &str = "Edit Ofrenda Entry";
pub const DELETE_PROMPT: &str = "Are you sure you want to remove this person from the ofrenda?";

/// Which surface is open
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DialogState {
    #[default]
    Closed,
    EditingNew,
    EditingExisting(Entry),
    ViewingDetail(Entry),
}

impl DialogState {
    pub fn is_editing(&self) -> bool {
        matches!(self, DialogState::EditingNew | DialogState::EditingExisting(_))
    }
}

/// A question waiting for a yes/no answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    DeleteEntry { id: EntryId, message: String },
}

impl Confirmation {
    pub fn message(&self) -> &str {
        match self {
            Confirmation::DeleteEntry { message, .. } => message,
        }
    }
}

/// What a successful submit asks the data layer to do
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    Create(Entry),
    Update(EntryId, Entry),
}

/// Why a submit did not produce a request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("no form is open")]
    NotEditing,

    #[error("a save or delete is already in progress")]
    Busy,

    #[error(transparent)]
    Invalid(#[from] FormError),
}

#[derive(Debug, Clone)]
pub struct DialogController {
    state: DialogState,
    form: FormState,
    codec: FormCodec,
    confirmation: Option<Confirmation>,
    in_flight: bool,
}

impl DialogController {
    pub fn new(codec: FormCodec, schema: FormSchema) -> Self {
        let form = FormState::new(schema, codec.default_photo());
        Self {
            state: DialogState::Closed,
            form,
            codec,
            confirmation: None,
            in_flight: false,
        }
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn codec(&self) -> &FormCodec {
        &self.codec
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    /// True while a save or delete request is outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Heading of the edit dialog, if it is open
    pub fn heading(&self) -> Option<&'static str> {
        match self.state {
            DialogState::EditingNew => Some(CREATE_HEADING),
            DialogState::EditingExisting(_) => Some(EDIT_HEADING),
            _ => None,
        }
    }

    /// Entry shown in the detail view
    pub fn detail_entry(&self) -> Option<&Entry> {
        match &self.state {
            DialogState::ViewingDetail(entry) => Some(entry),
            _ => None,
        }
    }

    /// Open an empty form. Only from `Closed`, so an open draft is never replaced.
    pub fn open_create(&mut self) {
        if self.state != DialogState::Closed {
            debug!("Create ignored: dialog is {:?}", self.state);
            return;
        }
        self.codec.reset(&mut self.form);
        self.state = DialogState::EditingNew;
    }

    pub fn open_detail(&mut self, entry: Entry) {
        if self.state != DialogState::Closed {
            debug!("Detail for '{}' ignored: dialog is open", entry.display_name());
            return;
        }
        self.state = DialogState::ViewingDetail(entry);
    }

    pub fn close_detail(&mut self) {
        if matches!(self.state, DialogState::ViewingDetail(_)) {
            self.state = DialogState::Closed;
        }
    }

    /// Open the edit form pre-filled from `entry`, from `Closed` or the detail view
    pub fn edit(&mut self, entry: Entry) {
        if !matches!(self.state, DialogState::Closed | DialogState::ViewingDetail(_)) {
            debug!("Edit of '{}' ignored: a form is open", entry.display_name());
            return;
        }
        self.codec.reset(&mut self.form);
        self.codec.decode_entry(&entry, &mut self.form);
        self.state = DialogState::EditingExisting(entry);
    }

    /// Close the edit form and discard the draft.
    ///
    /// Refused while the form's save is in flight; its outcome still belongs to
    /// this form.
    pub fn cancel(&mut self) {
        if self.in_flight {
            debug!("Cancel ignored: mutation in flight");
            return;
        }
        if self.state.is_editing() {
            self.codec.reset(&mut self.form);
            self.state = DialogState::Closed;
        }
    }

    pub fn remove_photo(&mut self) {
        self.codec.clear_photo(&mut self.form);
    }

    /// Follow the photo URL typed into the form
    pub fn sync_preview(&mut self) {
        self.codec.sync_preview(&mut self.form);
    }

    /// Encode the form into a create or update request and mark it in flight.
    ///
    /// The form's `id` decides between create and update. Nothing changes on
    /// rejection.
    pub fn submit(&mut self) -> Result<SaveRequest, SubmitRejected> {
        if self.in_flight {
            debug!("Submit ignored: mutation in flight");
            return Err(SubmitRejected::Busy);
        }
        if !self.state.is_editing() {
            return Err(SubmitRejected::NotEditing);
        }

        let entry = self.codec.encode_entry(&self.form)?;
        let request = match entry.id.clone() {
            Some(id) => SaveRequest::Update(id, entry),
            None => SaveRequest::Create(entry),
        };
        self.in_flight = true;
        Ok(request)
    }

    pub fn save_succeeded(&mut self) {
        self.in_flight = false;
        if self.state.is_editing() {
            self.codec.reset(&mut self.form);
            self.state = DialogState::Closed;
        }
    }

    /// Keep the dialog and its input as they are
    pub fn save_failed(&mut self) {
        self.in_flight = false;
    }

    /// Ask for confirmation before deleting `entry`.
    ///
    /// Closes the detail view. Returns false for entries that were never saved.
    pub fn request_delete(&mut self, entry: &Entry) -> bool {
        let Some(id) = entry.id.clone() else {
            debug!("Delete ignored: entry has no id");
            return false;
        };
        self.close_detail();
        self.confirmation = Some(Confirmation::DeleteEntry {
            id,
            message: DELETE_PROMPT.to_string(),
        });
        true
    }

    pub fn decline(&mut self) {
        self.confirmation = None;
    }

    /// Take the confirmed delete, marking it in flight
    pub fn accept(&mut self) -> Option<EntryId> {
        if self.in_flight {
            debug!("Delete confirmation ignored: mutation in flight");
            return None;
        }
        match self.confirmation.take()? {
            Confirmation::DeleteEntry { id, .. } => {
                self.in_flight = true;
                Some(id)
            }
        }
    }

    pub fn delete_finished(&mut self) {
        self.in_flight = false;
    }
}
