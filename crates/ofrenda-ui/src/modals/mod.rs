//! Modal Dialogs Module
//!
//! - Entry form: create/edit an entry
//! - Detail: read-only view of one entry with edit/delete
//! - Confirm: yes/no question (delete)
//! - Notice: user-visible message

pub mod confirm;
pub mod detail;
pub mod entry_form;
pub mod notice;
