//! Ofrenda: client for a digital memorial board
//!
//! The board is a fixed grid of `MAX_SLOTS` picture frames filled from the
//! `/data` API. This crate is the headless core shared by the browser app and
//! the CLI:
//!
//! - [`model`]: the `Entry` record
//! - [`form`]: edit form state and the form codec
//! - [`client`]: the `DataClient` trait and its HTTP implementation
//! - [`grid`] / [`detail`]: projections for display
//! - [`dialog`]: create/edit/detail/delete state machine
//! - [`app`]: event handling and command execution

pub mod app;
pub mod client;
pub mod config;
pub mod detail;
pub mod dialog;
pub mod error;
pub mod form;
pub mod grid;
pub mod model;

#[cfg(feature = "mock-server")]
pub mod mock_rest_api;

pub use app::{AppCommand, AppEvent, AppState, Notice, NoticeLevel, Ofrenda, ReadyStatus};
pub use client::{DataClient, HttpDataClient};
pub use config::{Assets, ClientConfig};
pub use detail::DetailView;
pub use dialog::{Confirmation, DialogController, DialogState};
pub use error::{ApiError, ConfigError, FormError, OfrendaError, Result};
pub use grid::{Slot, SlotGrid, MAX_SLOTS};
pub use model::{Entry, EntryId};
