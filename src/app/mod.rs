//! Application core: state, events, commands
//!
//! ```text
//! AppEvent -> AppState::handle_event -> AppCommand -> execute_command -> AppEvent
//! ```

mod controller;
pub mod event;
pub mod runner;
pub mod state;
pub mod status;

pub use event::{AppCommand, AppEvent};
pub use runner::{execute_command, Ofrenda};
pub use state::{AppState, BackgroundTasks, TaskStatus};
pub use status::{Notice, NoticeLevel, ReadyStatus};
