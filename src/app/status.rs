//! Readiness of the board and user-visible notices

use std::fmt;

/// Whether the entry list could be loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadyStatus {
    /// Before the first load result
    #[default]
    Loading,
    Ready,
    /// The last load failed; cleared by the next successful refresh
    NotReady,
}

impl ReadyStatus {
    pub fn shows_grid(&self) -> bool {
        matches!(self, ReadyStatus::Ready)
    }

    pub fn shows_create(&self) -> bool {
        matches!(self, ReadyStatus::Ready)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadyStatus::Loading => "loading",
            ReadyStatus::Ready => "ready",
            ReadyStatus::NotReady => "not ready",
        }
    }
}

impl fmt::Display for ReadyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message for the user (the browser's `alert`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
