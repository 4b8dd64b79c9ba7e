//! Request-scoped display context.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Info => write!(f, "info"),
            NoticeLevel::Warning => write!(f, "warning"),
            NoticeLevel::Error => write!(f, "error"),
        }
    }
}

/// A message meant for whoever is looking at the page or admin screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// State for one display or upload request.
///
/// Created by the caller, passed down to anything that wants to surface a
/// message, and drained once the request is done.
#[derive(Debug, Clone, Default)]
pub struct DisplayContext {
    debug: bool,
    notices: Vec<Notice>,
}

impl DisplayContext {
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            notices: Vec::new(),
        }
    }

    /// Debug mode forces re-rendering and shows placeholders for problems.
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
