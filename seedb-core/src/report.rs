//! User-facing notices for a seeding run.
//!
//! The orchestrator never prints; it calls a [`Reporter`]. The CLI picks
//! [`ConsoleReporter`] for terminals and [`TracingReporter`] when output is
//! quiet or redirected. [`MemoryReporter`] keeps notices for inspection.

use crate::error::SeedbError;
use crate::insert::TableSummary;
use console::Style;
use std::sync::Mutex;

/// Receives success and error notices.
pub trait Reporter: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str);

    /// Called once per populated table, regardless of failed records.
    fn table_populated(&self, summary: &TableSummary) {
        if summary.failed == 0 {
            self.success(&format!(
                "Successfully populated table '{}' ({} records)",
                summary.table, summary.inserted
            ));
        } else {
            self.success(&format!(
                "Successfully populated table '{}' ({} inserted, {} failed)",
                summary.table, summary.inserted, summary.failed
            ));
        }
    }

    /// Called for a selected table that could not be seeded at all.
    fn table_skipped(&self, table: &str, reason: &SeedbError) {
        self.error(&format!("Skipping table '{}': {}", table, reason));
    }
}

/// Styled lines on stdout (success) and stderr (error).
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    success_style: Style,
    error_style: Style,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self {
            success_style: Style::new().green().bold().italic(),
            error_style: Style::new().red().bold().italic().underlined(),
        }
    }
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for ConsoleReporter {
    fn success(&self, message: &str) {
        println!("{}", self.success_style.apply_to(message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", self.error_style.apply_to(message));
    }
}

/// Routes notices into the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn success(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// A recorded notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Collects notices in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all notices so far, in order.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }

    fn push(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}

impl Reporter for MemoryReporter {
    fn success(&self, message: &str) {
        self.push(Notice::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notice::Error(message.to_string()));
    }
}
