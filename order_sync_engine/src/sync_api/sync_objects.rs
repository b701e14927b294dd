use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_DAYS: u32 = 7;
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Parameters for one synchronization run. The window size in days and the page size are the only
/// knobs the loop exposes; both must be greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncParams {
    pub days: u32,
    pub page_size: u32,
}

impl Default for SyncParams {
    fn default() -> Self {
        Self { days: DEFAULT_WINDOW_DAYS, page_size: DEFAULT_PAGE_SIZE }
    }
}

impl SyncParams {
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

/// One record that could not be synced, with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncFailure {
    /// The remote trade id, if the record carried one.
    pub tid: Option<String>,
    pub reason: String,
}

/// The summary of one synchronization run.
///
/// A run always produces a result, even when it was cut short: records synced before an abort
/// stand, and the abort reason is carried in [`SyncResult::aborted`] rather than thrown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResult {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    /// Number of trades successfully created or updated.
    pub synced: usize,
    /// Number of pages processed (pages that yielded a trade list).
    pub pages: u32,
    pub failures: Vec<SyncFailure>,
    /// `Some` when the run was terminated early by a transport or protocol failure.
    pub aborted: Option<String>,
}

impl SyncResult {
    pub fn new(window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> Self {
        Self { window_start, window_end, synced: 0, pages: 0, failures: Vec::new(), aborted: None }
    }

    pub fn record_failure(&mut self, tid: Option<String>, reason: String) {
        self.failures.push(SyncFailure { tid, reason });
    }

    /// True when the run saw the end of the remote result set rather than being cut short.
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }
}
