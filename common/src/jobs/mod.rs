//! Long-running operations the console starts and watches from the browser.
//!
//! - `JobStatus`: the state of a one-shot action such as a batch run or a
//!   database-sink run, shown next to the button that started it.
//! - `refresh`: the auto-refresh task slot used by the polling screens.

use serde::{Deserialize, Serialize};

pub mod refresh;

pub use refresh::{AutoRefresh, AUTO_REFRESH_INTERVAL_MS};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum JobStatus {
    #[default]
    Idle,
    InProgress,
    Completed(String),
    Failed(String),
}

impl JobStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, JobStatus::InProgress)
    }

    /// Moves to `InProgress` unless a run is already going.
    pub fn begin(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        *self = JobStatus::InProgress;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_running_job_cannot_be_started_twice() {
        let mut status = JobStatus::default();
        assert!(status.begin());
        assert!(!status.begin());
        status = JobStatus::Failed("timeout".into());
        assert!(status.begin());
    }
}
