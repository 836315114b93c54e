use common::activity::{ActivityLog, Level};
use common::jobs::{AutoRefresh, JobStatus};
use common::model::batch::{BatchFiles, BatchResults, BatchStatus, DbStatus};
use gloo_timers::callback::Interval;

use crate::helpers::timestamp;

use super::messages::Target;

pub struct BatchProcessing {
    pub status: Option<BatchStatus>,
    pub db_status: Option<DbStatus>,
    pub files: Option<BatchFiles>,
    pub results: Option<BatchResults>,
    pub db_results: Option<BatchResults>,
    pub batch_job: JobStatus,
    pub db_job: JobStatus,
    pub auto_refresh: AutoRefresh<Interval>,
    pub log: ActivityLog,
}

impl BatchProcessing {
    pub fn new() -> Self {
        Self {
            status: None,
            db_status: None,
            files: None,
            results: None,
            db_results: None,
            batch_job: JobStatus::Idle,
            db_job: JobStatus::Idle,
            auto_refresh: AutoRefresh::new(),
            log: ActivityLog::default(),
        }
    }

    pub fn job_mut(&mut self, target: Target) -> &mut JobStatus {
        match target {
            Target::Batch => &mut self.batch_job,
            Target::Database => &mut self.db_job,
        }
    }

    pub fn record(&mut self, level: Level, message: impl Into<String>) {
        self.log.push(timestamp(), level, message);
    }
}
