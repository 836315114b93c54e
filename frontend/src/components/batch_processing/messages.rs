use common::api::ApiError;
use common::model::batch::{BatchFiles, BatchResults, BatchStatus, DbStatus};
use serde_json::Value;

/// Which pipeline an action targets.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Batch,
    Database,
}

impl Target {
    pub fn label(self) -> &'static str {
        match self {
            Target::Batch => "Batch processing",
            Target::Database => "Database loading",
        }
    }
}

pub enum Msg {
    Refresh,
    StatusLoaded(Result<BatchStatus, ApiError>),
    DbStatusLoaded(Result<DbStatus, ApiError>),
    FilesLoaded(Result<BatchFiles, ApiError>),
    LoadResults,
    ResultsLoaded(Result<BatchResults, ApiError>),
    DbResultsLoaded(Result<BatchResults, ApiError>),
    SetAutoRefresh(bool),

    SetEnabled(Target, bool),
    Toggled(Target, bool, Result<Value, ApiError>),
    Process(Target),
    Processed(Target, Result<Value, ApiError>),
    Cleanup,
    CleanedUp(Result<Value, ApiError>),

    ClearLog,
    Finish,
    Back,
}
