use common::api::ApiError;
use common::model::project::{Project, ProjectStatusSnapshot};

pub enum Msg {
    Load,
    Loaded(Result<Vec<Project>, ApiError>),
    LoadStatus(String),
    StatusLoaded(String, Result<ProjectStatusSnapshot, ApiError>),
    SetAutoRefresh(bool),

    OpenCreate,
    OpenEdit(Project),
    CloseDialog,
    SetName(String),
    SetDescription(String),
    SetScheduleEnabled(bool),
    SetFrequency(String),
    Submit,
    Saved(Result<Project, ApiError>),

    Delete(Project),
    Deleted(String, Result<(), ApiError>),
    Run(Project),
    RunStarted(String, Result<serde_json::Value, ApiError>),

    Select(Project),
    ViewResults(Project),
    SchemaMapping(Project),
    BatchProcessing(Project),
}
