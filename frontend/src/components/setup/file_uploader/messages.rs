use common::api::ApiError;
use common::model::file::{FileKey, FileRecord};

pub enum Msg {
    LoadExisting,
    ExistingLoaded(Result<Vec<FileRecord>, ApiError>),

    /// Files chosen in the picker or dropped on the zone.
    Add(Vec<web_sys::File>),
    DragOver,
    DragLeave,
    OpenPicker,

    StartNext,
    Tick(FileKey),
    Progress(FileKey, u8),
    Finished(FileKey, Result<FileRecord, ApiError>),

    Remove(FileKey),
    Removed(FileKey, Result<(), ApiError>),

    Continue,
    Back,
}
