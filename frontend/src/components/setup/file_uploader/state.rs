use std::collections::HashMap;

use common::model::file::{FileKey, FileRecord, UploadQueue};
use gloo_timers::callback::Interval;
use yew::NodeRef;

use crate::api::upload::UploadHandle;

pub struct FileUploader {
    pub queue: UploadQueue,
    /// Browser file objects of entries that have not started yet.
    pub pending: HashMap<FileKey, web_sys::File>,
    /// Request of the file currently uploading.
    pub upload: Option<UploadHandle>,
    /// Simulated-progress ticker of the file currently uploading.
    pub ticker: Option<Interval>,
    pub dragging: bool,
    pub loading_existing: bool,
    pub input_ref: NodeRef,
}

impl FileUploader {
    pub fn new(files: Vec<FileRecord>) -> Self {
        Self {
            queue: UploadQueue::with_existing(files),
            pending: HashMap::new(),
            upload: None,
            ticker: None,
            dragging: false,
            loading_existing: false,
            input_ref: NodeRef::default(),
        }
    }

    /// Stops everything tied to the in-flight upload.
    pub fn settle(&mut self) {
        self.ticker = None;
        self.upload = None;
    }
}
