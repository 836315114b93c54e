use common::model::file::FileRecord;
use yew::prelude::*;

use crate::api::ApiClient;

#[derive(Properties, PartialEq, Clone)]
pub struct FileUploaderProps {
    pub api: ApiClient,
    pub project_id: AttrValue,
    /// Files carried over from an earlier visit of this step.
    #[prop_or_default]
    pub files: Vec<FileRecord>,
    /// Called with every acknowledged file when the operator continues.
    pub on_complete: Callback<Vec<FileRecord>>,
    pub on_back: Callback<()>,
}
