use common::model::project::Project;
use yew::prelude::*;

use crate::api::ApiClient;

#[derive(Properties, PartialEq, Clone)]
pub struct BatchProcessingProps {
    pub api: ApiClient,
    pub project: Project,
    pub on_complete: Callback<()>,
    pub on_back: Callback<()>,
}
