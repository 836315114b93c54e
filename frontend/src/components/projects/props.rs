use common::model::project::Project;
use yew::prelude::*;

use crate::api::ApiClient;

#[derive(Properties, PartialEq, Clone)]
pub struct ProjectListProps {
    pub api: ApiClient,
    /// Open the setup wizard at the project's resume step.
    pub on_select: Callback<Project>,
    pub on_view_results: Callback<Project>,
    pub on_schema_mapping: Callback<Project>,
    pub on_batch_processing: Callback<Project>,
}
