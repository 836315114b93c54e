use common::model::configuration::ConfigurationDraft;
use common::model::project::TemplateType;
use yew::prelude::*;

use crate::api::ApiClient;

#[derive(Properties, PartialEq, Clone)]
pub struct ConfigurationProps {
    pub api: ApiClient,
    pub project_id: AttrValue,
    pub template_type: TemplateType,
    /// Draft held by the coordinator, restored when the step is revisited.
    pub draft: ConfigurationDraft,
    pub on_change: Callback<ConfigurationDraft>,
    pub on_complete: Callback<()>,
    pub on_back: Callback<()>,
}
