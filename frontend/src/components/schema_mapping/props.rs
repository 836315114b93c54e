use common::model::project::Project;
use common::model::schema::SchemaMappingConfig;
use yew::prelude::*;

use crate::api::ApiClient;

#[derive(Properties, PartialEq, Clone)]
pub struct SchemaMappingProps {
    pub api: ApiClient,
    pub project: Project,
    /// Mapping saved earlier in this session, preferred over the server copy.
    #[prop_or_default]
    pub saved: Option<SchemaMappingConfig>,
    pub on_complete: Callback<SchemaMappingConfig>,
    pub on_back: Callback<()>,
}
