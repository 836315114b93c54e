//! Root component: hosts the workflow [`Session`] and renders the screen for
//! the current view.
//!
//! Transitions are applied to the session synchronously. The two that need
//! the backend return a [`Command`], which is executed here and fed back as a
//! message once the request settles.

use common::activity::Level;
use common::api::{Lookup, RuntimeConfig};
use common::model::configuration::ConfigurationDraft;
use common::model::file::FileRecord;
use common::model::project::{Project, TemplateType};
use common::model::schema::SchemaMappingConfig;
use common::workflow::steps::{
    display_step, CONFIGURE_STEP, MAPPING_STEP, RESULTS_STEP, TEMPLATE_STEP, UPLOAD_STEP,
};
use common::workflow::{Command, Session, View};
use gloo_console::warn;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::components::batch_processing::BatchProcessing;
use crate::components::projects::ProjectList;
use crate::components::schema_mapping::SchemaMapping;
use crate::components::setup::configuration::ConfigurationEditor;
use crate::components::setup::file_uploader::FileUploader;
use crate::components::setup::results::ResultsView;
use crate::components::setup::template_selection::TemplateSelection;
use crate::components::step_indicator::StepIndicator;
use crate::config::load_runtime_config;
use crate::helpers::show_toast;

pub enum Msg {
    ConfigLoaded(RuntimeConfig),
    SelectProject(Project),
    ViewResults(Project),
    OpenSchemaMapping(Project),
    OpenBatchProcessing(Project),
    ProjectContextLoaded {
        project_id: String,
        template_type: Lookup<TemplateType>,
        files: Vec<FileRecord>,
    },
    TemplateTypeResolved {
        project: Project,
        template_type: Lookup<TemplateType>,
    },
    TemplateSelected(TemplateType),
    FilesUploaded(Vec<FileRecord>),
    ConfigurationChanged(ConfigurationDraft),
    ConfigurationCompleted,
    ResultsCompleted,
    SchemaMappingCompleted(SchemaMappingConfig),
    BatchCompleted,
    Back,
}

pub struct App {
    api: Option<ApiClient>,
    session: Session,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::ConfigLoaded(load_runtime_config().await));
        });
        Self {
            api: None,
            session: Session::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let command = match msg {
            Msg::ConfigLoaded(config) => {
                self.session = Session::new(config.master_project_id.clone());
                self.api = Some(ApiClient::new(config));
                None
            }
            Msg::SelectProject(project) => self.session.select_project(project),
            Msg::ViewResults(project) => self.session.view_results(project),
            Msg::OpenSchemaMapping(project) => {
                self.session.open_schema_mapping(project);
                None
            }
            Msg::OpenBatchProcessing(project) => {
                self.session.open_batch_processing(project);
                None
            }
            Msg::ProjectContextLoaded {
                project_id,
                template_type,
                files,
            } => {
                if let Some(error) =
                    self.session
                        .project_context_loaded(&project_id, template_type, files)
                {
                    show_toast(
                        &format!("Could not load the project template type: {}", error),
                        Level::Error,
                    );
                }
                None
            }
            Msg::TemplateTypeResolved {
                project,
                template_type,
            } => {
                if let Some(error) = template_type.error() {
                    warn!(format!(
                        "Template type of {} unavailable, assuming running: {}",
                        project.id, error
                    ));
                }
                self.session.template_type_resolved(project, template_type);
                None
            }
            Msg::TemplateSelected(template_type) => {
                self.session.template_selected(template_type);
                None
            }
            Msg::FilesUploaded(files) => {
                self.session.files_uploaded(files);
                None
            }
            Msg::ConfigurationChanged(draft) => {
                self.session.configuration_changed(draft);
                // The editor keeps its own copy; nothing to redraw.
                return false;
            }
            Msg::ConfigurationCompleted => {
                self.session.complete_configuration();
                None
            }
            Msg::ResultsCompleted => {
                self.session.complete_results();
                None
            }
            Msg::SchemaMappingCompleted(mapping) => {
                self.session.complete_schema_mapping(mapping);
                None
            }
            Msg::BatchCompleted => {
                self.session.complete_batch();
                None
            }
            Msg::Back => {
                self.session.back();
                None
            }
        };
        if let Some(command) = command {
            self.execute(ctx, command);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(api) = self.api.clone() else {
            return html! { <div class="app loading">{ "Loading console configuration..." }</div> };
        };

        html! {
            <div class="app">
                <header class="app-header">
                    <h1>{ "Extraction Console" }</h1>
                    if let Some(project) = &self.session.project {
                        <span class="current-project">{ project.display_name() }</span>
                    }
                </header>
                if let Some(step) = display_step(&self.session.view) {
                    <StepIndicator current={step} />
                }
                <main>{ self.screen(ctx, api) }</main>
            </div>
        }
    }
}

impl App {
    fn execute(&self, ctx: &Context<Self>, command: Command) {
        let Some(api) = self.api.clone() else {
            return;
        };
        let link = ctx.link().clone();
        match command {
            Command::LoadProjectContext { project_id } => spawn_local(async move {
                let template_type = Lookup::from_result(api.template_type(&project_id).await);
                let files = match api.list_files(&project_id).await {
                    Ok(files) => files,
                    Err(error) => {
                        warn!(format!("Could not list files of {}: {}", project_id, error));
                        Vec::new()
                    }
                };
                link.send_message(Msg::ProjectContextLoaded {
                    project_id,
                    template_type,
                    files,
                });
            }),
            Command::ResolveTemplateType { project } => spawn_local(async move {
                let template_type = Lookup::from_result(api.template_type(&project.id).await);
                link.send_message(Msg::TemplateTypeResolved {
                    project,
                    template_type,
                });
            }),
        }
    }

    fn screen(&self, ctx: &Context<Self>, api: ApiClient) -> Html {
        let link = ctx.link();
        let session = &self.session;
        let on_back = link.callback(|_: ()| Msg::Back);

        let Some(project) = session.project.clone() else {
            return html! {
                <ProjectList
                    {api}
                    on_select={link.callback(Msg::SelectProject)}
                    on_view_results={link.callback(Msg::ViewResults)}
                    on_schema_mapping={link.callback(Msg::OpenSchemaMapping)}
                    on_batch_processing={link.callback(Msg::OpenBatchProcessing)}
                />
            };
        };

        match session.view {
            View::Projects => html! {},
            View::Setup(TEMPLATE_STEP) => html! {
                <TemplateSelection
                    {api}
                    project_id={project.id.clone()}
                    selected={session.template_type}
                    on_select={link.callback(Msg::TemplateSelected)}
                    {on_back}
                />
            },
            View::Setup(UPLOAD_STEP) => html! {
                <FileUploader
                    {api}
                    project_id={project.id.clone()}
                    files={session.files.clone()}
                    on_complete={link.callback(Msg::FilesUploaded)}
                    {on_back}
                />
            },
            View::Setup(CONFIGURE_STEP) => html! {
                <ConfigurationEditor
                    {api}
                    project_id={project.id.clone()}
                    template_type={session.template_type.unwrap_or_default()}
                    draft={session.configuration.clone()}
                    on_change={link.callback(Msg::ConfigurationChanged)}
                    on_complete={link.callback(|_: ()| Msg::ConfigurationCompleted)}
                    {on_back}
                />
            },
            View::Setup(RESULTS_STEP) | View::ViewResults => html! {
                <ResultsView
                    envelope={session.configuration_data.clone()}
                    file_count={session.files.len()}
                    on_next={link.callback(|_: ()| Msg::ResultsCompleted)}
                    {on_back}
                />
            },
            View::Setup(MAPPING_STEP) | View::SchemaMapping => html! {
                <SchemaMapping
                    {api}
                    {project}
                    saved={session.schema_mapping.clone()}
                    on_complete={link.callback(Msg::SchemaMappingCompleted)}
                    {on_back}
                />
            },
            View::Setup(_) => html! {},
            View::BatchProcessing => html! {
                <BatchProcessing
                    {api}
                    {project}
                    on_complete={link.callback(|_: ()| Msg::BatchCompleted)}
                    {on_back}
                />
            },
        }
    }
}
