//! Workflow coordinator: where the operator currently is and what data the
//! setup wizard has gathered so far.
//!
//! `Session` is an explicit state object. Every transition is a method that
//! only touches that state; the two transitions that need the backend return
//! a [`Command`] instead of calling it, and the host feeds the outcome back
//! through `project_context_loaded` or `template_type_resolved`.

use crate::api::Lookup;
use crate::model::configuration::{ConfigurationDraft, ConfigurationEnvelope, ConfigurationResults};
use crate::model::file::FileRecord;
use crate::model::project::{Project, ProjectStatus, TemplateType};
use crate::model::schema::SchemaMappingConfig;

pub mod gates;
pub mod steps;

use steps::{clamp_step, CONFIGURE_STEP, FIRST_STEP, RESULTS_STEP, UPLOAD_STEP};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Projects,
    /// The setup wizard at the given step (`1..=5`).
    Setup(u8),
    ViewResults,
    SchemaMapping,
    BatchProcessing,
}

/// Backend work a transition asks the host to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch the stored template type and file list of a resumed project.
    LoadProjectContext { project_id: String },
    /// Fetch the template type before opening the results view.
    ResolveTemplateType { project: Project },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub master_project_id: Option<String>,
    pub view: View,
    pub project: Option<Project>,
    pub template_type: Option<TemplateType>,
    pub files: Vec<FileRecord>,
    pub configuration: ConfigurationDraft,
    pub results: Option<ConfigurationResults>,
    pub configuration_data: Option<ConfigurationEnvelope>,
    pub schema_mapping: Option<SchemaMappingConfig>,
}

/// Setup step a project resumes at, derived from its status.
pub fn resume_step(project: &Project) -> u8 {
    match project.status() {
        ProjectStatus::Saved | ProjectStatus::Active => CONFIGURE_STEP,
        ProjectStatus::InProgress => project
            .last_step
            .filter(|step| *step > 0)
            .map(clamp_step)
            .unwrap_or(FIRST_STEP),
        _ => FIRST_STEP,
    }
}

impl Session {
    pub fn new(master_project_id: Option<String>) -> Self {
        Self {
            master_project_id,
            ..Default::default()
        }
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.id.as_str())
    }

    pub fn step(&self) -> Option<u8> {
        match self.view {
            View::Setup(step) => Some(step),
            _ => None,
        }
    }

    fn is_current(&self, project_id: &str) -> bool {
        self.project_id() == Some(project_id)
    }

    /// Drops everything tied to the current project.
    fn reset_project_state(&mut self) {
        self.template_type = None;
        self.files.clear();
        self.configuration = ConfigurationDraft::default();
        self.results = None;
        self.configuration_data = None;
        self.schema_mapping = None;
    }

    fn enter(&mut self, project: Project, view: View) {
        if !self.is_current(&project.id) {
            self.reset_project_state();
        }
        if self.template_type.is_none() {
            self.template_type = project.template_type;
        }
        self.project = Some(project);
        self.view = view;
    }

    fn envelope(&self) -> Option<ConfigurationEnvelope> {
        let project = self.project.as_ref()?;
        Some(ConfigurationEnvelope {
            project_id: project.id.clone(),
            project_name: project.display_name().to_string(),
            template_type: self.template_type.unwrap_or_default(),
            results: self.results.clone(),
        })
    }

    /// Opens the setup wizard for a project at its resume step.
    pub fn select_project(&mut self, project: Project) -> Option<Command> {
        let step = resume_step(&project);
        self.reset_project_state();
        self.template_type = project.template_type;
        let project_id = project.id.clone();
        self.project = Some(project);
        self.view = View::Setup(step);

        (step > FIRST_STEP).then_some(Command::LoadProjectContext { project_id })
    }

    /// Applies the result of [`Command::LoadProjectContext`]. A missing
    /// template type leaves it unset; only a transport error is returned
    /// for the caller to surface. Stale answers for another project are
    /// ignored.
    pub fn project_context_loaded(
        &mut self,
        project_id: &str,
        template_type: Lookup<TemplateType>,
        files: Vec<FileRecord>,
    ) -> Option<String> {
        if !self.is_current(project_id) {
            return None;
        }
        let error = template_type.error().map(str::to_string);
        if let Some(found) = template_type.found() {
            self.template_type = Some(found);
        }
        self.files = files;
        error
    }

    pub fn view_results(&mut self, project: Project) -> Option<Command> {
        if project.template_type.is_none() {
            return Some(Command::ResolveTemplateType { project });
        }
        self.enter(project, View::ViewResults);
        self.configuration_data = self.envelope();
        None
    }

    /// Applies the result of [`Command::ResolveTemplateType`]. Anything but
    /// a found value falls back to `running` so that a project without a
    /// stored classification can still be viewed.
    pub fn template_type_resolved(&mut self, mut project: Project, lookup: Lookup<TemplateType>) {
        project.template_type = Some(lookup.or(TemplateType::Running));
        self.enter(project, View::ViewResults);
        self.configuration_data = self.envelope();
    }

    pub fn open_schema_mapping(&mut self, project: Project) {
        self.enter(project, View::SchemaMapping);
    }

    pub fn open_batch_processing(&mut self, project: Project) {
        self.enter(project, View::BatchProcessing);
    }

    pub fn template_selected(&mut self, template_type: TemplateType) {
        if self.step().is_some() {
            self.template_type = Some(template_type);
            self.view = View::Setup(UPLOAD_STEP);
        }
    }

    pub fn files_uploaded(&mut self, files: Vec<FileRecord>) {
        if self.step().is_some() {
            self.files = files;
            self.view = View::Setup(CONFIGURE_STEP);
        }
    }

    pub fn configuration_changed(&mut self, draft: ConfigurationDraft) {
        self.configuration = draft;
    }

    /// Summarizes the configuration and moves to the results step.
    /// Calling it again with unchanged inputs yields identical results.
    pub fn complete_configuration(&mut self) -> Option<&ConfigurationResults> {
        self.step()?;
        let template_type = self.template_type.unwrap_or_default();
        self.results = Some(self.configuration.summarize(template_type));
        self.configuration_data = self.envelope();
        self.view = View::Setup(RESULTS_STEP);
        self.results.as_ref()
    }

    pub fn complete_results(&mut self) {
        if self.project.is_some() {
            self.view = View::SchemaMapping;
        }
    }

    pub fn complete_schema_mapping(&mut self, mapping: SchemaMappingConfig) {
        self.schema_mapping = Some(mapping);
        self.view = View::BatchProcessing;
    }

    pub fn complete_batch(&mut self) {
        self.show_projects();
    }

    /// Back to the project list with all per-project state dropped.
    pub fn show_projects(&mut self) {
        self.reset_project_state();
        self.project = None;
        self.view = View::Projects;
    }

    /// Batch processing always returns to the project list, whichever
    /// screen it was opened from.
    pub fn back(&mut self) {
        match self.view {
            View::Setup(step) if step > FIRST_STEP => self.view = View::Setup(step - 1),
            View::SchemaMapping => {
                if self.configuration_data.is_none() {
                    self.configuration_data = self.envelope();
                }
                self.view = View::ViewResults;
            }
            View::Setup(_) | View::ViewResults | View::BatchProcessing | View::Projects => {
                self.show_projects()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::model::configuration::ConfigurationDraft;

    fn project(status: &str, last_step: Option<u8>) -> Project {
        Project {
            id: "p1".into(),
            name: "Invoices".into(),
            status: Some(status.into()),
            last_step,
            ..Default::default()
        }
    }

    #[test]
    fn select_project_derives_the_step() {
        let cases = [
            ("saved", None, 3),
            ("active", Some(1), 3),
            ("in_progress", Some(2), 2),
            ("in_progress", None, 1),
            ("in_progress", Some(0), 1),
            ("draft", Some(4), 1),
            ("weird", None, 1),
        ];
        for (status, last_step, expected) in cases {
            let mut session = Session::default();
            session.select_project(project(status, last_step));
            assert_eq!(session.view, View::Setup(expected), "{status} {last_step:?}");
        }
    }

    #[test]
    fn select_project_resets_working_state() {
        let mut session = Session::default();
        session.files.push(FileRecord::default());
        session.configuration.add_section("s".into(), "Header", "", true);
        session.results = Some(ConfigurationDraft::default().summarize(TemplateType::Fixed));

        let command = session.select_project(project("draft", None));
        assert_eq!(command, None);
        assert!(session.files.is_empty());
        assert!(session.configuration.is_empty());
        assert!(session.results.is_none());
    }

    #[test]
    fn resuming_loads_context_and_soft_fails_on_404() {
        let mut session = Session::default();
        let command = session.select_project(project("saved", None));
        assert_eq!(
            command,
            Some(Command::LoadProjectContext {
                project_id: "p1".into()
            })
        );

        let lookup = Lookup::from_result(Err(ApiError::from_response(404, "")));
        let surfaced = session.project_context_loaded("p1", lookup, vec![]);
        assert_eq!(surfaced, None);
        assert_eq!(session.template_type, None);

        // Manual selection still works afterwards.
        session.view = View::Setup(1);
        session.template_selected(TemplateType::Fixed);
        assert_eq!(session.template_type, Some(TemplateType::Fixed));
        assert_eq!(session.view, View::Setup(2));
    }

    #[test]
    fn stale_context_is_ignored() {
        let mut session = Session::default();
        session.select_project(project("saved", None));
        let surfaced = session.project_context_loaded(
            "other",
            Lookup::Found(TemplateType::Fixed),
            vec![FileRecord::default()],
        );
        assert_eq!(surfaced, None);
        assert_eq!(session.template_type, None);
        assert!(session.files.is_empty());
    }

    #[test]
    fn view_results_resolves_missing_template_type() {
        let mut session = Session::default();
        let p = project("saved", None);
        let command = session.view_results(p.clone());
        assert_eq!(command, Some(Command::ResolveTemplateType { project: p.clone() }));
        assert_eq!(session.view, View::Projects);

        session.template_type_resolved(p, Lookup::TransportError("offline".into()));
        assert_eq!(session.view, View::ViewResults);
        let envelope = session.configuration_data.as_ref().unwrap();
        assert_eq!(envelope.template_type, TemplateType::Running);
        assert_eq!(envelope.project_name, "Invoices");
    }

    #[test]
    fn view_results_is_direct_when_type_is_known() {
        let mut session = Session::default();
        let p = Project {
            template_type: Some(TemplateType::Fixed),
            ..project("saved", None)
        };
        assert_eq!(session.view_results(p), None);
        assert_eq!(session.view, View::ViewResults);
        assert_eq!(session.template_type, Some(TemplateType::Fixed));
    }

    #[test]
    fn wizard_walkthrough() {
        let mut session = Session::default();
        session.select_project(project("draft", None));
        session.template_selected(TemplateType::Fixed);
        session.files_uploaded(vec![FileRecord {
            id: "f1".into(),
            ..Default::default()
        }]);
        assert_eq!(session.view, View::Setup(3));

        let mut draft = ConfigurationDraft::default();
        draft.add_section("s1".into(), "Header", "", true);
        draft.add_parameter("s1", "invoice_number", "");
        session.configuration_changed(draft);
        let total = session.complete_configuration().map(|r| r.total_parameters);
        assert_eq!(total, Some(1));
        assert_eq!(session.view, View::Setup(4));

        session.complete_results();
        assert_eq!(session.view, View::SchemaMapping);
        session.complete_schema_mapping(SchemaMappingConfig::default());
        assert_eq!(session.view, View::BatchProcessing);
        session.complete_batch();
        assert_eq!(session.view, View::Projects);
        assert!(session.project.is_none());
        assert!(session.schema_mapping.is_none());
    }

    #[test]
    fn complete_configuration_is_idempotent() {
        let mut session = Session::default();
        session.select_project(project("draft", None));
        session.template_selected(TemplateType::Running);
        let mut draft = ConfigurationDraft::default();
        draft.add_section("a".into(), "Header", "", false);
        draft.add_section("b".into(), "Body", "", true);
        draft.add_parameter("a", "x", "");
        draft.add_parameter("b", "y", "");
        session.configuration_changed(draft);

        let first = serde_json::to_string(&session.complete_configuration().cloned()).unwrap();
        let second = serde_json::to_string(&session.complete_configuration().cloned()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn back_navigation() {
        let mut session = Session::default();
        session.select_project(project("saved", None));
        session.back();
        assert_eq!(session.view, View::Setup(2));
        session.back();
        session.back();
        assert_eq!(session.view, View::Projects);

        session.open_schema_mapping(project("saved", None));
        session.back();
        assert_eq!(session.view, View::ViewResults);
        assert!(session.configuration_data.is_some());

        session.complete_results();
        session.complete_schema_mapping(SchemaMappingConfig::default());
        session.back();
        assert_eq!(session.view, View::Projects);
    }

    #[test]
    fn setup_transitions_are_ignored_outside_setup() {
        let mut session = Session::default();
        session.template_selected(TemplateType::Fixed);
        assert_eq!(session.view, View::Projects);
        assert!(session.complete_configuration().is_none());
    }
}
