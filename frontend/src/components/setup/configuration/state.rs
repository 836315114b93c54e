use common::model::configuration::{ConfigurationDraft, SaveTracker};

use crate::helpers::compute_md5;

#[derive(Default)]
pub struct SectionForm {
    pub name: String,
    pub description: String,
    pub is_parameter_section: bool,
}

#[derive(Default)]
pub struct ParameterForm {
    pub section_id: Option<String>,
    pub name: String,
    pub description: String,
}

pub struct ConfigurationEditor {
    pub draft: ConfigurationDraft,
    pub section_form: SectionForm,
    pub parameter_form: ParameterForm,
    pub saves: SaveTracker,
    pub error: Option<String>,
}

impl ConfigurationEditor {
    pub fn new(draft: ConfigurationDraft) -> Self {
        let parameter_form = ParameterForm {
            section_id: draft.sections.first().map(|s| s.id.clone()),
            ..Default::default()
        };
        Self {
            draft,
            section_form: SectionForm::default(),
            parameter_form,
            saves: SaveTracker::default(),
            error: None,
        }
    }

    pub fn digest(&self) -> String {
        compute_md5(&serde_json::to_string(&self.draft).unwrap_or_default())
    }

    pub fn is_dirty(&self) -> bool {
        self.saves.is_dirty(&self.digest(), self.draft.is_empty())
    }
}
