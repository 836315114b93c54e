use serde::{Deserialize, Serialize};

use crate::model::project::TemplateType;

/// A region of the document the extractor looks at.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Only meaningful for fixed templates: marks the sections whose
    /// parameters are extracted as data fields.
    pub is_parameter_section: bool,
}

/// A named field the extractor should pull out of a section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionParameter {
    pub section_id: String,
    pub name: String,
    pub description: String,
}

/// Sections and parameters accumulated during the configuration step.
/// Held in memory until "Save Configuration" posts it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigurationDraft {
    pub sections: Vec<Section>,
    pub parameters: Vec<SectionParameter>,
}

impl ConfigurationDraft {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.parameters.is_empty()
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn parameters_in<'a>(&'a self, section_id: &'a str) -> impl Iterator<Item = &'a SectionParameter> {
        self.parameters.iter().filter(move |p| p.section_id == section_id)
    }

    /// Adds a section, refusing blank or duplicate names.
    pub fn add_section(&mut self, id: String, name: &str, description: &str, is_parameter_section: bool) -> bool {
        let name = name.trim();
        if name.is_empty() || self.sections.iter().any(|s| s.name.eq_ignore_ascii_case(name)) {
            return false;
        }
        self.sections.push(Section {
            id,
            name: name.to_string(),
            description: description.trim().to_string(),
            is_parameter_section,
        });
        true
    }

    /// Removes a section together with its parameters.
    pub fn remove_section(&mut self, id: &str) {
        self.sections.retain(|s| s.id != id);
        self.parameters.retain(|p| p.section_id != id);
    }

    pub fn toggle_parameter_section(&mut self, id: &str) {
        if let Some(section) = self.sections.iter_mut().find(|s| s.id == id) {
            section.is_parameter_section = !section.is_parameter_section;
        }
    }

    /// Adds a parameter to an existing section, refusing blank names and
    /// names already used in that section.
    pub fn add_parameter(&mut self, section_id: &str, name: &str, description: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.section(section_id).is_none() {
            return false;
        }
        if self.parameters_in(section_id).any(|p| p.name.eq_ignore_ascii_case(name)) {
            return false;
        }
        self.parameters.push(SectionParameter {
            section_id: section_id.to_string(),
            name: name.to_string(),
            description: description.trim().to_string(),
        });
        true
    }

    pub fn remove_parameter(&mut self, section_id: &str, name: &str) {
        self.parameters
            .retain(|p| !(p.section_id == section_id && p.name == name));
    }

    /// Summarizes the draft for the results step.
    ///
    /// Fixed templates only count parameters of sections flagged
    /// `is_parameter_section`; running templates count every parameter.
    /// Output order follows section order, so equal drafts give equal results.
    pub fn summarize(&self, template_type: TemplateType) -> ConfigurationResults {
        let sections: Vec<SectionSummary> = self
            .sections
            .iter()
            .map(|section| {
                let parameters: Vec<String> = self
                    .parameters_in(&section.id)
                    .map(|p| p.name.clone())
                    .collect();
                let counted = match template_type {
                    TemplateType::Fixed => section.is_parameter_section,
                    TemplateType::Running => true,
                };
                SectionSummary {
                    name: section.name.clone(),
                    is_parameter_section: section.is_parameter_section,
                    counted,
                    parameters,
                }
            })
            .collect();

        let total_parameters = sections
            .iter()
            .filter(|s| s.counted)
            .map(|s| s.parameters.len())
            .sum();

        ConfigurationResults {
            template_type,
            total_sections: sections.len(),
            total_parameters,
            sections,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSummary {
    pub name: String,
    pub is_parameter_section: bool,
    pub counted: bool,
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationResults {
    pub template_type: TemplateType,
    pub total_sections: usize,
    pub total_parameters: usize,
    pub sections: Vec<SectionSummary>,
}

/// What the results screen renders when opened from the project list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationEnvelope {
    pub project_id: String,
    pub project_name: String,
    pub template_type: TemplateType,
    pub results: Option<ConfigurationResults>,
}

/// Which version of the draft the backend holds, tracked by digest.
///
/// The digest is taken when the save is sent, so edits made while the
/// request is in flight still count as unsaved after it succeeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveTracker {
    saved: Option<String>,
    in_flight: Option<String>,
}

impl SaveTracker {
    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Refused while a save is already running.
    pub fn begin(&mut self, digest: String) -> bool {
        if self.is_saving() {
            return false;
        }
        self.in_flight = Some(digest);
        true
    }

    pub fn succeeded(&mut self) {
        if let Some(digest) = self.in_flight.take() {
            self.saved = Some(digest);
        }
    }

    pub fn failed(&mut self) {
        self.in_flight = None;
    }

    /// `empty` says whether the current draft has nothing in it; an empty
    /// draft that was never saved is not dirty.
    pub fn is_dirty(&self, current: &str, empty: bool) -> bool {
        match &self.saved {
            Some(saved) => saved != current,
            None => !empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ConfigurationDraft {
        let mut draft = ConfigurationDraft::default();
        assert!(draft.add_section("s1".into(), "Header", "", false));
        assert!(draft.add_section("s2".into(), "Line items", "table rows", true));
        draft.add_parameter("s1", "invoice_number", "");
        draft.add_parameter("s1", "issue_date", "");
        draft.add_parameter("s2", "total_price", "");
        draft
    }

    #[test]
    fn fixed_templates_count_only_parameter_sections() {
        let results = draft().summarize(TemplateType::Fixed);
        assert_eq!(results.total_sections, 2);
        assert_eq!(results.total_parameters, 1);
    }

    #[test]
    fn running_templates_count_everything() {
        let results = draft().summarize(TemplateType::Running);
        assert_eq!(results.total_parameters, 3);
    }

    #[test]
    fn duplicate_and_orphan_entries_are_refused() {
        let mut draft = draft();
        assert!(!draft.add_section("s3".into(), "header", "", false));
        assert!(!draft.add_parameter("s1", "Invoice_Number", ""));
        assert!(!draft.add_parameter("missing", "x", ""));
        assert!(!draft.add_parameter("s1", "   ", ""));
    }

    #[test]
    fn removing_a_section_drops_its_parameters() {
        let mut draft = draft();
        draft.remove_section("s1");
        assert_eq!(draft.parameters.len(), 1);
        assert_eq!(draft.parameters[0].section_id, "s2");
    }

    #[test]
    fn edits_during_a_save_stay_dirty() {
        let mut tracker = SaveTracker::default();
        assert!(!tracker.is_dirty("empty", true));
        assert!(tracker.is_dirty("v1", false));

        assert!(tracker.begin("v1".into()));
        assert!(!tracker.begin("v1".into()));
        // edited while the request is out
        tracker.succeeded();
        assert!(!tracker.is_saving());
        assert!(tracker.is_dirty("v2", false));
        assert!(!tracker.is_dirty("v1", false));

        assert!(tracker.begin("v2".into()));
        tracker.failed();
        assert!(tracker.is_dirty("v2", false));
    }
}
