//! Request bodies the console sends to the pipeline backend.

use serde::{Deserialize, Serialize};

use crate::model::configuration::{ConfigurationDraft, Section, SectionParameter};
use crate::model::project::{Schedule, TemplateType};
use crate::model::schema::{ColumnMapping, SchemaMappingConfig};

/// Body of `POST /projects` and `PUT /projects/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub name: String,
    pub description: Option<String>,
    pub master_project_id: Option<String>,
    pub schedule: Option<Schedule>,
}

impl ProjectRequest {
    /// Client-side checks run before the request is allowed to fire.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Project name is required".to_string());
        }
        if self.name.trim().chars().count() > 120 {
            return Err("Project name must be at most 120 characters".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateTypeRequest {
    pub template_type: TemplateType,
}

/// Body of "Save Configuration".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConfigurationRequest {
    pub template_type: TemplateType,
    pub sections: Vec<Section>,
    pub parameters: Vec<SectionParameter>,
}

impl SaveConfigurationRequest {
    pub fn new(template_type: TemplateType, draft: &ConfigurationDraft) -> Self {
        Self {
            template_type,
            sections: draft.sections.clone(),
            parameters: draft.parameters.clone(),
        }
    }
}

/// Body of `POST /schema/schemas/{s}/tables`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub table_name: String,
    pub columns: Vec<ColumnMapping>,
}

/// Body of `PUT /schema/schemas/{s}/tables/{t}/columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddColumnsRequest {
    pub columns: Vec<ColumnMapping>,
}

/// Body of `PUT /projects/{id}/schema/mapping/columns/{col}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSourceRequest {
    pub source_parameter: Option<String>,
}

/// Body of `POST /schema/validate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateSchemaRequest {
    pub project_id: String,
    pub mapping: SchemaMappingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_project_names_are_rejected() {
        let request = ProjectRequest {
            name: "   ".into(),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn template_type_serializes_lowercase() {
        let body = serde_json::to_string(&TemplateTypeRequest {
            template_type: TemplateType::Fixed,
        })
        .unwrap();
        assert_eq!(body, r#"{"templateType":"fixed"}"#);
    }
}
