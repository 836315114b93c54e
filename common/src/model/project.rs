use serde::{Deserialize, Deserializer, Serialize};

/// How the backend lays out extracted sections for a project.
///
/// `Fixed` templates only count sections explicitly flagged as parameter
/// sections; `Running` templates count every parameter they find. Projects
/// that were never classified are treated as `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Fixed,
    #[default]
    Running,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Fixed => "fixed",
            TemplateType::Running => "running",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemplateType::Fixed => "Fixed layout",
            TemplateType::Running => "Running layout",
        }
    }

    /// Case-insensitive parse; anything else is "not classified".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fixed" => Some(TemplateType::Fixed),
            "running" => Some(TemplateType::Running),
            _ => None,
        }
    }
}

/// Reads a project's `templateType` without ever failing the surrounding
/// list: unknown strings, empty strings and non-string values become `None`.
fn lenient_template_type<'de, D>(deserializer: D) -> Result<Option<TemplateType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(TemplateType::parse))
}

/// Lifecycle status reported by the backend for a project.
///
/// The backend sends a free-form string; anything not recognised lands in
/// `Other` so an unexpected value never fails deserialization of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectStatus {
    Draft,
    InProgress,
    Saved,
    Active,
    Completed,
    Other(String),
}

impl From<&str> for ProjectStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "draft" | "new" => ProjectStatus::Draft,
            "in_progress" => ProjectStatus::InProgress,
            "saved" => ProjectStatus::Saved,
            "active" => ProjectStatus::Active,
            "completed" => ProjectStatus::Completed,
            other => ProjectStatus::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Schedule {
    pub enabled: bool,
    pub frequency: Option<String>,
    pub cron: Option<String>,
    pub next_run: Option<String>,
    pub last_run: Option<String>,
}

/// A sub-project of the active master project, as listed by `GET /projects`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub last_step: Option<u8>,
    #[serde(deserialize_with = "lenient_template_type")]
    pub template_type: Option<TemplateType>,
    pub schedule: Option<Schedule>,
    pub progress: Option<f64>,
    pub file_count: Option<u32>,
    pub processed_count: Option<u32>,
    pub master_project_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Project {
    pub fn status(&self) -> ProjectStatus {
        ProjectStatus::from(self.status.as_deref().unwrap_or_default())
    }

    /// Server-computed progress clamped to `0..=100`.
    pub fn progress_percent(&self) -> u8 {
        clamp_percent(self.progress.unwrap_or(0.0))
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Snapshot returned by `GET /projects/{id}/status`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectStatusSnapshot {
    pub status: Option<String>,
    pub progress: Option<f64>,
    pub total_files: u32,
    pub processed_files: u32,
    pub failed_files: u32,
    pub last_run: Option<String>,
    pub message: Option<String>,
}

impl ProjectStatusSnapshot {
    pub fn progress_percent(&self) -> u8 {
        match self.progress {
            Some(p) => clamp_percent(p),
            None if self.total_files > 0 => clamp_percent(
                f64::from(self.processed_files) * 100.0 / f64::from(self.total_files),
            ),
            None => 0,
        }
    }
}

fn clamp_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_strings_are_preserved() {
        let project = Project {
            status: Some("archived".to_string()),
            ..Default::default()
        };
        assert_eq!(project.status(), ProjectStatus::Other("archived".to_string()));
        assert_eq!(Project::default().status(), ProjectStatus::Draft);
    }

    #[test]
    fn progress_is_clamped() {
        let mut project = Project {
            progress: Some(140.2),
            ..Default::default()
        };
        assert_eq!(project.progress_percent(), 100);
        project.progress = Some(-3.0);
        assert_eq!(project.progress_percent(), 0);
    }

    #[test]
    fn snapshot_derives_progress_from_counts() {
        let snapshot = ProjectStatusSnapshot {
            total_files: 4,
            processed_files: 1,
            ..Default::default()
        };
        assert_eq!(snapshot.progress_percent(), 25);
    }

    #[test]
    fn project_list_tolerates_sparse_payloads() {
        let json = r#"[{"id":"p1","name":"Invoices","status":"in_progress","lastStep":2,"templateType":"fixed"},{"id":"p2"}]"#;
        let projects: Vec<Project> = serde_json::from_str(json).unwrap();
        assert_eq!(projects[0].last_step, Some(2));
        assert_eq!(projects[0].template_type, Some(TemplateType::Fixed));
        assert_eq!(projects[1].display_name(), "p2");
    }

    #[test]
    fn odd_template_types_do_not_break_the_list() {
        let json = r#"[
            {"id":"p1"},
            {"id":"p2","templateType":"FIXED"},
            {"id":"p3","templateType":""},
            {"id":"p4","templateType":"hybrid"},
            {"id":"p5","templateType":null},
            {"id":"p6","templateType":" Running "}
        ]"#;
        let projects: Vec<Project> = serde_json::from_str(json).unwrap();
        let types: Vec<_> = projects.iter().map(|p| p.template_type).collect();
        assert_eq!(
            types,
            vec![
                None,
                Some(TemplateType::Fixed),
                None,
                None,
                None,
                Some(TemplateType::Running)
            ]
        );
    }
}
