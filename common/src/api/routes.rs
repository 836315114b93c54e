//! Paths of the pipeline backend, relative to the configured base URL.
//!
//! Every caller-supplied segment is percent-encoded so project ids, table
//! names and column names with spaces or slashes stay a single segment.

use urlencoding::encode;

/// Joins a base URL and a path with exactly one slash between them.
pub fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

pub fn projects(master_project_id: Option<&str>) -> String {
    match master_project_id {
        Some(master) if !master.is_empty() => {
            format!("/projects?masterProjectId={}", encode(master))
        }
        _ => "/projects".to_string(),
    }
}

pub fn project(id: &str) -> String {
    format!("/projects/{}", encode(id))
}

pub fn project_run(id: &str) -> String {
    format!("/projects/{}/run", encode(id))
}

pub fn project_status(id: &str) -> String {
    format!("/projects/{}/status", encode(id))
}

pub fn template_type(project_id: &str) -> String {
    format!("/config/projects/{}/template-type", encode(project_id))
}

pub fn list_parameters(project_id: &str) -> String {
    format!("/config/projects/{}/list_parameters", encode(project_id))
}

pub fn configuration(project_id: &str) -> String {
    format!("/config/projects/{}/configuration", encode(project_id))
}

pub fn schema_mapping(project_id: &str) -> String {
    format!("/config/projects/{}/schema/mapping", encode(project_id))
}

pub fn mapping_column(project_id: &str, column: &str) -> String {
    format!(
        "/projects/{}/schema/mapping/columns/{}",
        encode(project_id),
        encode(column)
    )
}

pub fn schemas() -> String {
    "/schema/schemas".to_string()
}

pub fn tables(schema: &str) -> String {
    format!("/schema/schemas/{}/tables", encode(schema))
}

pub fn table_columns(schema: &str, table: &str) -> String {
    format!(
        "/schema/schemas/{}/tables/{}/columns",
        encode(schema),
        encode(table)
    )
}

pub fn validate_schema() -> String {
    "/schema/validate".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchAction {
    Status,
    Enable,
    Disable,
    Process,
    Results,
    Files,
    Cleanup,
    Download,
}

impl BatchAction {
    fn segment(&self) -> &'static str {
        match self {
            BatchAction::Status => "status",
            BatchAction::Enable => "enable",
            BatchAction::Disable => "disable",
            BatchAction::Process => "process",
            BatchAction::Results => "results",
            BatchAction::Files => "files",
            BatchAction::Cleanup => "cleanup",
            BatchAction::Download => "download",
        }
    }
}

pub fn batch(project_id: &str, action: BatchAction) -> String {
    format!(
        "/batch/projects/{}/batch/{}",
        encode(project_id),
        action.segment()
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbAction {
    Status,
    Enable,
    Disable,
    Process,
    Results,
}

impl DbAction {
    fn segment(&self) -> &'static str {
        match self {
            DbAction::Status => "status",
            DbAction::Enable => "enable",
            DbAction::Disable => "disable",
            DbAction::Process => "process",
            DbAction::Results => "results",
        }
    }
}

pub fn db_processing(project_id: &str, action: DbAction) -> String {
    format!(
        "/batch/projects/{}/batch/db-processing/{}",
        encode(project_id),
        action.segment()
    )
}

pub fn file_upload(project_id: &str) -> String {
    format!("/files/{}/configuration/upload", encode(project_id))
}

pub fn files(project_id: &str) -> String {
    format!("/files/{}/configuration/files", encode(project_id))
}

pub fn file(project_id: &str, file_id: &str) -> String {
    format!(
        "/files/{}/configuration/files/{}",
        encode(project_id),
        encode(file_id)
    )
}

pub fn file_preview(project_id: &str, file_id: &str) -> String {
    format!("{}/preview", file(project_id, file_id))
}

pub fn file_download(project_id: &str, file_id: &str) -> String {
    format!("{}/download", file(project_id, file_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_normalizes_slashes() {
        assert_eq!(join("http://h/api/", "/projects"), "http://h/api/projects");
        assert_eq!(join("http://h/api", "projects"), "http://h/api/projects");
    }

    #[test]
    fn segments_are_encoded() {
        assert_eq!(
            mapping_column("p 1", "total/price"),
            "/projects/p%201/schema/mapping/columns/total%2Fprice"
        );
        assert_eq!(projects(Some("m&1")), "/projects?masterProjectId=m%261");
        assert_eq!(projects(None), "/projects");
    }

    #[test]
    fn batch_and_db_routes() {
        assert_eq!(batch("p1", BatchAction::Cleanup), "/batch/projects/p1/batch/cleanup");
        assert_eq!(
            db_processing("p1", DbAction::Enable),
            "/batch/projects/p1/batch/db-processing/enable"
        );
        assert_eq!(
            file_preview("p1", "f1"),
            "/files/p1/configuration/files/f1/preview"
        );
    }
}
