use common::api::routes::{self, BatchAction, DbAction};
use common::api::{unwrap_list, unwrap_object, ApiError};
use common::model::batch::{BatchFiles, BatchResults, BatchStatus, DbStatus};
use common::model::file::FileRecord;
use common::model::project::{Project, ProjectStatusSnapshot, TemplateType};
use common::model::schema::{CatalogEntry, SchemaMappingConfig, TableColumn, ValidationReport};
use common::requests::{
    AddColumnsRequest, ColumnSourceRequest, CreateTableRequest, ProjectRequest,
    SaveConfigurationRequest, TemplateTypeRequest, ValidateSchemaRequest,
};
use serde_json::Value;

use super::ApiClient;

fn names(entries: Vec<CatalogEntry>) -> Vec<String> {
    entries.into_iter().map(CatalogEntry::into_name).collect()
}

impl ApiClient {
    // Projects

    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let value = self
            .get_value(&routes::projects(self.master_project_id()))
            .await?;
        unwrap_list(value, &["projects", "data", "items"])
    }

    pub async fn create_project(&self, request: &ProjectRequest) -> Result<Project, ApiError> {
        let value: Value = self.post(&routes::projects(None), request).await?;
        unwrap_object(value, &["project", "data"])
    }

    pub async fn update_project(
        &self,
        id: &str,
        request: &ProjectRequest,
    ) -> Result<Project, ApiError> {
        let value: Value = self.put(&routes::project(id), request).await?;
        unwrap_object(value, &["project", "data"])
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&routes::project(id)).await
    }

    pub async fn run_project(&self, id: &str) -> Result<Value, ApiError> {
        self.post_empty(&routes::project_run(id)).await
    }

    pub async fn project_status(&self, id: &str) -> Result<ProjectStatusSnapshot, ApiError> {
        let value = self.get_value(&routes::project_status(id)).await?;
        unwrap_object(value, &["data"])
    }

    // Project configuration

    pub async fn template_type(&self, project_id: &str) -> Result<TemplateType, ApiError> {
        let response: TemplateTypeRequest = self.get(&routes::template_type(project_id)).await?;
        Ok(response.template_type)
    }

    pub async fn set_template_type(
        &self,
        project_id: &str,
        template_type: TemplateType,
    ) -> Result<Value, ApiError> {
        self.post(
            &routes::template_type(project_id),
            &TemplateTypeRequest { template_type },
        )
        .await
    }

    pub async fn list_parameters(&self, project_id: &str) -> Result<Vec<String>, ApiError> {
        let value = self.get_value(&routes::list_parameters(project_id)).await?;
        unwrap_list(value, &["parameters", "data"]).map(names)
    }

    pub async fn save_configuration(
        &self,
        project_id: &str,
        request: &SaveConfigurationRequest,
    ) -> Result<Value, ApiError> {
        self.post(&routes::configuration(project_id), request).await
    }

    /// The saved mapping, `None` when the project has none yet.
    pub async fn schema_mapping(
        &self,
        project_id: &str,
    ) -> Result<Option<SchemaMappingConfig>, ApiError> {
        match self.get_value(&routes::schema_mapping(project_id)).await {
            Ok(Value::Null) => Ok(None),
            Ok(value) => unwrap_object(value, &["mapping", "data"]).map(Some),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }

    pub async fn save_schema_mapping(
        &self,
        project_id: &str,
        mapping: &SchemaMappingConfig,
    ) -> Result<Value, ApiError> {
        self.post(&routes::schema_mapping(project_id), mapping).await
    }

    pub async fn update_mapping_column(
        &self,
        project_id: &str,
        column: &str,
        request: &ColumnSourceRequest,
    ) -> Result<Value, ApiError> {
        self.put(&routes::mapping_column(project_id, column), request)
            .await
    }

    // Database catalog

    pub async fn schemas(&self) -> Result<Vec<String>, ApiError> {
        let value = self.get_value(&routes::schemas()).await?;
        unwrap_list(value, &["schemas", "data"]).map(names)
    }

    pub async fn tables(&self, schema: &str) -> Result<Vec<String>, ApiError> {
        let value = self.get_value(&routes::tables(schema)).await?;
        unwrap_list(value, &["tables", "data"]).map(names)
    }

    pub async fn table_columns(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Vec<TableColumn>, ApiError> {
        let value = self.get_value(&routes::table_columns(schema, table)).await?;
        unwrap_list(value, &["columns", "data"])
    }

    pub async fn validate_schema(
        &self,
        request: &ValidateSchemaRequest,
    ) -> Result<ValidationReport, ApiError> {
        let value: Value = self.post(&routes::validate_schema(), request).await?;
        unwrap_object(value, &["validation", "data"])
    }

    pub async fn create_table(
        &self,
        schema: &str,
        request: &CreateTableRequest,
    ) -> Result<Value, ApiError> {
        self.post(&routes::tables(schema), request).await
    }

    pub async fn add_columns(
        &self,
        schema: &str,
        table: &str,
        request: &AddColumnsRequest,
    ) -> Result<Value, ApiError> {
        self.put(&routes::table_columns(schema, table), request).await
    }

    // Batch processing

    pub async fn batch_status(&self, project_id: &str) -> Result<BatchStatus, ApiError> {
        let value = self
            .get_value(&routes::batch(project_id, BatchAction::Status))
            .await?;
        unwrap_object(value, &["status", "data"])
    }

    /// `enable`, `disable`, `process` and `cleanup`.
    pub async fn batch_action(
        &self,
        project_id: &str,
        action: BatchAction,
    ) -> Result<Value, ApiError> {
        self.post_empty(&routes::batch(project_id, action)).await
    }

    pub async fn batch_results(&self, project_id: &str) -> Result<BatchResults, ApiError> {
        let value = self
            .get_value(&routes::batch(project_id, BatchAction::Results))
            .await?;
        unwrap_object(value, &["data"])
    }

    pub async fn batch_files(&self, project_id: &str) -> Result<BatchFiles, ApiError> {
        let value = self
            .get_value(&routes::batch(project_id, BatchAction::Files))
            .await?;
        unwrap_object(value, &["files", "data"])
    }

    pub fn batch_download_url(&self, project_id: &str) -> String {
        self.url(&routes::batch(project_id, BatchAction::Download))
    }

    pub async fn db_status(&self, project_id: &str) -> Result<DbStatus, ApiError> {
        let value = self
            .get_value(&routes::db_processing(project_id, DbAction::Status))
            .await?;
        unwrap_object(value, &["status", "data"])
    }

    pub async fn db_action(&self, project_id: &str, action: DbAction) -> Result<Value, ApiError> {
        self.post_empty(&routes::db_processing(project_id, action))
            .await
    }

    pub async fn db_results(&self, project_id: &str) -> Result<BatchResults, ApiError> {
        let value = self
            .get_value(&routes::db_processing(project_id, DbAction::Results))
            .await?;
        unwrap_object(value, &["data"])
    }

    // Files

    pub async fn list_files(&self, project_id: &str) -> Result<Vec<FileRecord>, ApiError> {
        let value = self.get_value(&routes::files(project_id)).await?;
        unwrap_list(value, &["files", "data"])
    }

    pub async fn delete_file(&self, project_id: &str, file_id: &str) -> Result<(), ApiError> {
        self.delete(&routes::file(project_id, file_id)).await
    }

    pub fn file_preview_url(&self, project_id: &str, file_id: &str) -> String {
        self.url(&routes::file_preview(project_id, file_id))
    }

    pub fn file_download_url(&self, project_id: &str, file_id: &str) -> String {
        self.url(&routes::file_download(project_id, file_id))
    }

    pub fn file_upload_url(&self, project_id: &str) -> String {
        self.url(&routes::file_upload(project_id))
    }
}
