use common::activity::Level;
use common::api::ApiError;
use common::jobs::JobStatus;
use common::model::schema::{ColumnMapping, SchemaMappingConfig, TableMode};
use common::requests::{
    AddColumnsRequest, ColumnSourceRequest, CreateTableRequest, ValidateSchemaRequest,
};
use common::schema::qualified_name;
use common::schema::wizard::SchemaStep;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::helpers::show_toast;

use super::messages::{Msg, SaveFailure};
use super::state::SchemaMapping;

pub fn update(component: &mut SchemaMapping, ctx: &Context<SchemaMapping>, msg: Msg) -> bool {
    let props = ctx.props();
    let api = props.api.clone();
    let project_id = props.project.id.clone();
    let link = ctx.link().clone();

    match msg {
        Msg::Load => {
            {
                let api = api.clone();
                let project_id = project_id.clone();
                let link = link.clone();
                spawn_local(async move {
                    link.send_message(Msg::ParametersLoaded(api.list_parameters(&project_id).await));
                });
            }
            if !component.restored {
                let api = api.clone();
                let link = link.clone();
                spawn_local(async move {
                    link.send_message(Msg::SavedMappingLoaded(api.schema_mapping(&project_id).await));
                });
            }
            spawn_local(async move {
                link.send_message(Msg::SchemasLoaded(api.schemas().await));
            });
            load_tables(component, ctx);
            if let Some(table) = component.wizard.existing_table.clone() {
                ctx.link().send_message(Msg::SelectTable(table));
            }
            false
        }
        Msg::ParametersLoaded(Ok(parameters)) => {
            component.loading_parameters = false;
            component.record(
                Level::Info,
                format!("Loaded {} extracted parameters.", parameters.len()),
            );
            component.wizard.parameters = parameters;
            true
        }
        Msg::ParametersLoaded(Err(error)) => {
            component.loading_parameters = false;
            component.record(
                Level::Error,
                format!("Could not load parameters: {}", error.user_message()),
            );
            true
        }
        Msg::SavedMappingLoaded(Ok(Some(saved))) => {
            let previous_schema = component.wizard.schema_name.clone();
            component.record(
                Level::Info,
                format!(
                    "Restored the saved mapping for {}.",
                    qualified_name(&saved.schema_name, &saved.table_name)
                ),
            );
            component.wizard.restore(saved);
            if component.wizard.schema_name != previous_schema {
                load_tables(component, ctx);
            }
            if let Some(table) = component.wizard.existing_table.clone() {
                ctx.link().send_message(Msg::SelectTable(table));
            }
            true
        }
        Msg::SavedMappingLoaded(Ok(None)) => false,
        Msg::SavedMappingLoaded(Err(error)) => {
            component.record(
                Level::Warning,
                format!("Could not load the saved mapping: {}", error.user_message()),
            );
            true
        }
        Msg::SchemasLoaded(Ok(schemas)) => {
            component.schemas = schemas;
            true
        }
        Msg::SchemasLoaded(Err(error)) => {
            component.record(
                Level::Error,
                format!("Could not list database schemas: {}", error.user_message()),
            );
            true
        }

        Msg::SetSchema(schema) => {
            if component.wizard.schema_name == schema {
                return false;
            }
            component.wizard.schema_name = schema;
            component.wizard.select_existing_table(None, Vec::new());
            component.tables.clear();
            load_tables(component, ctx);
            true
        }
        Msg::TablesLoaded(schema, result) => {
            if schema != component.wizard.schema_name {
                return false;
            }
            match result {
                Ok(tables) => component.tables = tables,
                Err(error) => component.record(
                    Level::Error,
                    format!("Could not list tables of {}: {}", schema, error.user_message()),
                ),
            }
            true
        }
        Msg::SetTableMode(mode) => {
            component.wizard.set_table_mode(mode);
            true
        }
        Msg::SetNewTableName(name) => {
            component.wizard.new_table_name = name;
            true
        }
        Msg::SelectTable(table) => {
            if table.is_empty() {
                component.wizard.select_existing_table(None, Vec::new());
                return true;
            }
            component.wizard.select_existing_table(Some(table.clone()), Vec::new());
            component.loading_columns = true;
            let schema = component.wizard.schema_name.clone();
            spawn_local(async move {
                let columns = api.table_columns(&schema, &table).await;
                link.send_message(Msg::ColumnsLoaded(table, columns));
            });
            true
        }
        Msg::ColumnsLoaded(table, result) => {
            if component.wizard.existing_table.as_deref() != Some(table.as_str()) {
                return false;
            }
            component.loading_columns = false;
            match result {
                Ok(columns) => {
                    component.record(
                        Level::Info,
                        format!("Table {} has {} columns.", table, columns.len()),
                    );
                    component.wizard.select_existing_table(Some(table), columns);
                    if component.wizard.current() > SchemaStep::ChooseTable {
                        component.wizard.columns = component.wizard.propose_columns();
                    }
                }
                Err(error) => component.record(
                    Level::Error,
                    format!("Could not read the columns of {}: {}", table, error.user_message()),
                ),
            }
            true
        }

        Msg::AddColumn => {
            component.wizard.add_column();
            true
        }
        Msg::RemoveColumn(index) => {
            component.wizard.remove_column(index);
            true
        }
        Msg::EditColumn(index, edit) => {
            component.wizard.update_column(index, |column| edit.apply(column));
            component.validation = None;
            true
        }
        Msg::ResetColumns => {
            component.wizard.columns = component.wizard.propose_columns();
            component.validation = None;
            true
        }

        Msg::Next => {
            if !component.wizard.advance() {
                return false;
            }
            if component.wizard.current() == SchemaStep::Preview {
                ctx.link().send_message(Msg::Validate);
            }
            true
        }
        Msg::Back => {
            if !component.wizard.back() {
                props.on_back.emit(());
                return false;
            }
            true
        }
        Msg::Validate => {
            let issues = component.wizard.issues();
            if !issues.is_empty() {
                for issue in issues {
                    component.record(Level::Warning, issue.to_string());
                }
                return true;
            }
            let request = ValidateSchemaRequest {
                project_id,
                mapping: component.wizard.config(),
            };
            spawn_local(async move {
                link.send_message(Msg::Validated(api.validate_schema(&request).await));
            });
            false
        }
        Msg::Validated(Ok(report)) => {
            if report.is_valid {
                component.record(Level::Success, "The server accepted the mapping.");
            } else {
                for error in &report.errors {
                    component.record(Level::Error, error.clone());
                }
            }
            for warning in &report.warnings {
                component.record(Level::Warning, warning.clone());
            }
            component.validation = Some(report);
            true
        }
        Msg::Validated(Err(error)) => {
            component.record(
                Level::Error,
                format!("Validation request failed: {}", error.user_message()),
            );
            true
        }
        Msg::Save => {
            if !component.wizard.can_proceed() || !component.saving.begin() {
                return false;
            }
            let config = component.wizard.config();
            component.record(
                Level::Info,
                format!(
                    "Saving the mapping for {}...",
                    qualified_name(&config.schema_name, &config.table_name)
                ),
            );
            spawn_local(async move {
                link.send_message(Msg::Saved(persist(api, project_id, config).await));
            });
            true
        }
        Msg::Saved(Ok(warnings)) => {
            for warning in warnings {
                component.record(Level::Warning, warning);
            }
            component.record(Level::Success, "Schema mapping saved.");
            component.saving = JobStatus::Completed("Schema mapping saved".into());
            show_toast("Schema mapping saved.", Level::Success);
            props.on_complete.emit(component.wizard.config());
            true
        }
        Msg::Saved(Err(failure)) => {
            if failure.table_created {
                component.wizard.table_created();
                component.record(
                    Level::Warning,
                    "The table was created; saving again only stores the mapping.",
                );
            }
            component.record(Level::Error, format!("Saving failed: {}", failure.reason));
            component.saving = JobStatus::Failed(failure.reason);
            true
        }
        Msg::ClearLog => {
            component.log.clear();
            true
        }
    }
}

fn load_tables(component: &SchemaMapping, ctx: &Context<SchemaMapping>) {
    let schema = component.wizard.schema_name.clone();
    if schema.is_empty() {
        return;
    }
    let api = ctx.props().api.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let tables = api.tables(&schema).await;
        link.send_message(Msg::TablesLoaded(schema, tables));
    });
}

fn failed(table_created: bool) -> impl Fn(ApiError) -> SaveFailure {
    move |error| SaveFailure {
        reason: error.user_message(),
        table_created,
    }
}

/// Validates, applies the DDL, stores the mapping and pushes the source of
/// every existing column. Per-column failures come back as warnings; any
/// earlier failure aborts.
async fn persist(
    api: ApiClient,
    project_id: String,
    config: SchemaMappingConfig,
) -> Result<Vec<String>, SaveFailure> {
    let report = api
        .validate_schema(&ValidateSchemaRequest {
            project_id: project_id.clone(),
            mapping: config.clone(),
        })
        .await
        .map_err(failed(false))?;
    if !report.is_valid {
        return Err(SaveFailure {
            reason: report.errors.join("; "),
            table_created: false,
        });
    }

    match config.table_mode {
        TableMode::New => {
            let request = CreateTableRequest {
                table_name: config.table_name.clone(),
                columns: config.columns.clone(),
            };
            api.create_table(&config.schema_name, &request)
                .await
                .map_err(failed(false))?;
        }
        TableMode::Existing => {
            let added: Vec<ColumnMapping> = config
                .columns
                .iter()
                .filter(|c| c.will_be_added)
                .cloned()
                .collect();
            if !added.is_empty() {
                api.add_columns(
                    &config.schema_name,
                    &config.table_name,
                    &AddColumnsRequest { columns: added },
                )
                .await
                .map_err(failed(false))?;
            }
        }
    }

    api.save_schema_mapping(&project_id, &config)
        .await
        .map_err(failed(config.table_mode == TableMode::New))?;

    let mut warnings = report.warnings;
    for column in config.columns.iter().filter(|c| c.is_existing_column) {
        let request = ColumnSourceRequest {
            source_parameter: column.source_parameter.clone(),
        };
        if let Err(error) = api
            .update_mapping_column(&project_id, &column.column_name, &request)
            .await
        {
            warnings.push(format!(
                "Column {} keeps its previous source: {}",
                column.column_name,
                error.user_message()
            ));
        }
    }
    Ok(warnings)
}
