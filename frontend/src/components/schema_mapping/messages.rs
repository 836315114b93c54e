use common::api::ApiError;
use common::model::schema::{ColumnMapping, SchemaMappingConfig, TableColumn, TableMode, ValidationReport};

/// One edit of a row in the column editor.
#[derive(Clone, PartialEq)]
pub enum ColumnEdit {
    Name(String),
    DataType(String),
    Source(Option<String>),
    Nullable(bool),
    PrimaryKey(bool),
    Default(String),
}

impl ColumnEdit {
    pub fn apply(self, column: &mut ColumnMapping) {
        match self {
            ColumnEdit::Name(name) => column.column_name = name,
            ColumnEdit::DataType(data_type) => column.data_type = data_type,
            ColumnEdit::Source(source) => column.source_parameter = source,
            ColumnEdit::Nullable(nullable) => column.nullable = nullable,
            ColumnEdit::PrimaryKey(primary_key) => {
                column.primary_key = primary_key;
                if primary_key {
                    column.nullable = false;
                }
            }
            ColumnEdit::Default(value) => {
                column.default_value = Some(value).filter(|v| !v.trim().is_empty())
            }
        }
    }
}

/// Why a save stopped, and whether it had already created the new table.
pub struct SaveFailure {
    pub reason: String,
    pub table_created: bool,
}

pub enum Msg {
    Load,
    ParametersLoaded(Result<Vec<String>, ApiError>),
    SavedMappingLoaded(Result<Option<SchemaMappingConfig>, ApiError>),
    SchemasLoaded(Result<Vec<String>, ApiError>),

    SetSchema(String),
    TablesLoaded(String, Result<Vec<String>, ApiError>),
    SetTableMode(TableMode),
    SetNewTableName(String),
    SelectTable(String),
    ColumnsLoaded(String, Result<Vec<TableColumn>, ApiError>),

    AddColumn,
    RemoveColumn(usize),
    EditColumn(usize, ColumnEdit),
    ResetColumns,

    Next,
    Back,
    Validate,
    Validated(Result<ValidationReport, ApiError>),
    Save,
    Saved(Result<Vec<String>, SaveFailure>),
    ClearLog,
}
