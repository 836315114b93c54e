use serde::{Deserialize, Serialize};

/// One destination column of the schema-mapping step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnMapping {
    pub column_name: String,
    pub data_type: String,
    pub source_parameter: Option<String>,
    pub nullable: bool,
    pub primary_key: bool,
    pub default_value: Option<String>,
    /// The column already exists in the destination table.
    pub is_existing_column: bool,
    /// The column will be created by the next ALTER/CREATE.
    pub will_be_added: bool,
}

impl ColumnMapping {
    pub fn proposed(column_name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            data_type: data_type.into(),
            nullable: true,
            will_be_added: true,
            ..Default::default()
        }
    }
}

/// A column reported by `GET /schema/schemas/{s}/tables/{t}/columns`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableColumn {
    #[serde(alias = "column_name", alias = "name")]
    pub column_name: String,
    #[serde(alias = "data_type", alias = "type")]
    pub data_type: String,
    #[serde(alias = "is_nullable")]
    pub is_nullable: bool,
    #[serde(alias = "column_default")]
    pub column_default: Option<String>,
    #[serde(alias = "is_primary_key")]
    pub is_primary_key: bool,
}

impl TableColumn {
    /// Date or time typed; such a column makes an audit column unnecessary.
    pub fn is_timestamp_like(&self) -> bool {
        let data_type = self.data_type.trim().to_ascii_uppercase();
        data_type.starts_with("TIMESTAMP") || data_type == "DATE" || data_type == "DATETIME"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableMode {
    #[default]
    New,
    Existing,
}

/// The persisted result of the schema-mapping step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaMappingConfig {
    pub schema_name: String,
    pub table_name: String,
    pub table_mode: TableMode,
    pub columns: Vec<ColumnMapping>,
}

/// Server-side validation outcome from `POST /schema/validate`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// A name from one of the listing endpoints (schemas, tables, extracted
/// parameters), which answer either with plain strings or small objects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Plain(String),
    Named {
        #[serde(
            alias = "schemaName",
            alias = "schema_name",
            alias = "tableName",
            alias = "table_name"
        )]
        name: String,
    },
}

impl CatalogEntry {
    pub fn into_name(self) -> String {
        match self {
            CatalogEntry::Plain(name) | CatalogEntry::Named { name } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_entries_in_both_shapes() {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(r#"["public", {"table_name": "visits"}]"#).unwrap();
        let names: Vec<String> = entries.into_iter().map(CatalogEntry::into_name).collect();
        assert_eq!(names, vec!["public", "visits"]);
    }

    #[test]
    fn catalog_columns_accept_snake_case() {
        let column: TableColumn = serde_json::from_str(
            r#"{"column_name":"id","data_type":"integer","is_nullable":false,"is_primary_key":true}"#,
        )
        .unwrap();
        assert_eq!(column.column_name, "id");
        assert!(column.is_primary_key);
    }

    #[test]
    fn timestamp_like_columns() {
        let column = |data_type: &str| TableColumn {
            column_name: "x".into(),
            data_type: data_type.into(),
            ..Default::default()
        };
        assert!(column("timestamp with time zone").is_timestamp_like());
        assert!(column("date").is_timestamp_like());
        assert!(column("DATETIME").is_timestamp_like());
        assert!(!column("TEXT").is_timestamp_like());
    }
}
