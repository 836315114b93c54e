use std::collections::HashSet;

use crate::model::schema::{ColumnMapping, TableColumn};

use super::infer::{infer_data_type, normalize_column_name};

pub const PROCESSED_AT_COLUMN: &str = "processed_at";

fn processed_at() -> ColumnMapping {
    ColumnMapping {
        default_value: Some("CURRENT_TIMESTAMP".to_string()),
        ..ColumnMapping::proposed(PROCESSED_AT_COLUMN, "TIMESTAMP")
    }
}

fn from_parameter(parameter: &str) -> ColumnMapping {
    ColumnMapping {
        source_parameter: Some(parameter.to_string()),
        ..ColumnMapping::proposed(normalize_column_name(parameter), infer_data_type(parameter))
    }
}

/// Columns proposed for a brand-new table: a surrogate key, one column per
/// parameter, and the `processed_at` audit column.
pub fn propose_new_table(parameters: &[String]) -> Vec<ColumnMapping> {
    let mut columns = vec![ColumnMapping {
        nullable: false,
        primary_key: true,
        ..ColumnMapping::proposed("id", "SERIAL")
    }];
    let mut seen: HashSet<String> = HashSet::from(["id".to_string()]);

    for parameter in parameters {
        let column = from_parameter(parameter);
        if column.column_name.is_empty() || !seen.insert(column.column_name.clone()) {
            continue;
        }
        columns.push(column);
    }

    if seen.insert(PROCESSED_AT_COLUMN.to_string()) {
        columns.push(processed_at());
    }
    columns
}

/// Maps parameters onto a table that already exists.
///
/// Every existing column is kept as-is. Its source binding comes from the
/// saved mapping when there is one, otherwise from a parameter whose
/// normalized name equals the column name. Parameters left unbound become
/// new columns (`will_be_added`), typed from the saved mapping if it has a
/// definition for that column, else by inference. `processed_at` is proposed
/// when the table has no timestamp-like column.
pub fn merge_with_existing(
    existing: &[TableColumn],
    saved: &[ColumnMapping],
    parameters: &[String],
) -> Vec<ColumnMapping> {
    let saved_for = |name: &str| saved.iter().find(|m| m.column_name.eq_ignore_ascii_case(name));
    let known_parameter = |p: &String| parameters.iter().any(|q| q == p);

    let mut columns: Vec<ColumnMapping> = existing
        .iter()
        .map(|column| {
            let source_parameter = saved_for(&column.column_name)
                .and_then(|m| m.source_parameter.clone())
                .filter(known_parameter)
                .or_else(|| {
                    parameters
                        .iter()
                        .find(|p| normalize_column_name(p) == column.column_name.to_ascii_lowercase())
                        .cloned()
                });
            ColumnMapping {
                column_name: column.column_name.clone(),
                data_type: column.data_type.to_ascii_uppercase(),
                source_parameter,
                nullable: column.is_nullable,
                primary_key: column.is_primary_key,
                default_value: column.column_default.clone(),
                is_existing_column: true,
                will_be_added: false,
            }
        })
        .collect();

    let mut taken: HashSet<String> = columns
        .iter()
        .map(|c| c.column_name.to_ascii_lowercase())
        .collect();

    for parameter in parameters {
        let bound = columns
            .iter()
            .any(|c| c.source_parameter.as_deref() == Some(parameter.as_str()));
        if bound {
            continue;
        }

        let mut column = match saved
            .iter()
            .find(|m| m.source_parameter.as_deref() == Some(parameter.as_str()) && !m.is_existing_column)
        {
            Some(definition) => ColumnMapping {
                is_existing_column: false,
                will_be_added: true,
                ..definition.clone()
            },
            None => from_parameter(parameter),
        };
        column.column_name = unique_name(&column.column_name, &taken);
        if column.column_name.is_empty() {
            continue;
        }
        taken.insert(column.column_name.to_ascii_lowercase());
        columns.push(column);
    }

    let has_timestamp = existing
        .iter()
        .any(|c| c.is_timestamp_like() || c.column_name.eq_ignore_ascii_case(PROCESSED_AT_COLUMN));
    if !has_timestamp && !taken.contains(PROCESSED_AT_COLUMN) {
        columns.push(processed_at());
    }
    columns
}

pub(crate) fn unique_name(base: &str, taken: &HashSet<String>) -> String {
    if base.is_empty() || !taken.contains(&base.to_ascii_lowercase()) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{}_{}", base, n))
        .find(|candidate| !taken.contains(&candidate.to_ascii_lowercase()))
        .unwrap_or_else(|| base.to_string())
}

/// Something that blocks saving a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingIssue {
    EmptyColumnName(usize),
    MissingDataType(String),
    DuplicateColumn(String),
    UnknownParameter { column: String, parameter: String },
    MultiplePrimaryKeys,
}

impl std::fmt::Display for MappingIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingIssue::EmptyColumnName(row) => write!(f, "Row {} has no column name", row + 1),
            MappingIssue::MissingDataType(column) => write!(f, "Column '{}' has no data type", column),
            MappingIssue::DuplicateColumn(column) => write!(f, "Column '{}' is defined twice", column),
            MappingIssue::UnknownParameter { column, parameter } => write!(
                f,
                "Column '{}' maps to unknown parameter '{}'",
                column, parameter
            ),
            MappingIssue::MultiplePrimaryKeys => write!(f, "Only one primary key column is allowed"),
        }
    }
}

/// Client-side checks: one mapping per destination column, every bound
/// source parameter exists, names and types are filled in.
pub fn validate_mappings(columns: &[ColumnMapping], parameters: &[String]) -> Vec<MappingIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (row, column) in columns.iter().enumerate() {
        let name = column.column_name.trim();
        if name.is_empty() {
            issues.push(MappingIssue::EmptyColumnName(row));
            continue;
        }
        if !seen.insert(name.to_ascii_lowercase()) {
            issues.push(MappingIssue::DuplicateColumn(name.to_string()));
        }
        if column.data_type.trim().is_empty() {
            issues.push(MappingIssue::MissingDataType(name.to_string()));
        }
        if let Some(parameter) = &column.source_parameter {
            if !parameters.contains(parameter) {
                issues.push(MappingIssue::UnknownParameter {
                    column: name.to_string(),
                    parameter: parameter.clone(),
                });
            }
        }
    }

    if columns.iter().filter(|c| c.primary_key).count() > 1 {
        issues.push(MappingIssue::MultiplePrimaryKeys);
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn existing(name: &str, data_type: &str) -> TableColumn {
        TableColumn {
            column_name: name.to_string(),
            data_type: data_type.to_string(),
            is_nullable: true,
            ..Default::default()
        }
    }

    #[test]
    fn new_table_gets_key_parameters_and_audit_column() {
        let columns = propose_new_table(&params(&["Patient ID", "visit_count"]));
        let names: Vec<_> = columns.iter().map(|c| c.column_name.as_str()).collect();
        assert_eq!(names, vec!["id", "patient_id", "visit_count", "processed_at"]);
        assert!(columns[0].primary_key);
        assert_eq!(columns[1].data_type, "VARCHAR(100)");
        assert_eq!(columns[1].source_parameter.as_deref(), Some("Patient ID"));
    }

    #[test]
    fn existing_columns_bind_by_name_and_new_ones_are_appended() {
        let table = vec![existing("patient_id", "varchar(100)"), existing("notes", "text")];
        let columns = merge_with_existing(&table, &[], &params(&["patient_id", "total_price"]));

        assert!(columns[0].is_existing_column);
        assert_eq!(columns[0].source_parameter.as_deref(), Some("patient_id"));
        assert_eq!(columns[1].source_parameter, None);

        let added: Vec<_> = columns.iter().filter(|c| c.will_be_added).collect();
        assert_eq!(added.len(), 2);
        assert_eq!(added[0].column_name, "total_price");
        assert_eq!(added[0].data_type, "DECIMAL(10,2)");
        assert_eq!(added[1].column_name, PROCESSED_AT_COLUMN);
        assert_eq!(added[1].default_value.as_deref(), Some("CURRENT_TIMESTAMP"));
    }

    #[test]
    fn saved_definitions_beat_inference() {
        let table = vec![existing("ref", "varchar(50)"), existing("loaded", "timestamp")];
        let saved = vec![
            ColumnMapping {
                source_parameter: Some("invoice_number".into()),
                ..ColumnMapping::proposed("ref", "VARCHAR(50)")
            },
            ColumnMapping {
                source_parameter: Some("total_price".into()),
                ..ColumnMapping::proposed("amount_eur", "NUMERIC(12,4)")
            },
        ];
        let columns = merge_with_existing(&table, &saved, &params(&["invoice_number", "total_price"]));

        assert_eq!(columns[0].source_parameter.as_deref(), Some("invoice_number"));
        let added: Vec<_> = columns.iter().filter(|c| c.will_be_added).collect();
        assert_eq!(added.len(), 1, "timestamp column already exists");
        assert_eq!(added[0].column_name, "amount_eur");
        assert_eq!(added[0].data_type, "NUMERIC(12,4)");
    }

    #[test]
    fn a_date_column_counts_as_a_timestamp() {
        let table = vec![existing("visit_date", "date")];
        let columns = merge_with_existing(&table, &[], &params(&["patient_id"]));
        assert!(columns.iter().all(|c| c.column_name != PROCESSED_AT_COLUMN));
    }

    #[test]
    fn new_columns_never_collide_with_existing_ones() {
        let taken: HashSet<String> = ["price", "price_2"].iter().map(|s| s.to_string()).collect();
        assert_eq!(unique_name("Price", &taken), "Price_3");
        assert_eq!(unique_name("total", &taken), "total");
    }

    #[test]
    fn validation_reports_duplicates_and_dangling_sources() {
        let columns = vec![
            ColumnMapping::proposed("a", "TEXT"),
            ColumnMapping {
                source_parameter: Some("ghost".into()),
                ..ColumnMapping::proposed("A", "TEXT")
            },
            ColumnMapping::proposed("", "TEXT"),
        ];
        let issues = validate_mappings(&columns, &params(&["real"]));
        assert_eq!(
            issues,
            vec![
                MappingIssue::DuplicateColumn("A".into()),
                MappingIssue::UnknownParameter {
                    column: "A".into(),
                    parameter: "ghost".into()
                },
                MappingIssue::EmptyColumnName(2),
            ]
        );
    }
}
