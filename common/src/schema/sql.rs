use crate::model::schema::{ColumnMapping, SchemaMappingConfig, TableMode};

/// `schema.table`, or just `table` when no schema is selected.
pub fn qualified_name(schema: &str, table: &str) -> String {
    let schema = schema.trim();
    if schema.is_empty() {
        table.trim().to_string()
    } else {
        format!("{}.{}", schema, table.trim())
    }
}

/// Column definition with its clauses in the fixed order
/// `PRIMARY KEY`, `NOT NULL`, `DEFAULT`.
fn column_definition(column: &ColumnMapping) -> String {
    let mut line = format!("{} {}", column.column_name.trim(), column.data_type.trim());
    if column.primary_key {
        line.push_str(" PRIMARY KEY");
    } else if !column.nullable {
        line.push_str(" NOT NULL");
    }
    if let Some(default) = column.default_value.as_deref().map(str::trim) {
        if !default.is_empty() {
            line.push_str(" DEFAULT ");
            line.push_str(default);
        }
    }
    line
}

pub fn create_table_sql(schema: &str, table: &str, columns: &[ColumnMapping]) -> String {
    let body = columns
        .iter()
        .map(|c| format!("    {}", column_definition(c)))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("CREATE TABLE {} (\n{}\n);", qualified_name(schema, table), body)
}

/// One `ALTER TABLE ... ADD COLUMN` per column flagged `will_be_added`.
/// Existing columns produce no statement.
pub fn alter_table_sql(schema: &str, table: &str, columns: &[ColumnMapping]) -> String {
    let target = qualified_name(schema, table);
    columns
        .iter()
        .filter(|c| c.will_be_added)
        .map(|c| format!("ALTER TABLE {} ADD COLUMN {};", target, column_definition(c)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn preview_sql(config: &SchemaMappingConfig) -> String {
    match config.table_mode {
        TableMode::New => create_table_sql(&config.schema_name, &config.table_name, &config.columns),
        TableMode::Existing => {
            alter_table_sql(&config.schema_name, &config.table_name, &config.columns)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reads a statement produced by `create_table_sql` back into columns.
    fn parse_create_table(sql: &str) -> (String, Vec<ColumnMapping>) {
        let header = sql.lines().next().unwrap();
        let name = header
            .trim_start_matches("CREATE TABLE ")
            .trim_end_matches(" (")
            .to_string();
        let columns = sql
            .lines()
            .skip(1)
            .take_while(|line| *line != ");")
            .map(|line| {
                let line = line.trim().trim_end_matches(',');
                let (definition, default_value) = match line.split_once(" DEFAULT ") {
                    Some((d, v)) => (d, Some(v.to_string())),
                    None => (line, None),
                };
                let primary_key = definition.ends_with(" PRIMARY KEY");
                let definition = definition.trim_end_matches(" PRIMARY KEY");
                let not_null = definition.ends_with(" NOT NULL");
                let definition = definition.trim_end_matches(" NOT NULL");
                let (column_name, data_type) = definition.split_once(' ').unwrap();
                ColumnMapping {
                    column_name: column_name.to_string(),
                    data_type: data_type.to_string(),
                    primary_key,
                    nullable: !(primary_key || not_null),
                    default_value,
                    ..Default::default()
                }
            })
            .collect();
        (name, columns)
    }

    fn column(name: &str, data_type: &str, primary_key: bool, nullable: bool) -> ColumnMapping {
        ColumnMapping {
            column_name: name.to_string(),
            data_type: data_type.to_string(),
            primary_key,
            nullable,
            ..Default::default()
        }
    }

    #[test]
    fn create_table_renders_clauses_in_order() {
        let columns = vec![
            column("id", "SERIAL", true, false),
            column("name", "VARCHAR(255)", false, false),
            ColumnMapping {
                default_value: Some("CURRENT_TIMESTAMP".into()),
                ..column("processed_at", "TIMESTAMP", false, false)
            },
        ];
        assert_eq!(
            create_table_sql("public", "invoices", &columns),
            "CREATE TABLE public.invoices (\n    id SERIAL PRIMARY KEY,\n    name VARCHAR(255) NOT NULL,\n    processed_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP\n);"
        );
    }

    #[test]
    fn create_table_round_trips() {
        let columns = vec![
            column("id", "SERIAL", true, false),
            column("name", "VARCHAR(255)", false, false),
        ];
        let sql = create_table_sql("", "people", &columns);
        let (name, parsed) = parse_create_table(&sql);
        assert_eq!(name, "people");
        assert_eq!(parsed, columns);
    }

    #[test]
    fn alter_table_skips_existing_columns() {
        let columns = vec![
            ColumnMapping {
                is_existing_column: true,
                ..column("id", "INTEGER", true, false)
            },
            ColumnMapping::proposed("total_price", "DECIMAL(10,2)"),
            ColumnMapping {
                default_value: Some("CURRENT_TIMESTAMP".into()),
                ..ColumnMapping::proposed("processed_at", "TIMESTAMP")
            },
        ];
        assert_eq!(
            alter_table_sql("public", "invoices", &columns),
            "ALTER TABLE public.invoices ADD COLUMN total_price DECIMAL(10,2);\nALTER TABLE public.invoices ADD COLUMN processed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP;"
        );
    }

    #[test]
    fn preview_follows_table_mode() {
        let mut config = SchemaMappingConfig {
            schema_name: "s".into(),
            table_name: "t".into(),
            table_mode: TableMode::Existing,
            columns: vec![column("a", "TEXT", false, true)],
        };
        assert_eq!(preview_sql(&config), "");
        config.table_mode = TableMode::New;
        assert!(preview_sql(&config).starts_with("CREATE TABLE s.t ("));
    }
}
