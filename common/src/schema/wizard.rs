//! Sub-wizard of the schema-mapping screen.
//!
//! Four steps: review the extracted parameters, pick the destination table,
//! configure columns, then preview and save. Each step has a gate that
//! decides whether "Next" is enabled.

use std::collections::HashSet;

use crate::model::schema::{ColumnMapping, SchemaMappingConfig, TableColumn, TableMode};

use super::mapping::{
    merge_with_existing, propose_new_table, unique_name, validate_mappings, MappingIssue,
};
use super::sql::preview_sql;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum SchemaStep {
    #[default]
    ReviewParameters = 1,
    ChooseTable = 2,
    ConfigureColumns = 3,
    Preview = 4,
}

impl SchemaStep {
    pub const ALL: [SchemaStep; 4] = [
        SchemaStep::ReviewParameters,
        SchemaStep::ChooseTable,
        SchemaStep::ConfigureColumns,
        SchemaStep::Preview,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            SchemaStep::ReviewParameters => "Review parameters",
            SchemaStep::ChooseTable => "Choose table",
            SchemaStep::ConfigureColumns => "Configure columns",
            SchemaStep::Preview => "Preview & save",
        }
    }

    fn next(self) -> Option<SchemaStep> {
        match self {
            SchemaStep::ReviewParameters => Some(SchemaStep::ChooseTable),
            SchemaStep::ChooseTable => Some(SchemaStep::ConfigureColumns),
            SchemaStep::ConfigureColumns => Some(SchemaStep::Preview),
            SchemaStep::Preview => None,
        }
    }

    fn previous(self) -> Option<SchemaStep> {
        match self {
            SchemaStep::ReviewParameters => None,
            SchemaStep::ChooseTable => Some(SchemaStep::ReviewParameters),
            SchemaStep::ConfigureColumns => Some(SchemaStep::ChooseTable),
            SchemaStep::Preview => Some(SchemaStep::ConfigureColumns),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaWizard {
    pub step: SchemaStep,
    pub parameters: Vec<String>,
    pub schema_name: String,
    pub table_mode: TableMode,
    pub new_table_name: String,
    pub existing_table: Option<String>,
    pub existing_columns: Vec<TableColumn>,
    pub saved_columns: Vec<ColumnMapping>,
    pub columns: Vec<ColumnMapping>,
}

impl SchemaWizard {
    pub fn new(parameters: Vec<String>) -> Self {
        Self {
            parameters,
            schema_name: "public".to_string(),
            ..Default::default()
        }
    }

    /// Restores a previously saved mapping so the operator starts from it.
    ///
    /// A saved mapping names a table that the save already created or
    /// extended, so it always comes back in `Existing` mode on that table.
    /// Only a mapping without a table name keeps its mode.
    pub fn restore(&mut self, saved: SchemaMappingConfig) {
        if !saved.schema_name.is_empty() {
            self.schema_name = saved.schema_name;
        }
        let table = saved.table_name.trim().to_string();
        if table.is_empty() {
            self.table_mode = saved.table_mode;
        } else {
            self.table_mode = TableMode::Existing;
            self.existing_table = Some(table);
        }
        self.saved_columns = saved.columns;
    }

    /// Called once `CREATE TABLE` went through. The table now exists with
    /// exactly the configured columns, so the wizard continues in `Existing`
    /// mode and a repeated save only stores the mapping.
    pub fn table_created(&mut self) {
        if self.table_mode != TableMode::New {
            return;
        }
        self.existing_table = Some(self.new_table_name.trim().to_string());
        self.existing_columns = self
            .columns
            .iter()
            .map(|c| TableColumn {
                column_name: c.column_name.trim().to_string(),
                data_type: c.data_type.trim().to_string(),
                is_nullable: c.nullable,
                column_default: c.default_value.clone(),
                is_primary_key: c.primary_key,
            })
            .collect();
        self.saved_columns = self.columns.clone();
        self.table_mode = TableMode::Existing;
        self.columns = self.propose_columns();
    }

    pub fn current(&self) -> SchemaStep {
        self.step
    }

    pub fn table_name(&self) -> &str {
        match self.table_mode {
            TableMode::New => self.new_table_name.trim(),
            TableMode::Existing => self.existing_table.as_deref().unwrap_or_default(),
        }
    }

    pub fn issues(&self) -> Vec<MappingIssue> {
        validate_mappings(&self.columns, &self.parameters)
    }

    /// Whether "Next" (or "Save" on the last step) is enabled.
    pub fn can_proceed(&self) -> bool {
        match self.current() {
            SchemaStep::ReviewParameters => !self.parameters.is_empty(),
            SchemaStep::ChooseTable => match self.table_mode {
                TableMode::New => !self.new_table_name.trim().is_empty(),
                TableMode::Existing => self.existing_table.is_some(),
            },
            SchemaStep::ConfigureColumns => !self.columns.is_empty(),
            SchemaStep::Preview => !self.columns.is_empty() && self.issues().is_empty(),
        }
    }

    /// Moves forward when the gate allows it. Entering the column step
    /// derives the column proposal if there is none yet.
    pub fn advance(&mut self) -> bool {
        if !self.can_proceed() {
            return false;
        }
        let Some(next) = self.current().next() else {
            return false;
        };
        if next == SchemaStep::ConfigureColumns && self.columns.is_empty() {
            self.columns = self.propose_columns();
        }
        self.step = next;
        true
    }

    /// Steps back; `false` on the first step, where the caller leaves the
    /// screen instead.
    pub fn back(&mut self) -> bool {
        match self.current().previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    pub fn propose_columns(&self) -> Vec<ColumnMapping> {
        match self.table_mode {
            TableMode::New => {
                if self.saved_columns.is_empty() {
                    propose_new_table(&self.parameters)
                } else {
                    self.saved_columns.clone()
                }
            }
            TableMode::Existing => {
                merge_with_existing(&self.existing_columns, &self.saved_columns, &self.parameters)
            }
        }
    }

    /// Switching table or mode invalidates the current column proposal.
    pub fn set_table_mode(&mut self, mode: TableMode) {
        if self.table_mode != mode {
            self.table_mode = mode;
            self.columns.clear();
        }
    }

    pub fn select_existing_table(&mut self, table: Option<String>, columns: Vec<TableColumn>) {
        self.existing_table = table;
        self.existing_columns = columns;
        self.columns.clear();
    }

    pub fn add_column(&mut self) {
        let taken: HashSet<String> = self
            .columns
            .iter()
            .map(|c| c.column_name.trim().to_ascii_lowercase())
            .collect();
        let name = unique_name("new_column", &taken);
        self.columns.push(ColumnMapping::proposed(name, "VARCHAR(255)"));
    }

    /// Removes a column the operator added; existing columns stay.
    pub fn remove_column(&mut self, index: usize) {
        if self.columns.get(index).is_some_and(|c| !c.is_existing_column) {
            self.columns.remove(index);
        }
    }

    pub fn update_column(&mut self, index: usize, update: impl FnOnce(&mut ColumnMapping)) {
        let Some(column) = self.columns.get_mut(index) else {
            return;
        };
        if column.is_existing_column {
            // An existing column only ever changes its source binding.
            let mut edited = column.clone();
            update(&mut edited);
            column.source_parameter = edited.source_parameter;
        } else {
            update(column);
        }
    }

    pub fn config(&self) -> SchemaMappingConfig {
        SchemaMappingConfig {
            schema_name: self.schema_name.clone(),
            table_name: self.table_name().to_string(),
            table_mode: self.table_mode,
            columns: self.columns.clone(),
        }
    }

    pub fn sql_preview(&self) -> String {
        preview_sql(&self.config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard() -> SchemaWizard {
        SchemaWizard::new(vec!["patient_id".into(), "visit_count".into()])
    }

    #[test]
    fn review_step_needs_parameters() {
        assert!(!SchemaWizard::new(vec![]).can_proceed());
        assert!(wizard().can_proceed());
    }

    #[test]
    fn table_step_gate() {
        let mut w = wizard();
        assert!(w.advance());
        assert_eq!(w.current(), SchemaStep::ChooseTable);

        assert!(!w.can_proceed());
        w.new_table_name = "  ".into();
        assert!(!w.can_proceed());
        w.new_table_name = "visits".into();
        assert!(w.can_proceed());

        w.set_table_mode(TableMode::Existing);
        assert!(!w.can_proceed());
        w.select_existing_table(Some("visits".into()), vec![]);
        assert!(w.can_proceed());
    }

    #[test]
    fn column_step_is_proposed_on_entry_and_gated() {
        let mut w = wizard();
        w.advance();
        w.new_table_name = "visits".into();
        assert!(w.advance());
        assert_eq!(w.current(), SchemaStep::ConfigureColumns);
        assert_eq!(w.columns.len(), 4);

        w.columns.clear();
        assert!(!w.can_proceed());
        w.add_column();
        assert!(w.advance());
        assert!(w.sql_preview().starts_with("CREATE TABLE public.visits ("));
    }

    #[test]
    fn preview_blocks_invalid_mappings() {
        let mut w = wizard();
        w.step = SchemaStep::Preview;
        w.columns = vec![
            ColumnMapping::proposed("a", "TEXT"),
            ColumnMapping::proposed("a", "TEXT"),
        ];
        assert!(!w.can_proceed());
        assert!(!w.advance());
    }

    #[test]
    fn existing_columns_keep_their_name() {
        let mut w = wizard();
        w.columns = vec![ColumnMapping {
            is_existing_column: true,
            will_be_added: false,
            ..ColumnMapping::proposed("pid", "TEXT")
        }];
        w.update_column(0, |c| {
            c.column_name = "renamed".into();
            c.source_parameter = Some("patient_id".into());
        });
        assert_eq!(w.columns[0].column_name, "pid");
        assert_eq!(w.columns[0].source_parameter.as_deref(), Some("patient_id"));
        w.remove_column(0);
        assert_eq!(w.columns.len(), 1);
    }

    fn saved_visits() -> SchemaMappingConfig {
        SchemaMappingConfig {
            schema_name: "public".into(),
            table_name: "visits".into(),
            table_mode: TableMode::New,
            columns: vec![
                ColumnMapping {
                    nullable: false,
                    primary_key: true,
                    ..ColumnMapping::proposed("id", "SERIAL")
                },
                ColumnMapping {
                    source_parameter: Some("patient_id".into()),
                    ..ColumnMapping::proposed("patient_id", "VARCHAR(100)")
                },
            ],
        }
    }

    #[test]
    fn a_saved_new_table_reopens_as_existing() {
        let mut w = wizard();
        w.restore(saved_visits());
        assert_eq!(w.table_mode, TableMode::Existing);
        assert_eq!(w.existing_table.as_deref(), Some("visits"));
        assert!(w.sql_preview().is_empty());

        w.select_existing_table(
            Some("visits".into()),
            vec![
                TableColumn {
                    column_name: "id".into(),
                    data_type: "integer".into(),
                    is_primary_key: true,
                    ..Default::default()
                },
                TableColumn {
                    column_name: "patient_id".into(),
                    data_type: "character varying".into(),
                    is_nullable: true,
                    ..Default::default()
                },
                TableColumn {
                    column_name: "processed_at".into(),
                    data_type: "timestamp without time zone".into(),
                    is_nullable: true,
                    ..Default::default()
                },
            ],
        );
        w.columns = w.propose_columns();
        let added: Vec<_> = w.columns.iter().filter(|c| c.will_be_added).collect();
        assert_eq!(added.len(), 1, "only the parameter extracted after the save");
        assert_eq!(added[0].column_name, "visit_count");
        assert_eq!(
            w.sql_preview(),
            "ALTER TABLE public.visits ADD COLUMN visit_count INTEGER;"
        );
    }

    #[test]
    fn a_created_table_is_not_created_again() {
        let mut w = wizard();
        w.new_table_name = "visits".into();
        w.step = SchemaStep::Preview;
        w.columns = w.propose_columns();
        assert!(w.sql_preview().starts_with("CREATE TABLE"));

        w.table_created();
        assert_eq!(w.table_mode, TableMode::Existing);
        assert_eq!(w.table_name(), "visits");
        assert!(w.columns.iter().all(|c| c.is_existing_column));
        assert_eq!(w.columns[1].source_parameter.as_deref(), Some("patient_id"));
        assert!(w.sql_preview().is_empty());
        assert!(w.can_proceed());
    }

    #[test]
    fn added_columns_get_free_names() {
        let mut w = wizard();
        w.add_column();
        w.add_column();
        w.remove_column(0);
        w.add_column();
        let names: Vec<_> = w.columns.iter().map(|c| c.column_name.as_str()).collect();
        assert_eq!(names, vec!["new_column_2", "new_column"]);
        assert!(w.issues().is_empty());
    }

    #[test]
    fn back_stops_at_the_first_step() {
        let mut w = wizard();
        assert!(!w.back());
        w.advance();
        assert!(w.back());
        assert_eq!(w.current(), SchemaStep::ReviewParameters);
    }
}
