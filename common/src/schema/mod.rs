//! Schema-mapping derivation: proposing destination columns for extracted
//! parameters, checking the result, and rendering the SQL the backend will
//! run for it.

mod infer;
mod mapping;
mod sql;
pub mod wizard;

pub use infer::{infer_data_type, normalize_column_name, DATA_TYPES};
pub use mapping::{
    merge_with_existing, propose_new_table, validate_mappings, MappingIssue, PROCESSED_AT_COLUMN,
};
pub use sql::{alter_table_sql, create_table_sql, preview_sql, qualified_name};
