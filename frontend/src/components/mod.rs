pub mod activity_log;
pub mod batch_processing;
pub mod projects;
pub mod schema_mapping;
pub mod setup;
pub mod step_indicator;
