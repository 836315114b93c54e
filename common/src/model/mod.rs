pub mod batch;
pub mod configuration;
pub mod file;
pub mod project;
pub mod schema;
