//! Screens of the five-step project setup wizard.

pub mod configuration;
pub mod file_uploader;
pub mod results;
pub mod template_selection;
