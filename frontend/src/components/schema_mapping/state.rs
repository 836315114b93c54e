use common::activity::{ActivityLog, Level};
use common::jobs::JobStatus;
use common::model::schema::{SchemaMappingConfig, ValidationReport};
use common::schema::wizard::SchemaWizard;

use crate::helpers::timestamp;

pub struct SchemaMapping {
    pub wizard: SchemaWizard,
    pub schemas: Vec<String>,
    pub tables: Vec<String>,
    pub loading_parameters: bool,
    pub loading_columns: bool,
    /// Last answer of the server-side validation.
    pub validation: Option<ValidationReport>,
    pub saving: JobStatus,
    pub log: ActivityLog,
    /// Set when the coordinator handed over a mapping; the server copy is
    /// then not fetched.
    pub restored: bool,
}

impl SchemaMapping {
    pub fn new(saved: Option<SchemaMappingConfig>) -> Self {
        let mut wizard = SchemaWizard::new(Vec::new());
        let restored = saved.is_some();
        if let Some(saved) = saved {
            wizard.restore(saved);
        }
        Self {
            wizard,
            schemas: Vec::new(),
            tables: Vec::new(),
            loading_parameters: true,
            loading_columns: false,
            validation: None,
            saving: JobStatus::Idle,
            log: ActivityLog::default(),
            restored,
        }
    }

    pub fn record(&mut self, level: Level, message: impl Into<String>) {
        self.log.push(timestamp(), level, message);
    }
}
