//! Read-only mirrors of the batch and database-sink status endpoints.
//!
//! The console never edits these; every poll replaces the previous value.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchStatus {
    pub enabled: bool,
    pub processing: bool,
    pub input_files: u32,
    pub output_files: u32,
    pub failed_files: u32,
    pub last_run: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DbStatus {
    pub enabled: bool,
    pub processing: bool,
    pub pending_files: u32,
    pub processed_files: u32,
    pub failed_files: u32,
    pub table_name: Option<String>,
    pub last_run: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchResultItem {
    #[serde(alias = "filename")]
    pub file_name: String,
    pub status: String,
    pub error: Option<String>,
    pub output_file: Option<String>,
    pub processed_at: Option<String>,
}

impl BatchResultItem {
    pub fn succeeded(&self) -> bool {
        matches!(
            self.status.to_ascii_lowercase().as_str(),
            "success" | "succeeded" | "completed" | "done" | "ok"
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchResults {
    pub processed: u32,
    pub failed: u32,
    pub results: Vec<BatchResultItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchFolder {
    #[default]
    Input,
    Output,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchFile {
    #[serde(alias = "filename")]
    pub name: String,
    pub size: u64,
    pub folder: BatchFolder,
    pub modified: Option<String>,
}

/// Response of `GET .../batch/files`, grouped by folder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchFiles {
    pub input: Vec<BatchFile>,
    pub output: Vec<BatchFile>,
    pub failed: Vec<BatchFile>,
}

impl BatchFiles {
    pub fn total(&self) -> usize {
        self.input.len() + self.output.len() + self.failed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tolerates_missing_fields() {
        let status: BatchStatus = serde_json::from_str(r#"{"enabled":true,"inputFiles":3}"#).unwrap();
        assert!(status.enabled);
        assert_eq!(status.input_files, 3);
        assert_eq!(status.failed_files, 0);
    }

    #[test]
    fn result_status_words() {
        let mut item = BatchResultItem {
            status: "Completed".to_string(),
            ..Default::default()
        };
        assert!(item.succeeded());
        item.status = "error".to_string();
        assert!(!item.succeeded());
    }
}
