//! "Can proceed" predicates of the setup steps. Pure functions of the state
//! each step owns; the schema sub-wizard's gates live on
//! [`crate::schema::wizard::SchemaWizard::can_proceed`].

use crate::model::configuration::ConfigurationDraft;
use crate::model::file::UploadQueue;
use crate::model::project::TemplateType;

pub fn template_ready(selected: Option<TemplateType>) -> bool {
    selected.is_some()
}

/// Files still uploading or failed do not count.
pub fn files_ready(queue: &UploadQueue) -> bool {
    queue.uploaded_count() > 0
}

pub fn configuration_ready(draft: &ConfigurationDraft) -> bool {
    !draft.parameters.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::file::{FileRecord, PDF_MIME};

    #[test]
    fn template_gate() {
        assert!(!template_ready(None));
        assert!(template_ready(Some(TemplateType::Fixed)));
    }

    #[test]
    fn upload_gate_ignores_unfinished_files() {
        let mut queue = UploadQueue::new();
        let a = queue.enqueue("a.pdf", 1, PDF_MIME).unwrap();
        let b = queue.enqueue("b.pdf", 1, PDF_MIME).unwrap();
        assert!(!files_ready(&queue));

        queue.start(&a);
        queue.fail(&a, "rejected");
        queue.start(&b);
        assert!(!files_ready(&queue));

        queue.complete(
            &b,
            FileRecord {
                id: "f1".into(),
                ..Default::default()
            },
        );
        assert!(files_ready(&queue));
    }

    #[test]
    fn configuration_gate() {
        let mut draft = ConfigurationDraft::default();
        draft.add_section("s".into(), "Header", "", true);
        assert!(!configuration_ready(&draft));
        draft.add_parameter("s", "invoice_number", "");
        assert!(configuration_ready(&draft));
    }
}
