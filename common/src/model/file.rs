//! Uploaded document bookkeeping for the file-upload step.
//!
//! Files move through [`UploadState`] one at a time: the queue never lets a
//! second file start while another is `Uploading`, which bounds the load the
//! console puts on the storage backend. Entries are keyed by a local
//! [`FileKey`] until the server acknowledges them, then by the server id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const PDF_MIME: &str = "application/pdf";

/// Simulated progress never passes this value; only an acknowledgment or
/// transport-reported bytes can push a file beyond it.
pub const SIMULATED_PROGRESS_CAP: u8 = 95;
pub const SIMULATED_PROGRESS_TICK_MS: u32 = 300;
pub const UPLOAD_TIMEOUT_MS: u32 = 300_000;

/// A file as stored by the backend under `/files/{projectId}/configuration`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileRecord {
    pub id: String,
    #[serde(alias = "filename", alias = "name")]
    pub file_name: String,
    pub size: u64,
    pub page_count: Option<u32>,
    pub preview_url: Option<String>,
    pub download_url: Option<String>,
    pub uploaded_at: Option<String>,
}

impl FileRecord {
    pub fn display_name(&self) -> String {
        extract_filename(&self.file_name)
    }
}

/// Strips the storage prefix the backend puts on file names.
///
/// `"<uuid>_invoice.pdf"` becomes `"invoice.pdf"`; a name that is only a
/// UUID (with or without `.pdf`) becomes `"Document-<first 8 chars>.pdf"`.
/// Anything else is returned unchanged.
pub fn extract_filename(stored: &str) -> String {
    let Some((uuid, rest)) = split_uuid_prefix(stored) else {
        return stored.to_string();
    };

    if rest.is_empty() || rest.eq_ignore_ascii_case(".pdf") {
        return format!("Document-{}.pdf", &uuid[..8]);
    }

    match rest.strip_prefix('_') {
        Some(original) if !original.is_empty() => original.to_string(),
        _ => stored.to_string(),
    }
}

fn split_uuid_prefix(name: &str) -> Option<(&str, &str)> {
    let head = name.get(..36)?;
    Uuid::try_parse(head).ok()?;
    Some((head, &name[36..]))
}

pub fn is_pdf(mime: &str) -> bool {
    mime.trim().eq_ignore_ascii_case(PDF_MIME)
}

/// Advances a simulated progress value by `increment` percent, never past
/// [`SIMULATED_PROGRESS_CAP`].
pub fn next_simulated_progress(current: u8, increment: f64) -> u8 {
    let step = increment.clamp(0.0, 10.0);
    let next = (f64::from(current) + step).floor() as u8;
    next.min(SIMULATED_PROGRESS_CAP).max(current.min(SIMULATED_PROGRESS_CAP))
}

/// Byte-based progress as a percentage, `None` when the total is unknown.
pub fn transport_progress(loaded: f64, total: f64) -> Option<u8> {
    if total <= 0.0 || !total.is_finite() {
        return None;
    }
    Some((loaded * 100.0 / total).round().clamp(0.0, 100.0) as u8)
}

pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileKey {
    Local(u64),
    Server(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressSource {
    Simulated,
    Transport,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    Pending,
    Uploading { progress: u8, source: ProgressSource },
    Uploaded(FileRecord),
    /// Stored file whose backend delete has not answered yet.
    Removing(FileRecord),
    Failed(String),
}

impl UploadState {
    pub fn progress(&self) -> u8 {
        match self {
            UploadState::Pending => 0,
            UploadState::Uploading { progress, .. } => *progress,
            UploadState::Uploaded(_) | UploadState::Removing(_) => 100,
            UploadState::Failed(_) => 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            UploadState::Uploaded(_) | UploadState::Removing(_) | UploadState::Failed(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub key: FileKey,
    pub name: String,
    pub size: u64,
    pub state: UploadState,
}

impl UploadedFile {
    pub fn display_name(&self) -> String {
        extract_filename(&self.name)
    }

    pub fn record(&self) -> Option<&FileRecord> {
        match &self.state {
            UploadState::Uploaded(record) => Some(record),
            _ => None,
        }
    }
}

/// What the caller has to do after asking to remove a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The file only ever existed locally and is already gone.
    Local,
    /// The backend holds a copy that must be deleted by id. The entry stays
    /// listed as `Removing` until `confirm_removal` or `cancel_removal`.
    Remote(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadQueue {
    files: Vec<UploadedFile>,
    next_local: u64,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the list with files the backend already stores.
    pub fn with_existing(records: Vec<FileRecord>) -> Self {
        let mut queue = Self::new();
        queue.add_existing(records);
        queue
    }

    /// Adds stored files ahead of the local ones, skipping any id already
    /// listed.
    pub fn add_existing(&mut self, records: Vec<FileRecord>) {
        let fresh: Vec<UploadedFile> = records
            .into_iter()
            .filter(|record| self.get(&FileKey::Server(record.id.clone())).is_none())
            .map(|record| UploadedFile {
                key: FileKey::Server(record.id.clone()),
                name: record.file_name.clone(),
                size: record.size,
                state: UploadState::Uploaded(record),
            })
            .collect();
        self.files.splice(0..0, fresh);
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn get(&self, key: &FileKey) -> Option<&UploadedFile> {
        self.files.iter().find(|f| &f.key == key)
    }

    fn get_mut(&mut self, key: &FileKey) -> Option<&mut UploadedFile> {
        self.files.iter_mut().find(|f| &f.key == key)
    }

    /// Queues a picked or dropped file. Non-PDF input is dropped silently.
    pub fn enqueue(&mut self, name: &str, size: u64, mime: &str) -> Option<FileKey> {
        if !is_pdf(mime) {
            return None;
        }
        self.next_local += 1;
        let key = FileKey::Local(self.next_local);
        self.files.push(UploadedFile {
            key: key.clone(),
            name: name.to_string(),
            size,
            state: UploadState::Pending,
        });
        Some(key)
    }

    /// The file that should start next, if nothing is uploading right now.
    pub fn next_pending(&self) -> Option<FileKey> {
        if self.in_flight().is_some() {
            return None;
        }
        self.files
            .iter()
            .find(|f| f.state == UploadState::Pending)
            .map(|f| f.key.clone())
    }

    pub fn in_flight(&self) -> Option<&UploadedFile> {
        self.files
            .iter()
            .find(|f| matches!(f.state, UploadState::Uploading { .. }))
    }

    /// Moves a pending file to `Uploading`. Refused while another file is in
    /// flight, which is what keeps uploads sequential.
    pub fn start(&mut self, key: &FileKey) -> bool {
        if self.in_flight().is_some() {
            return false;
        }
        match self.get_mut(key) {
            Some(file) if file.state == UploadState::Pending => {
                file.state = UploadState::Uploading {
                    progress: 0,
                    source: ProgressSource::Simulated,
                };
                true
            }
            _ => false,
        }
    }

    /// Applies one simulated tick. Ignored once the transport reports bytes.
    pub fn simulate_tick(&mut self, key: &FileKey, increment: f64) {
        if let Some(file) = self.get_mut(key) {
            if let UploadState::Uploading {
                progress,
                source: ProgressSource::Simulated,
            } = &mut file.state
            {
                *progress = next_simulated_progress(*progress, increment);
            }
        }
    }

    pub fn report_progress(&mut self, key: &FileKey, percent: u8) {
        if let Some(file) = self.get_mut(key) {
            if let UploadState::Uploading { progress, source } = &mut file.state {
                *progress = percent.min(100);
                *source = ProgressSource::Transport;
            }
        }
    }

    /// Records the server acknowledgment and re-keys the entry by server id.
    pub fn complete(&mut self, key: &FileKey, record: FileRecord) -> Option<FileKey> {
        let file = self.get_mut(key)?;
        let server_key = FileKey::Server(record.id.clone());
        file.key = server_key.clone();
        if !record.file_name.is_empty() {
            file.name = record.file_name.clone();
        }
        if record.size > 0 {
            file.size = record.size;
        }
        file.state = UploadState::Uploaded(record);
        Some(server_key)
    }

    pub fn fail(&mut self, key: &FileKey, reason: impl Into<String>) {
        if let Some(file) = self.get_mut(key) {
            file.state = UploadState::Failed(reason.into());
        }
    }

    /// Starts removing a file. Local files leave the list at once; stored
    /// files are marked `Removing` and keep their place. `None` when the key
    /// is unknown or a delete for it is already pending.
    pub fn remove(&mut self, key: &FileKey) -> Option<Removal> {
        let index = self.files.iter().position(|f| &f.key == key)?;
        let file = &mut self.files[index];
        match &file.state {
            UploadState::Removing(_) => None,
            UploadState::Uploaded(record) => {
                let id = record.id.clone();
                file.state = UploadState::Removing(record.clone());
                Some(Removal::Remote(id))
            }
            _ => match &file.key {
                FileKey::Server(id) => {
                    let id = id.clone();
                    self.files.remove(index);
                    Some(Removal::Remote(id))
                }
                FileKey::Local(_) => {
                    self.files.remove(index);
                    Some(Removal::Local)
                }
            },
        }
    }

    /// The backend deleted the file; drop it from the list.
    pub fn confirm_removal(&mut self, key: &FileKey) -> bool {
        let before = self.files.len();
        self.files
            .retain(|f| !(&f.key == key && matches!(f.state, UploadState::Removing(_))));
        self.files.len() != before
    }

    /// The backend refused the delete; the file is listed as uploaded again.
    pub fn cancel_removal(&mut self, key: &FileKey) -> bool {
        match self.get_mut(key) {
            Some(file) => match std::mem::replace(&mut file.state, UploadState::Pending) {
                UploadState::Removing(record) => {
                    file.state = UploadState::Uploaded(record);
                    true
                }
                other => {
                    file.state = other;
                    false
                }
            },
            None => false,
        }
    }

    pub fn uploaded(&self) -> Vec<FileRecord> {
        self.files.iter().filter_map(|f| f.record().cloned()).collect()
    }

    pub fn uploaded_count(&self) -> usize {
        self.files.iter().filter(|f| f.record().is_some()).count()
    }

    pub fn finished_count(&self) -> usize {
        self.files.iter().filter(|f| f.state.is_finished()).count()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> FileRecord {
        FileRecord {
            id: id.to_string(),
            file_name: name.to_string(),
            size: 10,
            ..Default::default()
        }
    }

    #[test]
    fn strips_uuid_prefix() {
        assert_eq!(
            extract_filename("3fa85f64-5717-4562-b3fc-2c963f66afa6_invoice.pdf"),
            "invoice.pdf"
        );
    }

    #[test]
    fn bare_uuid_gets_a_document_name() {
        assert_eq!(
            extract_filename("3fa85f64-5717-4562-b3fc-2c963f66afa6.pdf"),
            "Document-3fa85f64.pdf"
        );
        assert_eq!(
            extract_filename("3fa85f64-5717-4562-b3fc-2c963f66afa6"),
            "Document-3fa85f64.pdf"
        );
    }

    #[test]
    fn ordinary_names_are_untouched() {
        assert_eq!(extract_filename("report_2024.pdf"), "report_2024.pdf");
        assert_eq!(extract_filename("short.pdf"), "short.pdf");
        assert_eq!(extract_filename(""), "");
    }

    #[test]
    fn only_pdfs_enter_the_queue() {
        let mut queue = UploadQueue::new();
        let picked = [
            ("a.pdf", "application/pdf"),
            ("b.txt", "text/plain"),
            ("c.pdf", "application/pdf"),
        ];
        let keys: Vec<_> = picked
            .iter()
            .filter_map(|(name, mime)| queue.enqueue(name, 1, mime))
            .collect();
        assert_eq!(keys.len(), 2);
        let names: Vec<_> = queue.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "c.pdf"]);
    }

    #[test]
    fn uploads_run_one_at_a_time() {
        let mut queue = UploadQueue::new();
        for name in ["a.pdf", "b.pdf", "c.pdf"] {
            queue.enqueue(name, 1, PDF_MIME);
        }

        let mut finished = Vec::new();
        let mut step = 0;
        while let Some(key) = queue.next_pending() {
            assert!(queue.start(&key));
            let uploading = queue
                .files()
                .iter()
                .filter(|f| matches!(f.state, UploadState::Uploading { .. }))
                .count();
            assert_eq!(uploading, 1);
            assert_eq!(queue.next_pending(), None);

            if step == 1 {
                queue.fail(&key, "disk full");
            } else {
                queue.complete(&key, record(&format!("srv-{step}"), "x.pdf"));
            }
            finished.push(queue.finished_count());
            step += 1;
        }

        assert_eq!(finished, vec![1, 2, 3]);
        assert_eq!(queue.uploaded_count(), 2);
        assert!(matches!(
            queue.files()[1].state,
            UploadState::Failed(ref reason) if reason == "disk full"
        ));
    }

    #[test]
    fn start_is_refused_while_another_file_is_in_flight() {
        let mut queue = UploadQueue::new();
        let a = queue.enqueue("a.pdf", 1, PDF_MIME).unwrap();
        let b = queue.enqueue("b.pdf", 1, PDF_MIME).unwrap();
        assert!(queue.start(&a));
        assert!(!queue.start(&b));
    }

    #[test]
    fn simulated_progress_caps_and_yields_to_transport() {
        let mut queue = UploadQueue::new();
        let key = queue.enqueue("a.pdf", 1, PDF_MIME).unwrap();
        queue.start(&key);
        for _ in 0..40 {
            queue.simulate_tick(&key, 10.0);
        }
        assert_eq!(queue.get(&key).unwrap().state.progress(), SIMULATED_PROGRESS_CAP);

        queue.report_progress(&key, 40);
        queue.simulate_tick(&key, 10.0);
        assert_eq!(queue.get(&key).unwrap().state.progress(), 40);

        let server_key = queue.complete(&key, record("srv-1", "")).unwrap();
        assert_eq!(queue.get(&server_key).unwrap().state.progress(), 100);
        assert!(queue.get(&key).is_none());
    }

    #[test]
    fn removal_only_hits_the_backend_for_server_files() {
        let mut queue = UploadQueue::with_existing(vec![record("srv-9", "old.pdf")]);
        let local = queue.enqueue("new.pdf", 1, PDF_MIME).unwrap();
        assert_eq!(queue.remove(&local), Some(Removal::Local));
        let stored = FileKey::Server("srv-9".to_string());
        assert_eq!(queue.remove(&stored), Some(Removal::Remote("srv-9".to_string())));
        assert_eq!(queue.len(), 1);
        assert!(queue.confirm_removal(&stored));
        assert!(queue.is_empty());
    }

    #[test]
    fn a_refused_delete_keeps_the_file_uploaded() {
        let mut queue = UploadQueue::with_existing(vec![record("srv-9", "old.pdf")]);
        let stored = FileKey::Server("srv-9".to_string());

        assert!(queue.remove(&stored).is_some());
        assert!(matches!(queue.get(&stored).unwrap().state, UploadState::Removing(_)));
        assert_eq!(queue.uploaded_count(), 0);
        assert_eq!(queue.remove(&stored), None, "delete already pending");

        assert!(queue.cancel_removal(&stored));
        assert_eq!(queue.uploaded_count(), 1);
        assert_eq!(queue.uploaded()[0].id, "srv-9");
        assert!(!queue.confirm_removal(&stored));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn transport_progress_needs_a_known_total() {
        assert_eq!(transport_progress(50.0, 200.0), Some(25));
        assert_eq!(transport_progress(50.0, 0.0), None);
    }

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn stored_files_are_listed_once_ahead_of_local_ones() {
        let stored = |id: &str| FileRecord {
            id: id.into(),
            file_name: format!("{}.pdf", id),
            ..Default::default()
        };
        let mut queue = UploadQueue::with_existing(vec![stored("a")]);
        queue.enqueue("local.pdf", 1, PDF_MIME);
        queue.add_existing(vec![stored("a"), stored("b")]);

        let keys: Vec<_> = queue.files().iter().map(|f| f.key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                FileKey::Server("b".into()),
                FileKey::Server("a".into()),
                FileKey::Local(1),
            ]
        );
        assert_eq!(queue.uploaded_count(), 2);
    }
}
