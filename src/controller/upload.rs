//! Files staged in a dialog and sent after the owning record is saved.

use futures::channel::mpsc;
use serde_json::Value;
use tracing::{info, warn};

use crate::backend::{Backend, ProgressSender, StagedFile};
use crate::error::ApiError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagedUpload {
    file: Option<StagedFile>,
    progress: Option<u8>,
}

impl StagedUpload {
    pub fn stage(&mut self, file: StagedFile) {
        self.file = Some(file);
        self.progress = None;
    }

    pub fn clear(&mut self) {
        self.file = None;
        self.progress = None;
    }

    pub fn staged(&self) -> Option<&StagedFile> {
        self.file.as_ref()
    }

    /// Hand the file over for sending; progress starts at 0.
    pub fn take(&mut self) -> Option<StagedFile> {
        let file = self.file.take();
        self.progress = file.as_ref().map(|_| 0);
        file
    }

    pub fn set_progress(&mut self, percent: u8) {
        self.progress = Some(percent.min(100));
    }

    /// `Some(percent)` while an upload is running.
    pub fn progress(&self) -> Option<u8> {
        self.progress
    }

    pub fn finish(&mut self) {
        self.progress = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// Nothing was staged
    NotRequested,
    Uploaded(Value),
    /// The record is saved; only the file failed
    Failed(ApiError),
}

impl UploadOutcome {
    /// Warning text for a failed upload of a `what` (e.g. "Lesson").
    pub fn warning(&self, what: &str) -> Option<String> {
        match self {
            UploadOutcome::Failed(e) => Some(format!(
                "{} saved but the document upload failed: {}",
                what,
                e.user_message()
            )),
            _ => None,
        }
    }
}

/// Progress channel for one upload.
pub fn progress_channel() -> (ProgressSender, mpsc::UnboundedReceiver<u8>) {
    mpsc::unbounded()
}

/// Upload `file` to `path` if one was staged. Never undoes the save that preceded it.
pub async fn upload_after_save(
    backend: &dyn Backend,
    path: &str,
    file: Option<StagedFile>,
    progress: Option<ProgressSender>,
) -> UploadOutcome {
    let Some(file) = file else {
        return UploadOutcome::NotRequested;
    };

    let name = file.name.clone();
    match backend.upload(path, file, progress).await {
        Ok(data) => {
            info!(path, file = %name, "Document uploaded");
            UploadOutcome::Uploaded(data)
        }
        Err(e) => {
            warn!(path, file = %name, error = %e, "Document upload failed after save");
            UploadOutcome::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use futures::StreamExt;
    use serde_json::json;

    fn pdf() -> StagedFile {
        StagedFile::new("week1.pdf", None, vec![0u8; 32])
    }

    #[test]
    fn test_stage_and_clear() {
        let mut staged = StagedUpload::default();
        staged.stage(pdf());
        assert_eq!(staged.staged().unwrap().name, "week1.pdf");
        assert!(staged.progress().is_none(), "staging does not upload");

        staged.clear();
        assert!(staged.staged().is_none());
        assert!(staged.take().is_none());
        assert!(staged.progress().is_none());
    }

    #[tokio::test]
    async fn test_nothing_staged_sends_nothing() {
        let backend = MockBackend::new();
        let outcome = upload_after_save(&backend, "/web/courses/lessons/l1/upload-document", None, None).await;
        assert_eq!(outcome, UploadOutcome::NotRequested);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_reports_progress() {
        let backend = MockBackend::new();
        backend.push_ok(json!({"documentUrl": "https://cdn.test/week1.pdf"}));
        let (tx, rx) = progress_channel();

        let outcome = upload_after_save(
            &backend,
            "/web/courses/lessons/l1/upload-document",
            Some(pdf()),
            Some(tx),
        )
        .await;

        assert!(matches!(outcome, UploadOutcome::Uploaded(_)));
        let seen: Vec<u8> = rx.collect().await;
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&100));
        assert_eq!(backend.uploads()[0].name, "week1.pdf");
    }

    #[tokio::test]
    async fn test_failure_becomes_warning() {
        let backend = MockBackend::new();
        backend.push_err(ApiError::Backend {
            status: 413,
            message: "File too large".into(),
        });

        let outcome = upload_after_save(&backend, "/x", Some(pdf()), None).await;
        assert_eq!(
            outcome.warning("Lesson").as_deref(),
            Some("Lesson saved but the document upload failed: File too large")
        );
        assert!(UploadOutcome::NotRequested.warning("Lesson").is_none());
    }
}
