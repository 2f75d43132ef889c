//! Confirm-then-act gate for destructive and state-changing calls.

use crate::backend::ApiRequest;

/// A request waiting on explicit user confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConfirm {
    pub title: String,
    pub message: String,
    pub accept_label: String,
    pub danger: bool,
    request: ApiRequest,
}

impl PendingConfirm {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        accept_label: impl Into<String>,
        request: ApiRequest,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            accept_label: accept_label.into(),
            danger: false,
            request,
        }
    }

    /// `DELETE <collection>/{id}` for the record labelled `label`.
    pub fn delete(collection: &str, id: &str, label: &str) -> Self {
        Self {
            danger: true,
            ..Self::new(
                "Confirm delete",
                format!("Are you sure you want to delete \"{}\"?", label),
                "Delete",
                ApiRequest::delete(format!("{}/{}", collection, id)),
            )
        }
    }

    pub fn request(&self) -> &ApiRequest {
        &self.request
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfirmGate {
    pending: Option<PendingConfirm>,
}

impl ConfirmGate {
    pub fn request(&mut self, confirm: PendingConfirm) {
        self.pending = Some(confirm);
    }

    pub fn pending(&self) -> Option<&PendingConfirm> {
        self.pending.as_ref()
    }

    /// The user accepted: release the request to send.
    pub fn accept(&mut self) -> Option<ApiRequest> {
        self.pending.take().map(|p| p.request)
    }

    /// The user dismissed: nothing is sent.
    pub fn dismiss(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::backend::Backend;

    #[tokio::test]
    async fn test_dismiss_issues_no_call() {
        let backend = MockBackend::new();
        let mut gate = ConfirmGate::default();
        gate.request(PendingConfirm::delete("/web/courses", "c1", "Rust 101"));
        assert!(gate.pending().unwrap().message.contains("Rust 101"));

        gate.dismiss();

        assert!(gate.accept().is_none(), "dismissed confirmation releases nothing");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_accept_releases_delete_once() {
        let backend = MockBackend::new();
        let mut gate = ConfirmGate::default();
        gate.request(PendingConfirm::delete("/web/courses", "c1", "Rust 101"));
        assert!(backend.calls().is_empty(), "nothing sent before accepting");

        if let Some(request) = gate.accept() {
            backend.send(request).await.unwrap();
        }
        assert!(gate.accept().is_none());
        assert_eq!(backend.calls(), vec!["DELETE /web/courses/c1"]);
    }
}
