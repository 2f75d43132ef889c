//! Transient user-facing notices (toasts).

use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::ApiError;

/// Most recent notices kept on screen.
pub const MAX_NOTICES: usize = 5;

/// How long a notice stays up unless dismissed first.
pub const NOTICE_LIFETIME_MS: u32 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Success => "toast-success",
            Severity::Info => "toast-info",
            Severity::Warn => "toast-warn",
            Severity::Error => "toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub shown_at: DateTime<Utc>,
}

impl Notice {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.shown_at + TimeDelta::milliseconds(i64::from(NOTICE_LIFETIME_MS))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoticeQueue {
    notices: VecDeque<Notice>,
    next_id: u64,
}

impl NoticeQueue {
    pub fn push(
        &mut self,
        severity: Severity,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> u64 {
        self.push_at(Utc::now(), severity, summary, detail)
    }

    pub fn push_at(
        &mut self,
        now: DateTime<Utc>,
        severity: Severity,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> u64 {
        self.next_id += 1;
        self.notices.push_back(Notice {
            id: self.next_id,
            severity,
            summary: summary.into(),
            detail: detail.into(),
            shown_at: now,
        });
        while self.notices.len() > MAX_NOTICES {
            self.notices.pop_front();
        }
        self.next_id
    }

    pub fn success(&mut self, detail: impl Into<String>) -> u64 {
        self.push(Severity::Success, "Success", detail)
    }

    pub fn warn(&mut self, detail: impl Into<String>) -> u64 {
        self.push(Severity::Warn, "Warning", detail)
    }

    /// Show `err` with its user-facing message.
    pub fn error(&mut self, err: &ApiError) -> u64 {
        self.push(Severity::Error, "Error", err.user_message())
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }

    /// Drop every notice whose lifetime has run out by `now`.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        self.notices.retain(|n| n.expires_at() > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_five_most_recent() {
        let mut queue = NoticeQueue::default();
        for i in 0..7 {
            queue.success(format!("saved {}", i));
        }
        assert_eq!(queue.len(), MAX_NOTICES);
        assert_eq!(queue.iter().next().map(|n| n.detail.as_str()), Some("saved 2"));
    }

    #[test]
    fn test_dismiss_and_error_text() {
        let mut queue = NoticeQueue::default();
        let id = queue.error(&ApiError::Backend {
            status: 400,
            message: "Code already exists".into(),
        });
        queue.warn("careful");
        assert_eq!(queue.iter().next().unwrap().detail, "Code already exists");

        queue.dismiss(id);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.iter().next().unwrap().severity, Severity::Warn);
    }

    #[test]
    fn test_notices_expire_after_their_lifetime() {
        let start = Utc::now();
        let lifetime = TimeDelta::milliseconds(i64::from(NOTICE_LIFETIME_MS));
        let mut queue = NoticeQueue::default();
        queue.push_at(start, Severity::Success, "Success", "Created.");
        queue.push_at(start + TimeDelta::seconds(2), Severity::Warn, "Warning", "Check the dates");

        queue.expire(start + lifetime - TimeDelta::milliseconds(1));
        assert_eq!(queue.len(), 2, "nothing is due yet");

        queue.expire(start + lifetime);
        let left: Vec<&str> = queue.iter().map(|n| n.detail.as_str()).collect();
        assert_eq!(left, vec!["Check the dates"]);

        queue.expire(start + TimeDelta::seconds(2) + lifetime);
        assert!(queue.is_empty());
    }
}
