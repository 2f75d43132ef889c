//! Broadcast notification batches and delivery statistics.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecipientType {
    #[default]
    All,
    Role,
    SpecificUsers,
}

impl RecipientType {
    pub const ALL: [RecipientType; 3] = [
        RecipientType::All,
        RecipientType::Role,
        RecipientType::SpecificUsers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecipientType::All => "All",
            RecipientType::Role => "Role",
            RecipientType::SpecificUsers => "SpecificUsers",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecipientType::All => "All users",
            RecipientType::Role => "By role",
            RecipientType::SpecificUsers => "Specific users",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum BatchStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

/// Notification categories understood by the mobile clients.
pub const NOTIFICATION_TYPES: [&str; 5] = ["Info", "Success", "Warning", "NewCourse", "Announcement"];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationBatch {
    pub id: String,
    pub sender_id: String,
    pub sender_name: Option<String>,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub recipient_type: RecipientType,
    pub target_role: Option<String>,
    pub total_recipients: u64,
    pub sent_count: u64,
    pub failed_count: u64,
    pub status: BatchStatus,
    pub send_push: bool,
    pub related_course_id: Option<String>,
    pub related_course_name: Option<String>,
    pub created_at: String,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationStats {
    pub total_sent: u64,
    pub total_read: u64,
    pub total_unread: u64,
    pub read_rate: f64,
    pub total_push_sent: u64,
    pub pending_scheduled: u64,
    pub total_batches: u64,
    pub failed_batches: u64,
}
