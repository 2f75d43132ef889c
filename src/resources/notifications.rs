//! Broadcast notifications: batch history, stats, send and resend.

use serde_json::{json, Value};

use admin_wire::{NotificationBatch, NotificationStats, RecipientType, Role, TotalShape};

use crate::backend::{fetch_json, ApiRequest, Backend};
use crate::controller::{
    form, list, Draft, FetchOutcome, FormDialog, ListController, PageParam, PendingConfirm,
    StateCell, SubmitOutcome,
};
use crate::error::{ApiError, ValidationErrors};

use super::{input_to_rfc3339, non_blank, Resource};

pub struct BatchesResource;

impl Resource for BatchesResource {
    type Item = NotificationBatch;
    type Filter = ();
    const PATH: &'static str = "/web/notifications/batches";
    const PAGE_PARAM: PageParam = PageParam::Page;
    const TOTAL: TotalShape = TotalShape::PaginationTotalItems;
}

pub const SEND_PATH: &str = "/web/notifications/send";
pub const STATS_PATH: &str = "/web/notifications/stats";

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDraft {
    pub title: String,
    pub message: String,
    /// One of `admin_wire::notification::NOTIFICATION_TYPES`
    pub kind: String,
    pub recipient_type: RecipientType,
    pub target_role: Option<Role>,
    pub target_user_ids: Vec<String>,
    pub related_course_id: String,
    pub send_push: bool,
    /// `datetime-local` input value; empty sends now
    pub scheduled_at: String,
}

impl Default for NotificationDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            kind: "Info".to_string(),
            recipient_type: RecipientType::All,
            target_role: None,
            target_user_ids: Vec::new(),
            related_course_id: String::new(),
            send_push: false,
            scheduled_at: String::new(),
        }
    }
}

impl NotificationDraft {
    /// Switch recipients, dropping targets that no longer apply.
    pub fn set_recipient_type(&mut self, recipient_type: RecipientType) {
        self.recipient_type = recipient_type;
        self.target_role = None;
        self.target_user_ids.clear();
    }

    pub fn toggle_user(&mut self, user_id: &str) {
        if let Some(pos) = self.target_user_ids.iter().position(|id| id == user_id) {
            self.target_user_ids.remove(pos);
        } else {
            self.target_user_ids.push(user_id.to_string());
        }
    }
}

impl Draft for NotificationDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("title", &self.title, "Title");
        errors.require("message", &self.message, "Message");
        match self.recipient_type {
            RecipientType::Role if self.target_role.is_none() => {
                errors.add("targetRole", "Choose a role");
            }
            RecipientType::SpecificUsers if self.target_user_ids.is_empty() => {
                errors.add("targetUserIds", "Choose at least one user");
            }
            _ => {}
        }
        errors.into_result()
    }

    fn create_body(&self) -> Value {
        let target_role = match self.recipient_type {
            RecipientType::Role => self.target_role.map(Role::as_str),
            _ => None,
        };
        let target_user_ids = match self.recipient_type {
            RecipientType::SpecificUsers => Some(&self.target_user_ids),
            _ => None,
        };
        json!({
            "title": self.title.trim(),
            "message": self.message.trim(),
            "type": self.kind,
            "recipientType": self.recipient_type.as_str(),
            "targetRole": target_role,
            "targetUserIds": target_user_ids,
            "relatedCourseId": non_blank(&self.related_course_id),
            "sendPush": self.send_push,
            "scheduledAt": input_to_rfc3339(&self.scheduled_at),
        })
    }
}

pub fn send_dialog() -> FormDialog<NotificationDraft> {
    FormDialog::new(SEND_PATH)
}

pub async fn fetch_stats(backend: &dyn Backend) -> Result<NotificationStats, ApiError> {
    fetch_json(backend, ApiRequest::get(STATS_PATH)).await
}

pub fn resend_confirm(batch: &NotificationBatch) -> PendingConfirm {
    PendingConfirm::new(
        "Resend notification",
        format!("Send \"{}\" to its recipients again?", batch.title),
        "Resend",
        ApiRequest::post(
            format!("{}/{}/resend", BatchesResource::PATH, batch.id),
            json!({ "sendPush": batch.send_push }),
        ),
    )
}

/// Batch list and stats after a send or resend.
#[derive(Debug, Clone, PartialEq)]
pub struct Refreshed {
    pub batches: FetchOutcome,
    pub stats: Result<NotificationStats, ApiError>,
}

pub async fn refresh<C>(batches: C, backend: &dyn Backend) -> Refreshed
where
    C: StateCell<ListController<BatchesResource>>,
{
    let outcome = list::load(batches, backend).await;
    let stats = fetch_stats(backend).await;
    Refreshed {
        batches: outcome,
        stats,
    }
}

/// Send the open notification and re-fetch batches and stats. Nothing is re-fetched unless it was sent.
pub async fn send_and_refresh<DC, LC>(
    dialog: DC,
    batches: LC,
    backend: &dyn Backend,
) -> Result<(SubmitOutcome, Option<Refreshed>), ApiError>
where
    DC: StateCell<FormDialog<NotificationDraft>>,
    LC: StateCell<ListController<BatchesResource>>,
{
    let outcome = form::submit(dialog, backend).await?;
    let refreshed = match &outcome {
        SubmitOutcome::Saved(_) => Some(refresh(batches, backend).await),
        SubmitOutcome::Invalid(_) | SubmitOutcome::Skipped => None,
    };
    Ok((outcome, refreshed))
}
