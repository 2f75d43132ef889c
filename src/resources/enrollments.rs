//! Enrollments: filtered list, create-only dialog and activation.

use serde_json::{json, Value};

use admin_wire::{Course, Enrollment, Page, TotalShape, User};

use crate::backend::{fetch_page, ApiRequest, Backend};
use crate::controller::{Draft, ListFilter, PageParam, PendingConfirm, ToggleAction};
use crate::error::{ApiError, ValidationErrors};

use super::courses::CoursesResource;
use super::users::UsersResource;
use super::{input_to_rfc3339, non_blank, Resource};

pub struct EnrollmentsResource;

impl Resource for EnrollmentsResource {
    type Item = Enrollment;
    type Filter = EnrollmentFilter;
    const PATH: &'static str = "/web/enrollments";
    const PAGE_PARAM: PageParam = PageParam::PageNumber;
    const TOTAL: TotalShape = TotalShape::PaginationTotalItems;
}

pub const ENROLLMENT_ACTIVATION: ToggleAction =
    ToggleAction::put("/web/enrollments", "activate", "deactivate");

/// Page size for the dialog's user and course pickers.
pub const REFERENCE_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrollmentFilter {
    pub search: String,
    pub course_id: Option<String>,
    pub is_active: Option<bool>,
    pub is_completed: Option<bool>,
}

impl ListFilter for EnrollmentFilter {
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("search", non_blank(&self.search))
            .query_opt("courseId", self.course_id.as_deref())
            .query_opt("isActive", self.is_active)
            .query_opt("isCompleted", self.is_completed)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrollmentDraft {
    pub user_id: String,
    pub course_id: String,
    /// `datetime-local` input value
    pub expires_at: String,
}

impl Draft for EnrollmentDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("userId", &self.user_id, "User");
        errors.require("courseId", &self.course_id, "Course");
        errors.into_result()
    }

    fn create_body(&self) -> Value {
        json!({
            "userId": self.user_id,
            "courseId": self.course_id,
            "expiresAt": input_to_rfc3339(&self.expires_at),
        })
    }
}

/// Users and courses offered by the create dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrollmentChoices {
    pub users: Vec<User>,
    pub courses: Vec<Course>,
}

/// Fetch both pickers concurrently; they do not depend on each other.
pub async fn enrollment_choices(backend: &dyn Backend) -> Result<EnrollmentChoices, ApiError> {
    let courses = fetch_page::<Course>(
        backend,
        ApiRequest::get(CoursesResource::PATH).query("pageSize", REFERENCE_PAGE_SIZE),
        CoursesResource::TOTAL,
    );
    let users = fetch_page::<User>(
        backend,
        ApiRequest::get(UsersResource::PATH).query("pageSize", REFERENCE_PAGE_SIZE),
        UsersResource::TOTAL,
    );
    let (courses, users): (Page<Course>, Page<User>) = futures::try_join!(courses, users)?;
    Ok(EnrollmentChoices {
        users: users.items,
        courses: courses.items,
    })
}

pub fn activation_confirm(enrollment: &Enrollment) -> PendingConfirm {
    let turn_on = !enrollment.is_active;
    let verb = if turn_on { "activate" } else { "deactivate" };
    let mut confirm = PendingConfirm::new(
        if turn_on { "Activate enrollment" } else { "Deactivate enrollment" },
        format!(
            "Are you sure you want to {} the enrollment of {} in \"{}\"?",
            verb, enrollment.user_name, enrollment.course_title
        ),
        if turn_on { "Activate" } else { "Deactivate" },
        ENROLLMENT_ACTIVATION.request(&enrollment.id, turn_on),
    );
    confirm.danger = !turn_on;
    confirm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::controller::ListController;

    #[test]
    fn test_filters_omit_unset_values() {
        let mut list = ListController::<EnrollmentsResource>::new(10);
        list.update_filter(|f| {
            f.is_active = Some(false);
            f.course_id = Some("c1".into());
        });
        assert_eq!(
            list.request().target(),
            "/web/enrollments?pageNumber=1&pageSize=10&courseId=c1&isActive=false"
        );
    }

    #[tokio::test]
    async fn test_choices_issue_both_lookups() {
        let backend = MockBackend::new();
        backend.push_ok(json!({"items": [{"id": "c1", "title": "Rust"}], "totalCount": 1}));
        backend.push_ok(json!({"items": [{"id": "u1", "email": "a@b.test"}], "totalCount": 1}));

        let choices = enrollment_choices(&backend).await.unwrap();

        assert_eq!(
            backend.calls(),
            vec!["GET /web/courses?pageSize=1000", "GET /web/users?pageSize=1000"]
        );
        assert_eq!(choices.courses[0].id, "c1");
        assert_eq!(choices.users[0].id, "u1");
    }

    #[test]
    fn test_create_body_dates() {
        let draft = EnrollmentDraft {
            user_id: "u1".into(),
            course_id: "c1".into(),
            expires_at: "2026-01-31T23:59".into(),
        };
        assert!(draft.validate().is_ok());
        assert_eq!(draft.create_body()["expiresAt"], "2026-01-31T23:59:00+00:00");

        let open_ended = EnrollmentDraft {
            expires_at: String::new(),
            ..draft
        };
        assert!(open_ended.create_body()["expiresAt"].is_null());
    }

    #[test]
    fn test_activation_confirm() {
        let enrollment = Enrollment {
            id: "e1".into(),
            is_active: false,
            ..Default::default()
        };
        let confirm = activation_confirm(&enrollment);
        assert_eq!(confirm.request().target(), "/web/enrollments/e1/activate");
        assert!(!confirm.danger);
    }
}
