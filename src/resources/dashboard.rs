//! Dashboard counters.

use admin_wire::{Course, User};

use crate::backend::{fetch_page, ApiRequest, Backend};

use super::courses::CoursesResource;
use super::users::UsersResource;
use super::Resource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub users: u64,
    pub courses: u64,
}

/// User and course totals, fetched concurrently. A failed count reads as 0.
pub async fn load_counts(backend: &dyn Backend) -> DashboardCounts {
    let users = fetch_page::<User>(
        backend,
        ApiRequest::get(UsersResource::PATH).query("pageSize", 1),
        UsersResource::TOTAL,
    );
    let courses = fetch_page::<Course>(
        backend,
        ApiRequest::get(CoursesResource::PATH).query("pageSize", 1),
        CoursesResource::TOTAL,
    );
    let (users, courses) = futures::join!(users, courses);
    DashboardCounts {
        users: users.map(|p| p.total).unwrap_or(0),
        courses: courses.map(|p| p.total).unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::error::ApiError;
    use serde_json::json;

    #[tokio::test]
    async fn test_counts_with_one_failure() {
        let backend = MockBackend::new();
        backend.push_ok(json!({"items": [{"id": "u1"}], "totalCount": 37}));
        backend.push_err(ApiError::Network("timeout".into()));

        let counts = load_counts(&backend).await;

        assert_eq!(
            backend.calls(),
            vec!["GET /web/users?pageSize=1", "GET /web/courses?pageSize=1"]
        );
        assert_eq!(counts, DashboardCounts { users: 37, courses: 0 });
    }
}
