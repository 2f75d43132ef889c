//! Users: searchable list with activate/deactivate.

use admin_wire::{Page, TotalShape, User};

use crate::backend::{fetch_page, ApiRequest, Backend};
use crate::controller::{ListFilter, PageParam, PendingConfirm, ToggleAction};
use crate::error::ApiError;

use super::Resource;

pub struct UsersResource;

impl Resource for UsersResource {
    type Item = User;
    type Filter = UserFilter;
    const PATH: &'static str = "/web/users";
    const PAGE_PARAM: PageParam = PageParam::PageNumber;
    const TOTAL: TotalShape = TotalShape::TotalCount;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub search: String,
}

impl ListFilter for UserFilter {
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request.query_opt("search", super::non_blank(&self.search))
    }
}

/// Page size used when users populate a picker.
pub const USER_OPTIONS_PAGE_SIZE: u32 = 1000;

pub const USER_ACTIVATION: ToggleAction = ToggleAction::put("/web/users", "activate", "deactivate");

/// Confirmation for flipping `user`'s active flag.
pub fn activation_confirm(user: &User) -> PendingConfirm {
    let turn_on = !user.is_active;
    let (title, verb) = if turn_on {
        ("Activate user", "activate")
    } else {
        ("Deactivate user", "deactivate")
    };
    let mut confirm = PendingConfirm::new(
        title,
        format!("Are you sure you want to {} {}?", verb, user.full_name()),
        if turn_on { "Activate" } else { "Deactivate" },
        USER_ACTIVATION.request(&user.id, turn_on),
    );
    confirm.danger = !turn_on;
    confirm
}

/// Users for pickers such as notification recipients.
pub async fn user_options(backend: &dyn Backend) -> Result<Vec<User>, ApiError> {
    let request = ApiRequest::get(UsersResource::PATH).query("pageSize", USER_OPTIONS_PAGE_SIZE);
    let page: Page<User> = fetch_page(backend, request, UsersResource::TOTAL).await?;
    Ok(page.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::controller::ListController;

    #[test]
    fn test_search_is_sent_only_when_set() {
        let mut list = ListController::<UsersResource>::new(10);
        assert_eq!(list.request().target(), "/web/users?pageNumber=1&pageSize=10");

        list.update_filter(|f| f.search = "ayşe".into());
        assert_eq!(
            list.request().target(),
            "/web/users?pageNumber=1&pageSize=10&search=ay%C5%9Fe"
        );
    }

    #[test]
    fn test_activation_confirm_targets_opposite_state() {
        let user = User {
            id: "u1".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            is_active: true,
            ..Default::default()
        };
        let confirm = activation_confirm(&user);
        assert!(confirm.danger);
        assert!(confirm.message.contains("Ada Lovelace"));
        assert_eq!(confirm.request().target(), "/web/users/u1/deactivate");
    }

    #[tokio::test]
    async fn test_user_options() {
        let backend = MockBackend::new();
        backend.push_ok(serde_json::json!({"items": [{"id": "u1", "email": "ada@example.com"}], "totalCount": 1}));
        let users = user_options(&backend).await.unwrap();
        assert_eq!(users[0].email, "ada@example.com");
        assert_eq!(backend.calls(), vec!["GET /web/users?pageSize=1000"]);
    }
}
