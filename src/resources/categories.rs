//! Categories: an unpaged list.

use serde_json::{json, Value};

use admin_wire::{Category, TotalShape};

use crate::controller::{Draft, PageParam};
use crate::error::ValidationErrors;

use super::{non_blank, Resource};

pub struct CategoriesResource;

impl Resource for CategoriesResource {
    type Item = Category;
    type Filter = ();
    const PATH: &'static str = "/web/categories";
    const PAGE_PARAM: PageParam = PageParam::Unpaged;
    const TOTAL: TotalShape = TotalShape::PlainArray;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub icon_url: String,
    pub display_order: i32,
    pub is_active: bool,
}

impl Default for CategoryDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            icon_url: String::new(),
            display_order: 0,
            is_active: true,
        }
    }
}

impl From<&Category> for CategoryDraft {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
            icon_url: category.icon_url.clone().unwrap_or_default(),
            display_order: category.display_order,
            is_active: category.is_active,
        }
    }
}

impl Draft for CategoryDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name, "Name");
        errors.into_result()
    }

    fn create_body(&self) -> Value {
        json!({
            "name": self.name.trim(),
            "description": non_blank(&self.description),
            "iconUrl": non_blank(&self.icon_url),
            "displayOrder": self.display_order,
            "isActive": self.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::controller::ListController;

    #[tokio::test]
    async fn test_unpaged_plain_array() {
        let backend = MockBackend::new();
        backend.push_ok(json!([{"id": "a", "name": "Web"}, {"id": "b", "name": "Data"}]));

        let mut list = ListController::<CategoriesResource>::new(10);
        crate::controller::list::load(&mut list, &backend).await;

        assert_eq!(backend.calls(), vec!["GET /web/categories"]);
        assert_eq!(list.total(), 2);
        assert_eq!(list.items()[1].name, "Data");
    }

    #[test]
    fn test_new_category_is_active() {
        assert!(CategoryDraft::default().is_active);
        assert!(CategoryDraft::default().validate().is_err());
    }
}
