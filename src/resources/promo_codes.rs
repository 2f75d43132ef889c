//! Promo codes: filtered list, detail-seeded edits and an active toggle.

use serde_json::{json, Value};

use admin_wire::{DiscountType, PromoCode, PromoCodeDetail, PromoCodeUsage, TotalShape};

use crate::backend::ApiRequest;
use crate::controller::{field_toggle, Draft, ListFilter, PageParam};
use crate::error::ValidationErrors;

use super::{input_to_rfc3339, non_blank, rfc3339_to_input, Resource};

pub struct PromoCodesResource;

impl Resource for PromoCodesResource {
    type Item = PromoCode;
    type Filter = PromoFilter;
    const PATH: &'static str = "/web/promo-codes";
    const PAGE_PARAM: PageParam = PageParam::Page;
    const TOTAL: TotalShape = TotalShape::PaginationTotalItems;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromoFilter {
    pub search: String,
    pub is_active: Option<bool>,
    pub is_expired: Option<bool>,
    pub course_id: Option<String>,
}

impl ListFilter for PromoFilter {
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("search", non_blank(&self.search))
            .query_opt("isActive", self.is_active)
            .query_opt("isExpired", self.is_expired)
            .query_opt("courseId", self.course_id.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromoDraft {
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    /// Empty applies the code to every course
    pub course_id: String,
    pub max_usage_count: u32,
    pub max_usage_per_user: u32,
    pub minimum_order_amount: Option<f64>,
    pub max_discount_amount: Option<f64>,
    /// `datetime-local` input values
    pub valid_from: String,
    pub valid_to: String,
    pub is_active: bool,
    /// Read-only usage history from the detail record
    pub recent_usages: Vec<PromoCodeUsage>,
}

impl Default for PromoDraft {
    fn default() -> Self {
        Self {
            code: String::new(),
            description: String::new(),
            discount_type: DiscountType::Percentage,
            discount_value: 10.0,
            course_id: String::new(),
            max_usage_count: 0,
            max_usage_per_user: 1,
            minimum_order_amount: None,
            max_discount_amount: None,
            valid_from: String::new(),
            valid_to: String::new(),
            is_active: true,
            recent_usages: Vec::new(),
        }
    }
}

impl From<PromoCodeDetail> for PromoDraft {
    fn from(detail: PromoCodeDetail) -> Self {
        let code = detail.code;
        Self {
            code: code.code,
            description: code.description.unwrap_or_default(),
            discount_type: code.discount_type,
            discount_value: code.discount_value,
            course_id: code.course_id.unwrap_or_default(),
            max_usage_count: code.max_usage_count,
            max_usage_per_user: code.max_usage_per_user,
            minimum_order_amount: code.minimum_order_amount,
            max_discount_amount: code.max_discount_amount,
            valid_from: code.valid_from.as_deref().map(rfc3339_to_input).unwrap_or_default(),
            valid_to: code.valid_to.as_deref().map(rfc3339_to_input).unwrap_or_default(),
            is_active: code.is_active,
            recent_usages: detail.recent_usages,
        }
    }
}

impl Draft for PromoDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("code", &self.code, "Code");
        if self.discount_value == 0.0 {
            errors.add("discountValue", "Discount value is required");
        }
        errors.into_result()
    }

    fn create_body(&self) -> Value {
        json!({
            "code": self.code.trim().to_uppercase(),
            "description": non_blank(&self.description),
            "discountType": self.discount_type.as_str(),
            "discountValue": self.discount_value,
            "courseId": non_blank(&self.course_id),
            "maxUsageCount": self.max_usage_count,
            "maxUsagePerUser": self.max_usage_per_user,
            "minimumOrderAmount": self.minimum_order_amount,
            "maxDiscountAmount": self.max_discount_amount,
            "validFrom": input_to_rfc3339(&self.valid_from),
            "validTo": input_to_rfc3339(&self.valid_to),
            "isActive": self.is_active,
        })
    }
}

/// `PUT /web/promo-codes/{id} {isActive: !current}`.
pub fn active_toggle(code: &PromoCode) -> ApiRequest {
    field_toggle(PromoCodesResource::PATH, &code.id, "isActive", code.is_active)
}

/// Table text for a discount, e.g. `%15` or `49.90 TL`.
pub fn discount_label(kind: DiscountType, value: f64) -> String {
    match kind {
        DiscountType::Percentage => format!("%{}", value),
        DiscountType::FixedAmount => format!("{:.2} TL", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::controller::form::open_edit_from_detail;
    use crate::controller::{DialogMode, FormDialog};

    #[test]
    fn test_defaults_and_validation() {
        let draft = PromoDraft::default();
        assert_eq!(draft.discount_type, DiscountType::Percentage);
        assert_eq!(draft.discount_value, 10.0);
        assert_eq!(draft.max_usage_per_user, 1);
        assert!(draft.validate().unwrap_err().contains("code"));

        let zero = PromoDraft {
            code: "SPRING".into(),
            discount_value: 0.0,
            ..Default::default()
        };
        assert!(zero.validate().unwrap_err().contains("discountValue"));
    }

    #[test]
    fn test_body_dates_are_rfc3339() {
        let draft = PromoDraft {
            code: "spring25".into(),
            valid_from: "2025-04-01T00:00".into(),
            ..Default::default()
        };
        let body = draft.create_body();
        assert_eq!(body["code"], "SPRING25");
        assert_eq!(body["validFrom"], "2025-04-01T00:00:00+00:00");
        assert!(body["validTo"].is_null());
        assert!(body["courseId"].is_null());
    }

    #[tokio::test]
    async fn test_edit_seeds_from_detail_with_usages() {
        let backend = MockBackend::new();
        backend.push_ok(json!({
            "id": "p1",
            "code": "WELCOME",
            "discountType": "FixedAmount",
            "discountValue": 50.0,
            "validTo": "2025-12-31T23:59:00Z",
            "isActive": true,
            "recentUsages": [{"id": "u1", "userName": "Ada", "discountApplied": 50.0}]
        }));

        let mut dialog = FormDialog::<PromoDraft>::new(PromoCodesResource::PATH);
        open_edit_from_detail(&mut dialog, &backend, "p1", |d: PromoCodeDetail| PromoDraft::from(d))
            .await
            .unwrap();

        assert_eq!(backend.calls(), vec!["GET /web/promo-codes/p1"]);
        assert_eq!(dialog.mode(), Some(&DialogMode::Edit("p1".into())));
        let draft = dialog.draft().unwrap();
        assert_eq!(draft.discount_type, DiscountType::FixedAmount);
        assert_eq!(draft.valid_to, "2025-12-31T23:59");
        assert_eq!(draft.recent_usages.len(), 1);
        assert!(
            draft.create_body().get("recentUsages").is_none(),
            "usages are display only"
        );
    }

    #[test]
    fn test_active_toggle_and_filters() {
        let code = PromoCode {
            id: "p1".into(),
            is_active: false,
            ..Default::default()
        };
        assert_eq!(active_toggle(&code).body, Some(json!({"isActive": true})));

        let filter = PromoFilter {
            is_expired: Some(true),
            ..Default::default()
        };
        let request = filter.apply(ApiRequest::get(PromoCodesResource::PATH));
        assert_eq!(request.target(), "/web/promo-codes?isExpired=true");
    }

    #[test]
    fn test_discount_label() {
        assert_eq!(discount_label(DiscountType::Percentage, 15.0), "%15");
        assert_eq!(discount_label(DiscountType::FixedAmount, 49.9), "49.90 TL");
    }
}
