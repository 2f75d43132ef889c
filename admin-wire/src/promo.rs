//! Promo codes and their usage records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiscountType {
    #[default]
    Percentage,
    FixedAmount,
}

impl DiscountType {
    pub fn as_str(self) -> &'static str {
        match self {
            DiscountType::Percentage => "Percentage",
            DiscountType::FixedAmount => "FixedAmount",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Percentage" => Some(DiscountType::Percentage),
            "FixedAmount" => Some(DiscountType::FixedAmount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PromoCode {
    pub id: String,
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub course_id: Option<String>,
    pub course_title: Option<String>,
    pub max_usage_count: u32,
    pub usage_count: u32,
    pub max_usage_per_user: u32,
    pub minimum_order_amount: Option<f64>,
    pub max_discount_amount: Option<f64>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub is_valid: Option<bool>,
    pub remaining_usage: Option<u32>,
    pub usage_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PromoCodeUsage {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub order_id: Option<String>,
    pub discount_applied: f64,
    pub used_at: String,
}

/// Detail view of a promo code, including its most recent redemptions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PromoCodeDetail {
    #[serde(flatten)]
    pub code: PromoCode,
    pub recent_usages: Vec<PromoCodeUsage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_flattens_code() {
        let detail: PromoCodeDetail = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "code": "SPRING",
            "discountType": "FixedAmount",
            "discountValue": 25.0,
            "recentUsages": [
                {"id": "u1", "userName": "Ada", "discountApplied": 25.0, "usedAt": "2024-03-01T10:00:00Z"}
            ]
        }))
        .unwrap();
        assert_eq!(detail.code.code, "SPRING");
        assert_eq!(detail.code.discount_type, DiscountType::FixedAmount);
        assert_eq!(detail.recent_usages.len(), 1);
    }
}
