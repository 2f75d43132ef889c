//! Response envelope and page decoding.
//!
//! Every backend response is wrapped in the same envelope. Paginated lists
//! put their total count in one of two places depending on the endpoint,
//! and a few lists are returned as a bare array.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard response wrapper returned by every `/web/*` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// Explicit failure flag; absent on older endpoints
    #[serde(default)]
    pub success: Option<bool>,

    /// Human-readable message (error text on failure)
    #[serde(default)]
    pub message: Option<String>,

    /// Payload
    #[serde(default)]
    pub data: Option<Value>,

    /// Field-level error strings on validation failures
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

impl ApiResponse {
    /// True unless the backend explicitly reported `success: false`.
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true)
    }

    /// Best message to show for a failed response.
    pub fn error_text(&self) -> Option<String> {
        if let Some(message) = self.message.as_ref().filter(|m| !m.trim().is_empty()) {
            return Some(message.clone());
        }
        self.errors
            .as_ref()
            .filter(|errors| !errors.is_empty())
            .map(|errors| errors.join("; "))
    }
}

/// Where an endpoint reports the total number of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalShape {
    /// `{ items, pagination: { totalItems } }`
    PaginationTotalItems,
    /// `{ items, totalCount }`
    TotalCount,
    /// `T[]` with no pagination at all
    PlainArray,
}

/// One page of a server-driven list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode the `data` member of a list response.
    ///
    /// The declared total location is read first and the other one is used
    /// as a fallback. A missing total is 0 and missing items are an empty page.
    pub fn from_data(data: Value, shape: TotalShape) -> Result<Self, serde_json::Error> {
        match data {
            Value::Null => Ok(Self::default()),
            Value::Array(_) => {
                let items: Vec<T> = serde_json::from_value(data)?;
                let total = items.len() as u64;
                Ok(Self { items, total })
            }
            Value::Object(mut map) => {
                let items = match map.remove("items") {
                    Some(Value::Null) | None => Vec::new(),
                    Some(items) => serde_json::from_value(items)?,
                };

                let pagination_total = map
                    .get("pagination")
                    .and_then(|p| p.get("totalItems"))
                    .and_then(Value::as_u64);
                let count_total = map.get("totalCount").and_then(Value::as_u64);

                let total = match shape {
                    TotalShape::PaginationTotalItems => pagination_total.or(count_total),
                    TotalShape::TotalCount => count_total.or(pagination_total),
                    TotalShape::PlainArray => None,
                }
                .unwrap_or(match shape {
                    TotalShape::PlainArray => items.len() as u64,
                    _ => 0,
                });

                Ok(Self { items, total })
            }
            other => Err(serde::de::Error::custom(format!(
                "expected a list payload, got {}",
                other
            ))),
        }
    }
}

/// `{ id }` returned by create endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedId {
    #[serde(default)]
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: String,
    }

    #[test]
    fn test_pagination_total_items() {
        let data = json!({
            "items": [{"id": "a"}, {"id": "b"}],
            "pagination": {"totalItems": 45}
        });
        let page: Page<Row> = Page::from_data(data, TotalShape::PaginationTotalItems).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 45);
    }

    #[test]
    fn test_total_count_falls_back_to_pagination() {
        let data = json!({
            "items": [{"id": "a"}],
            "pagination": {"totalItems": 45}
        });
        let page: Page<Row> = Page::from_data(data, TotalShape::TotalCount).unwrap();
        assert_eq!(page.total, 45, "totalCount endpoints still honour pagination.totalItems");
    }

    #[test]
    fn test_declared_location_wins() {
        let data = json!({
            "items": [],
            "totalCount": 7,
            "pagination": {"totalItems": 9}
        });
        let by_count: Page<Row> = Page::from_data(data.clone(), TotalShape::TotalCount).unwrap();
        let by_pagination: Page<Row> =
            Page::from_data(data, TotalShape::PaginationTotalItems).unwrap();
        assert_eq!(by_count.total, 7);
        assert_eq!(by_pagination.total, 9);
    }

    #[test]
    fn test_missing_total_and_items_default() {
        let page: Page<Row> = Page::from_data(json!({}), TotalShape::PaginationTotalItems).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);

        let page: Page<Row> = Page::from_data(Value::Null, TotalShape::TotalCount).unwrap();
        assert_eq!(page, Page::default());
    }

    #[test]
    fn test_plain_array() {
        let data = json!([{"id": "a"}, {"id": "b"}, {"id": "c"}]);
        let page: Page<Row> = Page::from_data(data, TotalShape::PlainArray).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items[2], Row { id: "c".into() });
    }

    #[test]
    fn test_scalar_payload_is_an_error() {
        let result: Result<Page<Row>, _> = Page::from_data(json!(12), TotalShape::TotalCount);
        assert!(result.is_err());
    }

    #[test]
    fn test_error_text_prefers_message() {
        let resp: ApiResponse = serde_json::from_value(json!({
            "success": false,
            "message": "Code already exists",
            "errors": ["code: duplicate"]
        }))
        .unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.error_text().as_deref(), Some("Code already exists"));

        let resp: ApiResponse = serde_json::from_value(json!({
            "errors": ["title is required", "slug is taken"]
        }))
        .unwrap();
        assert!(resp.is_success());
        assert_eq!(
            resp.error_text().as_deref(),
            Some("title is required; slug is taken")
        );
    }
}
