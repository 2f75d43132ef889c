//! General limits, storage provider and the storage connection test.

use serde_json::json;

use admin_wire::{
    AwsRegion, GeneralSettings, StorageConnectionTestResult, StorageProvider, StorageSettings,
};

use crate::backend::{fetch_json, to_body, ApiRequest, Backend};
use crate::error::ApiError;

pub const GENERAL_PATH: &str = "/web/settings/general";
pub const STORAGE_PATH: &str = "/web/settings/storage";
pub const AWS_REGIONS_PATH: &str = "/web/settings/aws-regions";
pub const TEST_CONNECTION_PATH: &str = "/web/settings/storage/test-connection";

pub async fn fetch_general(backend: &dyn Backend) -> Result<GeneralSettings, ApiError> {
    fetch_json(backend, ApiRequest::get(GENERAL_PATH)).await
}

pub fn save_general(settings: &GeneralSettings) -> Result<ApiRequest, ApiError> {
    Ok(ApiRequest::put(GENERAL_PATH, to_body(settings)?))
}

pub async fn fetch_storage(backend: &dyn Backend) -> Result<StorageSettings, ApiError> {
    fetch_json(backend, ApiRequest::get(STORAGE_PATH)).await
}

pub fn save_storage(settings: &StorageSettings) -> Result<ApiRequest, ApiError> {
    Ok(ApiRequest::put(STORAGE_PATH, to_body(settings)?))
}

pub async fn fetch_aws_regions(backend: &dyn Backend) -> Result<Vec<AwsRegion>, ApiError> {
    fetch_json(backend, ApiRequest::get(AWS_REGIONS_PATH)).await
}

pub fn test_connection_request(settings: &StorageSettings) -> ApiRequest {
    ApiRequest::post(
        TEST_CONNECTION_PATH,
        json!({
            "provider": settings.provider.as_str(),
            "awsAccessKeyId": settings.aws_access_key_id,
            "awsSecretAccessKey": settings.aws_secret_access_key,
            "awsBucketName": settings.aws_bucket_name,
            "awsRegion": settings.aws_region,
        }),
    )
}

/// Turn a test-connection response into a result card; request failures are a failed test.
pub fn connection_result(
    result: Result<serde_json::Value, ApiError>,
) -> StorageConnectionTestResult {
    match result.and_then(|data| serde_json::from_value(data).map_err(ApiError::decode)) {
        Ok(result) => result,
        Err(e) => StorageConnectionTestResult {
            success: false,
            message: Some(e.user_message()),
            bucket_location: None,
        },
    }
}

pub async fn test_connection(
    backend: &dyn Backend,
    settings: &StorageSettings,
) -> StorageConnectionTestResult {
    connection_result(backend.send(test_connection_request(settings)).await)
}

/// Provider-specific fields the storage form shows.
pub fn shows_aws_fields(provider: StorageProvider) -> bool {
    provider == StorageProvider::AmazonS3
}

pub fn shows_azure_fields(provider: StorageProvider) -> bool {
    provider == StorageProvider::AzureBlob
}

/// `"12/100"` character counter when a limit is configured.
pub fn length_hint(text: &str, max: Option<u32>) -> Option<String> {
    max.filter(|m| *m > 0)
        .map(|m| format!("{}/{}", text.chars().count(), m))
}

pub fn exceeds_limit(text: &str, max: Option<u32>) -> bool {
    max.is_some_and(|m| m > 0 && text.chars().count() > m as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;

    #[tokio::test]
    async fn test_connection_success_and_failure() {
        let backend = MockBackend::new();
        backend.push_ok(json!({"success": true, "bucketLocation": "eu-central-1"}));
        backend.push_err(ApiError::Backend {
            status: 400,
            message: "Access denied".into(),
        });

        let settings = StorageSettings {
            provider: StorageProvider::AmazonS3,
            aws_bucket_name: Some("lessons".into()),
            ..Default::default()
        };

        let ok = test_connection(&backend, &settings).await;
        assert!(ok.success);
        assert_eq!(ok.bucket_location.as_deref(), Some("eu-central-1"));

        let failed = test_connection(&backend, &settings).await;
        assert!(!failed.success);
        assert_eq!(failed.message.as_deref(), Some("Access denied"));

        let sent = backend.requests()[0].body.clone().unwrap();
        assert_eq!(sent["provider"], "AmazonS3");
        assert_eq!(sent["awsBucketName"], "lessons");
    }

    #[test]
    fn test_save_requests() {
        let general = GeneralSettings {
            max_lesson_name_length: Some(120),
            ..Default::default()
        };
        let request = save_general(&general).unwrap();
        assert_eq!(request.target(), GENERAL_PATH);
        assert_eq!(request.body.unwrap()["maxLessonNameLength"], 120);

        let storage = save_storage(&StorageSettings::default()).unwrap();
        assert_eq!(storage.body.unwrap()["provider"], "Local");
    }

    #[test]
    fn test_length_hints() {
        assert_eq!(length_hint("ığü", Some(10)).as_deref(), Some("3/10"));
        assert_eq!(length_hint("abc", None), None);
        assert!(exceeds_limit("abcd", Some(3)));
        assert!(!exceeds_limit("abcd", Some(0)));
        assert!(shows_aws_fields(StorageProvider::AmazonS3));
        assert!(!shows_azure_fields(StorageProvider::Local));
    }
}
