//! System settings: general limits and media storage.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StorageProvider {
    #[default]
    Local,
    AmazonS3,
    AzureBlob,
}

impl StorageProvider {
    pub const ALL: [StorageProvider; 3] = [
        StorageProvider::Local,
        StorageProvider::AmazonS3,
        StorageProvider::AzureBlob,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StorageProvider::Local => "Local",
            StorageProvider::AmazonS3 => "AmazonS3",
            StorageProvider::AzureBlob => "AzureBlob",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageSettings {
    pub provider: StorageProvider,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_bucket_name: Option<String>,
    pub aws_region: Option<String>,
    pub cdn_base_url: Option<String>,
    pub azure_connection_string: Option<String>,
    pub azure_container_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AwsRegion {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConnectionTestResult {
    pub success: bool,
    pub message: Option<String>,
    pub bucket_location: Option<String>,
}

/// Content limits applied by the backend. `None` means unlimited.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralSettings {
    pub max_lesson_name_length: Option<u32>,
    pub max_course_name_length: Option<u32>,
    pub max_video_duration: Option<u32>,
    pub max_document_size: Option<u64>,
    pub max_description_length: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_limits_are_unlimited() {
        let settings: GeneralSettings = serde_json::from_value(serde_json::json!({
            "maxLessonNameLength": 120,
            "maxCourseNameLength": null
        }))
        .unwrap();
        assert_eq!(settings.max_lesson_name_length, Some(120));
        assert_eq!(settings.max_course_name_length, None);
    }
}
