use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

/// Body of bulk-delete and bulk-restore.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkDocumentIds {
    #[validate(length(min = 1, message = "documentIds must be a non-empty array"))]
    pub document_ids: Vec<String>,
}

/// Body of `POST /api/documents/:id/share`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareDocumentRequest {
    #[validate(length(min = 1, message = "userIds must be a non-empty array"))]
    pub user_ids: Vec<String>,
    pub message: Option<String>,
}

/// Body of `POST /api/documents/share`, where the document is named in the
/// payload instead of the path.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    #[validate(length(min = 1, message = "documentId is required"))]
    pub document_id: String,
    #[validate(length(min = 1, message = "userIds must be a non-empty array"))]
    pub user_ids: Vec<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFileMetadata {
    pub id: String,
    #[serde(alias = "originalName", alias = "fileName")]
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", alias = "mimeType", default)]
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(
        default,
        alias = "createdAt",
        alias = "uploadedAt",
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub upload_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_group_id: Option<String>,
}

impl DocumentFileMetadata {
    /// Point the file at the gateway's own download route unless the backend
    /// already supplied a link.
    pub fn with_download_url(mut self, document_id: &str) -> Self {
        if self.download_url.is_none() {
            self.download_url = Some(format!(
                "/api/documents/{}/files/{}/download",
                urlencoding::encode(document_id),
                urlencoding::encode(&self.id)
            ));
        }
        self
    }
}

/// RFC 3339 strings or epoch milliseconds; anything else reads as absent.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    })
}

/// The file listing may arrive as a bare array or wrapped as `{files: [...]}`.
pub fn file_list(data: Value) -> Result<Vec<DocumentFileMetadata>, serde_json::Error> {
    match data {
        Value::Object(mut map) if map.contains_key("files") => {
            serde_json::from_value(map.remove("files").unwrap_or(Value::Null))
        }
        Value::Null => Ok(Vec::new()),
        other => serde_json::from_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn backend_file_fields_are_renamed() {
        let files = file_list(json!({
            "files": [{
                "id": "f1",
                "originalName": "contract.pdf",
                "size": 1024,
                "mimeType": "application/pdf",
                "isPrimary": true,
                "createdAt": "2024-03-01T10:00:00Z",
                "versionGroupId": "g1"
            }]
        }))
        .unwrap();

        let file = files[0].clone().with_download_url("doc 1");
        let rendered = serde_json::to_value(&file).unwrap();
        assert_eq!(rendered["name"], "contract.pdf");
        assert_eq!(rendered["type"], "application/pdf");
        assert_eq!(rendered["isPrimary"], true);
        assert_eq!(rendered["uploadDate"], "2024-03-01T10:00:00Z");
        assert_eq!(rendered["downloadUrl"], "/api/documents/doc%201/files/f1/download");
        assert!(rendered.get("checksum").is_none());
    }

    #[test]
    fn unreadable_dates_are_dropped() {
        let files = file_list(json!([
            { "id": "f1", "name": "a.txt", "uploadDate": "yesterday" },
            { "id": "f2", "name": "b.txt", "uploadDate": 1709287200000i64 }
        ]))
        .unwrap();
        assert!(files[0].upload_date.is_none());
        assert!(files[1].upload_date.is_some());
    }

    #[test]
    fn backend_download_url_is_kept() {
        let file: DocumentFileMetadata = serde_json::from_value(json!({
            "id": "f1", "name": "a.txt", "downloadUrl": "https://cdn/a.txt"
        }))
        .unwrap();
        assert_eq!(
            file.with_download_url("d1").download_url.as_deref(),
            Some("https://cdn/a.txt")
        );
    }
}
