//! Invoice document templates (metadata plus an uploaded file reference).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Validate;

/// A document template registered with the server.
///
/// `file_name` is set once a file has been uploaded for the template.
/// Default uniqueness is a server invariant; `is_default` here is
/// informational until the next list fetch confirms it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl Default for DocumentTemplate {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: None,
            file_name: None,
            is_default: false,
            uploaded_at: None,
        }
    }
}

impl DocumentTemplate {
    /// Payload for the "make default" update: same record with the
    /// default flag raised. The list is refetched afterwards, so the
    /// client never asserts uniqueness on its own.
    pub fn as_default(&self) -> Self {
        Self {
            is_default: true,
            ..self.clone()
        }
    }
}

impl Validate for DocumentTemplate {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        missing
    }
}

/// Response of the multipart upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        assert_eq!(DocumentTemplate::default().missing_required(), vec!["name"]);
    }

    #[test]
    fn as_default_only_touches_the_flag() {
        let template: DocumentTemplate = serde_json::from_str(
            r#"{"id": 7, "name": "GST invoice", "file_name": "gst.pdf"}"#,
        )
        .unwrap();
        assert!(!template.is_default);

        let payload = template.as_default();
        assert!(payload.is_default);
        assert_eq!(payload.id, Some(7));
        assert_eq!(payload.name, template.name);
        assert_eq!(payload.file_name, template.file_name);
    }

    #[test]
    fn default_flag_defaults_to_false_on_deserialize() {
        let template: DocumentTemplate =
            serde_json::from_str(r#"{"id": 3, "name": "Plain"}"#).unwrap();
        assert!(!template.is_default);
        assert!(template.file_name.is_none());
    }
}
