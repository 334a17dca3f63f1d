//! Catalog items reusable across invoices (the "item library").

use serde::{Deserialize, Serialize};

use crate::Validate;

/// A reusable invoice line item.
///
/// The same shape serves as the form draft (`id: None`) and as the
/// persisted record returned by the server (`id: Some`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub description: String,
    /// HSN (goods) or SAC (services) classification code.
    #[serde(default)]
    pub hsn_sac_code: String,
    #[serde(default)]
    pub gst_rate: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for CatalogItem {
    fn default() -> Self {
        Self {
            id: None,
            description: String::new(),
            hsn_sac_code: String::new(),
            gst_rate: 0.0,
            unit: String::new(),
            is_active: true,
        }
    }
}

impl Validate for CatalogItem {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_description_is_the_only_violation() {
        let item = CatalogItem {
            hsn_sac_code: "9983".to_string(),
            gst_rate: 18.0,
            unit: "hour".to_string(),
            ..CatalogItem::default()
        };
        assert_eq!(item.missing_required(), vec!["description"]);
    }

    #[test]
    fn whitespace_description_counts_as_missing() {
        let item = CatalogItem {
            description: "   ".to_string(),
            ..CatalogItem::default()
        };
        assert_eq!(item.missing_required(), vec!["description"]);
    }

    #[test]
    fn filled_item_passes_validation() {
        let item = CatalogItem {
            description: "Bookkeeping services".to_string(),
            ..CatalogItem::default()
        };
        assert!(item.missing_required().is_empty());
    }

    #[test]
    fn server_record_without_optional_fields_deserializes() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"id": 12, "description": "GST filing"}"#).unwrap();
        assert_eq!(item.id, Some(12));
        assert!(item.is_active, "active flag defaults to true");
        assert_eq!(item.gst_rate, 0.0);
    }

    #[test]
    fn draft_serializes_without_id() {
        let json = serde_json::to_value(CatalogItem::default()).unwrap();
        assert!(json.get("id").is_none());
    }
}
