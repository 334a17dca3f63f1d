//! Consultation-call scheduling with a chartered accountant (CA).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Validate;

/// Eligibility predicate for the free-consultation promo.
///
/// Computed server-side; the client only reflects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstInvoiceCheck {
    pub is_first_invoice: bool,
    #[serde(default)]
    pub total_invoices: u32,
    pub has_ca_booking: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotInfo {
    pub date: String,
    pub time: String,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaInfo {
    pub name: String,
    #[serde(default)]
    pub qualification: Option<String>,
    #[serde(default)]
    pub experience_years: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableSlots {
    pub slots: Vec<SlotInfo>,
    pub timezone: String,
    pub ca_info: CaInfo,
}

/// Form draft for booking a consultation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRequestDto {
    pub contact_name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Validate for ConsultationRequestDto {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.contact_name.trim().is_empty() {
            missing.push("contact_name");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        missing
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub id: i64,
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub ca_details: Option<CaInfo>,
}

/// A persisted consultation request, as returned by `my-requests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRequest {
    pub id: i64,
    pub contact_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub preferred_date: Option<String>,
    #[serde(default)]
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_name_and_phone_are_required() {
        let dto = ConsultationRequestDto::default();
        assert_eq!(dto.missing_required(), vec!["contact_name", "phone"]);
    }

    #[test]
    fn trimming_applies_to_required_fields() {
        let dto = ConsultationRequestDto {
            contact_name: " \t".to_string(),
            phone: "9876543210".to_string(),
            ..ConsultationRequestDto::default()
        };
        assert_eq!(dto.missing_required(), vec!["contact_name"]);
    }

    #[test]
    fn complete_draft_passes() {
        let dto = ConsultationRequestDto {
            contact_name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            preferred_date: Some("2026-09-02".to_string()),
            preferred_time: Some("11:00".to_string()),
            ..ConsultationRequestDto::default()
        };
        assert!(dto.missing_required().is_empty());
    }

    #[test]
    fn first_invoice_check_parses_server_shape() {
        let check: FirstInvoiceCheck = serde_json::from_str(
            r#"{"is_first_invoice": true, "total_invoices": 1, "has_ca_booking": false}"#,
        )
        .unwrap();
        assert!(check.is_first_invoice);
        assert_eq!(check.total_invoices, 1);
        assert!(!check.has_ca_booking);
    }

    #[test]
    fn schedule_response_tolerates_missing_ca_details() {
        let resp: ScheduleResponse = serde_json::from_str(
            r#"{"id": 41, "status": "pending", "message": "Call scheduled"}"#,
        )
        .unwrap();
        assert_eq!(resp.id, 41);
        assert!(resp.ca_details.is_none());
    }
}
