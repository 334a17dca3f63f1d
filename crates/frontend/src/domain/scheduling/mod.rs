//! Free consultation-call scheduling with a chartered accountant.

pub mod api;
pub mod ui;

use contracts::scheduling::ConsultationRequest;

use crate::shared::collection::Identified;

impl Identified for ConsultationRequest {
    fn record_id(&self) -> Option<i64> {
        Some(self.id)
    }
}
