//! Invoice document templates: metadata CRUD plus PDF upload.

pub mod api;
pub mod ui;

use contracts::templates::DocumentTemplate;

use crate::shared::collection::Identified;

impl Identified for DocumentTemplate {
    fn record_id(&self) -> Option<i64> {
        self.id
    }
}
