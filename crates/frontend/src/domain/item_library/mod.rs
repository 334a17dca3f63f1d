//! Item library: catalog items reusable across invoices.

pub mod api;
pub mod ui;

use contracts::items::CatalogItem;

use crate::shared::collection::Identified;

impl Identified for CatalogItem {
    fn record_id(&self) -> Option<i64> {
        self.id
    }
}
