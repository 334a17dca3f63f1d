//! Wire types shared between the invoicer frontend and its HTTP API.
//!
//! Record identity is server-assigned: `id` is `None` while a record is
//! still a draft and `Some` once the server has persisted it. The client
//! never fabricates a permanent id.

pub mod items;
pub mod scheduling;
pub mod templates;

/// Required-field validation for form drafts.
///
/// Returns the names of required fields that are empty after trimming.
/// An empty result means the draft may be submitted.
pub trait Validate {
    fn missing_required(&self) -> Vec<&'static str>;
}
