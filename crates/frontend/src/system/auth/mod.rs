//! Session credential access.
//!
//! Token issuance and refresh live entirely server-side / in the login
//! flow that owns localStorage; this module only reads the current
//! token on demand for the transport layer.

pub mod storage;

use crate::shared::api_client::TokenProvider;

/// Token provider backed by browser localStorage.
#[derive(Clone, Copy, Default)]
pub struct StorageTokens;

impl TokenProvider for StorageTokens {
    fn token(&self) -> Option<String> {
        storage::get_access_token()
    }
}
