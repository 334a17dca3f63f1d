pub mod api_client;
pub mod collection;
pub mod confirm;
pub mod draft;
pub mod eligibility;
pub mod modal_stack;
pub mod toast;
