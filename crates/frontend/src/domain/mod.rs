pub mod item_library;
pub mod scheduling;
pub mod templates;
