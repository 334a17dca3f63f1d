mod editor;
mod list;

pub use list::TemplatesPage;
