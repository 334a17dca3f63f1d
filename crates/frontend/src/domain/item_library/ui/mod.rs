mod editor;
mod list;

pub use list::ItemLibraryPage;
