pub mod watcher;

pub use watcher::{reload_message, CatalogWatcher};
