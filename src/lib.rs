// Navigation core of the snippet playground: catalog tree, expansion state,
// selection sync and content resolution.

pub mod app;
pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod expansion;
pub mod io;
pub mod message;
pub mod outline;
pub mod selection;
pub mod tree;
pub mod validate;

pub use app::Playground;
pub use catalog::{Catalog, CategoryPath, Item};
pub use config::Config;
pub use content::{ContentLoader, ContentRegistry, ContentResolver, Resolution};
pub use error::{CatalogError, ConfigError, RegistryError, ResolveError};
pub use expansion::{ExpansionMachine, ExpansionPolicy, ExpansionState};
pub use selection::{ItemActivated, SelectionCoordinator, SelectionOutcome};
pub use tree::{build_tree, CategoryNode, CategoryTree};
pub use validate::is_valid_path;
