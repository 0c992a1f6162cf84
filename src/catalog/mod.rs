// Catalog snapshot: category path -> items, as handed over by the catalog provider
mod loader;
mod path;

pub use loader::{load_catalog, parse_catalog};
pub use path::CategoryPath;

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// A leaf catalog entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Auxiliary resources first, content file last
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<String>>,
}

impl Item {
    pub fn with_path(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: Some(path.into()),
            paths: None,
        }
    }

    pub fn with_paths<S: Into<String>>(name: impl Into<String>, paths: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            path: None,
            paths: Some(paths.into_iter().map(Into::into).collect()),
        }
    }

    /// Identifier used to mark this item as selected: `path`, else the last of `paths`
    pub fn identifier(&self) -> Option<&str> {
        self.path
            .as_deref()
            .or_else(|| self.paths.as_ref().and_then(|p| p.last()).map(String::as_str))
    }

    /// Whether `identifier` names this item's `path` or any of its `paths`
    pub fn owns(&self, identifier: &str) -> bool {
        self.path.as_deref() == Some(identifier)
            || self
                .paths
                .as_ref()
                .is_some_and(|paths| paths.iter().any(|p| p == identifier))
    }
}

/// Immutable catalog mapping; entry order is the document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    name: String,
    entries: Vec<(CategoryPath, Vec<Item>)>,
}

impl Catalog {
    pub fn new(name: impl Into<String>, entries: Vec<(CategoryPath, Vec<Item>)>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Build from raw string keys, validating each category path
    pub fn from_pairs<'a, I>(name: impl Into<String>, pairs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (&'a str, Vec<Item>)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(raw, items)| CategoryPath::parse(raw).map(|path| (path, items)))
            .collect::<Result<Vec<_>, CatalogError>>()?;
        Ok(Self::new(name, entries))
    }

    /// Top-level catalog key this snapshot was read from
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[(CategoryPath, Vec<Item>)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn items(&self, path: &str) -> Option<&[Item]> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_str() == path)
            .map(|(_, items)| items.as_slice())
    }

    /// First category (in document order) holding an item that owns `identifier`
    pub fn find_item(&self, identifier: &str) -> Option<(&CategoryPath, &Item)> {
        self.entries.iter().find_map(|(path, items)| {
            items
                .iter()
                .find(|item| item.owns(identifier))
                .map(|item| (path, item))
        })
    }

    pub fn find_category_for_item(&self, identifier: &str) -> Option<&CategoryPath> {
        self.find_item(identifier).map(|(path, _)| path)
    }

    pub fn items_iter(&self) -> impl Iterator<Item = (&CategoryPath, &Item)> {
        self.entries
            .iter()
            .flat_map(|(path, items)| items.iter().map(move |item| (path, item)))
    }
}
