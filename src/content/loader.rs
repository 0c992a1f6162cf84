// Content loader boundary and the static identifier registry

use super::{ContentResolver, Resolution};
use crate::catalog::Catalog;
use crate::error::RegistryError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Where the loader will find each resolved resource
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadPlan {
    pub primary: PathBuf,
    pub auxiliary: Vec<PathBuf>,
}

/// Maps resolved identifiers to loadable content.
///
/// Implementations decide how content is found; this crate only ever hands
/// over validated identifiers.
pub trait ContentLoader {
    /// Name of this loader (for logging)
    fn name(&self) -> &str;

    /// Check whether this loader knows the identifier
    fn can_load(&self, identifier: &str) -> bool;

    /// Locate the resources for a resolution
    fn plan(&self, resolution: &Resolution) -> Result<LoadPlan, RegistryError>;
}

/// Enumerable registry of every identifier the catalog declares
#[derive(Clone, Debug, Default)]
pub struct ContentRegistry {
    root: PathBuf,
    entries: BTreeMap<String, PathBuf>,
}

impl ContentRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Register the content file and auxiliary resources of every resolvable item
    pub fn from_catalog(catalog: &Catalog, root: impl Into<PathBuf>, resolver: &ContentResolver) -> Self {
        let mut registry = Self::new(root);
        for (category, item) in catalog.items_iter() {
            match resolver.resolve(item) {
                Ok(resolution) => {
                    registry.register(&resolution.primary);
                    for aux in &resolution.auxiliary {
                        registry.register(aux);
                    }
                }
                Err(e) => log::warn!("Not registering {} in {}: {}", item.name, category, e),
            }
        }
        log::debug!("Registered {} content identifiers", registry.len());
        registry
    }

    pub fn register(&mut self, identifier: &str) {
        let relative = identifier.strip_prefix("./").unwrap_or(identifier);
        let location = self.root.join(relative);
        self.entries.insert(identifier.to_string(), location);
    }

    pub fn location(&self, identifier: &str) -> Option<&Path> {
        self.entries.get(identifier).map(PathBuf::as_path)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContentLoader for ContentRegistry {
    fn name(&self) -> &str {
        "static-registry"
    }

    fn can_load(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    fn plan(&self, resolution: &Resolution) -> Result<LoadPlan, RegistryError> {
        let primary = self
            .location(&resolution.primary)
            .ok_or_else(|| RegistryError::NotRegistered(resolution.primary.clone()))?
            .to_path_buf();

        let auxiliary = resolution
            .auxiliary
            .iter()
            .filter_map(|aux| match self.location(aux) {
                Some(location) => Some(location.to_path_buf()),
                None => {
                    log::warn!("Auxiliary resource {} is not registered, skipping", aux);
                    None
                }
            })
            .collect();

        Ok(LoadPlan { primary, auxiliary })
    }
}
