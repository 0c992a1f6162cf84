// Content resolution for the selected item
//
// Turns an item's declared `path`/`paths` into the identifiers handed to a
// content loader. Nothing here reads or executes content.

mod loader;
mod request;

pub use loader::{ContentLoader, ContentRegistry, LoadPlan};
pub use request::{RequestTracker, Ticket};

use crate::catalog::Item;
use crate::error::ResolveError;
use crate::validate::is_valid_path;
use serde::Serialize;

/// Identifiers for one item: the content file plus auxiliary resources
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub primary: String,
    pub auxiliary: Vec<String>,
    /// Auxiliary entries that were skipped
    #[serde(skip)]
    pub warnings: Vec<ResolveError>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentResolver {
    content_extension: String,
    auxiliary_extensions: Vec<String>,
}

impl Default for ContentResolver {
    fn default() -> Self {
        Self::new(".tsx", [".css"])
    }
}

impl ContentResolver {
    pub fn new<S: Into<String>>(
        content_extension: impl Into<String>,
        auxiliary_extensions: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            content_extension: content_extension.into(),
            auxiliary_extensions: auxiliary_extensions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_content_file(&self, identifier: &str) -> bool {
        identifier.ends_with(&self.content_extension)
    }

    pub fn is_auxiliary(&self, identifier: &str) -> bool {
        self.auxiliary_extensions
            .iter()
            .any(|ext| identifier.ends_with(ext.as_str()))
    }

    pub fn resolve(&self, item: &Item) -> Result<Resolution, ResolveError> {
        if let Some(path) = item.path.as_deref() {
            if !is_valid_path(path) {
                return Err(ResolveError::InvalidPath(path.to_string()));
            }
            return Ok(Resolution {
                primary: path.to_string(),
                auxiliary: Vec::new(),
                warnings: Vec::new(),
            });
        }

        let paths = match item.paths.as_deref() {
            Some(paths) if !paths.is_empty() => paths,
            _ => return Err(ResolveError::NoPathFound),
        };

        let primary = paths
            .iter()
            .find(|p| self.is_content_file(p))
            .ok_or(ResolveError::NoContentFile)?;
        if !is_valid_path(primary) {
            return Err(ResolveError::InvalidPath(primary.clone()));
        }

        let mut auxiliary = Vec::new();
        let mut warnings = Vec::new();
        for path in paths.iter().filter(|p| *p != primary) {
            if self.is_auxiliary(path) {
                if is_valid_path(path) {
                    auxiliary.push(path.clone());
                } else {
                    log::warn!("Skipping invalid auxiliary path {:?} of {}", path, item.name);
                    warnings.push(ResolveError::InvalidPath(path.clone()));
                }
            } else {
                log::debug!("Ignoring {:?} of {}: not an auxiliary resource", path, item.name);
            }
        }

        Ok(Resolution {
            primary: primary.clone(),
            auxiliary,
            warnings,
        })
    }
}
