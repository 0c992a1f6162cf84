use crate::catalog::{Catalog, Item};
use crate::config::Config;
use crate::content::{ContentLoader, ContentRegistry, ContentResolver, RequestTracker};
use crate::message::{Message, Output};
use crate::outline::{visible_rows, Row};
use crate::selection::SelectionCoordinator;
use crate::validate::is_valid_path;
use std::path::PathBuf;
use std::sync::Arc;

/// Navigation plus content pane, driven by explicit messages
pub struct Playground {
    pub coordinator: SelectionCoordinator,
    resolver: ContentResolver,
    registry: ContentRegistry,
    requests: RequestTracker,
    examples_root: PathBuf,
    initial_selection: Option<String>,
}

impl Playground {
    pub fn new(catalog: Arc<Catalog>, config: &Config) -> (Self, Vec<Output>) {
        let resolver = config.content.resolver();
        let initial_selection = config
            .session
            .initial_selection
            .clone()
            .filter(|id| !id.is_empty());
        let examples_root = config.catalog.examples_root.clone();

        let mut app = Self {
            coordinator: SelectionCoordinator::new(
                Arc::clone(&catalog),
                config.navigation.policy(),
                initial_selection.clone(),
            ),
            registry: ContentRegistry::default(),
            resolver,
            requests: RequestTracker::new(),
            examples_root,
            initial_selection,
        };
        app.rebuild_registry();

        let outputs = match app.initial_selection.clone() {
            Some(identifier) => {
                let item = app.item_for(&identifier);
                app.request_content(&item)
            }
            None => Vec::new(),
        };
        (app, outputs)
    }

    pub fn update(&mut self, message: Message) -> Vec<Output> {
        match message {
            Message::ToggleCategory(path) => {
                self.coordinator.toggle_category(&path);
                Vec::new()
            }
            Message::ActivateItem(identifier) => self.activate_item(&identifier),
            Message::ExternalSelection(identifier) => self.external_selection(identifier),
            Message::CatalogReloaded(result) => self.catalog_reloaded(result),
            Message::ContentLoaded { ticket, result } => {
                if !self.requests.is_current(ticket) {
                    log::debug!("Dropping stale content result {:?}", ticket);
                    return Vec::new();
                }
                match result {
                    Ok(()) => vec![Output::ContentReady(ticket)],
                    Err(reason) => vec![Output::LoadFailed {
                        identifier: self.requests.current().map(|(_, id)| id.to_string()),
                        reason,
                    }],
                }
            }
        }
    }

    /// Currently visible navigation rows
    pub fn rows(&self) -> Vec<Row> {
        visible_rows(self.coordinator.tree().roots(), self.coordinator.machine())
    }

    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    fn activate_item(&mut self, identifier: &str) -> Vec<Output> {
        let Some(activated) = self.coordinator.activate_item(identifier) else {
            return vec![Output::Warning(format!("Unknown item: {identifier}"))];
        };
        let mut outputs = vec![Output::ItemActivated(activated.clone())];
        outputs.extend(self.request_content(&activated.item));
        outputs
    }

    fn external_selection(&mut self, identifier: Option<String>) -> Vec<Output> {
        self.coordinator
            .on_external_selection_change(identifier.as_deref());
        match identifier.filter(|id| !id.is_empty()) {
            Some(identifier) => {
                let item = self.item_for(&identifier);
                self.request_content(&item)
            }
            None => Vec::new(),
        }
    }

    fn catalog_reloaded(&mut self, result: Result<Arc<Catalog>, String>) -> Vec<Output> {
        match result {
            Ok(catalog) => {
                if self.coordinator.replace_catalog(catalog) {
                    self.rebuild_registry();
                }
                Vec::new()
            }
            Err(reason) => vec![Output::Warning(format!("Catalog reload failed: {reason}"))],
        }
    }

    /// Catalog item owning `identifier`, or a bare item pointing at it
    fn item_for(&self, identifier: &str) -> Item {
        self.coordinator
            .catalog()
            .find_item(identifier)
            .map(|(_, item)| item.clone())
            .unwrap_or_else(|| Item::with_path(identifier, identifier))
    }

    fn request_content(&mut self, item: &Item) -> Vec<Output> {
        let resolution = match self.resolver.resolve(item) {
            Ok(resolution) => resolution,
            Err(e) => {
                log::warn!("Cannot resolve {}: {}", item.name, e);
                // a failed selection still replaces whatever was loading
                self.requests.invalidate();
                return vec![Output::LoadFailed {
                    identifier: item.identifier().map(str::to_string),
                    reason: e.to_string(),
                }];
            }
        };

        let mut outputs: Vec<Output> = resolution
            .warnings
            .iter()
            .map(|w| Output::Warning(w.to_string()))
            .collect();

        let ticket = self.requests.issue(resolution.primary.clone());
        match self.registry.plan(&resolution) {
            Ok(plan) => outputs.push(Output::LoadRequested {
                ticket,
                identifier: resolution.primary,
                plan,
            }),
            Err(e) => outputs.push(Output::LoadFailed {
                identifier: Some(resolution.primary),
                reason: e.to_string(),
            }),
        }
        outputs
    }

    fn rebuild_registry(&mut self) {
        let mut registry = ContentRegistry::from_catalog(
            self.coordinator.catalog(),
            self.examples_root.clone(),
            &self.resolver,
        );
        // the start page is shown without being listed in the catalog
        if let Some(initial) = self.initial_selection.as_deref() {
            if is_valid_path(initial) && !registry.can_load(initial) {
                registry.register(initial);
            }
        }
        log::info!("Content registry ready via {} ({} entries)", registry.name(), registry.len());
        self.registry = registry;
    }
}
