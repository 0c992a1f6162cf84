// Selection coordinator: keeps the tree's expansion in sync with the selected item
use crate::catalog::{Catalog, CategoryPath, Item};
use crate::expansion::{ExpansionMachine, ExpansionPolicy, ExpansionState};
use crate::tree::CategoryTree;
use std::sync::Arc;

/// Result of an external selection change
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Owning category was revealed and the item marked selected
    Revealed(CategoryPath),
    /// No category owns the identifier; nothing was expanded
    Unowned,
    /// Empty signal, state untouched
    Ignored,
}

/// Emitted when a leaf item is clicked inside the navigation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemActivated {
    pub item: Item,
    pub category: CategoryPath,
}

#[derive(Debug)]
pub struct SelectionCoordinator {
    tree: CategoryTree,
    machine: ExpansionMachine,
}

impl SelectionCoordinator {
    pub fn new(catalog: Arc<Catalog>, policy: ExpansionPolicy, initial: Option<String>) -> Self {
        let mut coordinator = Self {
            tree: CategoryTree::new(catalog),
            machine: ExpansionMachine::new(policy, None),
        };
        if let Some(identifier) = initial.as_deref() {
            coordinator.on_external_selection_change(Some(identifier));
        }
        coordinator
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.tree.catalog()
    }

    pub fn tree(&self) -> &CategoryTree {
        &self.tree
    }

    pub fn machine(&self) -> &ExpansionMachine {
        &self.machine
    }

    pub fn state(&self) -> &ExpansionState {
        self.machine.state()
    }

    /// Reveal and mark the externally selected item. Idempotent.
    pub fn on_external_selection_change(&mut self, identifier: Option<&str>) -> SelectionOutcome {
        let Some(identifier) = identifier.filter(|id| !id.is_empty()) else {
            return SelectionOutcome::Ignored;
        };

        let owner = self.catalog().find_category_for_item(identifier).cloned();
        let outcome = match owner {
            Some(category) => {
                self.machine.expand_ancestor_chain(&category);
                SelectionOutcome::Revealed(category)
            }
            None => {
                log::warn!("No category owns {}, nothing to reveal", identifier);
                SelectionOutcome::Unowned
            }
        };

        self.machine.select_item(identifier);
        outcome
    }

    pub fn toggle_category(&mut self, path: &CategoryPath) -> bool {
        self.machine.toggle_category(path)
    }

    /// Leaf click on an item identified by its selection identifier
    pub fn activate_item(&mut self, identifier: &str) -> Option<ItemActivated> {
        let (category, item) = self
            .catalog()
            .find_item(identifier)
            .map(|(category, item)| (category.clone(), item.clone()))?;
        let selected = item.identifier()?.to_string();
        self.machine.select_item(selected);
        Some(ItemActivated { item, category })
    }

    /// Swap in a new catalog snapshot; expansion state is kept
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) -> bool {
        self.tree.refresh(&catalog)
    }
}
