use crate::catalog::{Catalog, CategoryPath};
use crate::content::{LoadPlan, Ticket};
use crate::selection::ItemActivated;
use std::sync::Arc;

/// Events fed into `Playground::update`
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    ToggleCategory(CategoryPath),
    ActivateItem(String),
    ExternalSelection(Option<String>),

    // Catalog provider
    CatalogReloaded(Result<Arc<Catalog>, String>),

    // Content loader
    ContentLoaded {
        ticket: Ticket,
        result: Result<(), String>,
    },
}

/// What the surrounding application should act on
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    ItemActivated(ItemActivated),
    LoadRequested {
        ticket: Ticket,
        identifier: String,
        plan: LoadPlan,
    },
    LoadFailed {
        identifier: Option<String>,
        reason: String,
    },
    ContentReady(Ticket),
    Warning(String),
}
