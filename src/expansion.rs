// Expansion state machine for the category tree
//
// Tracks which categories are expanded, the last clicked category and the
// last selected leaf item, under a single-open or multiple-open policy.

use crate::catalog::CategoryPath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Expansion behaviour, fixed for the lifetime of a machine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionPolicy {
    /// Allow several branches of the same depth to stay open
    pub multiple_open: bool,
    /// Presentation only, never affects state
    pub hide_arrows: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpansionState {
    /// Absent means collapsed; collapsing stores `false`
    pub expanded: BTreeMap<CategoryPath, bool>,
    /// Last category header clicked
    pub active_category: Option<CategoryPath>,
    /// Last leaf item selected
    pub selected_item: Option<String>,
}

impl ExpansionState {
    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.get(path).copied().unwrap_or(false)
    }

    pub fn expanded_paths(&self) -> impl Iterator<Item = &CategoryPath> {
        self.expanded
            .iter()
            .filter(|(_, expanded)| **expanded)
            .map(|(path, _)| path)
    }
}

/// What changed, passed to listeners after every operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Toggled { path: CategoryPath, expanded: bool },
    AncestorsExpanded(CategoryPath),
    ItemSelected(String),
}

type Listener = Box<dyn FnMut(&Transition, &ExpansionState)>;

pub struct ExpansionMachine {
    policy: ExpansionPolicy,
    state: ExpansionState,
    revision: u64,
    listeners: Vec<Listener>,
}

impl ExpansionMachine {
    pub fn new(policy: ExpansionPolicy, initial_selection: Option<String>) -> Self {
        Self {
            policy,
            state: ExpansionState {
                selected_item: initial_selection,
                ..ExpansionState::default()
            },
            revision: 0,
            listeners: Vec::new(),
        }
    }

    pub fn policy(&self) -> ExpansionPolicy {
        self.policy
    }

    pub fn state(&self) -> &ExpansionState {
        &self.state
    }

    /// Bumped after every transition
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Transition, &ExpansionState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.state.is_expanded(path)
    }

    /// A header is emphasized only if it was clicked last and no leaf was selected since
    pub fn is_highlighted(&self, path: &CategoryPath) -> bool {
        self.state.active_category.as_ref() == Some(path) && self.state.selected_item.is_none()
    }

    /// Category header click. Returns whether `path` ends up expanded.
    pub fn toggle_category(&mut self, path: &CategoryPath) -> bool {
        self.state.active_category = Some(path.clone());
        if !self.policy.multiple_open {
            self.state.selected_item = None;
        }

        let expanded = if self.state.is_expanded(path.as_str()) {
            self.state.expanded.insert(path.clone(), false);
            false
        } else {
            if !self.policy.multiple_open {
                // Only one branch per level: drop same-depth siblings.
                // Ancestors and descendants sit at other depths and survive.
                let depth = path.depth();
                self.state
                    .expanded
                    .retain(|key, _| key.depth() != depth || key == path);
            }
            self.state.expanded.insert(path.clone(), true);
            true
        };

        log::debug!("Toggled category {} -> expanded={}", path, expanded);
        self.notify(Transition::Toggled {
            path: path.clone(),
            expanded,
        });
        expanded
    }

    /// Reveal `path` by expanding every prefix of it.
    ///
    /// Under single-open, entries at the same or a shallower depth that are not
    /// on the chain are dropped first. Deeper entries are kept.
    pub fn expand_ancestor_chain(&mut self, path: &CategoryPath) {
        if !self.policy.multiple_open {
            let depth = path.depth();
            self.state
                .expanded
                .retain(|key, _| key.depth() > depth || key.is_ancestor_or_self_of(path));
        }

        for prefix in path.prefixes() {
            self.state.expanded.insert(prefix, true);
        }

        log::debug!("Expanded ancestor chain of {}", path);
        self.notify(Transition::AncestorsExpanded(path.clone()));
    }

    /// Leaf selection; always clears the category highlight
    pub fn select_item(&mut self, identifier: impl Into<String>) {
        let identifier = identifier.into();
        self.state.selected_item = Some(identifier.clone());
        self.state.active_category = None;

        log::debug!("Selected item {}", identifier);
        self.notify(Transition::ItemSelected(identifier));
    }

    fn notify(&mut self, transition: Transition) {
        self.revision += 1;
        for listener in &mut self.listeners {
            listener(&transition, &self.state);
        }
    }
}

impl std::fmt::Debug for ExpansionMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpansionMachine")
            .field("policy", &self.policy)
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn cp(raw: &str) -> CategoryPath {
        CategoryPath::parse(raw).unwrap()
    }

    fn single() -> ExpansionMachine {
        ExpansionMachine::new(ExpansionPolicy::default(), None)
    }

    fn multi() -> ExpansionMachine {
        ExpansionMachine::new(
            ExpansionPolicy {
                multiple_open: true,
                hide_arrows: false,
            },
            None,
        )
    }

    fn open(machine: &ExpansionMachine) -> Vec<&str> {
        machine.state().expanded_paths().map(CategoryPath::as_str).collect()
    }

    #[test]
    fn test_toggle_expands_then_collapses() {
        let mut machine = single();
        assert!(machine.toggle_category(&cp("a")));
        assert!(machine.is_expanded("a"));
        assert!(!machine.toggle_category(&cp("a")));
        assert!(!machine.is_expanded("a"));
        assert_eq!(machine.state().expanded.get("a"), Some(&false));
    }

    #[test]
    fn test_single_open_collapses_same_depth_sibling() {
        let mut machine = single();
        machine.toggle_category(&cp("a"));
        machine.toggle_category(&cp("a/b"));
        machine.toggle_category(&cp("a/c"));
        assert_eq!(open(&machine), vec!["a", "a/c"]);
        assert!(!machine.state().expanded.contains_key("a/b"));
    }

    #[test]
    fn test_single_open_keeps_descendants_of_collapsed_sibling() {
        let mut machine = single();
        machine.toggle_category(&cp("a"));
        machine.toggle_category(&cp("a/b"));
        machine.toggle_category(&cp("a/b/deep"));
        machine.toggle_category(&cp("a/c"));
        // a/b/deep stays recorded but is hidden behind the collapsed a/b
        assert_eq!(open(&machine), vec!["a", "a/b/deep", "a/c"]);
    }

    #[test]
    fn test_single_open_root_switch_keeps_other_depths() {
        let mut machine = single();
        machine.toggle_category(&cp("a"));
        machine.toggle_category(&cp("a/b"));
        machine.toggle_category(&cp("x"));
        assert_eq!(open(&machine), vec!["a/b", "x"]);
    }

    #[test]
    fn test_multi_open_never_collapses_others() {
        let mut machine = multi();
        machine.toggle_category(&cp("a"));
        machine.toggle_category(&cp("x"));
        machine.toggle_category(&cp("a/b"));
        machine.toggle_category(&cp("a/c"));
        assert_eq!(open(&machine), vec!["a", "a/b", "a/c", "x"]);
    }

    #[test]
    fn test_toggle_clears_selection_only_in_single_open() {
        let mut machine = ExpansionMachine::new(ExpansionPolicy::default(), Some("x.tsx".into()));
        machine.toggle_category(&cp("a"));
        assert_eq!(machine.state().selected_item, None);
        assert!(machine.is_highlighted(&cp("a")));

        let mut machine = multi();
        machine.select_item("x.tsx");
        machine.toggle_category(&cp("a"));
        assert_eq!(machine.state().selected_item.as_deref(), Some("x.tsx"));
        assert_eq!(machine.state().active_category, Some(cp("a")));
        assert!(!machine.is_highlighted(&cp("a")));
    }

    #[test]
    fn test_select_item_clears_active_category() {
        let mut machine = single();
        machine.toggle_category(&cp("a"));
        machine.select_item("a/X.tsx");
        assert_eq!(machine.state().active_category, None);
        assert!(!machine.is_highlighted(&cp("a")));
        // expansion is untouched
        assert!(machine.is_expanded("a"));
    }

    #[test]
    fn test_ancestor_chain_single_open_drops_unrelated_branches() {
        let mut machine = single();
        machine.toggle_category(&cp("x"));
        machine.toggle_category(&cp("x/y"));
        machine.toggle_category(&cp("x/y/z"));
        machine.expand_ancestor_chain(&cp("a/b"));
        // x and x/y are at shallower or equal depth off the chain; x/y/z is deeper
        assert_eq!(open(&machine), vec!["a", "a/b", "x/y/z"]);
    }

    #[test]
    fn test_ancestor_chain_multi_open_preserves_everything() {
        let mut machine = multi();
        machine.toggle_category(&cp("x"));
        machine.expand_ancestor_chain(&cp("a/b"));
        assert_eq!(open(&machine), vec!["a", "a/b", "x"]);
    }

    #[test]
    fn test_ancestor_chain_reopens_collapsed_prefix() {
        let mut machine = single();
        machine.toggle_category(&cp("a"));
        machine.toggle_category(&cp("a"));
        machine.toggle_category(&cp("q"));
        machine.expand_ancestor_chain(&cp("a/b"));
        assert_eq!(open(&machine), vec!["a", "a/b"]);
        assert_eq!(machine.state().active_category, Some(cp("q")));
    }

    #[test]
    fn test_listeners_see_every_transition() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut machine = single();
        machine.subscribe(move |transition, _| sink.borrow_mut().push(transition.clone()));

        machine.toggle_category(&cp("a"));
        machine.expand_ancestor_chain(&cp("a/b"));
        machine.select_item("a/b/X.tsx");

        assert_eq!(machine.revision(), 3);
        assert_eq!(
            *seen.borrow(),
            vec![
                Transition::Toggled {
                    path: cp("a"),
                    expanded: true
                },
                Transition::AncestorsExpanded(cp("a/b")),
                Transition::ItemSelected("a/b/X.tsx".into()),
            ]
        );
    }
}
