// Hierarchical category tree derived from the flat catalog mapping
use crate::catalog::{Catalog, CategoryPath, Item};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryNode {
    /// Last path segment
    pub name: String,
    pub full_path: CategoryPath,
    /// Present only when `full_path` is a key of the catalog
    pub items: Option<Vec<Item>>,
    /// First-encounter order, unique by `name`
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    fn new(full_path: CategoryPath) -> Self {
        Self {
            name: full_path.name().to_string(),
            full_path,
            items: None,
            children: Vec::new(),
        }
    }

    pub fn items(&self) -> &[Item] {
        self.items.as_deref().unwrap_or_default()
    }

    /// Depth-first walk over this node and its descendants
    pub fn walk(&self, visit: &mut impl FnMut(&CategoryNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Build root nodes from the catalog. Pure: the input is not touched and
/// running it twice yields equal trees.
pub fn build_tree(catalog: &Catalog) -> Vec<CategoryNode> {
    let mut roots: Vec<CategoryNode> = Vec::new();

    for (path, items) in catalog.entries() {
        let prefixes = path.prefixes();
        let last = prefixes.len() - 1;
        let mut level = &mut roots;

        for (depth, prefix) in prefixes.into_iter().enumerate() {
            let idx = match level.iter().position(|node| node.name == prefix.name()) {
                Some(idx) => idx,
                None => {
                    level.push(CategoryNode::new(prefix));
                    level.len() - 1
                }
            };

            if depth == last {
                level[idx].items = Some(items.clone());
            }
            level = &mut level[idx].children;
        }
    }

    roots
}

/// Category tree memoized by catalog identity.
///
/// The tree is rebuilt only when a different catalog snapshot is supplied.
#[derive(Debug)]
pub struct CategoryTree {
    source: Arc<Catalog>,
    roots: Vec<CategoryNode>,
}

impl CategoryTree {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let roots = build_tree(&catalog);
        Self {
            source: catalog,
            roots,
        }
    }

    /// Returns true if the tree was rebuilt
    pub fn refresh(&mut self, catalog: &Arc<Catalog>) -> bool {
        if Arc::ptr_eq(&self.source, catalog) {
            return false;
        }
        self.source = Arc::clone(catalog);
        self.roots = build_tree(catalog);
        log::debug!("Rebuilt category tree ({} roots)", self.roots.len());
        true
    }

    pub fn roots(&self) -> &[CategoryNode] {
        &self.roots
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.source
    }

    pub fn find(&self, path: &CategoryPath) -> Option<&CategoryNode> {
        let mut level = self.roots.as_slice();
        let mut found = None;
        for segment in path.segments() {
            let node = level.iter().find(|node| node.name == segment)?;
            level = &node.children;
            found = Some(node);
        }
        found
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        for root in &self.roots {
            root.walk(&mut |_| count += 1);
        }
        count
    }
}
