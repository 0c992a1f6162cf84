use proptest::prelude::*;
use snippet_playground::{
    build_tree, Catalog, CategoryNode, CategoryPath, ExpansionMachine, ExpansionPolicy, Item,
};
use std::collections::{BTreeMap, BTreeSet};

fn category_path() -> impl Strategy<Value = CategoryPath> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c"]), 1..=4)
        .prop_map(|segments| CategoryPath::parse(&segments.join("/")).unwrap())
}

fn catalog() -> impl Strategy<Value = Catalog> {
    prop::collection::vec((category_path(), 0usize..3), 0..8).prop_map(|entries| {
        let mut seen = BTreeSet::new();
        let entries: Vec<(CategoryPath, Vec<Item>)> = entries
            .into_iter()
            .filter(|(path, _)| seen.insert(path.clone()))
            .map(|(path, count)| {
                let items: Vec<Item> = (0..count)
                    .map(|i| Item::with_path(format!("item{i}"), format!("{path}/item{i}.tsx")))
                    .collect();
                (path, items)
            })
            .collect();
        Catalog::new("examples", entries)
    })
}

fn policy(multiple_open: bool) -> ExpansionPolicy {
    ExpansionPolicy {
        multiple_open,
        hide_arrows: false,
    }
}

fn collect_nodes<'a>(nodes: &'a [CategoryNode], out: &mut Vec<&'a CategoryNode>) {
    for node in nodes {
        out.push(node);
        collect_nodes(&node.children, out);
    }
}

fn expanded_map(machine: &ExpansionMachine) -> BTreeMap<String, bool> {
    machine
        .state()
        .expanded
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect()
}

proptest! {
    #[test]
    fn tree_has_one_node_per_prefix(catalog in catalog()) {
        let roots = build_tree(&catalog);
        let mut nodes = Vec::new();
        collect_nodes(&roots, &mut nodes);

        let expected: BTreeSet<CategoryPath> = catalog
            .entries()
            .iter()
            .flat_map(|(path, _)| path.prefixes())
            .collect();
        let actual: BTreeSet<CategoryPath> = nodes.iter().map(|n| n.full_path.clone()).collect();

        prop_assert_eq!(nodes.len(), expected.len());
        prop_assert_eq!(actual, expected);

        for node in nodes {
            let is_key = catalog.items(node.full_path.as_str()).is_some();
            prop_assert_eq!(node.items.is_some(), is_key, "items on {}", node.full_path);
        }
    }

    #[test]
    fn tree_build_is_idempotent(catalog in catalog()) {
        prop_assert_eq!(build_tree(&catalog), build_tree(&catalog));
    }

    #[test]
    fn single_open_keeps_one_branch_per_depth(toggles in prop::collection::vec(category_path(), 0..24)) {
        let mut machine = ExpansionMachine::new(policy(false), Some("x.tsx".into()));
        for path in &toggles {
            machine.toggle_category(path);
            prop_assert!(machine.state().selected_item.is_none());
        }

        let mut per_depth: BTreeMap<usize, usize> = BTreeMap::new();
        for path in machine.state().expanded_paths() {
            *per_depth.entry(path.depth()).or_default() += 1;
        }
        for (depth, count) in per_depth {
            prop_assert!(count <= 1, "{} expanded at depth {}", count, depth);
        }
    }

    #[test]
    fn multi_open_toggle_only_touches_target(
        setup in prop::collection::vec(category_path(), 0..16),
        target in category_path(),
    ) {
        let mut machine = ExpansionMachine::new(policy(true), None);
        for path in &setup {
            machine.toggle_category(path);
        }

        let before = expanded_map(&machine);
        machine.toggle_category(&target);
        let after = expanded_map(&machine);

        for (key, was) in &before {
            if key != target.as_str() {
                prop_assert_eq!(after.get(key), Some(was));
            }
        }
    }

    #[test]
    fn ancestor_chain_expands_every_prefix(
        multiple_open in any::<bool>(),
        setup in prop::collection::vec(category_path(), 0..16),
        target in category_path(),
    ) {
        let mut machine = ExpansionMachine::new(policy(multiple_open), None);
        for path in &setup {
            machine.toggle_category(path);
        }
        let active = machine.state().active_category.clone();
        let selected = machine.state().selected_item.clone();

        machine.expand_ancestor_chain(&target);

        for prefix in target.prefixes() {
            prop_assert!(machine.is_expanded(prefix.as_str()), "{} collapsed", prefix);
        }
        prop_assert_eq!(&machine.state().active_category, &active);
        prop_assert_eq!(&machine.state().selected_item, &selected);
    }

    #[test]
    fn select_item_always_clears_active_category(
        multiple_open in any::<bool>(),
        setup in prop::collection::vec(category_path(), 1..8),
    ) {
        let mut machine = ExpansionMachine::new(policy(multiple_open), None);
        for path in &setup {
            machine.toggle_category(path);
        }
        machine.select_item("picked.tsx");
        prop_assert!(machine.state().active_category.is_none());
        for path in &setup {
            prop_assert!(!machine.is_highlighted(path));
        }
    }
}
