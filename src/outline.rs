// Flattened visible rows of the navigation tree
use crate::catalog::CategoryPath;
use crate::expansion::ExpansionMachine;
use crate::tree::CategoryNode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Row {
    Category {
        level: usize,
        path: CategoryPath,
        label: String,
        anchor: String,
        expanded: bool,
        highlighted: bool,
        show_arrow: bool,
    },
    Item {
        level: usize,
        label: String,
        identifier: String,
        active: bool,
    },
}

impl Row {
    pub fn level(&self) -> usize {
        match self {
            Row::Category { level, .. } | Row::Item { level, .. } => *level,
        }
    }
}

/// Segment name with its first character uppercased
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Element id of a category's child list
pub fn anchor_id(path: &CategoryPath) -> String {
    format!("category-{}", path.as_str().replace('/', "-"))
}

/// Rows currently visible: a collapsed category hides its whole subtree.
/// Inside an expanded category, child categories come before items.
pub fn visible_rows(roots: &[CategoryNode], machine: &ExpansionMachine) -> Vec<Row> {
    let mut rows = Vec::new();
    for node in roots {
        push_node(&mut rows, node, 0, machine);
    }
    rows
}

fn push_node(rows: &mut Vec<Row>, node: &CategoryNode, level: usize, machine: &ExpansionMachine) {
    let expanded = machine.is_expanded(node.full_path.as_str());
    rows.push(Row::Category {
        level,
        path: node.full_path.clone(),
        label: display_name(&node.name),
        anchor: anchor_id(&node.full_path),
        expanded,
        highlighted: machine.is_highlighted(&node.full_path),
        show_arrow: !machine.policy().hide_arrows,
    });

    if !expanded {
        return;
    }

    for child in &node.children {
        push_node(rows, child, level + 1, machine);
    }

    let selected = machine.state().selected_item.as_deref();
    for item in node.items() {
        // items without any identifier are not rendered
        let Some(identifier) = item.identifier() else {
            continue;
        };
        rows.push(Row::Item {
            level: level + 1,
            label: item.name.clone(),
            identifier: identifier.to_string(),
            active: selected == Some(identifier),
        });
    }
}

/// Plain-text rendering used by the command line binary
pub fn render_text(rows: &[Row]) -> String {
    let mut out = String::new();
    for row in rows {
        let indent = "  ".repeat(row.level());
        match row {
            Row::Category {
                label,
                expanded,
                highlighted,
                show_arrow,
                ..
            } => {
                let arrow = match (*show_arrow, *expanded) {
                    (false, _) => "",
                    (true, true) => "v ",
                    (true, false) => "> ",
                };
                let mark = if *highlighted { " *" } else { "" };
                out.push_str(&format!("{indent}{arrow}{label}{mark}\n"));
            }
            Row::Item {
                label,
                identifier,
                active,
                ..
            } => {
                let mark = if *active { "=>" } else { "- " };
                out.push_str(&format!("{indent}{mark} {label} ({identifier})\n"));
            }
        }
    }
    out
}
