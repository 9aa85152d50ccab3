//! Node-level comparison: match two trees by id and annotate the merge.
//!
//! The merge is a bottom-up fold. A node present on only one side is copied
//! with its whole subtree stamped `CREATE` or `DELETE`. A node present on
//! both sides is `UPDATE` when any of its own attributes changed or its
//! relation set differs, and `NO_ACTION` otherwise; the operations of its
//! children never propagate upward.
//!
//! # Ordering
//!
//! - Attributes follow the new node's order, then initial-only deletions in
//!   the initial node's order.
//! - Children of a matched node are sorted by id (byte-wise). Copied
//!   subtrees keep their original child order.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{debug, info, warn};

use arbor_types::{Attribute, Operation, TreeNode};

/// Compare a node from the initial tree with its counterpart in the new tree.
///
/// Returns `None` only when both sides are absent, meaning there is nothing
/// to merge. In every other case a merged node is returned.
pub fn compare_nodes(initial: Option<&TreeNode>, new: Option<&TreeNode>) -> Option<TreeNode> {
    info!(
        initial = initial.map_or("null", |n| n.id.as_str()),
        new = new.map_or("null", |n| n.id.as_str()),
        "comparing nodes"
    );

    let (initial, new) = match (initial, new) {
        (None, None) => {
            warn!("both nodes are absent, nothing to compare");
            return None;
        }
        (None, Some(new)) => {
            info!(id = %new.id, "initial node absent, marking subtree as CREATE");
            return Some(clone_with_operation(new, Operation::Create));
        }
        (Some(initial), None) => {
            info!(id = %initial.id, "new node absent, marking subtree as DELETE");
            return Some(clone_with_operation(initial, Operation::Delete));
        }
        (Some(initial), Some(new)) => (initial, new),
    };

    let attributes = compare_attributes(&initial.attributes, &new.attributes);

    // An empty relation list on the new side keeps the initial relations
    // in the output, even though the set comparison still reports a change.
    let relations = if new.relations.is_empty() {
        initial.relations.clone()
    } else {
        new.relations.clone()
    };
    let relations_changed = !compare_relations(&initial.relations, &new.relations);

    let children = merge_children(&initial.children, &new.children);

    let attributes_changed = attributes
        .iter()
        .any(|a| a.operation.is_some_and(|op| op.is_change()));
    let operation = if attributes_changed || relations_changed {
        Operation::Update
    } else {
        Operation::NoAction
    };
    info!(id = %new.id, op = %operation, "node compared");

    Some(TreeNode {
        id: new.id.clone(),
        kind: new.kind.clone(),
        operation: Some(operation),
        attributes,
        children,
        relations,
    })
}

/// Diff two attribute lists by name.
///
/// Every attribute of `new` is emitted in order: `NO_ACTION` when the
/// initial list holds the same name and value, `UPDATE` (carrying the new
/// value) when the value differs, `CREATE` when the name is unknown. Names
/// found only in `initial` follow as `DELETE`, in initial order.
pub fn compare_attributes(initial: &[Attribute], new: &[Attribute]) -> Vec<Attribute> {
    debug!(
        initial = initial.len(),
        new = new.len(),
        "comparing attributes"
    );

    let initial_values: HashMap<&str, &str> = initial
        .iter()
        .map(|a| (a.name.as_str(), a.value.as_str()))
        .collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(new.len());
    let mut result = Vec::with_capacity(new.len() + initial.len());

    for attr in new {
        seen.insert(attr.name.as_str());

        let op = match initial_values.get(attr.name.as_str()) {
            Some(&old) if old == attr.value => {
                debug!(name = %attr.name, "attribute unchanged");
                Operation::NoAction
            }
            Some(&old) => {
                debug!(name = %attr.name, from = old, to = %attr.value, "attribute updated");
                Operation::Update
            }
            None => {
                debug!(name = %attr.name, value = %attr.value, "attribute created");
                Operation::Create
            }
        };
        result.push(Attribute::new(attr.name.as_str(), attr.value.as_str()).with_operation(op));
    }

    for attr in initial {
        if !seen.contains(attr.name.as_str()) {
            debug!(name = %attr.name, value = %attr.value, "attribute deleted");
            result.push(
                Attribute::new(attr.name.as_str(), attr.value.as_str())
                    .with_operation(Operation::Delete),
            );
        }
    }

    result
}

/// Returns `true` if both lists name the same set of relations.
///
/// Order and repeated entries are ignored.
pub fn compare_relations(initial: &[String], new: &[String]) -> bool {
    debug!(?initial, ?new, "comparing relations");
    let initial: HashSet<&str> = initial.iter().map(String::as_str).collect();
    let new: HashSet<&str> = new.iter().map(String::as_str).collect();
    initial == new
}

/// Merge two child lists by id and compare each matched pair.
///
/// The result holds one node per distinct id, sorted by id. When a side
/// repeats an id, the last child with that id is the one compared.
pub fn merge_children(initial: &[TreeNode], new: &[TreeNode]) -> Vec<TreeNode> {
    info!(
        initial = initial.len(),
        new = new.len(),
        "merging children"
    );

    let initial_by_id: HashMap<&str, &TreeNode> =
        initial.iter().map(|c| (c.id.as_str(), c)).collect();
    let new_by_id: HashMap<&str, &TreeNode> = new.iter().map(|c| (c.id.as_str(), c)).collect();

    // BTreeSet iterates in byte-wise order, which is the output order.
    let ids: BTreeSet<&str> = initial_by_id
        .keys()
        .chain(new_by_id.keys())
        .copied()
        .collect();

    let mut merged = Vec::with_capacity(ids.len());
    for id in ids {
        let compared = compare_nodes(
            initial_by_id.get(id).copied(),
            new_by_id.get(id).copied(),
        );
        if let Some(child) = compared {
            debug!(id = %child.id, op = ?child.operation, "merged child");
            merged.push(child);
        }
    }

    info!(count = merged.len(), "finished merging children");
    merged
}

/// Deep-copy `node`, tagging it, every descendant, and every attribute with `op`.
///
/// Relations are copied as-is.
pub fn clone_with_operation(node: &TreeNode, op: Operation) -> TreeNode {
    debug!(id = %node.id, %op, "cloning subtree");

    TreeNode {
        id: node.id.clone(),
        kind: node.kind.clone(),
        operation: Some(op),
        attributes: node
            .attributes
            .iter()
            .map(|a| Attribute::new(a.name.as_str(), a.value.as_str()).with_operation(op))
            .collect(),
        children: node
            .children
            .iter()
            .map(|c| clone_with_operation(c, op))
            .collect(),
        relations: node.relations.clone(),
    }
}
