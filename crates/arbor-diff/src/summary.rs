//! Operation counts over an annotated order.

use serde::Serialize;

use arbor_types::{Operation, TreeNode};

/// Tally of operations for one kind of element (nodes or attributes).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OperationCounts {
    pub create: usize,
    pub update: usize,
    pub delete: usize,
    pub no_action: usize,
    /// Elements with no operation assigned (raw, uncompared input).
    pub unmarked: usize,
}

impl OperationCounts {
    fn record(&mut self, op: Option<Operation>) {
        match op {
            Some(Operation::Create) => self.create += 1,
            Some(Operation::Update) => self.update += 1,
            Some(Operation::Delete) => self.delete += 1,
            Some(Operation::NoAction) => self.no_action += 1,
            None => self.unmarked += 1,
        }
    }

    /// Count for a single operation.
    pub fn get(&self, op: Operation) -> usize {
        match op {
            Operation::Create => self.create,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
            Operation::NoAction => self.no_action,
        }
    }

    /// Number of elements that require a change.
    pub fn changes(&self) -> usize {
        self.create + self.update + self.delete
    }

    /// Total number of elements counted.
    pub fn total(&self) -> usize {
        self.changes() + self.no_action + self.unmarked
    }
}

/// Summary of an annotated tree: how many nodes and attributes carry each
/// operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub nodes: OperationCounts,
    pub attributes: OperationCounts,
}

impl OrderSummary {
    /// Walk `root` and every descendant, counting operations.
    pub fn from_tree(root: &TreeNode) -> Self {
        let mut summary = Self::default();
        for node in root.descendants() {
            summary.nodes.record(node.operation);
            for attr in &node.attributes {
                summary.attributes.record(attr.operation);
            }
        }
        summary
    }

    /// Returns `true` if any node or attribute requires a change.
    pub fn has_changes(&self) -> bool {
        self.nodes.changes() > 0 || self.attributes.changes() > 0
    }
}
