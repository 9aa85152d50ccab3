//! Structural diff engine for Arbor.
//!
//! Compares an initial tree with a new tree and produces a single merged tree
//! in which every node and attribute carries the [`Operation`] needed to move
//! from the initial state to the new one.
//!
//! # Key Items
//!
//! - [`compare_nodes`] -- Entry point: merge two optional nodes
//! - [`compare_attributes`] / [`compare_relations`] / [`merge_children`] -- The per-node steps
//! - [`clone_with_operation`] -- Stamp a whole subtree as created or deleted
//! - [`OrderSummary`] -- Operation counts over an annotated tree
//! - [`diff_orders`] / [`OrderTextDiff`] -- Line diff between two serialized orders
//!
//! [`Operation`]: arbor_types::Operation

pub mod compare;
pub mod summary;
pub mod text_diff;

pub use compare::{
    clone_with_operation, compare_attributes, compare_nodes, compare_relations, merge_children,
};
pub use summary::{OperationCounts, OrderSummary};
pub use text_diff::{diff_orders, DiffHunk, DiffLine, OrderTextDiff};
