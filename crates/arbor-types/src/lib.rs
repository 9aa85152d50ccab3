//! Foundation types for Arbor.
//!
//! This crate provides the tree model compared by `arbor-diff` and the JSON
//! codec used to load input trees and write annotated orders.
//!
//! # Key Types
//!
//! - [`TreeNode`] -- Recursive labeled node with attributes, children, and relations
//! - [`Attribute`] -- Named string value carried by a node
//! - [`Operation`] -- Change tag computed by the comparator
//! - [`CodecError`] -- Failures while reading or writing tree JSON

pub mod codec;
pub mod error;
pub mod node;
pub mod operation;

pub use codec::{load_tree, parse_tree, read_tree, save_tree, to_pretty_string, write_tree};
pub use error::{CodecError, CodecResult};
pub use node::{Attribute, TreeNode};
pub use operation::Operation;
