//! JSON loader and writer for trees.
//!
//! Loading applies the normalizations described on [`TreeNode`]. Writing
//! produces two-space indented JSON with empty strings, unset operations,
//! and empty collections omitted, so identical trees always serialize to
//! identical text.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{CodecError, CodecResult};
use crate::node::TreeNode;

/// Parse a tree from a JSON string.
pub fn parse_tree(json: &str) -> CodecResult<TreeNode> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a tree from any reader.
pub fn read_tree<R: Read>(reader: R) -> CodecResult<TreeNode> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a tree from a JSON file.
pub fn load_tree(path: impl AsRef<Path>) -> CodecResult<TreeNode> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CodecError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_tree(BufReader::new(file))
}

/// Serialize a tree to pretty-printed JSON (no trailing newline).
pub fn to_pretty_string(node: &TreeNode) -> CodecResult<String> {
    Ok(serde_json::to_string_pretty(node)?)
}

/// Write a tree as pretty-printed JSON followed by a newline.
pub fn write_tree<W: Write>(mut writer: W, node: &TreeNode) -> CodecResult<()> {
    serde_json::to_writer_pretty(&mut writer, node)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write a tree to a file, replacing any existing content.
pub fn save_tree(path: impl AsRef<Path>, node: &TreeNode) -> CodecResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| CodecError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_tree(BufWriter::new(file), node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Attribute;
    use crate::operation::Operation;
    use serde_json::json;

    #[test]
    fn missing_collections_load_as_empty() {
        let node = parse_tree(r#"{"id": "a", "type": "T"}"#).unwrap();
        assert!(node.attributes.is_empty());
        assert!(node.children.is_empty());
        assert!(node.relations.is_empty());
        assert!(node.operation.is_none());
    }

    #[test]
    fn null_collections_load_as_empty() {
        let node = parse_tree(
            r#"{"id": "a", "type": "T", "attributes": null, "children": null, "relations": null}"#,
        )
        .unwrap();
        assert!(node.attributes.is_empty());
        assert!(node.children.is_empty());
        assert!(node.relations.is_empty());
    }

    #[test]
    fn long_form_aliases_are_accepted() {
        let node = parse_tree(
            r#"{"identifier": "root", "brickId": "B1",
                "children": [{"identifier": "c", "brickId": "B2"}]}"#,
        )
        .unwrap();
        assert_eq!(node.id, "root");
        assert_eq!(node.kind, "B1");
        assert_eq!(node.children[0].id, "c");
        assert_eq!(node.children[0].kind, "B2");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let node = parse_tree(r#"{"id": "a", "comment": "ignored", "depth": 3}"#).unwrap();
        assert_eq!(node.id, "a");
    }

    #[test]
    fn null_attribute_value_loads_as_empty() {
        let node = parse_tree(r#"{"id": "a", "attributes": [{"name": "x", "value": null}]}"#).unwrap();
        assert_eq!(node.attributes, vec![Attribute::new("x", "")]);
    }

    #[test]
    fn operations_are_read_back() {
        let node = parse_tree(
            r#"{"id": "a", "operation": "UPDATE",
                "attributes": [{"name": "x", "value": "1", "operation": "NO_ACTION"}]}"#,
        )
        .unwrap();
        assert_eq!(node.operation, Some(Operation::Update));
        assert_eq!(node.attributes[0].operation, Some(Operation::NoAction));
    }

    #[test]
    fn blank_operations_load_as_unset() {
        let node = parse_tree(
            r#"{"id": "a", "operation": "",
                "attributes": [{"name": "x", "value": "1", "operation": ""}],
                "children": [{"id": "c", "operation": null}]}"#,
        )
        .unwrap();
        assert_eq!(node.operation, None);
        assert_eq!(node.attributes[0].operation, None);
        assert_eq!(node.children[0].operation, None);
    }

    #[test]
    fn unknown_operation_is_an_error() {
        let err = parse_tree(r#"{"id": "a", "operation": "MOVE"}"#).unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
        assert!(err.to_string().contains("MOVE"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = parse_tree(r#"{"id": "a", "children": [}"#).unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn writer_omits_empty_fields() {
        let node = TreeNode::new("a", "");
        let value: serde_json::Value = serde_json::from_str(&to_pretty_string(&node).unwrap()).unwrap();
        assert_eq!(value, json!({"id": "a"}));
    }

    #[test]
    fn writer_field_order_is_stable() {
        let mut node = TreeNode::new("root", "T")
            .with_attribute("x", "1")
            .with_child(TreeNode::new("c", "U"))
            .with_relation("r");
        node.operation = Some(Operation::Update);
        node.attributes[0].operation = Some(Operation::Update);

        let expected = r#"{
  "id": "root",
  "type": "T",
  "operation": "UPDATE",
  "attributes": [
    {
      "name": "x",
      "value": "1",
      "operation": "UPDATE"
    }
  ],
  "children": [
    {
      "id": "c",
      "type": "U"
    }
  ],
  "relations": [
    "r"
  ]
}"#;
        assert_eq!(to_pretty_string(&node).unwrap(), expected);
    }

    #[test]
    fn writer_uses_canonical_field_names() {
        let node = parse_tree(r#"{"identifier": "a", "brickId": "B"}"#).unwrap();
        let text = to_pretty_string(&node).unwrap();
        assert!(text.contains("\"id\""));
        assert!(text.contains("\"type\""));
        assert!(!text.contains("identifier"));
        assert!(!text.contains("brickId"));
    }

    #[test]
    fn write_tree_appends_newline() {
        let mut buf = Vec::new();
        write_tree(&mut buf, &TreeNode::new("a", "T")).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");
        let node = TreeNode::new("root", "T")
            .with_attribute("x", "1")
            .with_child(TreeNode::new("c", "U").with_relation("root"));

        save_tree(&path, &node).unwrap();
        let loaded = load_tree(&path).unwrap();
        assert_eq!(loaded, node);
    }

    #[test]
    fn load_missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_tree(&path).unwrap_err();
        assert!(matches!(err, CodecError::Read { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}
