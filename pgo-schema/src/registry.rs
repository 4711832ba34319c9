//! Node registry.
//!
//! A flat map from 64-bit node id to decoded schema node, built once per
//! request. File nodes are remembered in request order as resolution roots.

use crate::error::SchemaError;
use crate::types::{EnumNode, Node, NodeKind, StructNode};
use std::collections::HashMap;

/// Id-addressed view of every node in a request.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: HashMap<u64, Node>,
    files: Vec<u64>,
}

impl NodeRegistry {
    /// Builds a registry from the request's node list.
    ///
    /// # Errors
    /// Returns `SchemaError::DuplicateNode` if two nodes share an id.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Result<Self, SchemaError> {
        let mut registry = Self::default();
        for node in nodes {
            if node.is_file() {
                registry.files.push(node.id);
            }
            let id = node.id;
            if registry.nodes.insert(id, node).is_some() {
                return Err(SchemaError::DuplicateNode { id });
            }
        }
        tracing::debug!(
            nodes = registry.nodes.len(),
            files = registry.files.len(),
            "node registry built"
        );
        Ok(registry)
    }

    /// Looks up a node by id.
    ///
    /// # Errors
    /// Returns `SchemaError::NodeNotFound` if the id is not registered.
    pub fn get(&self, id: u64) -> Result<&Node, SchemaError> {
        self.nodes.get(&id).ok_or(SchemaError::NodeNotFound { id })
    }

    /// Looks up a node by id, returning `None` when absent.
    #[must_use]
    pub fn find(&self, id: u64) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Looks up a struct node.
    ///
    /// # Errors
    /// Returns `SchemaError` if the node is absent or not a struct.
    pub fn get_struct(&self, id: u64) -> Result<(&Node, &StructNode), SchemaError> {
        let node = self.get(id)?;
        match &node.kind {
            NodeKind::Struct(s) => Ok((node, s)),
            other => Err(SchemaError::UnexpectedKind {
                id,
                expected: "struct",
                found: other.name(),
            }),
        }
    }

    /// Looks up an enum node.
    ///
    /// # Errors
    /// Returns `SchemaError` if the node is absent or not an enum.
    pub fn get_enum(&self, id: u64) -> Result<(&Node, &EnumNode), SchemaError> {
        let node = self.get(id)?;
        match &node.kind {
            NodeKind::Enum(e) => Ok((node, e)),
            other => Err(SchemaError::UnexpectedKind {
                id,
                expected: "enum",
                found: other.name(),
            }),
        }
    }

    /// Returns file node ids in request order.
    #[must_use]
    pub fn files(&self) -> &[u64] {
        &self.files
    }

    /// Returns the number of registered nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no nodes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all registered nodes in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(json: &str) -> Node {
        serde_json::from_str(json).expect("Failed to parse node")
    }

    #[test]
    fn test_registry_lookup() {
        let registry = NodeRegistry::from_nodes([
            node(r#"{"id": 1, "file": {}}"#),
            node(r#"{"id": 2, "struct": {}}"#),
            node(r#"{"id": 3, "enum": {"enumerants": []}}"#),
        ])
        .expect("Failed to build");

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.files(), &[1]);
        assert!(registry.get_struct(2).is_ok());
        assert!(registry.get_enum(3).is_ok());
        assert!(registry.find(4).is_none());
    }

    #[test]
    fn test_registry_not_found() {
        let registry = NodeRegistry::from_nodes([node(r#"{"id": 1, "file": {}}"#)])
            .expect("Failed to build");
        let err = registry.get(0xdead).expect_err("should fail");
        assert!(matches!(err, SchemaError::NodeNotFound { id: 0xdead }));
    }

    #[test]
    fn test_registry_wrong_kind() {
        let registry = NodeRegistry::from_nodes([node(r#"{"id": 2, "struct": {}}"#)])
            .expect("Failed to build");
        let err = registry.get_enum(2).expect_err("should fail");
        assert!(matches!(
            err,
            SchemaError::UnexpectedKind {
                expected: "enum",
                found: "struct",
                ..
            }
        ));
    }

    #[test]
    fn test_registry_duplicate() {
        let result = NodeRegistry::from_nodes([
            node(r#"{"id": 7, "struct": {}}"#),
            node(r#"{"id": 7, "struct": {}}"#),
        ]);
        assert!(matches!(result, Err(SchemaError::DuplicateNode { id: 7 })));
    }
}
