//! Intermediate representation for code generation.
//!
//! Name resolution walks each file's nested-node tree once and assigns every
//! reachable node a Go identifier and an owning file. Group structs are named
//! through the field that holds them, never through the nested-node list, so
//! a group reached both ways ends up with a single name.

use crate::annotations::{AnnotationCatalog, CodecSet};
use crate::error::SchemaError;
use crate::registry::NodeRegistry;
use crate::types::{CodeGeneratorRequest, Node, RequestedFile};
use std::collections::{HashMap, HashSet};

/// Name assigned to a node during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    /// Go identifier.
    pub name: String,
    /// Id of the owning file node.
    pub file: u64,
}

/// Per-file package, import and emission context.
#[derive(Debug, Clone)]
pub struct FileContext {
    /// File node id.
    pub id: u64,
    /// File display name.
    pub display_name: String,
    /// Go package name.
    pub package: Option<String>,
    /// Go import path.
    pub import: Option<String>,
    /// Codecs enabled on the file.
    pub codecs: CodecSet,
    /// Independently emitted nodes, in first-registration order.
    pub nodes: Vec<u64>,
}

/// Resolved schema graph.
#[derive(Debug, Clone)]
pub struct SchemaIr {
    registry: NodeRegistry,
    catalog: AnnotationCatalog,
    names: HashMap<u64, ResolvedName>,
    files: HashMap<u64, FileContext>,
    codecs: HashMap<u64, CodecSet>,
    requested: Vec<RequestedFile>,
}

impl SchemaIr {
    /// Builds the registry and resolves every file of a request.
    ///
    /// Unset catalog ids are discovered from the request before resolution.
    ///
    /// # Errors
    /// Returns `SchemaError` if a node reachable from a requested file is
    /// missing or a node id is duplicated.
    pub fn from_request(
        request: CodeGeneratorRequest,
        mut catalog: AnnotationCatalog,
    ) -> Result<Self, SchemaError> {
        let registry = NodeRegistry::from_nodes(request.nodes)?;
        catalog.discover(&registry);

        let requested_ids: HashSet<u64> = request.requested_files.iter().map(|f| f.id).collect();
        for id in &requested_ids {
            let node = registry.get(*id)?;
            if !node.is_file() {
                return Err(SchemaError::UnexpectedKind {
                    id: *id,
                    expected: "file",
                    found: node.kind_name(),
                });
            }
        }

        let mut resolver = Resolver {
            registry: &registry,
            catalog: &catalog,
            requested: &requested_ids,
            names: HashMap::new(),
            files: HashMap::new(),
            codecs: HashMap::new(),
        };
        for &file_id in registry.files() {
            resolver.resolve_file(file_id)?;
        }

        let Resolver {
            names,
            files,
            codecs,
            ..
        } = resolver;

        Ok(Self {
            registry,
            catalog,
            names,
            files,
            codecs,
            requested: request.requested_files,
        })
    }

    /// Returns the node registry.
    #[must_use]
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Returns the annotation catalog in effect.
    #[must_use]
    pub fn catalog(&self) -> &AnnotationCatalog {
        &self.catalog
    }

    /// Looks up a node by id.
    ///
    /// # Errors
    /// Returns `SchemaError::NodeNotFound` if the id is not registered.
    pub fn node(&self, id: u64) -> Result<&Node, SchemaError> {
        self.registry.get(id)
    }

    /// Returns the resolution record of a node, if it was reached.
    #[must_use]
    pub fn resolved(&self, id: u64) -> Option<&ResolvedName> {
        self.names.get(&id)
    }

    /// Returns the Go identifier of a node.
    ///
    /// # Errors
    /// Returns `SchemaError` if the node is missing or was never resolved.
    pub fn name(&self, id: u64) -> Result<&str, SchemaError> {
        self.registry.get(id)?;
        self.names
            .get(&id)
            .map(|r| r.name.as_str())
            .ok_or(SchemaError::Unresolved { id })
    }

    /// Returns the context of a file node.
    ///
    /// # Errors
    /// Returns `SchemaError` if the id is not a file node.
    pub fn file(&self, id: u64) -> Result<&FileContext, SchemaError> {
        match self.files.get(&id) {
            Some(file) => Ok(file),
            None => {
                let node = self.registry.get(id)?;
                Err(SchemaError::UnexpectedKind {
                    id,
                    expected: "file",
                    found: node.kind_name(),
                })
            }
        }
    }

    /// Returns the context of the file that owns a resolved node.
    ///
    /// # Errors
    /// Returns `SchemaError` if the node is missing or was never resolved.
    pub fn file_of(&self, id: u64) -> Result<&FileContext, SchemaError> {
        self.registry.get(id)?;
        let resolved = self.names.get(&id).ok_or(SchemaError::Unresolved { id })?;
        self.file(resolved.file)
    }

    /// Returns the codecs propagated to a node.
    #[must_use]
    pub fn codecs(&self, id: u64) -> CodecSet {
        self.codecs.get(&id).copied().unwrap_or_default()
    }

    /// Returns the files requested for output.
    #[must_use]
    pub fn requested_files(&self) -> &[RequestedFile] {
        &self.requested
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Discovery {
    Nested,
    GroupField,
}

struct Resolver<'a> {
    registry: &'a NodeRegistry,
    catalog: &'a AnnotationCatalog,
    requested: &'a HashSet<u64>,
    names: HashMap<u64, ResolvedName>,
    files: HashMap<u64, FileContext>,
    codecs: HashMap<u64, CodecSet>,
}

impl Resolver<'_> {
    fn resolve_file(&mut self, file_id: u64) -> Result<(), SchemaError> {
        let registry = self.registry;
        let catalog = self.catalog;
        let file = registry.get(file_id)?;

        let codecs = catalog.codecs(&file.annotations);
        self.files.insert(
            file_id,
            FileContext {
                id: file_id,
                display_name: file.display_name.clone(),
                package: non_empty(catalog.text(&file.annotations, catalog.package)),
                import: non_empty(catalog.text(&file.annotations, catalog.import)),
                codecs,
                nodes: Vec::new(),
            },
        );
        tracing::debug!(file = %file.display_name, "resolving file");

        for nested in &file.nested_nodes {
            self.resolve(nested.id, "", &nested.name, file_id, Discovery::Nested)?;
        }
        if !codecs.is_empty() {
            self.propagate_codecs(file_id, codecs, &mut HashSet::new());
        }
        Ok(())
    }

    fn resolve(
        &mut self,
        id: u64,
        prefix: &str,
        raw_name: &str,
        file_id: u64,
        via: Discovery,
    ) -> Result<(), SchemaError> {
        let registry = self.registry;
        let catalog = self.catalog;

        let node = match registry.find(id) {
            Some(node) => node,
            None if via == Discovery::Nested && !self.requested.contains(&file_id) => {
                tracing::debug!(id, "skipping unregistered nested node");
                return Ok(());
            }
            None => return Err(SchemaError::NodeNotFound { id }),
        };

        if via == Discovery::Nested && node.is_group() {
            return Ok(());
        }
        if self.names.contains_key(&id) {
            return Ok(());
        }

        let effective = catalog.name_override(&node.annotations).unwrap_or(raw_name);
        let name = format!("{prefix}{}", capitalize(effective));
        tracing::trace!(id, name = %name, "resolved");
        self.names.insert(
            id,
            ResolvedName {
                name: name.clone(),
                file: file_id,
            },
        );

        if !node.is_group() {
            if let Some(file) = self.files.get_mut(&file_id) {
                file.nodes.push(id);
            }
        }

        for nested in &node.nested_nodes {
            self.resolve(nested.id, &name, &nested.name, file_id, Discovery::Nested)?;
        }

        if let Some(s) = node.as_struct() {
            for field in &s.fields {
                if let Some(group_id) = field.group_id() {
                    let field_name = catalog
                        .name_override(&field.annotations)
                        .unwrap_or(&field.name);
                    self.resolve(group_id, &name, field_name, file_id, Discovery::GroupField)?;
                }
            }
        }

        Ok(())
    }

    fn propagate_codecs(&mut self, id: u64, codecs: CodecSet, seen: &mut HashSet<u64>) {
        if !seen.insert(id) {
            return;
        }
        let entry = self.codecs.entry(id).or_default();
        *entry = entry.union(codecs);

        let registry = self.registry;
        let Some(node) = registry.find(id) else {
            return;
        };
        for nested in &node.nested_nodes {
            self.propagate_codecs(nested.id, codecs, seen);
        }
        if let Some(s) = node.as_struct() {
            for group_id in s.fields.iter().filter_map(|f| f.group_id()) {
                self.propagate_codecs(group_id, codecs, seen);
            }
        }
    }
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.filter(|t| !t.is_empty()).map(str::to_string)
}

/// Upper-cases the first character of an identifier.
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
