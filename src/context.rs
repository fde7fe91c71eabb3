//! Per-run generation context.
//!
//! One `Context` is created for each generation run and threaded by `&mut`
//! through every handler call. It owns the cross-reference tables and the
//! deferred-statement buffer, so nothing leaks from one document to the next.

use crate::error::GenError;
use crate::node::{Node, NodeId};
use crate::registry::Registry;
use crate::vocabulary::Vocabulary;
use crate::xref::{CrossRefTables, Deferred, DeferredBuffer, Table};
use std::collections::HashSet;

pub struct Context<'r> {
    registry: &'r Registry,
    tables: CrossRefTables,
    deferred: DeferredBuffer,
    referenced: HashSet<NodeId>,
    last_sequential: Option<String>,
}

impl<'r> Context<'r> {
    /// `referenced` holds every key some relationship in the tree points at.
    pub fn new(registry: &'r Registry, referenced: HashSet<NodeId>) -> Self {
        Self {
            registry,
            tables: CrossRefTables::new(),
            deferred: DeferredBuffer::new(),
            referenced,
            last_sequential: None,
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn vocabulary(&self) -> &'r Vocabulary {
        self.registry.vocabulary()
    }

    /// Constructor for `node`'s exact type
    ///
    /// The error has no location; the expanding container attaches it.
    pub fn constructor(&self, node: &Node) -> Result<&'r str, GenError> {
        self.vocabulary()
            .constructor(&node.kind)
            .ok_or_else(|| GenError::MissingConstructor {
                node_type: node.kind.clone(),
                container: None,
                position: None,
            })
    }

    pub fn is_referenced(&self, key: &NodeId) -> bool {
        self.referenced.contains(key)
    }

    /// Register `node` under its key if some relationship needs it.
    ///
    /// Returns the registration statement to emit, if any. A node without a
    /// key can never be referenced.
    pub fn register_if_referenced(
        &mut self,
        table: Table,
        node: &Node,
        name: &str,
    ) -> Option<String> {
        let key = node.id.as_ref()?;
        if self.is_referenced(key) {
            Some(self.register(table, key, name))
        } else {
            None
        }
    }

    pub fn register(&mut self, table: Table, key: &NodeId, name: &str) -> String {
        self.tables.register(table, key, name)
    }

    pub fn defer(&mut self, deferred: Deferred) {
        self.deferred.push(deferred);
    }

    /// Record `name` as the most recently completed sequential container
    pub fn mark_sequential(&mut self, name: &str) {
        self.last_sequential = Some(name.to_string());
    }

    pub fn last_sequential(&self) -> Option<&str> {
        self.last_sequential.as_deref()
    }

    pub fn tables(&self) -> &CrossRefTables {
        &self.tables
    }

    pub fn pending(&self) -> usize {
        self.deferred.len()
    }

    /// Release the deferred statements, consuming the context.
    pub fn finish(self) -> Result<(Vec<String>, Option<String>), GenError> {
        let lines = self.deferred.flush(&self.tables)?;
        Ok((lines, self.last_sequential))
    }
}
