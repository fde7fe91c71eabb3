//! # Cross-Reference Resolution
//!
//! Relationship nodes (slurs, staff groups, wedges) point at other nodes by
//! identity key. Those nodes may be emitted later in the traversal or deeper
//! in the tree, so a relationship never binds its members inline. Instead:
//!
//! 1. Nodes that are referenced register their generated name in a table
//!    (`notes['n1'] = score_e0_e1_e4`) at the point they are emitted.
//! 2. The relationship queues a [`Deferred`] statement written purely in
//!    terms of table lookups (`spanners['sl1'].addSpannedElements([...])`).
//! 3. After the whole tree is expanded, [`DeferredBuffer::flush`] checks that
//!    every key a statement needs was registered, then releases the
//!    statements in the order they were queued.
//!
//! The Rust side mirrors each table so that a reference to a node outside the
//! tree is caught here rather than as a `KeyError` in the generated program.

use crate::error::GenError;
use crate::node::NodeId;
use crate::python;
use std::collections::HashMap;

/// A named key → variable table in the generated program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Parts,
    Notes,
    Spanners,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Parts, Table::Notes, Table::Spanners];

    pub fn name(self) -> &'static str {
        match self {
            Table::Parts => "parts",
            Table::Notes => "notes",
            Table::Spanners => "spanners",
        }
    }

    /// `parts = {}`
    pub fn init_statement(self) -> String {
        format!("{} = {{}}", self.name())
    }

    /// `notes['n1']`
    pub fn lookup(self, key: &NodeId) -> String {
        format!("{}[{}]", self.name(), python::string(key.as_str()))
    }
}

/// A key some relationship needs, and the table it must be found in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub table: Table,
    pub key: NodeId,
}

impl Reference {
    pub fn new(table: Table, key: NodeId) -> Self {
        Self { table, key }
    }
}

/// Run-scoped mirror of the generated program's tables
#[derive(Debug, Default)]
pub struct CrossRefTables {
    entries: HashMap<Table, HashMap<NodeId, String>>,
}

impl CrossRefTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` → `name` and return the statement that does the same in
    /// the generated program.
    pub fn register(&mut self, table: Table, key: &NodeId, name: &str) -> String {
        self.entries
            .entry(table)
            .or_default()
            .insert(key.clone(), name.to_string());
        format!("{} = {}", table.lookup(key), name)
    }

    /// Generated name registered under `key`, if any
    pub fn get(&self, table: Table, key: &NodeId) -> Option<&str> {
        self.entries.get(&table)?.get(key).map(String::as_str)
    }

    pub fn len(&self, table: Table) -> usize {
        self.entries.get(&table).map_or(0, HashMap::len)
    }
}

/// One statement that can only run once the whole tree exists
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred {
    /// Type of the node that queued the statement, for diagnostics
    pub relationship: String,
    pub statement: String,
    pub requires: Vec<Reference>,
}

/// Statements queued during traversal, released once afterwards
#[derive(Debug, Default)]
pub struct DeferredBuffer {
    entries: Vec<Deferred>,
}

impl DeferredBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, deferred: Deferred) {
        self.entries.push(deferred);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Release every statement in accumulation order.
    ///
    /// Fails on the first statement whose required key was never registered.
    pub fn flush(self, tables: &CrossRefTables) -> Result<Vec<String>, GenError> {
        let mut lines = Vec::with_capacity(self.entries.len());
        for deferred in self.entries {
            for reference in &deferred.requires {
                if tables.get(reference.table, &reference.key).is_none() {
                    return Err(GenError::DanglingReference {
                        relationship: deferred.relationship,
                        key: reference.key.to_string(),
                        table: reference.table.name(),
                    });
                }
            }
            lines.push(deferred.statement);
        }
        Ok(lines)
    }
}
