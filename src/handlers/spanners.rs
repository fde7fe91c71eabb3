//! Relationship nodes: slurs, wedges, ottavas, staff groups.
//!
//! A spanner is constructed where it appears in the tree and, when it has an
//! identity key, registered in the `spanners` table. Its members are listed
//! by key in the `spanned` attribute and bound by one deferred statement:
//!
//! ```text
//! score_e2 = spanner.Slur()
//! spanners['sl1'] = score_e2
//! score.insert(0, score_e2)
//! ...
//! spanners['sl1'].addSpannedElements([notes['n1'], notes['n2']])
//! ```

use super::{construct, Emission, Handler, Placement};
use crate::context::Context;
use crate::error::GenError;
use crate::node::{Node, NodeId};
use crate::python::{self, Args};
use crate::xref::{Deferred, Reference, Table};

pub struct SpannerHandler {
    /// Table the spanned keys are looked up in
    members: Table,
    /// Attributes passed to the constructor as keywords, in this order
    keywords: &'static [&'static str],
}

impl SpannerHandler {
    pub fn new(members: Table, keywords: &'static [&'static str]) -> Self {
        Self { members, keywords }
    }

    fn spanned(&self, node: &Node) -> Vec<NodeId> {
        node.str_list_attr("spanned")
            .map(|keys| keys.into_iter().map(NodeId::from).collect())
            .unwrap_or_default()
    }
}

impl Handler for SpannerHandler {
    fn emit(&self, node: &Node, name: &str, cx: &mut Context<'_>) -> Result<Emission, GenError> {
        let constructor = cx.constructor(node)?;
        let mut args = Args::new();
        for keyword in self.keywords {
            args = args.keyword_opt(keyword, node.get(keyword).map(python::value));
        }

        let mut lines = vec![construct(name, constructor, &args)];
        let mut requires = Vec::new();
        // A spanner without a key is addressed by its generated name
        let target = match &node.id {
            Some(key) => {
                lines.push(cx.register(Table::Spanners, key, name));
                requires.push(Reference::new(Table::Spanners, key.clone()));
                Table::Spanners.lookup(key)
            }
            None => name.to_string(),
        };

        let spanned = self.spanned(node);
        if !spanned.is_empty() {
            let members = spanned.iter().map(|key| self.members.lookup(key));
            let statement =
                format!("{}.addSpannedElements({})", target, python::list(members));
            requires.extend(self.references(node));
            cx.defer(Deferred {
                relationship: node.kind.clone(),
                statement,
                requires,
            });
        }

        Ok(Emission::new(lines, Placement::InsertFront))
    }

    fn references(&self, node: &Node) -> Vec<Reference> {
        self.spanned(node)
            .into_iter()
            .map(|key| Reference::new(self.members, key))
            .collect()
    }
}
