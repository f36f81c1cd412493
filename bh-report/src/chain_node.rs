// Copyright (C) 2020-2026  The Blockhouse Technology Limited (TBTL).
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public
// License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The capability shared by every stage of a report chain.
//!
//! Stages are linked into a singly linked list: every node holds at most one
//! successor and decides by itself whether the run continues past it.  A
//! node does not own the chain; the [`Pipeline`][crate::Pipeline] (or
//! whoever links the nodes) does.
//!
//! Linking nodes into a cycle is not detected and makes a run recurse until
//! the stack is exhausted.

use std::sync::{Arc, PoisonError, RwLock};

use crate::{Context, Result};

/// Shared handle to a node of the chain.
pub type NodeRef = Arc<dyn ChainNode>;

/// Slot holding the successor of a node.
///
/// Every [`ChainNode`] implementation embeds one and exposes it through
/// [`ChainNode::successor`].
#[derive(Default)]
pub struct NextNode {
    next: RwLock<Option<NodeRef>>,
}

impl NextNode {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the successor, if one is set.
    pub fn get(&self) -> Option<NodeRef> {
        self.next
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sets the successor, replacing the previous one.
    pub fn set(&self, node: NodeRef) {
        *self.next.write().unwrap_or_else(PoisonError::into_inner) = Some(node);
    }
}

impl std::fmt::Debug for NextNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NextNode")
            .field("linked", &self.get().is_some())
            .finish()
    }
}

/// A stage of the report chain.
///
/// Implementations only have to provide [`ChainNode::successor`] and
/// [`ChainNode::handle`].  `handle` is responsible for calling
/// [`ChainNode::handle_next`] if the run should continue; not calling it
/// terminates the chain at this node.
pub trait ChainNode: Send + Sync {
    /// Returns the slot holding the successor of this node.
    fn successor(&self) -> &NextNode;

    /// Processes the report run.
    fn handle(&self, context: &mut Context<'_>) -> Result<()>;

    /// Links `node` as the successor of this node, replacing the previous one,
    /// and returns it so that calls can be chained.
    fn next_node(&self, node: NodeRef) -> NodeRef {
        self.successor().set(Arc::clone(&node));
        node
    }

    /// Hands the run over to the successor.  Does nothing if there is none.
    fn handle_next(&self, context: &mut Context<'_>) -> Result<()> {
        // The lock is released before the successor runs.
        match self.successor().get() {
            Some(next) => next.handle(context),
            None => Ok(()),
        }
    }
}
