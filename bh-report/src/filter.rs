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

//! Stages that decide whether the run continues.
//!
//! Unlike providers and senders, a filter terminates the chain when its
//! condition holds, so nothing after it sees the report.

use crate::{sender, ChainNode, Context, Level, NextNode, Result};

/// Filter stopping reports of exceptions whose class is denied.
#[derive(Debug)]
pub struct ClassFilter {
    denied: Vec<String>,
    next: NextNode,
}

impl ClassFilter {
    /// Creates a filter stopping the exceptions of the `denied` classes.
    pub fn new<I, S>(denied: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            denied: denied.into_iter().map(Into::into).collect(),
            next: NextNode::new(),
        }
    }
}

impl ChainNode for ClassFilter {
    fn successor(&self) -> &NextNode {
        &self.next
    }

    fn handle(&self, context: &mut Context<'_>) -> Result<()> {
        let class = context.exception().class();

        if self.denied.iter().any(|denied| denied == class) {
            log::debug!("Report of {class} stopped by the class filter");
            return Ok(());
        }

        self.handle_next(context)
    }
}

/// Filter stopping reports whose level is below a threshold.
///
/// The level is read from the `log_level` var of the run's context,
/// [`Level::Info`] if it is not set.
#[derive(Debug)]
pub struct LevelFilter {
    threshold: Level,
    next: NextNode,
}

impl LevelFilter {
    /// Creates a filter stopping reports below `threshold`.
    pub fn new(threshold: Level) -> Self {
        Self {
            threshold,
            next: NextNode::new(),
        }
    }
}

impl ChainNode for LevelFilter {
    fn successor(&self) -> &NextNode {
        &self.next
    }

    fn handle(&self, context: &mut Context<'_>) -> Result<()> {
        let level = sender::level_var(context.data(), "context").unwrap_or(sender::DEFAULT_LEVEL);

        if level < self.threshold {
            log::debug!("Report at level {level} stopped by the level filter");
            return Ok(());
        }

        self.handle_next(context)
    }
}
