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

use serde_json::Value;

use crate::{ChainNode, Context, DataHolder, NextNode, Result};

/// Provider writing a fixed set of custom tags, e.g. the release, the
/// deployment or request metadata known at construction time.
#[derive(Debug)]
pub struct TagsProvider {
    section: String,
    tags: DataHolder,
    next: NextNode,
}

impl TagsProvider {
    /// Default name of the section.
    pub const DEFAULT_SECTION: &'static str = "tags";

    /// Creates a provider writing `tags` into the [default section][Self::DEFAULT_SECTION].
    pub fn new(tags: DataHolder) -> Self {
        Self::with_section(Self::DEFAULT_SECTION, tags)
    }

    /// Creates a provider writing `tags` into the `section`.
    pub fn with_section<S: Into<String>>(section: S, tags: DataHolder) -> Self {
        Self {
            section: section.into(),
            tags,
            next: NextNode::new(),
        }
    }

    /// Adds a single tag.
    pub fn with_tag<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.tags.set(key, value);
        self
    }
}

impl ChainNode for TagsProvider {
    fn successor(&self) -> &NextNode {
        &self.next
    }

    fn handle(&self, context: &mut Context<'_>) -> Result<()> {
        context.set_var(self.section.as_str(), self.tags.clone().into_value());

        self.handle_next(context)
    }
}
