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

use serde_json::{json, Value};

use crate::{ChainNode, Context, Exception, NextNode, Result};

/// Provider writing the basic facts about the exception.
///
/// The section (`"summary"` by default) holds the `class`, `code`, `message`,
/// `file` and `line` of the exception.
#[derive(Debug)]
pub struct ExceptionSummaryProvider {
    section: String,
    next: NextNode,
}

impl ExceptionSummaryProvider {
    /// Default name of the section.
    pub const DEFAULT_SECTION: &'static str = "summary";

    /// Creates a provider writing into the [default section][Self::DEFAULT_SECTION].
    pub fn new() -> Self {
        Self::with_section(Self::DEFAULT_SECTION)
    }

    /// Creates a provider writing into the `section`.
    pub fn with_section<S: Into<String>>(section: S) -> Self {
        Self {
            section: section.into(),
            next: NextNode::new(),
        }
    }

    /// Returns the name of the section.
    pub fn section(&self) -> &str {
        &self.section
    }

    fn summarize(exception: &Exception) -> Value {
        json!({
            "class": exception.class(),
            "code": exception.code(),
            "message": exception.message(),
            "file": exception.file(),
            "line": exception.line(),
        })
    }
}

impl Default for ExceptionSummaryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainNode for ExceptionSummaryProvider {
    fn successor(&self) -> &NextNode {
        &self.next
    }

    fn handle(&self, context: &mut Context<'_>) -> Result<()> {
        let summary = Self::summarize(context.exception());
        context.set_var(self.section.as_str(), summary);

        self.handle_next(context)
    }
}
