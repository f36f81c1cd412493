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

use serde_json::json;

use crate::{ChainNode, Context, NextNode, Result};

/// Provider writing the backtrace and the chain of causes.
///
/// The section (`"trace"` by default) holds `frames`, the lines of the
/// captured backtrace (empty when capturing is disabled), and `causes`, the
/// messages of the underlying errors.
#[derive(Debug)]
pub struct ExceptionTraceProvider {
    section: String,
    next: NextNode,
}

impl ExceptionTraceProvider {
    /// Default name of the section.
    pub const DEFAULT_SECTION: &'static str = "trace";

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
}

impl Default for ExceptionTraceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainNode for ExceptionTraceProvider {
    fn successor(&self) -> &NextNode {
        &self.next
    }

    fn handle(&self, context: &mut Context<'_>) -> Result<()> {
        let exception = context.exception();
        let trace = json!({
            "frames": exception.frames(),
            "causes": exception.causes(),
        });
        context.set_var(self.section.as_str(), trace);

        self.handle_next(context)
    }
}
