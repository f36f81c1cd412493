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

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::{ChainNode, Context, NextNode, Result};

/// Provider writing the time of the report run, as an RFC 3339 string
/// (`utc`) and as a Unix timestamp (`unix`).
#[derive(Debug)]
pub struct TimestampProvider {
    section: String,
    clock: fn() -> DateTime<Utc>,
    next: NextNode,
}

impl TimestampProvider {
    /// Default name of the section.
    pub const DEFAULT_SECTION: &'static str = "time";

    /// Creates a provider writing into the [default section][Self::DEFAULT_SECTION].
    pub fn new() -> Self {
        Self::with_section(Self::DEFAULT_SECTION)
    }

    /// Creates a provider writing into the `section`.
    pub fn with_section<S: Into<String>>(section: S) -> Self {
        Self {
            section: section.into(),
            clock: Utc::now,
            next: NextNode::new(),
        }
    }

    /// Replaces the source of the current time.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }
}

impl Default for TimestampProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainNode for TimestampProvider {
    fn successor(&self) -> &NextNode {
        &self.next
    }

    fn handle(&self, context: &mut Context<'_>) -> Result<()> {
        let now = (self.clock)();
        let time = json!({
            "utc": now.to_rfc3339(),
            "unix": now.timestamp(),
        });
        context.set_var(self.section.as_str(), time);

        self.handle_next(context)
    }
}
