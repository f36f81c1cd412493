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

use std::sync::Arc;

use bherror::traits::ErrorContext as _;

use super::SenderCore;
use crate::{
    adapter::LoggerAdapter, ChainNode, Context, DataHolder, NextNode, Result, Serializer,
};

/// Sender writing the serialized report into a [`LoggerAdapter`].
pub struct LogSender {
    adapter: Arc<dyn LoggerAdapter>,
    core: SenderCore,
}

impl LogSender {
    /// Creates a sender logging through the `adapter`, with reports encoded
    /// by the `serializer` as instructed by the `configuration`.
    pub fn new(
        adapter: Arc<dyn LoggerAdapter>,
        serializer: Arc<dyn Serializer>,
        configuration: DataHolder,
    ) -> Self {
        Self {
            adapter,
            core: SenderCore::new(serializer, configuration),
        }
    }
}

impl std::fmt::Debug for LogSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogSender")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl ChainNode for LogSender {
    fn successor(&self) -> &NextNode {
        &self.core.next
    }

    fn handle(&self, context: &mut Context<'_>) -> Result<()> {
        let payload = self.core.serialize(context)?;
        let level = self.core.resolve_level(context);

        if self.core.suppresses(level) {
            log::debug!("Report at level {level} suppressed by the log sender");
        } else {
            self.adapter
                .log(&payload, level)
                .ctx(|| format!("logging a report at level {level}"))?;
        }

        self.handle_next(context)
    }
}
