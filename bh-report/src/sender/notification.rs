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
    adapter::NotificationTransport, ChainNode, Context, DataHolder, NextNode, Result, Serializer,
};

/// Sender pushing the serialized report through a [`NotificationTransport`].
///
/// The [outcome][crate::adapter::DispatchOutcome] of the dispatch is only
/// logged; the run continues either way.
pub struct NotificationSender {
    transport: Arc<dyn NotificationTransport>,
    core: SenderCore,
}

impl NotificationSender {
    /// Creates a sender notifying through the `transport`.
    pub fn new(
        transport: Arc<dyn NotificationTransport>,
        serializer: Arc<dyn Serializer>,
        configuration: DataHolder,
    ) -> Self {
        Self {
            transport,
            core: SenderCore::new(serializer, configuration),
        }
    }
}

impl std::fmt::Debug for NotificationSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationSender")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl ChainNode for NotificationSender {
    fn successor(&self) -> &NextNode {
        &self.core.next
    }

    fn handle(&self, context: &mut Context<'_>) -> Result<()> {
        let payload = self.core.serialize(context)?;
        let level = self.core.resolve_level(context);

        if self.core.suppresses(level) {
            log::debug!("Report at level {level} suppressed by the notification sender");
        } else {
            let outcome = self
                .transport
                .dispatch(&payload, level)
                .ctx(|| format!("notifying about a report at level {level}"))?;
            log::debug!("Notification at level {level}: {outcome:?}");
        }

        self.handle_next(context)
    }
}
