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

use crate::{Level, Result};

/// What the transport did with a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The notification was handed over to its recipients.
    Delivered,
    /// The transport declined the notification, e.g. because of rate limiting.
    Rejected,
}

/// Transport for alert notifications (e-mail, chat, pager, ...).
pub trait NotificationTransport: Send + Sync {
    /// Sends the serialized `payload` with the given severity `level`.
    fn dispatch(&self, payload: &str, level: Level) -> Result<DispatchOutcome>;
}
