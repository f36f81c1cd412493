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

use serde::Serialize;

use crate::{Level, Result};

/// An issue to be opened (or updated) in a ticket tracker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    /// Short summary, `"<class>: <message>"`.
    pub title: String,
    /// The serialized report.
    pub body: String,
    /// Severity of the report.
    pub level: Level,
    /// Identifies repeated occurrences of the same error, so the tracker can
    /// update an existing ticket instead of opening a new one.
    pub fingerprint: String,
}

/// What the tracker did with a [`Ticket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketOutcome {
    /// A new ticket was opened.
    Created,
    /// A ticket with the same fingerprint already existed and was updated.
    Updated,
}

/// Client of an issue tracker.
pub trait TicketTracker: Send + Sync {
    /// Finds the ticket with the same [fingerprint][Ticket::fingerprint] and
    /// updates it, or creates a new one.
    fn create_or_update(&self, ticket: &Ticket) -> Result<TicketOutcome>;
}
