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

//! Interfaces of the destinations reports are dispatched to.
//!
//! The core only depends on the narrow traits defined here.  Retries and
//! timeouts, as well as thread-safety of shared resources, are the business
//! of the implementations.

mod logger;
mod notification;
mod ticket;

pub use logger::{LogFacadeAdapter, LoggerAdapter, WriteLoggerAdapter, DEFAULT_LOG_TARGET};
pub use notification::{DispatchOutcome, NotificationTransport};
pub use ticket::{Ticket, TicketOutcome, TicketTracker};
