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

use std::sync::{Arc, Mutex};

use bh_report::{
    adapter::{Ticket, TicketOutcome, TicketTracker, WriteLoggerAdapter},
    filter::ClassFilter,
    provider::{EnvironmentProvider, ExceptionSummaryProvider, ExceptionTraceProvider, TagsProvider},
    sender::{LogSender, TicketSender},
    Context, DataHolder, Exception, JsonSerializer, Level, PipelineBuilder,
};
use serde_json::json;

/// Tracker keeping the tickets in memory.
#[derive(Default)]
struct InMemoryTracker {
    tickets: Mutex<Vec<Ticket>>,
}

impl TicketTracker for InMemoryTracker {
    fn create_or_update(&self, ticket: &Ticket) -> bh_report::Result<TicketOutcome> {
        let mut tickets = self.tickets.lock().unwrap();

        match tickets
            .iter_mut()
            .find(|known| known.fingerprint == ticket.fingerprint)
        {
            Some(known) => {
                *known = ticket.clone();
                Ok(TicketOutcome::Updated)
            }
            None => {
                tickets.push(ticket.clone());
                Ok(TicketOutcome::Created)
            }
        }
    }
}

#[derive(Debug)]
struct ConnectionRefused;

impl std::fmt::Display for ConnectionRefused {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "connection refused")
    }
}

impl std::error::Error for ConnectionRefused {}

fn main() {
    let tracker = Arc::new(InMemoryTracker::default());

    let pipeline = PipelineBuilder::new()
        .provider(ExceptionSummaryProvider::new())
        .provider(ExceptionTraceProvider::new())
        .provider(EnvironmentProvider::new().with_variables(["HOSTNAME"]))
        .provider(TagsProvider::new(DataHolder::new()).with_tag("release", env!("CARGO_PKG_VERSION")))
        .filter(ClassFilter::new(["NotFound"]))
        .sender(LogSender::new(
            Arc::new(WriteLoggerAdapter::new(std::io::stdout())),
            Arc::new(JsonSerializer),
            DataHolder::try_from(json!({ "format": "json", "log_level": "WARNING" })).unwrap(),
        ))
        .sender(TicketSender::new(
            tracker.clone(),
            Arc::new(JsonSerializer),
            DataHolder::try_from(json!({
                "format": "pretty_json",
                "min_level": "ERROR",
                "sections": ["summary", "trace"],
            }))
            .unwrap(),
        ))
        .build();

    // Logged at WARNING, below the ticket threshold.
    pipeline
        .report(&Exception::new("cache miss storm", 1))
        .unwrap();

    // Denied by the class filter, nothing is reported.
    pipeline
        .report(&Exception::with_class("NotFound", "no such page", 404))
        .unwrap();

    // Logged and filed as a ticket, twice; the second run updates the ticket.
    let exception = Exception::from_error(&ConnectionRefused);
    for _ in 0..2 {
        let mut context = Context::new(&exception);
        context.set_var("log_level", Level::Critical);
        pipeline.report_with(&mut context).unwrap();
    }

    for ticket in tracker.tickets.lock().unwrap().iter() {
        println!("ticket {} [{}]\n{}", ticket.title, ticket.level, ticket.body);
    }
}
