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
use serde_json::Value;

use super::SenderCore;
use crate::{
    adapter::{Ticket, TicketTracker},
    ChainNode, Context, DataHolder, NextNode, Result, Serializer,
};

/// Configuration key naming the section the ticket title is read from.
pub const SUMMARY_SECTION: &str = "summary_section";

/// Sender opening (or updating) a ticket in a [`TicketTracker`].
///
/// The title is `"<class>: <message>"`, read from the summary section of the
/// run (see [`SUMMARY_SECTION`], `"summary"` by default) and falling back to
/// the exception itself.  The fingerprint is `"<class>:<file>:<line>"` of the
/// exception, so repeated occurrences of the same error end up in one
/// ticket.
pub struct TicketSender {
    tracker: Arc<dyn TicketTracker>,
    core: SenderCore,
}

impl TicketSender {
    /// Creates a sender filing tickets with the `tracker`.
    pub fn new(
        tracker: Arc<dyn TicketTracker>,
        serializer: Arc<dyn Serializer>,
        configuration: DataHolder,
    ) -> Self {
        Self {
            tracker,
            core: SenderCore::new(serializer, configuration),
        }
    }

    fn title(&self, context: &Context<'_>) -> String {
        let exception = context.exception();
        let section = self
            .core
            .configuration()
            .find(SUMMARY_SECTION)
            .and_then(Value::as_str)
            .unwrap_or(crate::provider::ExceptionSummaryProvider::DEFAULT_SECTION);
        let summary = context.data().find(section);
        let field = |name: &str| summary.and_then(|summary| summary.get(name)?.as_str());

        format!(
            "{}: {}",
            field("class").unwrap_or(exception.class()),
            field("message").unwrap_or(exception.message()),
        )
    }
}

impl std::fmt::Debug for TicketSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketSender")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl ChainNode for TicketSender {
    fn successor(&self) -> &NextNode {
        &self.core.next
    }

    fn handle(&self, context: &mut Context<'_>) -> Result<()> {
        let body = self.core.serialize(context)?;
        let level = self.core.resolve_level(context);

        if self.core.suppresses(level) {
            log::debug!("Report at level {level} suppressed by the ticket sender");
        } else {
            let exception = context.exception();
            let ticket = Ticket {
                title: self.title(context),
                body,
                level,
                fingerprint: format!(
                    "{}:{}:{}",
                    exception.class(),
                    exception.file(),
                    exception.line()
                ),
            };

            let outcome = self
                .tracker
                .create_or_update(&ticket)
                .ctx(|| format!("filing ticket {}", ticket.fingerprint))?;
            log::debug!("Ticket {} {outcome:?}", ticket.fingerprint);
        }

        self.handle_next(context)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::{
        adapter::TicketOutcome,
        provider::ExceptionSummaryProvider,
        test_utils::{FailingTracker, RecordingNode, RecordingTracker},
        Error, Exception, JsonSerializer, Level,
    };

    #[test]
    fn test_ticket() {
        let tracker = Arc::new(RecordingTracker::default());
        let sender = TicketSender::new(
            tracker.clone(),
            Arc::new(JsonSerializer),
            DataHolder::try_from(json!({ "log_level": "ERROR" })).unwrap(),
        );

        let line = line!() + 1;
        let exception = Exception::with_class("QueryError", "deadlock", 1213);
        let mut context = Context::new(&exception);
        ExceptionSummaryProvider::new().handle(&mut context).unwrap();

        sender.handle(&mut context).unwrap();

        let tickets = tracker.tickets();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].title, "QueryError: deadlock");
        assert_eq!(tickets[0].level, Level::Error);
        assert_eq!(
            tickets[0].fingerprint,
            format!("QueryError:{}:{line}", file!())
        );
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&tickets[0].body).unwrap()["summary"]
                ["code"],
            json!(1213)
        );
    }

    #[test]
    fn test_repeated_error_updates_ticket() {
        let tracker = Arc::new(RecordingTracker::default());
        let sender = TicketSender::new(tracker.clone(), Arc::new(JsonSerializer), DataHolder::new());

        let exception = Exception::new("boom", 0);
        sender.handle(&mut Context::new(&exception)).unwrap();
        sender.handle(&mut Context::new(&exception)).unwrap();

        assert_eq!(
            tracker.outcomes(),
            [TicketOutcome::Created, TicketOutcome::Updated]
        );
    }

    #[test]
    fn test_title_from_custom_summary_section() {
        let tracker = Arc::new(RecordingTracker::default());
        let sender = TicketSender::new(
            tracker.clone(),
            Arc::new(JsonSerializer),
            DataHolder::try_from(json!({ "summary_section": "overview" })).unwrap(),
        );

        let exception = Exception::new("boom", 0);
        let mut context = Context::new(&exception);
        context.set_var("overview", json!({ "class": "Renamed", "message": "rewritten" }));

        sender.handle(&mut context).unwrap();

        assert_eq!(tracker.tickets()[0].title, "Renamed: rewritten");
    }

    #[test]
    fn test_title_without_summary() {
        let tracker = Arc::new(RecordingTracker::default());
        let sender = TicketSender::new(tracker.clone(), Arc::new(JsonSerializer), DataHolder::new());

        let exception = Exception::new("boom", 0);
        sender.handle(&mut Context::new(&exception)).unwrap();

        assert_eq!(tracker.tickets()[0].title, "Exception: boom");
    }

    #[test]
    fn test_suppressed_ticket_still_forwards() {
        let tracker = Arc::new(RecordingTracker::default());
        let journal = Arc::new(Mutex::new(Vec::new()));
        let sender = TicketSender::new(
            tracker.clone(),
            Arc::new(JsonSerializer),
            DataHolder::try_from(json!({ "min_level": "CRITICAL" })).unwrap(),
        );
        sender.next_node(Arc::new(RecordingNode::new("next", &journal)));

        let exception = Exception::new("boom", 0);
        sender.handle(&mut Context::new(&exception)).unwrap();

        assert!(tracker.tickets().is_empty());
        assert_eq!(*journal.lock().unwrap(), ["next"]);
    }

    #[test]
    fn test_tracker_failure_aborts_chain() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let sender = TicketSender::new(
            Arc::new(FailingTracker),
            Arc::new(JsonSerializer),
            DataHolder::new(),
        );
        sender.next_node(Arc::new(RecordingNode::new("next", &journal)));

        let exception = Exception::new("boom", 0);
        let error = sender.handle(&mut Context::new(&exception)).unwrap_err();

        assert_matches!(error.error, Error::Dispatch(_));
        assert!(journal.lock().unwrap().is_empty());
    }
}
