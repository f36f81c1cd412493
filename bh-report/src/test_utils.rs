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

use bherror::Error;
use serde_json::Value;

use crate::{
    adapter::{
        DispatchOutcome, LoggerAdapter, NotificationTransport, Ticket, TicketOutcome,
        TicketTracker,
    },
    ChainNode, Context, DataHolder, Level, NextNode, Result, Serializer,
};

/// Node appending its name to a shared journal whenever it handles a run.
pub(crate) struct RecordingNode {
    name: &'static str,
    journal: Arc<Mutex<Vec<&'static str>>>,
    forward: bool,
    next: NextNode,
}

impl RecordingNode {
    pub(crate) fn new(name: &'static str, journal: &Arc<Mutex<Vec<&'static str>>>) -> Self {
        Self {
            name,
            journal: Arc::clone(journal),
            forward: true,
            next: NextNode::new(),
        }
    }

    /// Like [`RecordingNode::new`], but never hands the run over.
    pub(crate) fn terminal(name: &'static str, journal: &Arc<Mutex<Vec<&'static str>>>) -> Self {
        Self {
            forward: false,
            ..Self::new(name, journal)
        }
    }
}

impl ChainNode for RecordingNode {
    fn successor(&self) -> &NextNode {
        &self.next
    }

    fn handle(&self, context: &mut Context<'_>) -> Result<()> {
        self.journal.lock().unwrap().push(self.name);

        if self.forward {
            self.handle_next(context)
        } else {
            Ok(())
        }
    }
}

/// Serializer returning a fixed string and recording what it was asked for.
pub(crate) struct RecordingSerializer {
    output: String,
    calls: Mutex<Vec<(Value, String)>>,
}

impl RecordingSerializer {
    pub(crate) fn new(output: &str) -> Self {
        Self {
            output: output.to_owned(),
            calls: Mutex::default(),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(Value, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Serializer for RecordingSerializer {
    fn supports(&self, _format: &str) -> bool {
        true
    }

    fn serialize(&self, data: &DataHolder, format: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((data.clone().into_value(), format.to_owned()));
        Ok(self.output.clone())
    }
}

#[derive(Default)]
pub(crate) struct RecordingLogger {
    entries: Mutex<Vec<(String, Level)>>,
}

impl RecordingLogger {
    pub(crate) fn entries(&self) -> Vec<(String, Level)> {
        self.entries.lock().unwrap().clone()
    }
}

impl LoggerAdapter for RecordingLogger {
    fn log(&self, message: &str, level: Level) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .push((message.to_owned(), level));
        Ok(())
    }
}

pub(crate) struct FailingLogger;

impl LoggerAdapter for FailingLogger {
    fn log(&self, _message: &str, _level: Level) -> Result<()> {
        Err(Error::root(crate::Error::Dispatch("failing logger".to_owned())))
    }
}

/// Tracker answering [`TicketOutcome::Updated`] for fingerprints it has seen.
#[derive(Default)]
pub(crate) struct RecordingTracker {
    tickets: Mutex<Vec<Ticket>>,
    outcomes: Mutex<Vec<TicketOutcome>>,
}

impl RecordingTracker {
    pub(crate) fn tickets(&self) -> Vec<Ticket> {
        self.tickets.lock().unwrap().clone()
    }

    pub(crate) fn outcomes(&self) -> Vec<TicketOutcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl TicketTracker for RecordingTracker {
    fn create_or_update(&self, ticket: &Ticket) -> Result<TicketOutcome> {
        let mut tickets = self.tickets.lock().unwrap();

        let outcome = if tickets
            .iter()
            .any(|known| known.fingerprint == ticket.fingerprint)
        {
            TicketOutcome::Updated
        } else {
            TicketOutcome::Created
        };

        tickets.push(ticket.clone());
        self.outcomes.lock().unwrap().push(outcome);
        Ok(outcome)
    }
}

pub(crate) struct FailingTracker;

impl TicketTracker for FailingTracker {
    fn create_or_update(&self, _ticket: &Ticket) -> Result<TicketOutcome> {
        Err(Error::root(crate::Error::Dispatch("failing tracker".to_owned())))
    }
}

pub(crate) struct RecordingTransport {
    outcome: DispatchOutcome,
    dispatched: Mutex<Vec<(String, Level)>>,
}

impl RecordingTransport {
    pub(crate) fn new(outcome: DispatchOutcome) -> Self {
        Self {
            outcome,
            dispatched: Mutex::default(),
        }
    }

    pub(crate) fn dispatched(&self) -> Vec<(String, Level)> {
        self.dispatched.lock().unwrap().clone()
    }
}

impl NotificationTransport for RecordingTransport {
    fn dispatch(&self, payload: &str, level: Level) -> Result<DispatchOutcome> {
        self.dispatched
            .lock()
            .unwrap()
            .push((payload.to_owned(), level));
        Ok(self.outcome)
    }
}
