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

//! Assembly of providers, filters and senders into a chain.

use std::sync::Arc;

use crate::{ChainNode, Context, Exception, NodeRef, Result};

/// Builder of a [`Pipeline`].
///
/// The nodes are linked in the order providers, filters, senders, each group
/// in the order the nodes were added.  Providers come first so that the data
/// is complete before any sender reads it.
#[derive(Default)]
pub struct PipelineBuilder {
    providers: Vec<NodeRef>,
    filters: Vec<NodeRef>,
    senders: Vec<NodeRef>,
}

impl PipelineBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider.
    pub fn provider<N: ChainNode + 'static>(mut self, node: N) -> Self {
        self.providers.push(Arc::new(node));
        self
    }

    /// Appends a filter.
    pub fn filter<N: ChainNode + 'static>(mut self, node: N) -> Self {
        self.filters.push(Arc::new(node));
        self
    }

    /// Appends a sender.
    pub fn sender<N: ChainNode + 'static>(mut self, node: N) -> Self {
        self.senders.push(Arc::new(node));
        self
    }

    /// Links the nodes and returns the [`Pipeline`].
    pub fn build(self) -> Pipeline {
        let nodes: Vec<NodeRef> = self
            .providers
            .into_iter()
            .chain(self.filters)
            .chain(self.senders)
            .collect();

        for pair in nodes.windows(2) {
            pair[0].next_node(Arc::clone(&pair[1]));
        }

        Pipeline { nodes }
    }
}

/// A linked chain of report stages with a single entry point.
///
/// Every call to [`Pipeline::report`] runs with its own [`Context`], so a
/// pipeline can be shared between threads and used concurrently.
pub struct Pipeline {
    nodes: Vec<NodeRef>,
}

impl Pipeline {
    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the pipeline has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Reports the `exception` through the chain.
    ///
    /// Returns once every reachable node ran, or with the first error a node
    /// returned.  Nothing written by the nodes before the error is rolled
    /// back, and nothing is retried.
    pub fn report(&self, exception: &Exception) -> Result<()> {
        self.report_with(&mut Context::new(exception))
    }

    /// Reports through the chain using a prepared `context`, e.g. one seeded
    /// with a per-run `log_level`.
    pub fn report_with(&self, context: &mut Context<'_>) -> Result<()> {
        let Some(head) = self.nodes.first() else {
            log::debug!("Nothing to report {} to", context.exception());
            return Ok(());
        };

        log::debug!("Reporting {}", context.exception());
        head.handle(context)?;
        log::debug!("Reported {}", context.exception());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use assert_matches::assert_matches;
    use serde_json::{json, Value};

    use super::*;
    use crate::{
        adapter::{DispatchOutcome, TicketOutcome},
        filter::ClassFilter,
        provider::{ExceptionSummaryProvider, ExceptionTraceProvider, TagsProvider},
        sender::{LogSender, NotificationSender, TicketSender},
        test_utils::{
            FailingLogger, RecordingLogger, RecordingNode, RecordingTracker, RecordingTransport,
        },
        DataHolder, Error, JsonSerializer, Level,
    };

    fn log_sender(logger: Arc<RecordingLogger>) -> LogSender {
        LogSender::new(logger, Arc::new(JsonSerializer), DataHolder::new())
    }

    #[test]
    fn test_end_to_end() {
        let logger = Arc::new(RecordingLogger::default());
        let pipeline = PipelineBuilder::new()
            .provider(ExceptionSummaryProvider::new())
            .sender(log_sender(logger.clone()))
            .build();

        pipeline.report(&Exception::new("boom", 42)).unwrap();

        let entries = logger.entries();
        assert_eq!(entries.len(), 1);

        let (payload, level) = &entries[0];
        let payload: Value = serde_json::from_str(payload).unwrap();
        assert_eq!(payload["summary"]["message"], json!("boom"));
        assert_eq!(payload["summary"]["code"], json!(42));
        assert_eq!(*level, Level::Info);
    }

    #[test]
    fn test_providers_run_before_senders() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let pipeline = PipelineBuilder::new()
            .sender(RecordingNode::new("sender", &journal))
            .filter(RecordingNode::new("filter", &journal))
            .provider(RecordingNode::new("provider 1", &journal))
            .provider(RecordingNode::new("provider 2", &journal))
            .build();

        assert_eq!(pipeline.len(), 4);
        pipeline.report(&Exception::new("boom", 0)).unwrap();

        assert_eq!(
            *journal.lock().unwrap(),
            ["provider 1", "provider 2", "filter", "sender"]
        );
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = PipelineBuilder::new().build();

        assert!(pipeline.is_empty());
        assert!(pipeline.report(&Exception::new("boom", 0)).is_ok());
    }

    #[test]
    fn test_report_with_seeded_context() {
        let logger = Arc::new(RecordingLogger::default());
        let pipeline = PipelineBuilder::new()
            .provider(ExceptionSummaryProvider::new())
            .sender(LogSender::new(
                logger.clone(),
                Arc::new(JsonSerializer),
                DataHolder::try_from(json!({ "log_level": "ALERT" })).unwrap(),
            ))
            .build();

        let exception = Exception::new("boom", 0);
        let mut context = Context::new(&exception);
        context.set_var("log_level", "CRITICAL");
        pipeline.report_with(&mut context).unwrap();
        pipeline.report(&exception).unwrap();

        let levels: Vec<Level> = logger.entries().into_iter().map(|(_, level)| level).collect();
        assert_eq!(levels, [Level::Critical, Level::Alert]);
        assert!(context.data().has("summary"));
    }

    #[test]
    fn test_all_senders() {
        let logger = Arc::new(RecordingLogger::default());
        let tracker = Arc::new(RecordingTracker::default());
        let transport = Arc::new(RecordingTransport::new(DispatchOutcome::Delivered));
        let pipeline = PipelineBuilder::new()
            .provider(ExceptionSummaryProvider::new())
            .provider(ExceptionTraceProvider::new())
            .provider(TagsProvider::new(DataHolder::new()).with_tag("release", "1.0"))
            .sender(log_sender(logger.clone()))
            .sender(TicketSender::new(
                tracker.clone(),
                Arc::new(JsonSerializer),
                DataHolder::try_from(json!({ "sections": ["summary", "trace"] })).unwrap(),
            ))
            .sender(NotificationSender::new(
                transport.clone(),
                Arc::new(JsonSerializer),
                DataHolder::try_from(json!({ "sections": ["tags"] })).unwrap(),
            ))
            .build();

        pipeline.report(&Exception::new("boom", 7)).unwrap();

        let entries = logger.entries();
        let log_payload: Value = serde_json::from_str(&entries[0].0).unwrap();
        assert_eq!(
            log_payload.as_object().unwrap().keys().collect::<Vec<_>>(),
            ["summary", "trace", "tags"]
        );

        let ticket_body: Value = serde_json::from_str(&tracker.tickets()[0].body).unwrap();
        assert!(ticket_body.get("tags").is_none());
        assert_eq!(tracker.outcomes(), [TicketOutcome::Created]);

        assert_eq!(
            transport.dispatched()[0].0,
            r#"{"tags":{"release":"1.0"}}"#
        );
    }

    #[test]
    fn test_filtered_report_reaches_no_sender() {
        let logger = Arc::new(RecordingLogger::default());
        let pipeline = PipelineBuilder::new()
            .provider(ExceptionSummaryProvider::new())
            .filter(ClassFilter::new(["NotFound"]))
            .sender(log_sender(logger.clone()))
            .build();

        pipeline
            .report(&Exception::with_class("NotFound", "gone", 404))
            .unwrap();
        assert!(logger.entries().is_empty());

        pipeline.report(&Exception::new("boom", 0)).unwrap();
        assert_eq!(logger.entries().len(), 1);
    }

    #[test]
    fn test_error_aborts_remaining_senders() {
        let logger = Arc::new(RecordingLogger::default());
        let pipeline = PipelineBuilder::new()
            .provider(ExceptionSummaryProvider::new())
            .sender(LogSender::new(
                Arc::new(FailingLogger),
                Arc::new(JsonSerializer),
                DataHolder::new(),
            ))
            .sender(log_sender(logger.clone()))
            .build();

        let error = pipeline.report(&Exception::new("boom", 0)).unwrap_err();

        assert_matches!(error.error, Error::Dispatch(_));
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn test_concurrent_reports() {
        let logger = Arc::new(RecordingLogger::default());
        let pipeline = PipelineBuilder::new()
            .provider(ExceptionSummaryProvider::new())
            .sender(log_sender(logger.clone()))
            .build();

        std::thread::scope(|scope| {
            for code in 0..4 {
                let pipeline = &pipeline;
                scope.spawn(move || pipeline.report(&Exception::new("boom", code)).unwrap());
            }
        });

        let mut codes: Vec<i64> = logger
            .entries()
            .iter()
            .map(|(payload, _)| {
                let payload: Value = serde_json::from_str(payload).unwrap();
                payload["summary"]["code"].as_i64().unwrap()
            })
            .collect();
        codes.sort();
        assert_eq!(codes, [0, 1, 2, 3]);
    }
}
