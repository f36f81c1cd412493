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

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! This crate provides an error reporting pipeline used across TBTL's Rust services.
//!
//! A captured error is wrapped into an [`Exception`] and reported through a chain of stages.
//! Every report run gets its own [`Context`], which couples the exception with a [`DataHolder`]
//! the stages share.  Each stage does its part and then explicitly hands the run over to its
//! successor, or stops the run.
//!
//! # Details
//!
//! Every stage implements the [`ChainNode`] trait.  The crate offers three kinds of them.
//!
//! * [`provider`] -- Collect facts about the exception (summary, backtrace, environment, tags,
//!   time) into named sections of the [`DataHolder`].  Providers always continue the run.
//! * [`filter`] -- Stop the run for exceptions that should not be reported.
//! * [`sender`] -- Serialize the collected data with a [`Serializer`] and dispatch it through an
//!   [`adapter`] (log sink, ticket tracker, notification transport), at a severity [`Level`]
//!   resolved from the run and the sender's configuration.
//!
//! The [`PipelineBuilder`] links the stages in the right order (providers, filters, senders) into
//! a [`Pipeline`] with a single [`Pipeline::report`] entry point.
//!
//! Failures are reported as [`bherror::Error<Error>`][Error].  A failing stage aborts the rest of
//! the run; nothing is retried.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use bh_report::{
//!     adapter::WriteLoggerAdapter, provider::ExceptionSummaryProvider, sender::LogSender,
//!     DataHolder, Exception, JsonSerializer, PipelineBuilder,
//! };
//! use serde_json::json;
//!
//! let logger = Arc::new(WriteLoggerAdapter::new(Vec::<u8>::new()));
//! let configuration = DataHolder::try_from(json!({ "format": "json", "log_level": "ALERT" }))?;
//!
//! let pipeline = PipelineBuilder::new()
//!     .provider(ExceptionSummaryProvider::new())
//!     .sender(LogSender::new(logger.clone(), Arc::new(JsonSerializer), configuration))
//!     .build();
//!
//! pipeline.report(&Exception::new("boom", 42))?;
//!
//! drop(pipeline);
//! let logger = Arc::try_unwrap(logger).ok().unwrap();
//! let written = String::from_utf8(logger.into_inner()).unwrap();
//! assert!(written.starts_with(r#"[ALERT] {"summary":{"class":"Exception","code":42,"message":"boom""#));
//! # Ok::<(), bherror::Error<bh_report::Error>>(())
//! ```

pub mod adapter;
mod chain_node;
mod context;
mod data_holder;
mod error;
mod exception;
pub mod filter;
mod level;
mod pipeline;
pub mod provider;
pub mod sender;
mod serializer;
#[cfg(test)]
mod test_utils;

pub use chain_node::{ChainNode, NextNode, NodeRef};
pub use context::Context;
pub use data_holder::DataHolder;
pub use error::{Error, Result};
pub use exception::{Exception, DEFAULT_CLASS};
pub use level::Level;
pub use pipeline::{Pipeline, PipelineBuilder};
pub use serializer::{JsonSerializer, Serializer, JSON, PRETTY_JSON};
