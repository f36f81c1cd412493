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

//! Stages that serialize the collected data and dispatch it.
//!
//! Every sender is configured with a [`DataHolder`] consulted for:
//!
//! * [`FORMAT`] -- the serialization format tag, [`DEFAULT_FORMAT`] if unset.
//! * [`LOG_LEVEL`] -- the default severity of the emitted reports.
//! * [`MIN_LEVEL`] -- reports below this severity are not dispatched.
//! * [`SECTIONS`] -- a list of section names; if set, only those sections
//!   are serialized.
//!
//! The severity of an emission is resolved anew on every run: a
//! [`LOG_LEVEL`] var of the run's context wins over the configured one,
//! which wins over [`DEFAULT_LEVEL`].  Levels are accepted both by name and
//! by numeric weight; unrecognized values are ignored.
//!
//! Senders always hand the run over to their successor, whether the report
//! was dispatched or suppressed.  A serialization or dispatch error aborts
//! the run instead.

use std::{borrow::Cow, sync::Arc};

use serde_json::Value;

use crate::{serializer, Context, DataHolder, Error, Level, NextNode, Result, Serializer};

mod log;
mod notification;
mod ticket;

pub use self::log::LogSender;
pub use notification::NotificationSender;
pub use ticket::{TicketSender, SUMMARY_SECTION};

/// Configuration key of the serialization format tag.
pub const FORMAT: &str = "format";

/// Configuration (and context) key of the severity level.
pub const LOG_LEVEL: &str = "log_level";

/// Configuration key of the suppression threshold.
pub const MIN_LEVEL: &str = "min_level";

/// Configuration key of the list of serialized sections.
pub const SECTIONS: &str = "sections";

/// Format used when none is configured.
pub const DEFAULT_FORMAT: &str = serializer::JSON;

/// Level used when neither the context nor the configuration sets one.
pub const DEFAULT_LEVEL: Level = Level::Info;

/// Resolves the severity level of an emission.
///
/// The [`LOG_LEVEL`] var of the `context` takes priority, then the
/// [`LOG_LEVEL`] of the `configuration`, then [`DEFAULT_LEVEL`].
pub fn resolve_level(context: &Context<'_>, configuration: &DataHolder) -> Level {
    level_var(context.data(), "context")
        .or_else(|| level_var(configuration, "configuration"))
        .unwrap_or(DEFAULT_LEVEL)
}

pub(crate) fn level_var(data: &DataHolder, origin: &str) -> Option<Level> {
    level_setting(data, LOG_LEVEL, origin)
}

fn level_setting(data: &DataHolder, key: &str, origin: &str) -> Option<Level> {
    let value = data.find(key)?;
    let level = Level::from_value(value);
    if level.is_none() {
        ::log::warn!("Ignoring unrecognized {key} {value} set in the {origin}");
    }
    level
}

/// The parts shared by all senders.
pub(crate) struct SenderCore {
    serializer: Arc<dyn Serializer>,
    configuration: DataHolder,
    pub(crate) next: NextNode,
}

impl SenderCore {
    pub(crate) fn new(serializer: Arc<dyn Serializer>, configuration: DataHolder) -> Self {
        Self {
            serializer,
            configuration,
            next: NextNode::new(),
        }
    }

    pub(crate) fn configuration(&self) -> &DataHolder {
        &self.configuration
    }

    pub(crate) fn format(&self) -> &str {
        self.configuration
            .find(FORMAT)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_FORMAT)
    }

    /// Returns the configured [`SECTIONS`], `None` if the key is not set.
    ///
    /// Anything but an array of strings is an [`Error::InvalidConfiguration`].
    pub(crate) fn sections(&self) -> Result<Option<Vec<&str>>> {
        let Some(value) = self.configuration.find(SECTIONS) else {
            return Ok(None);
        };

        value
            .as_array()
            .and_then(|sections| sections.iter().map(Value::as_str).collect())
            .map(Some)
            .ok_or_else(|| {
                bherror::Error::root(Error::InvalidConfiguration(format!(
                    "{SECTIONS} must be an array of section names, got {value}"
                )))
            })
    }

    /// Serializes the (configured subset of the) context data.
    pub(crate) fn serialize(&self, context: &Context<'_>) -> Result<String> {
        let data = match self.sections()? {
            Some(sections) => Cow::Owned(context.data().subset(sections)),
            None => Cow::Borrowed(context.data()),
        };

        self.serializer.serialize(&data, self.format())
    }

    pub(crate) fn resolve_level(&self, context: &Context<'_>) -> Level {
        resolve_level(context, &self.configuration)
    }

    /// Returns `true` if emissions of `level` fall below the configured
    /// threshold.
    pub(crate) fn suppresses(&self, level: Level) -> bool {
        level_setting(&self.configuration, MIN_LEVEL, "configuration")
            .is_some_and(|threshold| level < threshold)
    }
}

impl std::fmt::Debug for SenderCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SenderCore")
            .field("configuration", &self.configuration)
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}
