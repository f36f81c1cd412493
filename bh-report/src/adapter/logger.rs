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

use std::{
    io::Write,
    sync::{Mutex, PoisonError},
};

use bherror::traits::ForeignError as _;

use crate::{Error, Level, Result};

/// Target used by [`LogFacadeAdapter::default`].
pub const DEFAULT_LOG_TARGET: &str = "bh_report";

/// Sink for serialized reports.
pub trait LoggerAdapter: Send + Sync {
    /// Writes the `message` with the given severity `level`.
    fn log(&self, message: &str, level: Level) -> Result<()>;
}

/// [`LoggerAdapter`] writing into the [`log`] facade.
///
/// The seven report levels are mapped onto the [`log::Level`] scale with
/// [`Level::to_log_level`]; the original level name prefixes the message.
#[derive(Debug, Clone)]
pub struct LogFacadeAdapter {
    target: String,
}

impl LogFacadeAdapter {
    /// Creates an adapter logging under the given `target`.
    pub fn new<T: Into<String>>(target: T) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Returns the log target.
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for LogFacadeAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_TARGET)
    }
}

impl LoggerAdapter for LogFacadeAdapter {
    fn log(&self, message: &str, level: Level) -> Result<()> {
        log::log!(target: self.target.as_str(), level.to_log_level(), "[{level}] {message}");
        Ok(())
    }
}

/// [`LoggerAdapter`] writing one line per report into any [`Write`]r.
#[derive(Debug)]
pub struct WriteLoggerAdapter<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriteLoggerAdapter<W> {
    /// Creates an adapter writing into `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the adapter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> LoggerAdapter for WriteLoggerAdapter<W> {
    fn log(&self, message: &str, level: Level) -> Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        writeln!(writer, "[{level}] {message}")
            .and_then(|_| writer.flush())
            .foreign_err(|| Error::Dispatch("writer".to_owned()))
    }
}
