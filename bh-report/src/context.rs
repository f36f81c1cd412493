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

use serde_json::Value;

use crate::{DataHolder, Exception};

/// The state of a single report run.
///
/// Couples the reported [`Exception`] with the [`DataHolder`] in which the
/// stages of the chain accumulate their data.  The exception is fixed for the
/// lifetime of the context; only the data evolves as the nodes run.
#[derive(Debug)]
pub struct Context<'e> {
    exception: &'e Exception,
    data: DataHolder,
}

impl<'e> Context<'e> {
    /// Creates a context with an empty [`DataHolder`].
    pub fn new(exception: &'e Exception) -> Self {
        Self::with_data(exception, DataHolder::new())
    }

    /// Creates a context seeded with existing `data`, e.g. a per-run
    /// `log_level`.
    pub fn with_data(exception: &'e Exception, data: DataHolder) -> Self {
        Self { exception, data }
    }

    /// Returns the reported exception.
    pub fn exception(&self) -> &'e Exception {
        self.exception
    }

    /// Returns the accumulated data.
    pub fn data(&self) -> &DataHolder {
        &self.data
    }

    /// Returns the accumulated data for modification.
    pub fn data_mut(&mut self) -> &mut DataHolder {
        &mut self.data
    }

    /// Shorthand for [`DataHolder::get`] on the held data.
    pub fn get_var<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.data.get(key, default)
    }

    /// Shorthand for [`DataHolder::set`] on the held data.
    pub fn set_var<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.data.set(key, value);
    }

    /// Consumes the context, returning the accumulated data.
    pub fn into_data(self) -> DataHolder {
        self.data
    }
}
