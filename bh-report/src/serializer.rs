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

//! Encoding of report data into a wire/text format.

use bherror::traits::ForeignError as _;

use crate::{DataHolder, Error, Result};

/// Format tag for compact JSON.
pub const JSON: &str = "json";

/// Format tag for indented JSON.
pub const PRETTY_JSON: &str = "pretty_json";

/// Encodes report data in the format selected by a format tag.
pub trait Serializer: Send + Sync {
    /// Returns `true` if the serializer can produce the `format`.
    fn supports(&self, format: &str) -> bool;

    /// Encodes `data` as `format`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnsupportedFormat`] if the `format` is not
    /// [supported][Serializer::supports].
    fn serialize(&self, data: &DataHolder, format: &str) -> Result<String>;
}

/// [`Serializer`] producing the [`JSON`] and [`PRETTY_JSON`] formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn supports(&self, format: &str) -> bool {
        matches!(format, JSON | PRETTY_JSON)
    }

    fn serialize(&self, data: &DataHolder, format: &str) -> Result<String> {
        let encoded = match format {
            JSON => serde_json::to_string(data),
            PRETTY_JSON => serde_json::to_string_pretty(data),
            other => {
                return Err(bherror::Error::root(Error::UnsupportedFormat(
                    other.to_owned(),
                )))
            }
        };

        encoded.foreign_err(|| Error::Serialization(format.to_owned()))
    }
}
