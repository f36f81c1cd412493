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

/// Error type defining possible error-reporting failures.
#[derive(strum_macros::Display, Debug, PartialEq)]
pub enum Error {
    /// Error when the serializer is asked for a format it does not implement.
    #[strum(to_string = "Unsupported serialization format \"{0}\"")]
    UnsupportedFormat(String),

    /// Error when the report data could not be encoded in a supported format.
    #[strum(to_string = "Unable to serialize report data as \"{0}\"")]
    Serialization(String),

    /// Error when a configuration value has an unexpected shape.
    #[strum(to_string = "Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Error when an adapter fails to deliver the report.
    #[strum(to_string = "Adapter \"{0}\" failed to dispatch the report")]
    Dispatch(String),
}

impl bherror::BhError for Error {}

/// Result type used across the crate.
pub type Result<T> = bherror::Result<T, Error>;
