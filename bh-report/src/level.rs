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

//! Severity levels attached to emitted reports.

use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Urgency of an emitted report.
///
/// The levels form a total order, from the least urgent [`Level::Debug`] to
/// the most urgent [`Level::Critical`].  Every level carries a numeric weight
/// which is also its serialized form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize_repr,
    Deserialize_repr,
    strum_macros::Display,
)]
#[strum(serialize_all = "UPPERCASE")]
#[repr(u8)]
pub enum Level {
    /// Diagnostic output.
    Debug = 10,
    /// Regular report, the default when nothing else is configured.
    Info = 20,
    /// Something worth a look.
    Notice = 30,
    /// Something probably went wrong.
    Warning = 40,
    /// Someone should act on it.
    Alert = 50,
    /// An operation failed.
    Error = 60,
    /// The system is in trouble.
    Critical = 70,
}

impl Level {
    /// All the levels, from the least to the most urgent.
    pub const ALL: [Level; 7] = [
        Level::Debug,
        Level::Info,
        Level::Notice,
        Level::Warning,
        Level::Alert,
        Level::Error,
        Level::Critical,
    ];

    /// Returns the numeric weight of the level.
    pub fn weight(self) -> u8 {
        self as u8
    }

    /// Creates a new [`Level`] from its numeric weight.  If the `weight` does
    /// not belong to any level, `None` is returned.
    pub fn from_weight(weight: u64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| u64::from(level.weight()) == weight)
    }

    /// Creates a new [`Level`] from its name, ignoring the ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.to_string().eq_ignore_ascii_case(name))
    }

    /// Reads a [`Level`] stored in a data or configuration holder.
    ///
    /// Both the numeric weight and the level name are accepted.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(weight) => weight.as_u64().and_then(Self::from_weight),
            Value::String(name) => Self::from_name(name),
            _ => None,
        }
    }

    /// Maps the level onto the coarser scale of the [`log`] facade.
    pub fn to_log_level(self) -> log::Level {
        match self {
            Level::Debug => log::Level::Debug,
            Level::Info | Level::Notice => log::Level::Info,
            Level::Warning | Level::Alert => log::Level::Warn,
            Level::Error | Level::Critical => log::Level::Error,
        }
    }
}

impl From<Level> for Value {
    fn from(level: Level) -> Self {
        Value::from(level.weight())
    }
}
