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

//! Stages that collect facts about the reported exception.
//!
//! Every provider writes a single section into the run's
//! [`DataHolder`][crate::DataHolder] and then hands the run over to its
//! successor; providers never terminate the chain and never fail.
//!
//! The section name defaults to a provider specific value and can be changed
//! with `with_section`.  A section written earlier in the run under the same
//! name is replaced wholesale.

mod environment;
mod summary;
mod tags;
mod timestamp;
mod trace;

pub use environment::EnvironmentProvider;
pub use summary::ExceptionSummaryProvider;
pub use tags::TagsProvider;
pub use timestamp::TimestampProvider;
pub use trace::ExceptionTraceProvider;
