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

//! The error value being reported.

use std::{
    backtrace::{Backtrace, BacktraceStatus},
    panic::Location,
};

/// Class name used by [`Exception::new`].
pub const DEFAULT_CLASS: &str = "Exception";

/// A captured error, together with everything the providers may want to know
/// about it.
///
/// The origin location is the place where the [`Exception`] was constructed
/// (all the constructors are `#[track_caller]`).  A backtrace is captured as
/// well, subject to the usual `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE` settings.
///
/// All the accessors are total: parts that are unknown are reported as empty
/// strings, zero or empty lists.
#[derive(Debug)]
pub struct Exception {
    class: String,
    code: i64,
    message: String,
    location: &'static Location<'static>,
    backtrace: Backtrace,
    causes: Vec<String>,
}

impl Exception {
    /// Creates an [`Exception`] of the [default class][DEFAULT_CLASS].
    #[track_caller]
    pub fn new<M: Into<String>>(message: M, code: i64) -> Self {
        Self::with_class(DEFAULT_CLASS, message, code)
    }

    /// Creates an [`Exception`] of the given `class`.
    #[track_caller]
    pub fn with_class<C, M>(class: C, message: M, code: i64) -> Self
    where
        C: Into<String>,
        M: Into<String>,
    {
        Self {
            class: class.into(),
            code,
            message: message.into(),
            location: Location::caller(),
            backtrace: Backtrace::capture(),
            causes: Vec::new(),
        }
    }

    /// Captures any [`std::error::Error`].
    ///
    /// The class is the name of the Rust type `E`, the code is zero and the
    /// causes are taken from the [`source`][std::error::Error::source] chain.
    #[track_caller]
    pub fn from_error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let mut exception = Self::with_class(short_type_name::<E>(), error.to_string(), 0);
        exception.causes = causes(error.source());
        exception
    }

    /// Appends a cause to the list of causes.
    pub fn caused_by<C: std::fmt::Display>(mut self, cause: C) -> Self {
        self.causes.push(cause.to_string());
        self
    }

    /// Replaces the backtrace captured on construction.
    ///
    /// Useful with [`Backtrace::force_capture`] when capturing is disabled
    /// through `RUST_BACKTRACE` but this report needs the frames anyway.
    pub fn with_backtrace(mut self, backtrace: Backtrace) -> Self {
        self.backtrace = backtrace;
        self
    }

    /// Returns the class (type) name.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Returns the numeric code.
    pub fn code(&self) -> i64 {
        self.code
    }

    /// Returns the human readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the path of the source file the exception originates from.
    pub fn file(&self) -> &str {
        self.location.file()
    }

    /// Returns the line the exception originates from.
    pub fn line(&self) -> u32 {
        self.location.line()
    }

    /// Returns the column the exception originates from.
    pub fn column(&self) -> u32 {
        self.location.column()
    }

    /// Returns the captured backtrace.
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Returns the backtrace frames, one line each.
    ///
    /// The list is empty if backtrace capturing is disabled.
    pub fn frames(&self) -> Vec<String> {
        if self.backtrace.status() != BacktraceStatus::Captured {
            return Vec::new();
        }

        self.backtrace
            .to_string()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }

    /// Returns the messages of the underlying causes, the closest first.
    pub fn causes(&self) -> &[String] {
        &self.causes
    }
}

impl std::fmt::Display for Exception {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.class, self.message)
    }
}

impl<E: bherror::BhError> From<bherror::Error<E>> for Exception {
    #[track_caller]
    fn from(error: bherror::Error<E>) -> Self {
        let mut exception = Self::with_class(short_type_name::<E>(), error.error.to_string(), 0);
        exception.causes = causes(std::error::Error::source(&error));
        exception
    }
}

fn causes(source: Option<&(dyn std::error::Error + 'static)>) -> Vec<String> {
    std::iter::successors(source, |error| error.source())
        .map(ToString::to_string)
        .collect()
}

// `my_crate::module::MyError<T>` -> `MyError`
fn short_type_name<T: ?Sized>() -> &'static str {
    let name = std::any::type_name::<T>();
    let name = name.split('<').next().unwrap_or(name);
    name.rsplit("::").next().unwrap_or(name)
}
