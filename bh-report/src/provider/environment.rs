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

use serde_json::{json, Map, Value};

use crate::{ChainNode, Context, NextNode, Result};

/// Provider writing facts about the running process.
///
/// The section (`"env"` by default) holds the process id, the executable
/// path, the command-line arguments, the target OS and architecture and the
/// values of the allow-listed environment variables.
///
/// Only the variables explicitly passed to [`Self::with_variables`] are
/// reported; unset ones are skipped.
#[derive(Debug)]
pub struct EnvironmentProvider {
    section: String,
    variables: Vec<String>,
    next: NextNode,
}

impl EnvironmentProvider {
    /// Default name of the section.
    pub const DEFAULT_SECTION: &'static str = "env";

    /// Creates a provider writing into the [default section][Self::DEFAULT_SECTION].
    pub fn new() -> Self {
        Self::with_section(Self::DEFAULT_SECTION)
    }

    /// Creates a provider writing into the `section`.
    pub fn with_section<S: Into<String>>(section: S) -> Self {
        Self {
            section: section.into(),
            variables: Vec::new(),
            next: NextNode::new(),
        }
    }

    /// Adds environment variables to report.
    pub fn with_variables<I, S>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variables
            .extend(variables.into_iter().map(Into::into));
        self
    }

    fn environment(&self) -> Value {
        let variables: Map<String, Value> = self
            .variables
            .iter()
            .filter_map(|name| {
                std::env::var_os(name).map(|value| {
                    let value = value.to_string_lossy().into_owned();
                    (name.clone(), Value::String(value))
                })
            })
            .collect();

        let executable = std::env::current_exe()
            .map(|path| path.display().to_string())
            .unwrap_or_default();

        let args: Vec<String> = std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        json!({
            "pid": std::process::id(),
            "executable": executable,
            "args": args,
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
            "variables": variables,
        })
    }
}

impl Default for EnvironmentProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainNode for EnvironmentProvider {
    fn successor(&self) -> &NextNode {
        &self.next
    }

    fn handle(&self, context: &mut Context<'_>) -> Result<()> {
        context.set_var(self.section.as_str(), self.environment());

        self.handle_next(context)
    }
}
