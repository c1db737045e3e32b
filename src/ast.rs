// Copyright 2023 RisingWave Labs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The AST of TOML Path.

use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Deref;

/// The separator between two keys of a path.
pub const PATH_SEPARATOR: char = '.';

/// A TOML Path: an ordered sequence of steps from the root table.
///
/// A path holds no reference to any document. It can be parsed once and
/// queried against many documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TomlPath {
    pub(crate) steps: Vec<Step>,
}

/// A single step of a [`TomlPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `.<key>` selects the member of a table.
    Key(String),
    /// `[<n>]` selects the n-th element of an array.
    /// Negative values count from the end, `[-1]` being the last element.
    Index(i64),
}

impl TomlPath {
    /// Creates a path from a list of steps.
    pub fn from_steps(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Returns the steps of the path.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl Deref for TomlPath {
    type Target = [Step];

    fn deref(&self) -> &Self::Target {
        &self.steps
    }
}

impl FromIterator<Step> for TomlPath {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

/// Returns true if `key` can be written without quotes in TOML.
pub(crate) fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

impl Display for TomlPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for step in &self.steps {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(key) if is_bare_key(key) => write!(f, "{PATH_SEPARATOR}{key}"),
            // JSON string escapes are a subset of TOML basic string escapes
            Self::Key(key) => write!(f, "{PATH_SEPARATOR}{}", serde_json::Value::from(&**key)),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}
