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

use std::str::FromStr;

use toml::Value;

use crate::ast::{Step, TomlPath};

pub type Result<T> = std::result::Result<T, Error>;

/// The error type returned when a path does not resolve against a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("error reading property <{path}>, {kind}")]
pub struct Error {
    path: Box<str>,
    kind: ErrorKind,
}

impl Error {
    /// Returns the path up to and including the step that failed.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns what went wrong.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

/// The reason a lookup failed.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("trying to address the TOML root table with an index")]
    RootIndex,
    #[error("trying to access a TOML array with a key")]
    KeyOnArray,
    #[error("trying to access a TOML table with an index")]
    IndexOnTable,
    #[error("trying to address an atomic TOML value, {0} is not subscriptable")]
    NotAddressable(&'static str),
    #[error("TOML table does not contain key \"{0}\"")]
    NoKey(Box<str>),
    #[error("TOML array index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },
}

/// The error type returned when decoding a TOML document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DecodeError {
    message: Box<str>,
}

/// A decoded TOML document.
///
/// The root of a document is always a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Returns the root of the document.
    pub fn root(&self) -> &Value {
        &self.root
    }
}

impl From<toml::Table> for Document {
    fn from(table: toml::Table) -> Self {
        Self {
            root: Value::Table(table),
        }
    }
}

impl FromStr for Document {
    type Err = DecodeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let table = toml::Table::from_str(s).map_err(|e| DecodeError {
            message: e.to_string().trim_end().into(),
        })?;
        Ok(table.into())
    }
}

impl TomlPath {
    /// Evaluates the path against the given document.
    ///
    /// An empty path returns the root table itself.
    pub fn query<'a>(&self, document: &'a Document) -> Result<&'a Value> {
        Evaluator {
            path: self,
            root: document.root(),
        }
        .eval()
    }
}

/// Evaluates `path` against `document`.
pub fn evaluate<'a>(document: &'a Document, path: &TomlPath) -> Result<&'a Value> {
    path.query(document)
}

/// Evaluation context.
struct Evaluator<'p, 'a> {
    path: &'p TomlPath,
    root: &'a Value,
}

impl<'p, 'a> Evaluator<'p, 'a> {
    fn eval(&self) -> Result<&'a Value> {
        let Some((last, init)) = self.path.split_last() else {
            return Ok(self.root);
        };
        if let Some(Step::Index(_)) = self.path.first() {
            return Err(self.error(0, ErrorKind::RootIndex));
        }
        let mut current = self.root;
        for (i, step) in init.iter().enumerate() {
            let value = self.eval_step(i, current, step)?;
            if !matches!(value, Value::Table(_) | Value::Array(_)) {
                // any atomic value is only valid for the last step of a path
                return Err(self.error(i + 1, ErrorKind::NotAddressable(value.type_str())));
            }
            tracing::trace!(step = %step, kind = value.type_str(), "descended");
            current = value;
        }
        self.eval_step(init.len(), current, last)
    }

    /// Applies the `i`-th step to the current container.
    fn eval_step(&self, i: usize, current: &'a Value, step: &Step) -> Result<&'a Value> {
        match (current, step) {
            (Value::Table(table), Step::Key(key)) => table
                .get(key)
                .ok_or_else(|| self.error(i, ErrorKind::NoKey(key.as_str().into()))),
            (Value::Array(array), Step::Index(index)) => resolve_index(*index, array.len())
                .and_then(|index| array.get(index))
                .ok_or_else(|| {
                    self.error(
                        i,
                        ErrorKind::IndexOutOfBounds {
                            index: *index,
                            len: array.len(),
                        },
                    )
                }),
            (Value::Array(_), Step::Key(_)) => Err(self.error(i, ErrorKind::KeyOnArray)),
            (Value::Table(_), Step::Index(_)) => Err(self.error(i, ErrorKind::IndexOnTable)),
            (value, _) => Err(self.error(i, ErrorKind::NotAddressable(value.type_str()))),
        }
    }

    /// Builds an error for the `i`-th step.
    fn error(&self, i: usize, kind: ErrorKind) -> Error {
        let path: TomlPath = self.path[..=i].iter().cloned().collect();
        tracing::debug!(path = %path, error = %kind, "lookup failed");
        Error {
            path: path.to_string().into(),
            kind,
        }
    }
}

/// Converts a possibly negative index into an offset in an array of `len`.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    if index < 0 {
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        len.checked_sub(back)
    } else {
        usize::try_from(index).ok()
    }
}
