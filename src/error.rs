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

use crate::{eval, parser};

/// Any error raised while retrieving a property.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("error decoding <{source_name}>, {error}")]
    Decode {
        source_name: Box<str>,
        #[source]
        error: eval::DecodeError,
    },
    #[error(transparent)]
    PathFormat(#[from] parser::Error),
    #[error(transparent)]
    Lookup(#[from] eval::Error),
    #[error("{0}")]
    Io(Box<str>),
}

impl Error {
    /// Exit code of a failed run.
    pub const IO: i32 = 1;
    /// Exit code of a command line usage error.
    pub const USAGE: i32 = 2;
    /// Exit code of an input that is not valid TOML.
    pub const DECODE: i32 = 3;
    /// Exit code of a malformed path.
    pub const PATH_FORMAT: i32 = 4;
    /// Exit code of a path that does not resolve.
    pub const LOOKUP: i32 = 5;

    /// Returns the process exit status of this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => Self::IO,
            Self::Decode { .. } => Self::DECODE,
            Self::PathFormat(_) => Self::PATH_FORMAT,
            Self::Lookup(_) => Self::LOOKUP,
        }
    }
}
