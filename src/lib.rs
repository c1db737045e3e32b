//! Retrieve properties from TOML documents.
//!
//! A property is addressed with a dotted path of TOML keys, where a key may
//! be followed by an array index: `package.authors[0]`, `bin[-1].name`.
//!
//! # Usage
//!
//! ```rust
//! use toml_raider::{dumps, Document, Output, TomlPath};
//!
//! let doc: Document = "[a]\nb = [1, 2, 3]".parse().unwrap();
//! let path = TomlPath::new("a.b[-1]").unwrap();
//!
//! let value = path.query(&doc).unwrap();
//! assert_eq!(dumps(value, Output::Shell, "a.b[-1]"), "3");
//! ```

mod ast;
mod error;
mod eval;
mod format;
mod parser;

pub use ast::{Step, TomlPath, PATH_SEPARATOR};
pub use error::Error;
pub use eval::{evaluate, DecodeError, Document, Error as EvalError, ErrorKind as EvalErrorKind};
pub use format::{dumps, to_json, Output, SHELL_LIST_SEPARATOR};
pub use parser::Error as ParseError;

/// Parses a path string into a [`TomlPath`].
pub fn parse(path: &str) -> Result<TomlPath, ParseError> {
    TomlPath::new(path)
}

/// Joins a path back into its display string.
pub fn join(path: &TomlPath) -> String {
    path.to_string()
}

/// Retrieves the property at `path` from the TOML text `buffer`.
///
/// `source_name` is only used in the decode error message.
pub fn get(buffer: &str, source_name: &str, path: &str, output: Output) -> Result<String, Error> {
    let toml_path = TomlPath::new(path)?;
    let document: Document = buffer.parse().map_err(|error| Error::Decode {
        source_name: source_name.into(),
        error,
    })?;
    let value = toml_path.query(&document)?;
    Ok(dumps(value, output, path))
}
