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

//! Command line interface of `tomlraider`.

use std::io::Read;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use toml_raider::{Error, Output};

pub const PROG_NAME: &str = "tomlraider";
const PYPROJECT: &str = "pyproject.toml";
const STDIN: &str = "-";

/// Retrieve properties from toml files.
#[derive(Debug, Parser)]
#[command(name = PROG_NAME, version, about, disable_version_flag = true)]
pub struct Cli {
    /// property to retrieve from toml file
    pub property: String,

    /// output property as a json string
    #[arg(short, long)]
    pub json: bool,

    /// looks for a pyproject.toml file in the current
    /// directory or MESON_SOURCE_ROOT if set
    #[arg(short, long, conflicts_with = "file")]
    pub pyproject: bool,

    /// toml file to read from ('-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<String>,

    /// don't print any message to stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// root directory searched by --pyproject
    #[arg(long, env = "MESON_SOURCE_ROOT", hide = true)]
    pub source_root: Option<PathBuf>,

    /// print version and exit
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

/// Where the TOML text is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Cli {
    pub fn output(&self) -> Output {
        if self.json {
            Output::Json
        } else {
            Output::Shell
        }
    }

    /// Resolves the input source, checking that a named file exists.
    pub fn source(&self) -> Result<Source, Error> {
        if self.pyproject {
            let root = match &self.source_root {
                Some(root) if !root.as_os_str().is_empty() => root.clone(),
                _ => std::env::current_dir().map_err(|e| Error::Io(e.to_string().into()))?,
            };
            let path = root.join(PYPROJECT);
            if !path.exists() {
                return Err(Error::Io(format!("<{PYPROJECT}> file not found").into()));
            }
            return Ok(Source::File(path));
        }
        match self.file.as_deref() {
            None | Some(STDIN) => Ok(Source::Stdin),
            Some(file) => {
                let path = PathBuf::from(file);
                if !path.exists() {
                    return Err(Error::Io(format!("File not found: {file}").into()));
                }
                Ok(Source::File(path))
            }
        }
    }
}

impl Source {
    /// Name of the source in diagnostics.
    pub fn name(&self) -> String {
        match self {
            Self::Stdin => "stdin".into(),
            Self::File(path) => path.display().to_string(),
        }
    }

    /// Reads the whole source.
    pub fn read(&self) -> Result<String, Error> {
        let mut buffer = String::new();
        let result = match self {
            Self::Stdin => std::io::stdin().read_to_string(&mut buffer).map(|_| buffer),
            Self::File(path) => std::fs::read_to_string(path),
        };
        result.map_err(|e| Error::Io(format!("error reading <{}>, {e}", self.name()).into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once(PROG_NAME).chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parse_args() {
        let c = cli(&["project.name"]);
        assert_eq!(c.property, "project.name");
        assert_eq!(c.output(), Output::Shell);
        assert_eq!(c.source().unwrap(), Source::Stdin);

        let c = cli(&["-j", "-q", "-f", "-", "a"]);
        assert_eq!(c.output(), Output::Json);
        assert!(c.quiet);
        assert_eq!(c.source().unwrap(), Source::Stdin);

        Cli::try_parse_from([PROG_NAME, "-p", "-f", "x.toml", "a"]).unwrap_err();
        let err = Cli::try_parse_from([PROG_NAME]).unwrap_err();
        assert_eq!(err.exit_code(), Error::USAGE);
        assert!(err.use_stderr());
        let err = Cli::try_parse_from([PROG_NAME, "-v"]).unwrap_err();
        assert!(!err.use_stderr());
    }

    #[test]
    fn missing_file() {
        let err = cli(&["-f", "does/not/exist.toml", "a"]).source().unwrap_err();
        assert_eq!(err.exit_code(), Error::IO);
        assert_eq!(err.to_string(), "File not found: does/not/exist.toml");
    }

    #[test]
    fn pyproject_lookup() {
        let mut c = cli(&["-p", "project.name"]);
        c.source_root = Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src"));
        let err = c.source().unwrap_err();
        assert_eq!(err.to_string(), "<pyproject.toml> file not found");

        c.source_root = Some(std::env::temp_dir().join("tomlraider-pyproject"));
        let root = c.source_root.clone().unwrap();
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join(PYPROJECT), "[project]\nname = 'x'\n").unwrap();
        let source = c.source().unwrap();
        assert_eq!(source, Source::File(root.join(PYPROJECT)));
        assert_eq!(source.read().unwrap(), "[project]\nname = 'x'\n");
    }
}
