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

//! Runner of the lookup script in `cases.txt`.
//!
//! The script is a list of documents, each introduced by `== <name>` and
//! followed by queries:
//!
//! ```text
//! -- shell <path>     expected shell output on the following lines
//! -- json <path>      expected JSON output on the following lines
//! -- error <path>     `<exit code> <message fragment>` on the next line
//! ```

use libtest_mimic::{Arguments, Failed, Trial};
use toml_raider::{get, Output};

fn main() {
    let args = Arguments::from_args();

    let tests = parse_script(include_str!("cases.txt"));

    libtest_mimic::run(&args, tests).exit();
}

#[derive(Debug, Clone)]
enum Expected {
    Output(Output, String),
    Error(i32, String),
}

fn parse_script(script: &'static str) -> Vec<Trial> {
    let mut tests = vec![];
    let mut name = "";
    let mut document = String::new();
    let mut lines = script.lines().enumerate().peekable();
    while let Some((line_no, line)) = lines.next() {
        if line.starts_with("# ") || (line.is_empty() && document.is_empty()) {
            continue;
        }
        if let Some(n) = line.strip_prefix("== ") {
            name = n.trim();
            document.clear();
            continue;
        }
        let Some(query) = line.strip_prefix("-- ") else {
            document.push_str(line);
            document.push('\n');
            continue;
        };
        let (mode, path) = query.split_once(' ').unwrap_or((query, ""));
        let mut body = vec![];
        while let Some((_, next)) = lines.peek() {
            if next.starts_with("-- ") || next.starts_with("== ") {
                break;
            }
            body.push(*next);
            lines.next();
        }
        while body.last().is_some_and(|l| l.is_empty()) {
            body.pop();
        }
        let body = body.join("\n");
        let expected = match mode {
            "shell" => Expected::Output(Output::Shell, body),
            "json" => Expected::Output(Output::Json, body),
            "error" => {
                let (code, message) = body.split_once(' ').unwrap_or((body.as_str(), ""));
                Expected::Error(code.parse().expect("exit code"), message.to_owned())
            }
            _ => panic!("cases.txt:{}: unknown query mode {mode:?}", line_no + 1),
        };
        let document = document.clone();
        let path = path.to_owned();
        tests.push(Trial::test(
            format!("cases.txt:{}:{name}", line_no + 1),
            move || test(&document, &path, expected),
        ));
    }
    tests
}

fn test(document: &str, path: &str, expected: Expected) -> Result<(), Failed> {
    let output = match &expected {
        Expected::Output(output, _) => *output,
        Expected::Error(..) => Output::Shell,
    };
    match (get(document, "cases.txt", path, output), expected) {
        (Ok(actual), Expected::Output(_, expected)) if actual == expected => Ok(()),
        (Err(e), Expected::Error(code, message))
            if e.exit_code() == code && e.to_string().contains(&message) =>
        {
            Ok(())
        }
        (actual, expected) => Err(format!("expected: {expected:?}, got: {actual:?}").into()),
    }
}
