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

//! Output formatting of terminal values.

use serde_json::Number;
use toml::Value;

use crate::ast::PATH_SEPARATOR;

/// The separator between the elements of an array in shell output.
pub const SHELL_LIST_SEPARATOR: &str = " ";

/// Output formats of a retrieved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    /// Unquoted text meant to be consumed by shell scripts.
    #[default]
    Shell,
    /// A JSON document.
    Json,
}

/// Formats `value` for output.
///
/// `path` is the path text the value was retrieved with. In shell mode a
/// table is not printed: the normalized path is echoed instead.
pub fn dumps(value: &Value, output: Output, path: &str) -> String {
    match output {
        Output::Json => to_json(value).to_string(),
        Output::Shell => match value {
            Value::Table(_) => format!("{PATH_SEPARATOR}{}", path.trim_matches(PATH_SEPARATOR)),
            Value::Array(array) => array
                .iter()
                .map(shell_scalar)
                .collect::<Vec<_>>()
                .join(SHELL_LIST_SEPARATOR),
            scalar => shell_scalar(scalar),
        },
    }
}

/// Converts a TOML value to JSON.
///
/// Datetimes become strings. Non-finite floats have no JSON form and become `null`.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Integer(i) => serde_json::Value::Number(Number::from(*i)),
        Value::Float(f) => Number::from_f64(*f).map_or(serde_json::Value::Null, Into::into),
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        Value::Array(array) => array.iter().map(to_json).collect(),
        Value::Table(table) => table
            .iter()
            .map(|(k, v)| (k.clone(), to_json(v)))
            .collect::<serde_json::Map<_, _>>()
            .into(),
    }
}

/// Shell text of a scalar. Arrays and tables nested in an array render as JSON.
fn shell_scalar(value: &Value) -> String {
    match value {
        Value::Boolean(true) => "1".into(),
        Value::Boolean(false) => "0".into(),
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => shell_float(*f),
        Value::Datetime(dt) => dt.to_string(),
        Value::Array(_) | Value::Table(_) => to_json(value).to_string(),
    }
}

/// Shortest float text, with a signed two-digit exponent outside `[1e-4, 1e16)`:
/// `1.0`, `0.0001`, `1e-05`, `1.5e+100`.
fn shell_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".into();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.into();
    }
    let sci = format!("{f:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if (-4..16).contains(&exp) {
        let s = f.to_string();
        if s.contains('.') {
            s
        } else {
            format!("{s}.0")
        }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    }
}
