// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Typed views over JSON claim values.  A type mismatch is a structural
//! error, never a silent coercion.

use super::base64;
use super::errors::Error;
use serde_json::Value;

pub fn to_tstr(v: &Value, n: &str) -> Result<String, Error> {
    v.as_str()
        .map(str::to_string)
        .ok_or_else(|| type_mismatch(n, "string", v))
}

pub fn to_bool(v: &Value, n: &str) -> Result<bool, Error> {
    v.as_bool().ok_or_else(|| type_mismatch(n, "boolean", v))
}

pub fn to_uint(v: &Value, n: &str) -> Result<u64, Error> {
    v.as_u64()
        .ok_or_else(|| type_mismatch(n, "non-negative integer", v))
}

/// A standard base64 string, decoded
pub fn to_bstr(v: &Value, n: &str) -> Result<Vec<u8>, Error> {
    let s = to_tstr(v, n)?;

    base64::decode_std(&s).map_err(|e| Error::MalformedStructure(format!("{n}: {e:?}")))
}

pub fn to_bstr_array(v: &Value, n: &str) -> Result<Vec<Vec<u8>>, Error> {
    v.as_array()
        .ok_or_else(|| type_mismatch(n, "array", v))?
        .iter()
        .enumerate()
        .map(|(i, x)| to_bstr(x, &format!("{n}[{i}]")))
        .collect()
}

fn type_mismatch(n: &str, want: &str, got: &Value) -> Error {
    let got = match got {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };

    Error::MalformedStructure(format!("{n}: expecting {want}, got {got}"))
}
