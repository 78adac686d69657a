// Copyright 2023 The RocketMQ Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! `KEY=VALUE` command-line values.

use mq_selector::PropertyValue;

/// Parses `key=value`, typing the value the way a selector literal would be:
/// `TRUE`/`FALSE` are booleans, integers are longs, decimals are doubles.
/// A value wrapped in single quotes is always a string.
pub fn parse_property(arg: &str) -> Result<(String, PropertyValue), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{arg}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{arg}'"));
    }
    Ok((key.to_string(), typed_value(value)))
}

fn typed_value(value: &str) -> PropertyValue {
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        return PropertyValue::from(&value[1..value.len() - 1]);
    }
    if value.eq_ignore_ascii_case("true") {
        return PropertyValue::Boolean(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return PropertyValue::Boolean(false);
    }
    if let Ok(v) = value.parse::<i64>() {
        return PropertyValue::Long(v);
    }
    if let Ok(v) = value.parse::<f64>() {
        return PropertyValue::Double(v);
    }
    PropertyValue::from(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_values() {
        assert_eq!(parse_property("a=TRUE").unwrap().1, PropertyValue::Boolean(true));
        assert_eq!(parse_property("a=false").unwrap().1, PropertyValue::Boolean(false));
        assert_eq!(parse_property("a=-42").unwrap().1, PropertyValue::Long(-42));
        assert_eq!(parse_property("a=2.5").unwrap().1, PropertyValue::Double(2.5));
        assert_eq!(parse_property("a=red").unwrap().1, PropertyValue::from("red"));
        assert_eq!(parse_property("a='42'").unwrap().1, PropertyValue::from("42"));
        assert_eq!(parse_property("a=").unwrap().1, PropertyValue::from(""));
    }

    #[test]
    fn splits_on_first_equals() {
        let (key, value) = parse_property("expr=a=b").unwrap();
        assert_eq!(key, "expr");
        assert_eq!(value, PropertyValue::from("a=b"));
    }

    #[test]
    fn rejects_missing_key_or_separator() {
        assert!(parse_property("novalue").is_err());
        assert!(parse_property("=1").is_err());
    }
}
