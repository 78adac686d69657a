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

use std::fmt;

use cheetah_string::CheetahString;
use serde::Deserialize;
use serde::Serialize;

/// Typed value of a message property or header field.
///
/// Narrow integer and float variants are kept so callers can hand over what the
/// message actually carries; the evaluator widens them to 64-bit on lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Long(i64),
    Double(f64),
    String(CheetahString),
    #[serde(skip_deserializing)]
    Int(i32),
    #[serde(skip_deserializing)]
    Short(i16),
    #[serde(skip_deserializing)]
    Byte(i8),
    #[serde(skip_deserializing)]
    Float(f32),
}

impl PropertyValue {
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Integral value widened to `i64`, `None` for non-integral variants.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            PropertyValue::Long(v) => Some(*v),
            PropertyValue::Int(v) => Some(i64::from(*v)),
            PropertyValue::Short(v) => Some(i64::from(*v)),
            PropertyValue::Byte(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Floating point value widened to `f64`, `None` for non-float variants.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            PropertyValue::Double(v) => Some(*v),
            PropertyValue::Float(v) => Some(f64::from(*v)),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(v) => write!(f, "{v}"),
            PropertyValue::Boolean(v) => write!(f, "{v}"),
            PropertyValue::Long(v) => write!(f, "{v}"),
            PropertyValue::Int(v) => write!(f, "{v}"),
            PropertyValue::Short(v) => write!(f, "{v}"),
            PropertyValue::Byte(v) => write!(f, "{v}"),
            PropertyValue::Double(v) => write!(f, "{v}"),
            PropertyValue::Float(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for PropertyValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    PropertyValue::$variant(value)
                }
            }
        )*
    };
}

impl_from!(
    bool => Boolean,
    i64 => Long,
    i32 => Int,
    i16 => Short,
    i8 => Byte,
    f64 => Double,
    f32 => Float,
    CheetahString => String,
);

impl From<&str> for PropertyValue {
    #[inline]
    fn from(value: &str) -> Self {
        PropertyValue::String(CheetahString::from(value))
    }
}

impl From<String> for PropertyValue {
    #[inline]
    fn from(value: String) -> Self {
        PropertyValue::String(CheetahString::from(value))
    }
}
