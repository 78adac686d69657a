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

//! Long/Double arithmetic and comparison.
//!
//! Long op Long stays integral and wraps on overflow. Any Double operand
//! promotes the whole operation to Double.

use mq_selector_error::SelectorError;
use mq_selector_error::SelectorResult;

use crate::token::Operator;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Long(i64),
    Double(f64),
}

impl Number {
    #[inline]
    fn as_double(self) -> f64 {
        match self {
            Number::Long(v) => v as f64,
            Number::Double(v) => v,
        }
    }

    /// Parses string property text as a number, trying an integer first.
    pub(crate) fn parse(text: &str) -> Option<Number> {
        let text = text.trim();
        if let Ok(v) = text.parse::<i64>() {
            return Some(Number::Long(v));
        }
        text.parse::<f64>().ok().map(Number::Double)
    }
}

/// Evaluates `=`, `<>`, `<`, `<=`, `>` or `>=`. Returns `None` for any other operator.
pub(crate) fn compare(op: Operator, left: Number, right: Number) -> Option<bool> {
    let result = match (left, right) {
        (Number::Long(a), Number::Long(b)) => match op {
            Operator::Equals => a == b,
            Operator::NotEquals => a != b,
            Operator::Less => a < b,
            Operator::LessEqual => a <= b,
            Operator::Greater => a > b,
            Operator::GreaterEqual => a >= b,
            _ => return None,
        },
        _ => {
            let (a, b) = (left.as_double(), right.as_double());
            match op {
                Operator::Equals => a == b,
                Operator::NotEquals => a != b,
                Operator::Less => a < b,
                Operator::LessEqual => a <= b,
                Operator::Greater => a > b,
                Operator::GreaterEqual => a >= b,
                _ => return None,
            }
        }
    };
    Some(result)
}

/// Evaluates a binary `+`, `-`, `*` or `/`.
pub(crate) fn arithmetic(selector: &str, op: Operator, left: Number, right: Number) -> SelectorResult<Number> {
    match (left, right) {
        (Number::Long(a), Number::Long(b)) => {
            let v = match op {
                Operator::Plus => a.wrapping_add(b),
                Operator::Minus => a.wrapping_sub(b),
                Operator::Multiply => a.wrapping_mul(b),
                Operator::Divide => {
                    if b == 0 {
                        return Err(SelectorError::runtime("Division by zero", selector));
                    }
                    a.wrapping_div(b)
                }
                _ => return Err(unknown_numeric(selector, op)),
            };
            Ok(Number::Long(v))
        }
        _ => {
            let (a, b) = (left.as_double(), right.as_double());
            let v = match op {
                Operator::Plus => a + b,
                Operator::Minus => a - b,
                Operator::Multiply => a * b,
                Operator::Divide => a / b,
                _ => return Err(unknown_numeric(selector, op)),
            };
            Ok(Number::Double(v))
        }
    }
}

/// Evaluates unary `+` or `-`.
pub(crate) fn unary(selector: &str, op: Operator, operand: Number) -> SelectorResult<Number> {
    match (op, operand) {
        (Operator::UnaryPlus, n) => Ok(n),
        (Operator::UnaryMinus, Number::Long(v)) => Ok(Number::Long(v.wrapping_neg())),
        (Operator::UnaryMinus, Number::Double(v)) => Ok(Number::Double(-v)),
        _ => Err(unknown_numeric(selector, op)),
    }
}

fn unknown_numeric(selector: &str, op: Operator) -> SelectorError {
    SelectorError::runtime(format!("Unknown numeric operation: {op}"), selector)
}
