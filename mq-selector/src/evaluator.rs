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

//! Stack evaluation of a compiled selector.
//!
//! Every call gets its own operand stack, so a compiled selector can be
//! evaluated from many threads at once. Operands borrow from the RPN stream
//! and from the evaluation contexts; nothing is cloned on the hot path.

mod numeric;

use std::collections::HashSet;
use std::fmt;

use cheetah_string::CheetahString;
use mq_selector_error::SelectorError;
use mq_selector_error::SelectorResult;

use crate::config::SelectorConfig;
use crate::evaluation_context::EvaluationContext;
use crate::evaluator::numeric::Number;
use crate::like_pattern::LikePattern;
use crate::property_value::PropertyValue;
use crate::token::Operator;
use crate::token::Token;

/// Operand stack entry.
#[derive(Debug, Clone, Copy)]
enum Value<'a> {
    True,
    False,
    Unknown,
    Null,
    Long(i64),
    Double(f64),
    Str(&'a str),
    List(&'a HashSet<CheetahString>),
    Pattern(&'a LikePattern),
}

impl<'a> Value<'a> {
    #[inline]
    fn from_bool(b: bool) -> Self {
        if b {
            Value::True
        } else {
            Value::False
        }
    }

    fn from_property(value: &'a PropertyValue) -> Self {
        match value {
            PropertyValue::String(s) => Value::Str(s.as_str()),
            PropertyValue::Boolean(b) => Value::from_bool(*b),
            PropertyValue::Long(v) => Value::Long(*v),
            PropertyValue::Int(v) => Value::Long(i64::from(*v)),
            PropertyValue::Short(v) => Value::Long(i64::from(*v)),
            PropertyValue::Byte(v) => Value::Long(i64::from(*v)),
            PropertyValue::Double(v) => Value::Double(*v),
            PropertyValue::Float(v) => Value::Double(f64::from(*v)),
        }
    }

    fn from_number(n: Number) -> Self {
        match n {
            Number::Long(v) => Value::Long(v),
            Number::Double(v) => Value::Double(v),
        }
    }

    #[inline]
    fn is_numeric(&self) -> bool {
        matches!(self, Value::Long(_) | Value::Double(_))
    }

    #[inline]
    fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    fn not(self) -> Self {
        match self {
            Value::True => Value::False,
            Value::False => Value::True,
            _ => Value::Unknown,
        }
    }

    fn and(self, other: Self) -> Self {
        match (self, other) {
            (Value::True, Value::True) => Value::True,
            (Value::False, _) | (_, Value::False) => Value::False,
            _ => Value::Unknown,
        }
    }

    fn or(self, other: Self) -> Self {
        match (self, other) {
            (Value::True, _) | (_, Value::True) => Value::True,
            (Value::False, Value::False) => Value::False,
            _ => Value::Unknown,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::True => f.write_str("TRUE"),
            Value::False => f.write_str("FALSE"),
            Value::Unknown => f.write_str("UNKNOWN"),
            Value::Null => f.write_str("NULL"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v:?}"),
            Value::Str(s) => f.write_str(s),
            Value::List(_) => f.write_str("(list)"),
            Value::Pattern(p) => write!(f, "{p}"),
        }
    }
}

/// Evaluates one compiled selector against one pair of contexts.
pub(crate) struct Evaluator<'a> {
    selector: &'a str,
    config: &'a SelectorConfig,
    properties: Option<&'a dyn EvaluationContext>,
    fields: Option<&'a dyn EvaluationContext>,
    /// Set for the second compile-time pass: every marker behaves as if the
    /// stack top were `TRUE`, so the operands an `OR` would skip at runtime
    /// still get checked for errors.
    compile_test: bool,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(
        selector: &'a str,
        config: &'a SelectorConfig,
        properties: Option<&'a dyn EvaluationContext>,
        fields: Option<&'a dyn EvaluationContext>,
    ) -> Self {
        Self {
            selector,
            config,
            properties,
            fields,
            compile_test: false,
        }
    }

    pub(crate) fn compile_test(mut self, enabled: bool) -> Self {
        self.compile_test = enabled;
        self
    }

    pub(crate) fn evaluate(&self, rpn: &'a [Token]) -> SelectorResult<bool> {
        let mut stack: Vec<Value<'a>> = Vec::with_capacity(rpn.len());
        let mut i = 0;

        while i < rpn.len() {
            let token = &rpn[i];
            i += 1;

            let op = match token {
                Token::AndMarker | Token::OrMarker => {
                    let is_and = matches!(token, Token::AndMarker);
                    let top = match stack.last() {
                        Some(v) => *v,
                        None => return Err(self.missing_operand()),
                    };
                    let top = if self.compile_test { Value::True } else { top };
                    let skip = if is_and {
                        matches!(top, Value::False)
                    } else {
                        matches!(top, Value::True)
                    };
                    if skip {
                        // the decided value stays on the stack in place of the skipped operator
                        i = self.skip_operand(rpn, i, is_and)?;
                    }
                    continue;
                }
                Token::Operator(op) => *op,
                operand => {
                    stack.push(self.operand(operand));
                    continue;
                }
            };

            if op == Operator::Comma {
                continue;
            }

            let result = self.apply(op, &mut stack)?;
            stack.push(result);
        }

        let result = stack.pop().ok_or_else(|| self.missing_operand())?;
        if !stack.is_empty() {
            return Err(SelectorError::structural("Missing operator", self.selector));
        }
        match result {
            Value::True => Ok(true),
            Value::False | Value::Unknown => Ok(false),
            _ => Err(SelectorError::runtime("Non-boolean expression", self.selector)),
        }
    }

    /// Advances past the operator that belongs to the marker just consumed,
    /// counting nested markers of the same kind.
    fn skip_operand(&self, rpn: &[Token], mut i: usize, is_and: bool) -> SelectorResult<usize> {
        let (marker, target) = if is_and {
            (Token::AndMarker, Operator::And)
        } else {
            (Token::OrMarker, Operator::Or)
        };
        let mut pending = 1usize;
        while pending > 0 {
            let token = rpn.get(i).ok_or_else(|| self.missing_operand())?;
            if *token == marker {
                pending += 1;
            } else if token.is(target) {
                pending -= 1;
            }
            i += 1;
        }
        Ok(i)
    }

    fn operand(&self, token: &'a Token) -> Value<'a> {
        match token {
            Token::Identifier(name) => lookup(self.properties, name.as_str()),
            Token::Field(name) => lookup(self.fields, name.as_str()),
            Token::String(s) => Value::Str(s.as_str()),
            Token::Long(v) => Value::Long(*v),
            Token::Double(v) => Value::Double(*v),
            Token::True => Value::True,
            Token::False => Value::False,
            Token::Null => Value::Null,
            Token::List(set) => Value::List(set),
            Token::Pattern(pattern) => Value::Pattern(pattern),
            // handled by the caller
            Token::Operator(_) | Token::AndMarker | Token::OrMarker => Value::Unknown,
        }
    }

    fn apply(&self, op: Operator, stack: &mut Vec<Value<'a>>) -> SelectorResult<Value<'a>> {
        let operand1 = self.pop(stack)?;

        let value = match op {
            Operator::Or => self.pop(stack)?.or(operand1),
            Operator::And => self.pop(stack)?.and(operand1),
            Operator::Not => operand1.not(),
            Operator::Equals | Operator::NotEquals => {
                let operand2 = self.pop(stack)?;
                self.equality(op, operand2, operand1)?
            }
            Operator::Less | Operator::LessEqual | Operator::Greater | Operator::GreaterEqual => {
                let operand2 = self.pop(stack)?;
                self.relational(op, operand2, operand1)?
            }
            Operator::Plus | Operator::Minus | Operator::Multiply | Operator::Divide => {
                let operand2 = self.pop(stack)?;
                match (self.to_number(operand2)?, self.to_number(operand1)?) {
                    (Some(a), Some(b)) => Value::from_number(numeric::arithmetic(self.selector, op, a, b)?),
                    _ => Value::Unknown,
                }
            }
            Operator::UnaryPlus | Operator::UnaryMinus => match self.to_number(operand1)? {
                Some(n) => Value::from_number(numeric::unary(self.selector, op, n)?),
                None => Value::Unknown,
            },
            Operator::Between | Operator::NotBetween => {
                let max = operand1;
                let min = self.pop(stack)?;
                let value = self.pop(stack)?;
                let within = self
                    .relational(Operator::GreaterEqual, value, min)?
                    .and(self.relational(Operator::LessEqual, value, max)?);
                if op == Operator::Between {
                    within
                } else {
                    within.not()
                }
            }
            Operator::In | Operator::NotIn => {
                let operand2 = self.pop(stack)?;
                let set = match operand1 {
                    Value::List(set) => set,
                    other => return Err(self.runtime(format!("IN requires a string list: {other}"))),
                };
                match operand2 {
                    Value::Unknown => Value::False,
                    Value::Str(s) => Value::from_bool(set.contains(s) == (op == Operator::In)),
                    other => return Err(self.runtime(format!("IN requires string operand: {other}"))),
                }
            }
            Operator::Like | Operator::NotLike => {
                let operand2 = self.pop(stack)?;
                let pattern = match operand1 {
                    Value::Pattern(pattern) => pattern,
                    other => return Err(self.runtime(format!("LIKE requires a pattern: {other}"))),
                };
                match operand2 {
                    Value::Unknown => Value::False,
                    Value::Str(s) => Value::from_bool(pattern.matches(s) == (op == Operator::Like)),
                    other => return Err(self.runtime(format!("LIKE requires string operand: {other}"))),
                }
            }
            Operator::IsNull => Value::from_bool(matches!(operand1, Value::Unknown | Value::Null)),
            Operator::IsNotNull => Value::from_bool(!matches!(operand1, Value::Unknown | Value::Null)),
            Operator::Is
            | Operator::IsNot
            | Operator::Escape
            | Operator::LeftParen
            | Operator::RightParen
            | Operator::Comma => return Err(self.runtime(format!("Unknown operator: {op}"))),
        };

        Ok(value)
    }

    /// `=` and `<>`.
    ///
    /// A numeric operand makes this a numeric comparison. Comparing a number
    /// with a string or boolean is a type mismatch that is simply false for
    /// both operators, unless string coercion is enabled.
    fn equality(&self, op: Operator, left: Value<'a>, right: Value<'a>) -> SelectorResult<Value<'a>> {
        if left.is_unknown() || right.is_unknown() {
            return Ok(Value::Unknown);
        }

        if left.is_numeric() || right.is_numeric() {
            let mismatch = |v: &Value<'_>| matches!(v, Value::Str(_) | Value::True | Value::False);
            if !self.config.convert_types && (mismatch(&left) || mismatch(&right)) {
                return Ok(Value::False);
            }
            return self.relational(op, left, right);
        }

        let equal = match (left, right) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::True, Value::True) | (Value::False, Value::False) | (Value::Null, Value::Null) => true,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Pattern(a), Value::Pattern(b)) => a == b,
            _ => false,
        };
        Ok(Value::from_bool(equal == (op == Operator::Equals)))
    }

    fn relational(&self, op: Operator, left: Value<'a>, right: Value<'a>) -> SelectorResult<Value<'a>> {
        match (self.to_number(left)?, self.to_number(right)?) {
            (Some(a), Some(b)) => match numeric::compare(op, a, b) {
                Some(b) => Ok(Value::from_bool(b)),
                None => Err(self.runtime(format!("Unknown numeric operation: {op}"))),
            },
            _ => Ok(Value::Unknown),
        }
    }

    /// `None` stands for UNKNOWN. Both operands are converted before the
    /// UNKNOWN check so a type error is never masked by a missing property.
    fn to_number(&self, value: Value<'a>) -> SelectorResult<Option<Number>> {
        match value {
            Value::Long(v) => Ok(Some(Number::Long(v))),
            Value::Double(v) => Ok(Some(Number::Double(v))),
            Value::Unknown => Ok(None),
            Value::Str(s) if self.config.convert_types => Number::parse(s)
                .map(Some)
                .ok_or_else(|| self.runtime(format!("Cannot convert string to number '{s}'"))),
            other => Err(self.runtime(format!("Non-numeric argument '{other}'"))),
        }
    }

    #[inline]
    fn pop(&self, stack: &mut Vec<Value<'a>>) -> SelectorResult<Value<'a>> {
        stack.pop().ok_or_else(|| self.missing_operand())
    }

    fn missing_operand(&self) -> SelectorError {
        SelectorError::structural("Missing operand", self.selector)
    }

    fn runtime(&self, message: String) -> SelectorError {
        SelectorError::runtime(message, self.selector)
    }
}

#[inline]
fn lookup<'a>(context: Option<&'a dyn EvaluationContext>, name: &str) -> Value<'a> {
    context
        .and_then(|c| c.get_value(name))
        .map_or(Value::Unknown, Value::from_property)
}
