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

//! Token model shared by every compiler pass and the evaluator.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use cheetah_string::CheetahString;

use crate::like_pattern::LikePattern;

/// Operators of the selector grammar, including the compound forms produced by
/// the aggregator and the punctuation the RPN compiler consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Or,
    And,
    Not,
    NotEquals,
    LessEqual,
    Less,
    GreaterEqual,
    Greater,
    Equals,
    UnaryPlus,
    UnaryMinus,
    Multiply,
    Divide,
    Plus,
    Minus,
    Between,
    NotBetween,
    In,
    NotIn,
    Like,
    Escape,
    NotLike,
    IsNull,
    IsNotNull,
    Is,
    IsNot,
    LeftParen,
    RightParen,
    Comma,
}

impl Operator {
    /// Binding strength used by the shunting-yard pass; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Or => 10,
            Operator::And => 11,
            Operator::Not => 12,
            Operator::Equals | Operator::NotEquals => 20,
            Operator::Less | Operator::LessEqual | Operator::Greater | Operator::GreaterEqual => 21,
            Operator::In
            | Operator::NotIn
            | Operator::Like
            | Operator::NotLike
            | Operator::IsNull
            | Operator::IsNotNull
            | Operator::Between
            | Operator::NotBetween => 30,
            Operator::Plus | Operator::Minus => 40,
            Operator::Multiply | Operator::Divide => 41,
            Operator::Comma => 42,
            Operator::UnaryPlus | Operator::UnaryMinus => 43,
            Operator::LeftParen | Operator::RightParen => 50,
            Operator::Escape | Operator::Is | Operator::IsNot => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Or => "OR",
            Operator::And => "AND",
            Operator::Not => "NOT",
            Operator::NotEquals => "<>",
            Operator::LessEqual => "<=",
            Operator::Less => "<",
            Operator::GreaterEqual => ">=",
            Operator::Greater => ">",
            Operator::Equals => "=",
            Operator::UnaryPlus => "u+",
            Operator::UnaryMinus => "u-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Between => "BETWEEN",
            Operator::NotBetween => "NOT_BETWEEN",
            Operator::In => "IN",
            Operator::NotIn => "NOT_IN",
            Operator::Like => "LIKE",
            Operator::Escape => "ESCAPE",
            Operator::NotLike => "NOT_LIKE",
            Operator::IsNull => "IS_NULL",
            Operator::IsNotNull => "IS_NOT_NULL",
            Operator::Is => "IS",
            Operator::IsNot => "IS_NOT",
            Operator::LeftParen => "(",
            Operator::RightParen => ")",
            Operator::Comma => ",",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single lexical or compiled token.
///
/// Stateless variants are plain values, so pushing `TRUE` or an operator never
/// allocates. Set and pattern operands are reference counted because the
/// compiled form is shared between threads.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Operator(Operator),
    /// Application property reference.
    Identifier(CheetahString),
    /// Reserved message header reference such as `JMSPriority`.
    Field(CheetahString),
    String(CheetahString),
    Long(i64),
    Double(f64),
    True,
    False,
    Null,
    /// Prepared `IN (...)` list.
    List(Arc<HashSet<CheetahString>>),
    /// Prepared `LIKE 'pattern' [ESCAPE 'c']` operand.
    Pattern(Arc<LikePattern>),
    AndMarker,
    OrMarker,
}

impl Token {
    #[inline]
    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Operator(_))
    }

    #[inline]
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Token::Operator(op) => Some(*op),
            _ => None,
        }
    }

    #[inline]
    pub fn is_marker(&self) -> bool {
        matches!(self, Token::AndMarker | Token::OrMarker)
    }

    #[inline]
    pub(crate) fn is(&self, op: Operator) -> bool {
        matches!(self, Token::Operator(o) if *o == op)
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Token::Operator(op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(op) => write!(f, "{op}"),
            Token::Identifier(name) => write!(f, "{name}"),
            Token::Field(name) => write!(f, "{name}"),
            Token::String(s) => write!(f, "'{}'", s.as_str().replace('\'', "''")),
            Token::Long(v) => write!(f, "{v}"),
            Token::Double(v) => write!(f, "{v:?}"),
            Token::True => f.write_str("TRUE"),
            Token::False => f.write_str("FALSE"),
            Token::Null => f.write_str("NULL"),
            Token::List(set) => {
                let mut items: Vec<&str> = set.iter().map(|s| s.as_str()).collect();
                items.sort_unstable();
                write!(f, "(")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{item}'")?;
                }
                write!(f, ")")
            }
            Token::Pattern(pattern) => write!(f, "{pattern}"),
            Token::AndMarker => f.write_str("&&"),
            Token::OrMarker => f.write_str("||"),
        }
    }
}

/// Renders a token stream the way the verbose compiler trace shows it.
pub(crate) fn render_tokens(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(" ")
}
