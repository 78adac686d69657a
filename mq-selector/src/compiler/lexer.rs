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

//! Character-driven state machine turning selector text into primitive tokens.

use cheetah_string::CheetahString;
use mq_selector_error::SelectorError;
use mq_selector_error::SelectorResult;

use crate::token::Operator;
use crate::token::Token;

/// Reserved header names resolved against the header context instead of the
/// property context. Any other `JMS*` name is an ordinary property.
pub const HEADER_FIELDS: [&str; 6] = [
    "JMSDeliveryMode",
    "JMSPriority",
    "JMSMessageID",
    "JMSTimestamp",
    "JMSCorrelationID",
    "JMSType",
];

/// Primitive tokens plus which lookup contexts the selector needs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Lexed {
    pub tokens: Vec<Token>,
    pub uses_properties: bool,
    pub uses_fields: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Greater,
    Less,
    ZeroPrefix,
    Integer,
    Fraction,
    ExponentStart,
    Exponent,
    StringLiteral,
    StringQuote,
    Identifier,
}

struct Lexer<'a> {
    selector: &'a str,
    tokens: Vec<Token>,
    uses_properties: bool,
    uses_fields: bool,
}

impl<'a> Lexer<'a> {
    fn push(&mut self, token: Token) {
        match &token {
            Token::Identifier(_) => self.uses_properties = true,
            Token::Field(_) => self.uses_fields = true,
            _ => {}
        }
        self.tokens.push(token);
    }

    #[inline]
    fn push_operator(&mut self, op: Operator) {
        self.tokens.push(Token::Operator(op));
    }

    #[inline]
    fn last_is(&self, op: Operator) -> bool {
        self.tokens.last().is_some_and(|t| t.is(op))
    }

    /// `+`/`-` is unary at the start, after `(` and after any operator other than `)`.
    fn expects_operand(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(Token::Operator(op)) => *op != Operator::RightParen,
            Some(_) => false,
        }
    }

    fn error(&self, message: impl Into<String>, offset: usize) -> SelectorError {
        SelectorError::lexical(message, self.selector, offset)
    }

    fn finish_integer(&mut self, digits: &mut String, radix: u32, offset: usize) -> SelectorResult<()> {
        if radix == 16 && digits.len() == 1 {
            return Err(self.error("Invalid numeric constant: missing hex digits after 0x", offset));
        }
        // Fold a preceding unary minus into the literal so i64::MIN can be written.
        if self.last_is(Operator::UnaryMinus) {
            self.tokens.pop();
            digits.insert(0, '-');
        }
        let value = i64::from_str_radix(digits, radix)
            .map_err(|e| self.error(format!("Invalid numeric constant {digits}: {e}"), offset))?;
        self.push(Token::Long(value));
        Ok(())
    }

    fn finish_double(&mut self, digits: &str, offset: usize) -> SelectorResult<()> {
        let value = digits
            .parse::<f64>()
            .map_err(|e| self.error(format!("Invalid numeric constant {digits}: {e}"), offset))?;
        self.push(Token::Double(value));
        Ok(())
    }
}

#[inline]
fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

#[inline]
fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[inline]
fn is_float_suffix(c: char) -> bool {
    matches!(c, 'd' | 'D' | 'f' | 'F')
}

/// Resolves a word to a keyword, a reserved header field or a property name.
pub(crate) fn resolve_identifier(word: &str) -> Token {
    match word.to_ascii_uppercase().as_str() {
        "NOT" => Token::Operator(Operator::Not),
        "AND" => Token::Operator(Operator::And),
        "OR" => Token::Operator(Operator::Or),
        "BETWEEN" => Token::Operator(Operator::Between),
        "LIKE" => Token::Operator(Operator::Like),
        "IN" => Token::Operator(Operator::In),
        "IS" => Token::Operator(Operator::Is),
        "ESCAPE" => Token::Operator(Operator::Escape),
        "NULL" => Token::Null,
        "TRUE" => Token::True,
        "FALSE" => Token::False,
        _ if word.starts_with("JMS") && HEADER_FIELDS.contains(&word) => Token::Field(CheetahString::from(word)),
        _ => Token::Identifier(CheetahString::from(word)),
    }
}

/// Splits `selector` into primitive tokens. Whitespace is dropped.
pub(crate) fn tokenize(selector: &str) -> SelectorResult<Lexed> {
    // A trailing delimiter lets every pending state flush its token.
    let chars: Vec<(usize, char)> = selector
        .char_indices()
        .chain(std::iter::once((selector.len(), ' ')))
        .collect();

    let mut lexer = Lexer {
        selector,
        tokens: Vec::with_capacity(chars.len() / 2 + 1),
        uses_properties: false,
        uses_fields: false,
    };
    let mut state = State::Start;
    let mut buf = String::with_capacity(32);
    let mut radix = 10u32;
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        i += 1;

        match state {
            State::Start => {
                buf.clear();
                radix = 10;
                match c {
                    ',' => lexer.push_operator(Operator::Comma),
                    '=' => {
                        if lexer.last_is(Operator::Equals) {
                            return Err(lexer.error("Invalid operator ==, use =", offset));
                        }
                        lexer.push_operator(Operator::Equals);
                    }
                    '/' => lexer.push_operator(Operator::Divide),
                    '*' => lexer.push_operator(Operator::Multiply),
                    '(' => lexer.push_operator(Operator::LeftParen),
                    ')' => lexer.push_operator(Operator::RightParen),
                    '-' => {
                        let op = if lexer.expects_operand() {
                            Operator::UnaryMinus
                        } else {
                            Operator::Minus
                        };
                        lexer.push_operator(op);
                    }
                    '+' => {
                        let op = if lexer.expects_operand() {
                            Operator::UnaryPlus
                        } else {
                            Operator::Plus
                        };
                        lexer.push_operator(op);
                    }
                    '>' => state = State::Greater,
                    '<' => state = State::Less,
                    '\'' => state = State::StringLiteral,
                    '.' => {
                        buf.push(c);
                        state = State::Fraction;
                    }
                    '0' => {
                        buf.push(c);
                        state = State::ZeroPrefix;
                    }
                    c if is_identifier_start(c) => {
                        buf.push(c);
                        state = State::Identifier;
                    }
                    c if c.is_ascii_digit() => {
                        buf.push(c);
                        state = State::Integer;
                    }
                    c if c.is_whitespace() => {}
                    c => return Err(lexer.error(format!("Invalid character {c}"), offset)),
                }
            }

            State::Greater => {
                if c == '=' {
                    lexer.push_operator(Operator::GreaterEqual);
                } else {
                    lexer.push_operator(Operator::Greater);
                    i -= 1;
                }
                state = State::Start;
            }

            State::Less => {
                match c {
                    '=' => lexer.push_operator(Operator::LessEqual),
                    '>' => lexer.push_operator(Operator::NotEquals),
                    _ => {
                        lexer.push_operator(Operator::Less);
                        i -= 1;
                    }
                }
                state = State::Start;
            }

            State::ZeroPrefix => {
                if c == 'x' || c == 'X' {
                    radix = 16;
                } else if c.is_ascii_digit() {
                    radix = 8;
                    buf.push(c);
                } else {
                    i -= 1;
                }
                state = State::Integer;
            }

            State::Integer => {
                if radix == 16 {
                    if c.is_ascii_hexdigit() {
                        buf.push(c);
                        continue;
                    }
                    if c == '.' {
                        return Err(lexer.error("Invalid numeric constant: fractional hex literal", offset));
                    }
                } else if c.is_ascii_digit() {
                    buf.push(c);
                    continue;
                } else if c == '.' {
                    buf.push(c);
                    state = State::Fraction;
                    continue;
                } else if c == 'e' || c == 'E' {
                    buf.push(c);
                    state = State::ExponentStart;
                    continue;
                }

                lexer.finish_integer(&mut buf, radix, offset)?;
                state = State::Start;
                if c != 'l' && c != 'L' {
                    i -= 1;
                }
            }

            State::Fraction => {
                if c.is_ascii_digit() {
                    buf.push(c);
                } else if c == 'e' || c == 'E' {
                    buf.push(c);
                    state = State::ExponentStart;
                } else {
                    lexer.finish_double(&buf, offset)?;
                    state = State::Start;
                    if !is_float_suffix(c) {
                        i -= 1;
                    }
                }
            }

            State::ExponentStart => {
                if c.is_ascii_digit() || c == '-' || c == '+' {
                    buf.push(c);
                    state = State::Exponent;
                } else {
                    lexer.finish_double(&buf, offset)?;
                    state = State::Start;
                    if !is_float_suffix(c) {
                        i -= 1;
                    }
                }
            }

            State::Exponent => {
                if c.is_ascii_digit() {
                    buf.push(c);
                } else {
                    lexer.finish_double(&buf, offset)?;
                    state = State::Start;
                    if !is_float_suffix(c) {
                        i -= 1;
                    }
                }
            }

            State::StringLiteral => {
                if c == '\'' {
                    state = State::StringQuote;
                } else {
                    buf.push(c);
                }
            }

            State::StringQuote => {
                if c == '\'' {
                    // '' inside a literal is an escaped quote
                    buf.push(c);
                    state = State::StringLiteral;
                } else {
                    lexer.push(Token::String(CheetahString::from(buf.as_str())));
                    state = State::Start;
                    i -= 1;
                }
            }

            State::Identifier => {
                if is_identifier_part(c) {
                    buf.push(c);
                } else {
                    let token = resolve_identifier(&buf);
                    lexer.push(token);
                    state = State::Start;
                    i -= 1;
                }
            }
        }
    }

    match state {
        State::Start => Ok(Lexed {
            tokens: lexer.tokens,
            uses_properties: lexer.uses_properties,
            uses_fields: lexer.uses_fields,
        }),
        State::StringLiteral => Err(lexer.error("Missing closing quote", selector.len())),
        _ => Err(lexer.error("Invalid expression", selector.len())),
    }
}
