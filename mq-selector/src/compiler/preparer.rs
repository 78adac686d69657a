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

//! Rewrites operator-specific sub-sequences into evaluation-ready operands.
//!
//! - The `AND` of `BETWEEN x AND y` becomes a `,` so the range bounds compile
//!   like arguments of a three-operand operator.
//! - `IN ('a', 'b')` collapses into a single set operand.
//! - `LIKE 'pattern' [ESCAPE 'c']` collapses into a single pattern operand.

use std::collections::HashSet;
use std::iter::Peekable;
use std::sync::Arc;
use std::vec::IntoIter;

use cheetah_string::CheetahString;
use mq_selector_error::SelectorError;
use mq_selector_error::SelectorResult;

use crate::like_pattern::LikePattern;
use crate::token::Operator;
use crate::token::Token;

pub(crate) fn prepare(selector: &str, tokens: Vec<Token>) -> SelectorResult<Vec<Token>> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        match token.operator() {
            Some(Operator::Between | Operator::NotBetween) => {
                out.push(token);
                for next in iter.by_ref() {
                    if next.is(Operator::And) {
                        out.push(Token::Operator(Operator::Comma));
                        break;
                    }
                    out.push(next);
                }
            }
            Some(Operator::In | Operator::NotIn) => {
                out.push(token);
                out.push(prepare_list(selector, &mut iter)?);
            }
            Some(Operator::Like | Operator::NotLike) => {
                out.push(token);
                out.push(prepare_pattern(selector, &mut iter)?);
            }
            _ => out.push(token),
        }
    }

    Ok(out)
}

fn prepare_list(selector: &str, iter: &mut Peekable<IntoIter<Token>>) -> SelectorResult<Token> {
    match iter.next() {
        Some(t) if t.is(Operator::LeftParen) => {}
        _ => return Err(SelectorError::structural("Missing ( in IN statement", selector)),
    }

    let mut set = HashSet::new();
    let mut expect_item = true;
    loop {
        match iter.next() {
            Some(Token::Operator(Operator::RightParen)) if !expect_item || set.is_empty() => break,
            Some(Token::Operator(Operator::Comma)) if !expect_item => expect_item = true,
            Some(Token::String(value)) if expect_item => {
                set.insert(value);
                expect_item = false;
            }
            Some(other) => {
                return Err(SelectorError::structural(
                    format!("IN requires a comma separated list of string literals: {other}"),
                    selector,
                ));
            }
            None => return Err(SelectorError::structural("Missing ) in IN statement", selector)),
        }
    }

    Ok(Token::List(Arc::new(set)))
}

fn prepare_pattern(selector: &str, iter: &mut Peekable<IntoIter<Token>>) -> SelectorResult<Token> {
    let pattern = match iter.next() {
        Some(Token::String(pattern)) => pattern,
        other => {
            return Err(SelectorError::structural(
                format!("LIKE requires string literal: {}", describe(other.as_ref())),
                selector,
            ));
        }
    };

    let mut escape = None;
    if iter.next_if(|t| t.is(Operator::Escape)).is_some() {
        match iter.next() {
            Some(Token::String(value)) => {
                let mut chars = value.as_str().chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => escape = Some(c),
                    _ => {
                        return Err(SelectorError::structural(
                            format!("ESCAPE requires a single character: '{value}'"),
                            selector,
                        ));
                    }
                }
            }
            other => {
                return Err(SelectorError::structural(
                    format!("ESCAPE requires string literal: {}", describe(other.as_ref())),
                    selector,
                ));
            }
        }
    }

    Ok(Token::Pattern(Arc::new(LikePattern::new(pattern, escape))))
}

fn describe(token: Option<&Token>) -> String {
    match token {
        Some(token) => token.to_string(),
        None => "end of selector".to_string(),
    }
}
