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

//! Final infix check before RPN conversion. Rejects input such as
//! `= red 'color'` (missing operator) and `a = 1 AND AND b = 2` (missing operand).

use mq_selector_error::SelectorError;
use mq_selector_error::SelectorResult;

use crate::token::Operator;
use crate::token::Token;

pub(crate) fn validate(selector: &str, tokens: &[Token]) -> SelectorResult<()> {
    let mut previous: Option<&Token> = None;

    for token in tokens {
        match (previous, token.operator()) {
            // operand after operand
            (Some(prev), None) if !prev.is_operator() => {
                return Err(SelectorError::structural("Missing operator", selector));
            }
            // the same operator twice, nested parentheses excepted
            (Some(Token::Operator(prev)), Some(op))
                if *prev == op && op != Operator::LeftParen && op != Operator::RightParen =>
            {
                return Err(SelectorError::structural("Missing operand", selector));
            }
            _ => {}
        }
        previous = Some(token);
    }

    Ok(())
}
