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

//! Shunting-yard conversion from infix to reverse Polish notation.
//!
//! When short-circuiting is enabled an `AND`/`OR` marker is emitted right
//! after the operator is pushed on the operator stack. At evaluation time the
//! marker sits between the left operand and the right operand, so the
//! evaluator can skip the right operand once the left one decides the result.

use mq_selector_error::SelectorError;
use mq_selector_error::SelectorResult;

use crate::token::Operator;
use crate::token::Token;

pub(crate) fn convert_to_rpn(selector: &str, tokens: Vec<Token>, short_circuit: bool) -> SelectorResult<Vec<Token>> {
    let mut stack: Vec<Operator> = Vec::new();
    // room for the markers
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len() + tokens.len() / 2);

    for token in tokens {
        let op = match token {
            Token::Operator(op) => op,
            operand => {
                out.push(operand);
                continue;
            }
        };

        match op {
            Operator::LeftParen => stack.push(op),
            Operator::RightParen => loop {
                match stack.pop() {
                    None => return Err(SelectorError::structural("Missing (", selector)),
                    Some(Operator::LeftParen) => break,
                    Some(top) => out.push(Token::Operator(top)),
                }
            },
            _ => {
                while let Some(&top) = stack.last() {
                    if top == Operator::LeftParen || top.precedence() < op.precedence() {
                        break;
                    }
                    stack.pop();
                    out.push(Token::Operator(top));
                }
                stack.push(op);

                if short_circuit {
                    match op {
                        Operator::And => out.push(Token::AndMarker),
                        Operator::Or => out.push(Token::OrMarker),
                        _ => {}
                    }
                }
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top == Operator::LeftParen {
            return Err(SelectorError::structural("Missing )", selector));
        }
        out.push(Token::Operator(top));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::aggregator::aggregate;
    use crate::compiler::lexer::tokenize;
    use crate::compiler::preparer::prepare;
    use crate::token::render_tokens;

    fn rpn(selector: &str, short_circuit: bool) -> SelectorResult<String> {
        let tokens = prepare(selector, aggregate(tokenize(selector).unwrap().tokens))?;
        convert_to_rpn(selector, tokens, short_circuit).map(|t| render_tokens(&t))
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(rpn("1 + 4 * 5 = 21", false).unwrap(), "1 4 5 * + 21 =");
        assert_eq!(rpn("(1 + 4) * 5 = 25", false).unwrap(), "1 4 + 5 * 25 =");
        assert_eq!(rpn("a - b - c", false).unwrap(), "a b - c -");
        assert_eq!(rpn("(1 + 4) * -x", false).unwrap(), "1 4 + x u- *");
    }

    #[test]
    fn boolean_precedence() {
        assert_eq!(rpn("a OR b AND c", false).unwrap(), "a b c AND OR");
        assert_eq!(rpn("NOT a = 1", false).unwrap(), "a 1 = NOT");
    }

    #[test]
    fn markers_follow_pushed_operator() {
        assert_eq!(rpn("a AND b", true).unwrap(), "a && b AND");
        assert_eq!(rpn("a OR b AND c", true).unwrap(), "a || b && c AND OR");
        assert_eq!(rpn("a AND b OR c", true).unwrap(), "a && b AND || c OR");
    }

    #[test]
    fn between_compiles_as_three_operands() {
        // the comma is a no-op at evaluation, so binding tighter than `+` is harmless
        assert_eq!(rpn("x BETWEEN 1 AND 2 + 3", false).unwrap(), "x 1 2 , 3 + BETWEEN");
    }

    #[test]
    fn unbalanced_parentheses() {
        let err = rpn("((1 + 2) * 4 = 3", false).unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.message(), "Missing )");

        let err = rpn("(1 + 2)) * 4 = 3", false).unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.message(), "Missing (");
    }

    #[test]
    fn markers_stay_within_budget() {
        let selector = "a AND b OR c AND (d OR e) AND f";
        let tokens = prepare(selector, aggregate(tokenize(selector).unwrap().tokens)).unwrap();
        let infix = tokens.len();
        let out = convert_to_rpn(selector, tokens, true).unwrap();
        assert!(out.len() * 2 <= infix * 3);
    }
}
