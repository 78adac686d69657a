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

//! Folds multi-word operators into single compound tokens:
//! `NOT BETWEEN`, `NOT IN`, `NOT LIKE`, `IS NULL`, `IS NOT NULL` and `IS NOT`.

use crate::token::Operator;
use crate::token::Token;

pub(crate) fn aggregate(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        match token.operator() {
            Some(Operator::Not) => {
                let compound = match iter.peek() {
                    Some(next) if next.is(Operator::Between) => Some(Operator::NotBetween),
                    Some(next) if next.is(Operator::In) => Some(Operator::NotIn),
                    Some(next) if next.is(Operator::Like) => Some(Operator::NotLike),
                    _ => None,
                };
                match compound {
                    Some(op) => {
                        iter.next();
                        out.push(Token::Operator(op));
                    }
                    None => out.push(token),
                }
            }
            Some(Operator::Is) => match iter.peek() {
                Some(Token::Null) => {
                    iter.next();
                    out.push(Token::Operator(Operator::IsNull));
                }
                Some(next) if next.is(Operator::Not) => {
                    iter.next();
                    if matches!(iter.peek(), Some(Token::Null)) {
                        iter.next();
                        out.push(Token::Operator(Operator::IsNotNull));
                    } else {
                        out.push(Token::Operator(Operator::IsNot));
                    }
                }
                _ => out.push(token),
            },
            _ => out.push(token),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::lexer::tokenize;

    fn aggregated(selector: &str) -> Vec<Token> {
        aggregate(tokenize(selector).unwrap().tokens)
    }

    fn op(op: Operator) -> Token {
        Token::Operator(op)
    }

    #[test]
    fn not_compounds() {
        assert_eq!(aggregated("NOT BETWEEN")[0], op(Operator::NotBetween));
        assert_eq!(aggregated("not in")[0], op(Operator::NotIn));
        assert_eq!(aggregated("NOT LIKE")[0], op(Operator::NotLike));
        assert_eq!(aggregated("NOT a"), vec![op(Operator::Not), Token::Identifier("a".into())]);
        assert_eq!(aggregated("NOT"), vec![op(Operator::Not)]);
    }

    #[test]
    fn is_compounds() {
        assert_eq!(aggregated("a IS NULL")[1], op(Operator::IsNull));
        assert_eq!(aggregated("a IS NOT NULL"), vec![Token::Identifier("a".into()), op(Operator::IsNotNull)]);
        assert_eq!(aggregated("a IS NOT 5")[1], op(Operator::IsNot));
        assert_eq!(aggregated("a IS NOT"), vec![Token::Identifier("a".into()), op(Operator::IsNot)]);
        assert_eq!(aggregated("a IS 5")[1], op(Operator::Is));
        assert_eq!(aggregated("IS"), vec![op(Operator::Is)]);
    }

    #[test]
    fn other_tokens_pass_through() {
        let plain = tokenize("a = 1 AND b <> 'x'").unwrap().tokens;
        assert_eq!(aggregate(plain.clone()), plain);
    }
}
