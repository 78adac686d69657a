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

//! Selector compilation pipeline.
//!
//! ```text
//! text -> lexer -> aggregator -> preparer -> validator -> rpn
//! ```
//!
//! Each pass consumes the previous token stream and either returns a new one
//! or fails with a lexical or structural [`SelectorError`].

pub(crate) mod aggregator;
pub(crate) mod lexer;
pub(crate) mod preparer;
pub(crate) mod rpn;
pub(crate) mod validator;

use mq_selector_error::SelectorError;
use mq_selector_error::SelectorResult;
use tracing::debug;
use tracing::enabled;
use tracing::trace;
use tracing::Level;

use crate::token::render_tokens;
use crate::token::Token;

/// Output of a successful compilation.
#[derive(Debug)]
pub(crate) struct Compiled {
    pub rpn: Vec<Token>,
    pub uses_properties: bool,
    pub uses_fields: bool,
}

pub(crate) fn compile(selector: &str, short_circuit: bool) -> SelectorResult<Compiled> {
    if selector.trim().is_empty() {
        return Err(SelectorError::structural("Empty selector", selector));
    }

    let lexed = lexer::tokenize(selector)?;
    dump("tokenize", &lexed.tokens);

    let tokens = aggregator::aggregate(lexed.tokens);
    dump("aggregate", &tokens);

    let tokens = preparer::prepare(selector, tokens)?;
    dump("prepare", &tokens);

    validator::validate(selector, &tokens)?;

    let rpn = rpn::convert_to_rpn(selector, tokens, short_circuit)?;
    if enabled!(Level::DEBUG) {
        debug!("compiled selector \"{}\" to [{}]", selector, render_tokens(&rpn));
    }

    Ok(Compiled {
        rpn,
        uses_properties: lexed.uses_properties,
        uses_fields: lexed.uses_fields,
    })
}

#[inline]
fn dump(pass: &str, tokens: &[Token]) {
    if enabled!(Level::TRACE) {
        trace!("{pass}: [{}]", render_tokens(tokens));
    }
}
