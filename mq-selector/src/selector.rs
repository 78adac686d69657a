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

//! Compiled message selector.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use cheetah_string::CheetahString;
use mq_selector_error::SelectorResult;
use tracing::debug;

use crate::compiler;
use crate::config::SelectorConfig;
use crate::evaluation_context::EvaluationContext;
use crate::evaluator::Evaluator;
use crate::property_value::PropertyValue;
use crate::token::render_tokens;
use crate::token::Token;

/// A selector compiled to reverse Polish notation.
///
/// Immutable once built and safe to share between threads: every call to
/// [`Selector::evaluate`] uses its own operand stack. Two selectors are equal
/// when their source text is equal.
///
/// # Example
///
/// ```
/// use mq_selector::MessageEvaluationContext;
/// use mq_selector::Selector;
/// use mq_selector::SelectorConfig;
///
/// let selector = Selector::compile("color IN ('red', 'blue') AND size > 10", SelectorConfig::default())?;
///
/// let mut props = MessageEvaluationContext::new();
/// props.put("color", "red");
/// props.put("size", 12i64);
///
/// assert!(selector.evaluate(Some(&props), None)?);
/// assert_eq!(selector.source(), "color IN ('red', 'blue') AND size > 10");
/// # Ok::<(), mq_selector_error::SelectorError>(())
/// ```
#[derive(Debug)]
pub struct Selector {
    source: CheetahString,
    rpn: Vec<Token>,
    uses_properties: bool,
    uses_fields: bool,
    config: SelectorConfig,
}

impl Selector {
    /// Compiles `text` and evaluates it once against empty contexts so that
    /// type errors surface now rather than on the first message.
    ///
    /// With `short_circuit_compile_time_test` enabled a second pass runs with
    /// every `AND` marker forced not to skip, which reaches the right operand
    /// of `FALSE AND ...` as well.
    pub fn compile(text: impl Into<CheetahString>, config: SelectorConfig) -> SelectorResult<Self> {
        let source = text.into();
        let compiled = compiler::compile(source.as_str(), config.short_circuit)?;

        let selector = Selector {
            source,
            rpn: compiled.rpn,
            uses_properties: compiled.uses_properties,
            uses_fields: compiled.uses_fields,
            config,
        };

        let empty: HashMap<&str, PropertyValue> = HashMap::new();
        selector.evaluate_inner(Some(&empty), Some(&empty), false)?;
        if config.short_circuit && config.short_circuit_compile_time_test {
            selector.evaluate_inner(Some(&empty), Some(&empty), true)?;
        }

        debug!("selector compiled: {}", selector.to_debug_string());
        Ok(selector)
    }

    /// Evaluates the selector. A missing context behaves like an empty one,
    /// every lookup against it is UNKNOWN.
    ///
    /// UNKNOWN as the overall result does not match, so the return value is
    /// `Ok(false)` in that case.
    pub fn evaluate(
        &self,
        properties: Option<&dyn EvaluationContext>,
        headers: Option<&dyn EvaluationContext>,
    ) -> SelectorResult<bool> {
        self.evaluate_inner(properties, headers, false)
    }

    /// Same as [`Selector::evaluate`] with both contexts present.
    #[inline]
    pub fn matches<P, H>(&self, properties: &P, headers: &H) -> SelectorResult<bool>
    where
        P: EvaluationContext,
        H: EvaluationContext,
    {
        self.evaluate_inner(Some(properties), Some(headers), false)
    }

    fn evaluate_inner(
        &self,
        properties: Option<&dyn EvaluationContext>,
        headers: Option<&dyn EvaluationContext>,
        compile_test: bool,
    ) -> SelectorResult<bool> {
        Evaluator::new(self.source.as_str(), &self.config, properties, headers)
            .compile_test(compile_test)
            .evaluate(&self.rpn)
    }

    #[inline]
    pub fn source(&self) -> &str {
        self.source.as_str()
    }

    /// Whether the selector references any application property.
    #[inline]
    pub fn uses_properties(&self) -> bool {
        self.uses_properties
    }

    /// Whether the selector references any reserved header field.
    #[inline]
    pub fn uses_fields(&self) -> bool {
        self.uses_fields
    }

    #[inline]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    #[inline]
    pub fn rpn(&self) -> &[Token] {
        &self.rpn
    }

    /// The compiled RPN stream, markers included, as space separated tokens.
    pub fn to_debug_string(&self) -> String {
        format!("\"{}\": [{}]", self.source, render_tokens(&self.rpn))
    }
}

impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Selector {}

impl Hash for Selector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.as_str().hash(state);
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source.as_str())
    }
}
