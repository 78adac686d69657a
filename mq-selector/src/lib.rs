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

//! # Message Selector Engine
//!
//! Compiles JMS style message selectors such as
//! `JMSPriority > 4 AND color IN ('red', 'blue')` to reverse Polish notation
//! and evaluates them against message properties and header fields using
//! three-valued logic.
//!
//! ```
//! use mq_selector::MessageEvaluationContext;
//!
//! let selector = mq_selector::compile("size BETWEEN 1 AND 5 AND name LIKE 'or_er%'")?;
//!
//! let mut props = MessageEvaluationContext::new();
//! props.put("size", 3i32);
//! props.put("name", "order-42");
//! assert!(selector.evaluate(Some(&props), None)?);
//!
//! // a missing property is UNKNOWN, which never matches
//! assert!(!selector.evaluate(None, None)?);
//! # Ok::<(), mq_selector_error::SelectorError>(())
//! ```
//!
//! Compilation runs the text through a lexer, a compound-operator aggregator,
//! a clause preparer, a validator and a shunting-yard converter, then
//! evaluates the result once against empty contexts so that type errors are
//! reported at subscribe time.

pub mod cache;
mod compiler;
pub mod config;
pub mod evaluation_context;
mod evaluator;
pub mod filter;
pub mod like_pattern;
pub mod property_value;
pub mod selector;
pub mod token;

use std::sync::Arc;

pub use crate::cache::default_cache;
pub use crate::cache::SelectorCache;
pub use crate::compiler::lexer::HEADER_FIELDS;
pub use crate::config::SelectorConfig;
pub use crate::evaluation_context::EvaluationContext;
pub use crate::evaluation_context::MessageEvaluationContext;
pub use crate::like_pattern::LikePattern;
pub use crate::property_value::PropertyValue;
pub use crate::selector::Selector;
pub use crate::token::Operator;
pub use crate::token::Token;
pub use mq_selector_error::SelectorError;
pub use mq_selector_error::SelectorErrorKind;
pub use mq_selector_error::SelectorResult;

/// Compiles `text` through the process wide [`SelectorCache`].
pub fn compile(text: &str) -> SelectorResult<Arc<Selector>> {
    default_cache().compile(text)
}
