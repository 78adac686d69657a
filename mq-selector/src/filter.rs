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

//! Expression filter registry.
//!
//! A broker resolves a subscription's expression type (`SQL92` for message
//! selectors) to a [`Filter`] through [`FilterFactory`], then compiles the
//! subscription expression once and evaluates it per message.
//!
//! ```
//! use mq_selector::filter::FilterFactory;
//! use mq_selector::MessageEvaluationContext;
//!
//! let filter = FilterFactory::get_sql_filter();
//! let selector = filter.compile("age > 18 AND region = 'US'")?;
//!
//! let mut props = MessageEvaluationContext::new();
//! props.put("age", 30i64);
//! props.put("region", "US");
//! assert!(selector.evaluate(Some(&props), None)?);
//! # Ok::<(), mq_selector_error::SelectorError>(())
//! ```

mod filter_factory;
mod filter_spi;
mod filter_sql_filter;

pub use filter_factory::FilterFactory;
pub use filter_spi::ExpressionType;
pub use filter_spi::Filter;
pub use filter_sql_filter::SqlFilter;
