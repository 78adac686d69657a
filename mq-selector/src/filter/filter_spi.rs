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

//! Filter service provider interface.

use std::fmt;
use std::sync::Arc;

use mq_selector_error::SelectorResult;

use crate::selector::Selector;

/// Subscription expression type identifiers.
pub struct ExpressionType;

impl ExpressionType {
    /// JMS style message selector.
    pub const SQL92: &'static str = "SQL92";
}

/// A pluggable expression compiler, registered under its type identifier.
///
/// Implementations are shared between broker threads through `Arc`, so they
/// must be `Send + Sync`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use mq_selector::filter::Filter;
/// use mq_selector::filter::FilterFactory;
/// use mq_selector::Selector;
/// use mq_selector::SelectorConfig;
/// use mq_selector_error::SelectorResult;
///
/// #[derive(Debug)]
/// struct LenientFilter;
///
/// impl Filter for LenientFilter {
///     fn compile(&self, expr: &str) -> SelectorResult<Arc<Selector>> {
///         let config = SelectorConfig::default().with_convert_types(true);
///         Selector::compile(expr, config).map(Arc::new)
///     }
///
///     fn of_type(&self) -> &str {
///         "LENIENT"
///     }
/// }
///
/// FilterFactory::instance().register(Arc::new(LenientFilter));
/// let filter = FilterFactory::instance().get("LENIENT").unwrap();
/// assert!(filter.compile("'5' = 5").is_ok());
/// ```
pub trait Filter: Send + Sync + fmt::Debug {
    /// Compiles `expr`, failing with a lexical, structural or runtime error.
    fn compile(&self, expr: &str) -> SelectorResult<Arc<Selector>>;

    /// Type identifier used as the registry key.
    fn of_type(&self) -> &str;
}
