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

//! `SQL92` message selector filter.

use std::sync::Arc;

use mq_selector_error::SelectorResult;

use crate::cache::SelectorCache;
use crate::config::SelectorConfig;
use crate::filter::filter_spi::ExpressionType;
use crate::filter::filter_spi::Filter;
use crate::selector::Selector;

/// Compiles message selectors through a [`SelectorCache`], so every
/// subscription with the same expression shares one compiled selector.
#[derive(Debug, Default)]
pub struct SqlFilter {
    cache: SelectorCache,
}

impl SqlFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SelectorConfig) -> Self {
        Self {
            cache: SelectorCache::new(config),
        }
    }

    #[inline]
    pub fn cache(&self) -> &SelectorCache {
        &self.cache
    }
}

impl Filter for SqlFilter {
    fn compile(&self, expr: &str) -> SelectorResult<Arc<Selector>> {
        self.cache.compile(expr)
    }

    fn of_type(&self) -> &str {
        ExpressionType::SQL92
    }
}
