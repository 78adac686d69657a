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

//! Global registry of filter implementations keyed by expression type.

use std::sync::Arc;
use std::sync::LazyLock;

use dashmap::DashMap;

use crate::filter::filter_spi::ExpressionType;
use crate::filter::filter_spi::Filter;
use crate::filter::filter_sql_filter::SqlFilter;

static FILTER_REGISTRY: LazyLock<DashMap<String, Arc<dyn Filter>>> = LazyLock::new(|| {
    let registry = DashMap::new();
    registry.insert(
        ExpressionType::SQL92.to_string(),
        Arc::new(SqlFilter::new()) as Arc<dyn Filter>,
    );
    registry
});

/// Filter registry facade.
///
/// `SQL92` is registered on first use. Registering another filter under an
/// existing type replaces it.
#[derive(Debug)]
pub struct FilterFactory;

impl FilterFactory {
    pub fn instance() -> &'static Self {
        static INSTANCE: LazyLock<FilterFactory> = LazyLock::new(|| FilterFactory);
        &INSTANCE
    }

    /// Registers `filter` under `filter.of_type()`, returning the filter it replaced.
    pub fn register(&self, filter: Arc<dyn Filter>) -> Option<Arc<dyn Filter>> {
        let filter_type = filter.of_type().to_string();
        FILTER_REGISTRY.insert(filter_type, filter)
    }

    pub fn unregister(&self, filter_type: &str) -> Option<Arc<dyn Filter>> {
        FILTER_REGISTRY.remove(filter_type).map(|(_, v)| v)
    }

    pub fn get(&self, filter_type: &str) -> Option<Arc<dyn Filter>> {
        FILTER_REGISTRY.get(filter_type).map(|entry| Arc::clone(&*entry))
    }

    pub fn contains(&self, filter_type: &str) -> bool {
        FILTER_REGISTRY.contains_key(filter_type)
    }

    /// Returns the `SQL92` filter, registering a default one if it was removed.
    pub fn get_sql_filter() -> Arc<dyn Filter> {
        let entry = FILTER_REGISTRY
            .entry(ExpressionType::SQL92.to_string())
            .or_insert_with(|| Arc::new(SqlFilter::new()) as Arc<dyn Filter>);
        Arc::clone(&*entry)
    }

    pub fn registered_types(&self) -> Vec<String> {
        FILTER_REGISTRY.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn count(&self) -> usize {
        FILTER_REGISTRY.len()
    }
}
