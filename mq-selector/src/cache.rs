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

//! Cache of compiled selectors keyed by source text.
//!
//! Entries hold a [`Weak`] reference, so the cache never keeps a selector
//! alive on its own: once every subscriber drops its [`Arc<Selector>`] the
//! entry is dead and is either replaced by the next compile of the same text
//! or swept by [`SelectorCache::purge`].

use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::Weak;

use ahash::RandomState;
use cheetah_string::CheetahString;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use mq_selector_error::SelectorResult;
use tracing::debug;
use tracing::warn;

use crate::config::SelectorConfig;
use crate::selector::Selector;

static DEFAULT_CACHE: LazyLock<SelectorCache> = LazyLock::new(|| SelectorCache::new(SelectorConfig::default()));

/// Process wide cache used by [`compile`](crate::compile).
pub fn default_cache() -> &'static SelectorCache {
    &DEFAULT_CACHE
}

#[derive(Debug)]
pub struct SelectorCache {
    config: SelectorConfig,
    entries: DashMap<CheetahString, Weak<Selector>, RandomState>,
}

impl Default for SelectorCache {
    fn default() -> Self {
        Self::new(SelectorConfig::default())
    }
}

impl SelectorCache {
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            config,
            entries: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Returns the live compiled selector for `text`, compiling it on a miss.
    ///
    /// Concurrent callers compiling the same text get the same instance.
    /// Failures are returned to the caller and never cached.
    pub fn compile(&self, text: &str) -> SelectorResult<Arc<Selector>> {
        if let Some(selector) = self.entries.get(text).and_then(|entry| entry.upgrade()) {
            debug!("selector cache hit: {}", text);
            return Ok(selector);
        }

        // the shard guard must be released before purging
        let compiled = {
            match self.entries.entry(CheetahString::from(text)) {
                Entry::Occupied(mut entry) => {
                    if let Some(selector) = entry.get().upgrade() {
                        return Ok(selector);
                    }
                    match self.compile_new(text) {
                        Ok(selector) => {
                            entry.insert(Arc::downgrade(&selector));
                            selector
                        }
                        Err(e) => {
                            entry.remove();
                            return Err(e);
                        }
                    }
                }
                Entry::Vacant(entry) => {
                    let selector = self.compile_new(text)?;
                    entry.insert(Arc::downgrade(&selector));
                    selector
                }
            }
        };

        if self.entries.len() > self.config.cache_purge_threshold {
            self.purge();
        }
        Ok(compiled)
    }

    fn compile_new(&self, text: &str) -> SelectorResult<Arc<Selector>> {
        debug!("selector cache miss: {}", text);
        Selector::compile(text, self.config).map(Arc::new).inspect_err(|e| {
            warn!("failed to compile selector: {}", e);
        })
    }

    /// Removes entries whose selector has been dropped. Returns the number removed.
    pub fn purge(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, selector| selector.strong_count() > 0);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!("purged {} dead selector cache entries", removed);
        }
        removed
    }

    /// Number of entries, dead ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries whose selector is still referenced.
    pub fn live_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.value().strong_count() > 0).count()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    #[inline]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }
}
