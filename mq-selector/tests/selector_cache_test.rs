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

use std::sync::Arc;
use std::sync::Barrier;
use std::thread;

use mq_selector::MessageEvaluationContext;
use mq_selector::SelectorCache;
use mq_selector::SelectorConfig;

#[test]
fn global_compile_returns_live_instance() {
    let a = mq_selector::compile("region = 'eu' AND tier > 2").unwrap();
    let b = mq_selector::compile("region = 'eu' AND tier > 2").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(mq_selector::default_cache().live_count() >= 1);
}

#[test]
fn concurrent_compiles_converge_on_one_instance() {
    let cache = Arc::new(SelectorCache::new(SelectorConfig::default()));
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                cache.compile("color IN ('red', 'green') OR size > 10").unwrap()
            })
        })
        .collect();

    let selectors: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for selector in &selectors[1..] {
        assert!(Arc::ptr_eq(&selectors[0], selector));
    }
    assert_eq!(cache.len(), 1);
}

#[test]
fn shared_selector_evaluates_on_many_threads() {
    let cache = SelectorCache::default();
    let selector = cache.compile("n BETWEEN 10 AND 20 AND name LIKE 'job-%'").unwrap();

    let handles: Vec<_> = (0..8i64)
        .map(|t| {
            let selector = Arc::clone(&selector);
            thread::spawn(move || {
                let mut matched = 0;
                for i in 0..100i64 {
                    let mut props = MessageEvaluationContext::new();
                    props.put("n", t * 100 + i);
                    props.put("name", format!("job-{i}"));
                    if selector.evaluate(Some(&props), None).unwrap() {
                        matched += 1;
                    }
                }
                matched
            })
        })
        .collect();

    let counts: Vec<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts[0], 11);
    assert!(counts[1..].iter().all(|&c| c == 0));
}

#[test]
fn dead_entries_are_replaced_and_purged() {
    let cache = SelectorCache::new(SelectorConfig::default().with_cache_purge_threshold(4));
    let kept: Vec<_> = (0..3).map(|i| cache.compile(&format!("k = {i}")).unwrap()).collect();
    for i in 0..20 {
        drop(cache.compile(&format!("d = {i}")).unwrap());
    }
    assert!(cache.len() <= 5);
    assert_eq!(cache.live_count(), kept.len());
    for (i, selector) in kept.iter().enumerate() {
        assert!(Arc::ptr_eq(selector, &cache.compile(&format!("k = {i}")).unwrap()));
    }
}

#[test]
fn compile_failures_propagate_and_are_not_cached() {
    let cache = SelectorCache::default();
    for _ in 0..3 {
        let err = cache.compile("color = 'red").unwrap_err();
        assert!(err.is_lexical());
    }
    assert!(cache.is_empty());
}
