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

//! Benchmarks for selector compilation and evaluation hot paths.

use std::hint::black_box;

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use mq_selector::MessageEvaluationContext;
use mq_selector::Selector;
use mq_selector::SelectorCache;
use mq_selector::SelectorConfig;

const SELECTORS: &[(&str, &str)] = &[
    ("equality", "color = 'red'"),
    ("arithmetic", "size > price * msgnum + 4 AND quantity * price > 3.00"),
    ("like", "description LIKE '%hot%nuts' AND color LIKE 'r_d'"),
    ("in_list", "region IN ('EA', 'SO', 'WE', 'BC', 'NE', 'NW') AND JMSPriority > 4"),
    (
        "short_circuit",
        "color = 'blue' AND (size > 10 OR price < 1) AND description LIKE '%x%' OR JMSType = 'order'",
    ),
];

fn message() -> (MessageEvaluationContext, MessageEvaluationContext) {
    let mut props = MessageEvaluationContext::new();
    props.put("color", "red");
    props.put("description", "Dark hot chocolate with nuts");
    props.put("size", 1024i32);
    props.put("msgnum", 5i32);
    props.put("price", 1.5f32);
    props.put("quantity", 500i64);
    props.put("region", "WE");

    let mut headers = MessageEvaluationContext::new();
    headers.put("JMSPriority", 7i32);
    headers.put("JMSType", "order");
    (props, headers)
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    for (name, text) in SELECTORS {
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
            b.iter(|| Selector::compile(black_box(*text), SelectorConfig::default()).unwrap())
        });
    }
    group.finish();

    let cache = SelectorCache::default();
    let _live: Vec<_> = SELECTORS.iter().map(|(_, text)| cache.compile(text).unwrap()).collect();
    c.bench_function("compile/cache_hit", |b| {
        b.iter(|| cache.compile(black_box(SELECTORS[1].1)).unwrap())
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let (props, headers) = message();
    let mut group = c.benchmark_group("evaluate");
    for (name, text) in SELECTORS {
        for (mode, config) in [
            ("short_circuit", SelectorConfig::default()),
            ("full", SelectorConfig::default().with_short_circuit(false)),
        ] {
            let selector = Selector::compile(*text, config).unwrap();
            group.bench_function(BenchmarkId::new(*name, mode), |b| {
                b.iter(|| selector.matches(black_box(&props), black_box(&headers)).unwrap())
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_compile, bench_evaluate);
criterion_main!(benches);
