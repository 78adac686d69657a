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

//! Command-line harness for the selector engine.

pub mod command_line;
pub mod content_show;
pub mod log;
mod property_arg;

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use mq_selector::MessageEvaluationContext;
use mq_selector::PropertyValue;
use mq_selector::SelectorCache;
use mq_selector::SelectorConfig;
use mq_selector_error::SelectorResult;
use tracing::debug;
use tracing::info;

use crate::command_line::SelectorCli;
use crate::content_show::SelectorReport;

pub use crate::property_arg::parse_property;

/// Builds the selector config from `--config` and the override flags.
pub fn load_config(cli: &SelectorCli) -> anyhow::Result<SelectorConfig> {
    let mut config = match &cli.config {
        Some(path) => SelectorConfig::load(path)?,
        None => SelectorConfig::default(),
    };
    if cli.convert_types {
        config = config.with_convert_types(true);
    }
    if cli.no_short_circuit {
        config = config.with_short_circuit(false);
    }
    Ok(config)
}

/// Reads a JSON object of property values.
pub fn load_context_file(path: &Path) -> anyhow::Result<MessageEvaluationContext> {
    let content = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let values: std::collections::HashMap<String, PropertyValue> =
        serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(values.into_iter().collect())
}

fn build_context(file: Option<&Path>, values: &[(String, PropertyValue)]) -> anyhow::Result<MessageEvaluationContext> {
    let mut context = match file {
        Some(path) => load_context_file(path)?,
        None => MessageEvaluationContext::new(),
    };
    context.extend(values.iter().cloned());
    Ok(context)
}

/// Compiles and evaluates every selector, returning one report per selector.
pub fn run(cli: &SelectorCli) -> anyhow::Result<Vec<SelectorReport>> {
    let config = load_config(cli)?;
    info!("using {:?}", config);

    let properties = build_context(cli.properties_file.as_deref(), &cli.properties)?;
    let headers = build_context(cli.headers_file.as_deref(), &cli.headers)?;
    let cache = SelectorCache::new(config);

    let reports = cli
        .selectors
        .iter()
        .map(|text| match evaluate(cli, &cache, text, &properties, &headers) {
            Ok(report) => report,
            Err(e) => SelectorReport::failed(text, e),
        })
        .collect();
    Ok(reports)
}

fn evaluate(
    cli: &SelectorCli,
    cache: &SelectorCache,
    text: &str,
    properties: &MessageEvaluationContext,
    headers: &MessageEvaluationContext,
) -> SelectorResult<SelectorReport> {
    let start = Instant::now();
    let selector = cache.compile(text)?;
    let compile = start.elapsed();

    if cli.debug {
        println!("{}", selector.to_debug_string());
    }

    let start = Instant::now();
    let mut matched = false;
    for _ in 0..cli.loops {
        matched = selector.matches(properties, headers)?;
    }
    let elapsed = start.elapsed();
    debug!("{} evaluations of \"{}\" took {:?}", cli.loops, text, elapsed);

    Ok(SelectorReport::evaluated(text, matched, compile, cli.loops, elapsed))
}
