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

use std::str::FromStr;

use anyhow::anyhow;

/// Initializes the `tracing` subscriber on stderr.
///
/// The level comes from `level`, then `RUST_LOG`, then defaults to `WARN`
/// so the result table stays readable.
pub fn init_logger(level: Option<&str>) -> anyhow::Result<()> {
    let level = match level {
        Some(level) => level.to_string(),
        None => std::env::var("RUST_LOG").unwrap_or_else(|_| String::from("WARN")),
    };
    let max_level = tracing::Level::from_str(level.as_str()).map_err(|_| anyhow!("Invalid log level: {level}"))?;

    tracing_subscriber::fmt()
        .with_thread_names(true)
        .with_level(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .with_max_level(max_level)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logger: {e}"))
}
