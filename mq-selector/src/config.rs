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

use std::path::Path;

use config::Config;
use mq_selector_error::ConfigError;
use mq_selector_error::ConfigResult;
use serde::Deserialize;
use serde::Serialize;
use tracing::info;

/// Behaviour switches of the selector engine.
///
/// A copy is captured by every compiled selector, so the compile-time
/// self-test and all later evaluations run under the same switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Legacy compatibility: coerce string operands of numeric operators to numbers.
    #[serde(alias = "convertTypes")]
    pub convert_types: bool,

    /// Emit short-circuit markers after `AND`/`OR` and honour them when evaluating.
    #[serde(alias = "shortCircuit")]
    pub short_circuit: bool,

    /// Run a second self-test at compile time with every marker seeing `TRUE`,
    /// so the right operand of each `AND` is checked even after a `FALSE`.
    #[serde(alias = "shortCircuitCompileTimeTest")]
    pub short_circuit_compile_time_test: bool,

    /// Number of cache entries above which dead entries are purged.
    #[serde(alias = "cachePurgeThreshold")]
    pub cache_purge_threshold: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        SelectorConfig {
            convert_types: false,
            short_circuit: true,
            short_circuit_compile_time_test: true,
            cache_purge_threshold: 1024,
        }
    }
}

impl SelectorConfig {
    /// Loads a config file (any format the `config` crate detects by extension).
    /// Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let selector_config = Config::builder()
            .add_source(config::File::from(path))
            .build()
            .and_then(|cfg| cfg.try_deserialize::<SelectorConfig>())
            .map_err(|e| ConfigError::load(format!("{}: {e}", path.display())))?;
        selector_config.validate()?;
        info!("selector config loaded from {}: {:?}", path.display(), selector_config);
        Ok(selector_config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.cache_purge_threshold == 0 {
            return Err(ConfigError::invalid("cachePurgeThreshold", "must be greater than 0"));
        }
        Ok(())
    }

    pub fn with_convert_types(mut self, convert_types: bool) -> Self {
        self.convert_types = convert_types;
        self
    }

    pub fn with_short_circuit(mut self, short_circuit: bool) -> Self {
        self.short_circuit = short_circuit;
        self
    }

    pub fn with_short_circuit_compile_time_test(mut self, enabled: bool) -> Self {
        self.short_circuit_compile_time_test = enabled;
        self
    }

    pub fn with_cache_purge_threshold(mut self, threshold: usize) -> Self {
        self.cache_purge_threshold = threshold;
        self
    }
}
