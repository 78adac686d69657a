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

use std::time::Duration;

use tabled::Table;
use tabled::Tabled;

/// One row of the result table.
#[derive(Tabled, Debug, Clone, PartialEq)]
pub struct SelectorReport {
    pub selector: String,
    pub result: String,
    #[tabled(rename = "compile (us)")]
    pub compile_micros: String,
    #[tabled(rename = "evals/sec")]
    pub rate: String,
}

impl SelectorReport {
    pub fn evaluated(selector: &str, matched: bool, compile: Duration, loops: u32, elapsed: Duration) -> Self {
        Self {
            selector: selector.to_string(),
            result: matched.to_string(),
            compile_micros: compile.as_micros().to_string(),
            rate: evaluation_rate(loops, elapsed),
        }
    }

    pub fn failed(selector: &str, error: impl std::fmt::Display) -> Self {
        Self {
            selector: selector.to_string(),
            result: format!("ERROR: {error}"),
            compile_micros: String::from("-"),
            rate: String::from("-"),
        }
    }

    pub fn is_error(&self) -> bool {
        self.result.starts_with("ERROR")
    }
}

fn evaluation_rate(loops: u32, elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return String::from("-");
    }
    format!("{:.0}", f64::from(loops) / secs)
}

pub fn print_reports(reports: Vec<SelectorReport>) {
    println!("{}", Table::new(reports));
}
