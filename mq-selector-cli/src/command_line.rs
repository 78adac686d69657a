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

use std::path::PathBuf;

use clap::Parser;
use mq_selector::PropertyValue;

use crate::property_arg::parse_property;

#[derive(Parser, Debug)]
#[command(
    name = "mq-selector",
    version,
    about = "Compile message selectors and evaluate them against a message"
)]
pub struct SelectorCli {
    /// Selector expressions to evaluate
    #[arg(required = true, value_name = "SELECTOR")]
    pub selectors: Vec<String>,

    #[arg(
        short = 'p',
        long = "property",
        value_name = "KEY=VALUE",
        value_parser = parse_property,
        help = "Message property. TRUE/FALSE, integers and decimals are typed, 'quoted' values \
                are always strings"
    )]
    pub properties: Vec<(String, PropertyValue)>,

    #[arg(
        short = 'H',
        long = "header",
        value_name = "KEY=VALUE",
        value_parser = parse_property,
        help = "Message header field such as JMSPriority=4"
    )]
    pub headers: Vec<(String, PropertyValue)>,

    /// JSON object of message properties, merged before --property values
    #[arg(long, value_name = "FILE")]
    pub properties_file: Option<PathBuf>,

    /// JSON object of message header fields, merged before --header values
    #[arg(long, value_name = "FILE")]
    pub headers_file: Option<PathBuf>,

    /// Selector config file (toml, json or yaml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Coerce string operands of numeric operators to numbers
    #[arg(long)]
    pub convert_types: bool,

    /// Evaluate every operand instead of skipping decided AND/OR branches
    #[arg(long)]
    pub no_short_circuit: bool,

    #[arg(
        short = 'l',
        long = "loop",
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Evaluate each selector N times and report the evaluation rate"
    )]
    pub loops: u32,

    /// Print the compiled RPN form of each selector
    #[arg(long)]
    pub debug: bool,

    #[arg(
        long,
        value_name = "LEVEL",
        help = "Log level (ERROR, WARN, INFO, DEBUG, TRACE), defaults to RUST_LOG or WARN"
    )]
    pub log_level: Option<String>,
}
