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

use std::process::ExitCode;

use clap::Parser;
use mq_selector_cli::command_line::SelectorCli;
use mq_selector_cli::content_show::print_reports;

fn main() -> ExitCode {
    let cli = SelectorCli::parse();
    if let Err(e) = mq_selector_cli::log::init_logger(cli.log_level.as_deref()) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    match mq_selector_cli::run(&cli) {
        Ok(reports) => {
            let failed = reports.iter().any(|r| r.is_error());
            print_reports(reports);
            if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
