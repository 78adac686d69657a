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

//! # Message Selector Errors
//!
//! Error types shared by the selector engine and its tooling.
//!
//! A selector can fail in three ways, all reported through [`SelectorError`]:
//!
//! - **Lexical**: the text cannot be tokenized (carries a byte offset)
//! - **Structural**: the tokens do not form a valid expression
//! - **Runtime**: evaluation hit a type mismatch or arithmetic fault
//!
//! ```rust
//! use mq_selector_error::SelectorError;
//! use mq_selector_error::SelectorResult;
//!
//! fn reject(text: &str) -> SelectorResult<()> {
//!     Err(SelectorError::structural("Missing operand", text))
//! }
//! assert!(reject("a AND").unwrap_err().is_structural());
//! ```

pub mod config_error;
pub mod selector_error;

pub use config_error::ConfigError;
pub use selector_error::SelectorError;
pub use selector_error::SelectorErrorKind;

pub type SelectorResult<T> = std::result::Result<T, SelectorError>;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
