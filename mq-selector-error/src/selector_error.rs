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

use std::fmt;

/// Category of a selector failure.
///
/// All three categories surface as the same [`SelectorError`] type so that the
/// subscribing caller only has to handle one error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorErrorKind {
    /// Bad character, unterminated string, malformed number, `==`.
    Lexical,
    /// Missing operand/operator, unbalanced parentheses, malformed `IN`/`LIKE`/`BETWEEN`.
    Structural,
    /// Type mismatch, arithmetic fault or a malformed compiled form found while evaluating.
    Runtime,
}

impl SelectorErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorErrorKind::Lexical => "Lexical",
            SelectorErrorKind::Structural => "Structural",
            SelectorErrorKind::Runtime => "Runtime",
        }
    }
}

impl fmt::Display for SelectorErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error raised while compiling or evaluating a message selector.
///
/// Lexical errors carry the byte offset of the offending character; structural
/// and runtime errors describe a grammar position and carry no offset.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} error: {message}{} in selector \"{selector}\"", render_offset(.offset))]
pub struct SelectorError {
    kind: SelectorErrorKind,
    message: String,
    offset: Option<usize>,
    selector: String,
}

fn render_offset(offset: &Option<usize>) -> String {
    match offset {
        Some(offset) => format!(" at offset {offset}"),
        None => String::new(),
    }
}

impl SelectorError {
    pub fn lexical(message: impl Into<String>, selector: impl Into<String>, offset: usize) -> Self {
        SelectorError {
            kind: SelectorErrorKind::Lexical,
            message: message.into(),
            offset: Some(offset),
            selector: selector.into(),
        }
    }

    pub fn structural(message: impl Into<String>, selector: impl Into<String>) -> Self {
        SelectorError {
            kind: SelectorErrorKind::Structural,
            message: message.into(),
            offset: None,
            selector: selector.into(),
        }
    }

    pub fn runtime(message: impl Into<String>, selector: impl Into<String>) -> Self {
        SelectorError {
            kind: SelectorErrorKind::Runtime,
            message: message.into(),
            offset: None,
            selector: selector.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> SelectorErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset into the selector text, only set for lexical errors.
    #[inline]
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    #[inline]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    #[inline]
    pub fn is_lexical(&self) -> bool {
        self.kind == SelectorErrorKind::Lexical
    }

    #[inline]
    pub fn is_structural(&self) -> bool {
        self.kind == SelectorErrorKind::Structural
    }

    #[inline]
    pub fn is_runtime(&self) -> bool {
        self.kind == SelectorErrorKind::Runtime
    }
}
