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

//! SQL `LIKE` pattern matching.
//!
//! Only the two standard wildcards are supported: `_` matches exactly one
//! character and `%` matches any run of characters, including an empty one.
//! An optional escape character makes the following pattern character literal.
//!
//! Matching backtracks on `%`, so the worst case is exponential in the number
//! of `%` groups. Runs of consecutive `%` are collapsed before branching.

use std::fmt;

use cheetah_string::CheetahString;

/// Compiled operand of a `LIKE` / `NOT LIKE` clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LikePattern {
    pattern: CheetahString,
    escape: Option<char>,
}

impl LikePattern {
    pub fn new(pattern: impl Into<CheetahString>, escape: Option<char>) -> Self {
        Self {
            pattern: pattern.into(),
            escape,
        }
    }

    #[inline]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    #[inline]
    pub fn escape(&self) -> Option<char> {
        self.escape
    }

    /// Returns `true` when the whole of `value` matches the whole pattern.
    #[inline]
    pub fn matches(&self, value: &str) -> bool {
        match_from(self.pattern.as_str(), value, self.escape)
    }
}

impl fmt::Display for LikePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.pattern)?;
        if let Some(escape) = self.escape {
            write!(f, " ESCAPE '{escape}'")?;
        }
        Ok(())
    }
}

fn match_from(pattern: &str, value: &str, escape: Option<char>) -> bool {
    let mut pattern_rest = pattern;
    let mut value_rest = value;

    while let Some(mut pc) = pattern_rest.chars().next() {
        pattern_rest = &pattern_rest[pc.len_utf8()..];

        let mut literal = false;
        if Some(pc) == escape {
            // A trailing escape character stands for itself.
            if let Some(next) = pattern_rest.chars().next() {
                pattern_rest = &pattern_rest[next.len_utf8()..];
                pc = next;
            }
            literal = true;
        }

        if !literal && pc == '%' {
            pattern_rest = pattern_rest.trim_start_matches('%');
            if pattern_rest.is_empty() {
                return true;
            }
            return value_rest
                .char_indices()
                .map(|(idx, _)| idx)
                .chain(std::iter::once(value_rest.len()))
                .any(|split| match_from(pattern_rest, &value_rest[split..], escape));
        }

        let Some(vc) = value_rest.chars().next() else {
            return false;
        };
        if (literal || pc != '_') && pc != vc {
            return false;
        }
        value_rest = &value_rest[vc.len_utf8()..];
    }

    value_rest.is_empty()
}
