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

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::hash::Hash;

use ahash::RandomState;
use cheetah_string::CheetahString;
use serde::Deserialize;
use serde::Serialize;

use crate::property_value::PropertyValue;

/// Lookup of named values during selector evaluation.
///
/// The broker supplies two contexts per message: the application properties
/// and the reserved header fields. Implementations are read-only during
/// evaluation and are never retained by the selector.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use mq_selector::EvaluationContext;
/// use mq_selector::PropertyValue;
///
/// let mut props: HashMap<String, PropertyValue> = HashMap::new();
/// props.insert("color".to_string(), "red".into());
/// assert_eq!(props.get_value("color").and_then(|v| v.as_str()), Some("red"));
/// assert!(props.get_value("size").is_none());
/// ```
pub trait EvaluationContext {
    /// Get value by name, `None` when the name is absent.
    fn get_value(&self, name: &str) -> Option<&PropertyValue>;
}

impl<K, S> EvaluationContext for HashMap<K, PropertyValue, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn get_value(&self, name: &str) -> Option<&PropertyValue> {
        self.get(name)
    }
}

/// Default message context backed by an `ahash` map.
///
/// # Example
///
/// ```
/// use mq_selector::EvaluationContext;
/// use mq_selector::MessageEvaluationContext;
///
/// let mut context = MessageEvaluationContext::new();
/// context.put("color", "red");
/// context.put("size", 1024i64);
///
/// assert_eq!(context.len(), 2);
/// assert!(context.get_value("nonexistent").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvaluationContext {
    #[serde(with = "hashmap_serde")]
    properties: HashMap<CheetahString, PropertyValue, RandomState>,
}

// Custom serde implementation for HashMap with RandomState
mod hashmap_serde {
    use super::*;
    use serde::Deserializer;
    use serde::Serializer;

    pub fn serialize<S>(
        map: &HashMap<CheetahString, PropertyValue, RandomState>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(map.iter())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<HashMap<CheetahString, PropertyValue, RandomState>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let standard_map: HashMap<CheetahString, PropertyValue> = HashMap::deserialize(deserializer)?;
        let mut ahash_map = HashMap::with_capacity_and_hasher(standard_map.len(), RandomState::default());
        ahash_map.extend(standard_map);
        Ok(ahash_map)
    }
}

impl Default for MessageEvaluationContext {
    fn default() -> Self {
        Self {
            properties: HashMap::with_hasher(RandomState::default()),
        }
    }
}

impl MessageEvaluationContext {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            properties: HashMap::with_capacity_and_hasher(capacity, RandomState::default()),
        }
    }

    /// Sets a value, returning the one it replaced.
    #[inline]
    pub fn put(&mut self, key: impl Into<CheetahString>, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        self.properties.insert(key.into(), value.into())
    }

    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.properties.remove(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.properties.clear();
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&CheetahString, &PropertyValue)> {
        self.properties.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for MessageEvaluationContext
where
    K: Into<CheetahString>,
    V: Into<PropertyValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = MessageEvaluationContext::new();
        context.extend(iter);
        context
    }
}

impl<K, V> Extend<(K, V)> for MessageEvaluationContext
where
    K: Into<CheetahString>,
    V: Into<PropertyValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.properties
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl EvaluationContext for MessageEvaluationContext {
    #[inline]
    fn get_value(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut context = MessageEvaluationContext::new();
        assert!(context.put("key1", "value1").is_none());
        assert_eq!(context.put("key1", 7i32), Some(PropertyValue::from("value1")));
        assert_eq!(context.get_value("key1"), Some(&PropertyValue::Int(7)));
        assert!(context.get_value("missing").is_none());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut context: MessageEvaluationContext = [("a", 1i64), ("b", 2i64)].into_iter().collect();
        assert_eq!(context.len(), 2);
        assert!(context.contains_key("a"));
        assert_eq!(context.remove("a"), Some(PropertyValue::Long(1)));
        assert!(!context.contains_key("a"));
        context.clear();
        assert!(context.is_empty());
    }

    #[test]
    fn test_std_hashmap_is_a_context() {
        let mut map: HashMap<CheetahString, PropertyValue> = HashMap::new();
        map.insert(CheetahString::from("JMSPriority"), PropertyValue::Int(7));
        let context: &dyn EvaluationContext = &map;
        assert_eq!(context.get_value("JMSPriority").and_then(|v| v.as_long()), Some(7));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut context = MessageEvaluationContext::new();
        context.put("color", "red");
        context.put("size", 1024i64);
        let json = serde_json::to_string(&context).unwrap();
        let back: MessageEvaluationContext = serde_json::from_str(&json).unwrap();
        assert_eq!(context, back);
    }
}
