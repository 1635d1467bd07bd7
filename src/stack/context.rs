use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open key/value map handed to a level's gate when a push is evaluated.
///
/// The stack never looks inside; only gates interpret the entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(Map<String, Value>);

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Read a boolean entry; missing keys and non-boolean values yield None
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Context {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Objects become the context itself; any other JSON value yields an empty context
impl From<Value> for Context {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::new(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_bool_ignores_other_types() {
        let ctx = Context::new().with("expected", "invalid").with("flag", true);
        assert_eq!(ctx.get_bool("expected"), None);
        assert_eq!(ctx.get_bool("flag"), Some(true));
        assert_eq!(ctx.get_bool("missing"), None);
    }

    #[test]
    fn test_from_json_object() {
        let ctx = Context::from(json!({"expected": true, "depth": 3}));
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.get("depth"), Some(&json!(3)));
    }

    #[test]
    fn test_from_non_object_is_empty() {
        assert!(Context::from(json!([1, 2, 3])).is_empty());
        assert!(Context::from(Value::Null).is_empty());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let ctx: Context = [("expected", true)].into_iter().collect();
        assert_eq!(serde_json::to_value(&ctx).unwrap(), json!({"expected": true}));
    }
}
