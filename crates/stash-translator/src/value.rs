//! Session value type
//!
//! A closed sum over everything a session bag can hold. Serialized
//! untagged, so a bag round-trips through JSON unchanged.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Result;

/// Contents of a session bag, and of every nested mapping inside it
pub type Map = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
}

impl Value {
    /// Convert any serde type into a session value
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    /// Convert this value back into a caller-defined serde type
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(serde_json::Value::from(self.clone()))?)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Merge `incoming` into this value.
    ///
    /// - `Null` is replaced outright.
    /// - A list is extended by an incoming list, otherwise the value is pushed.
    /// - A map takes an incoming map's entries (incoming wins on conflict);
    ///   any other value is appended under the next free integer key.
    /// - A scalar becomes a list of itself followed by the incoming value
    ///   (or the incoming list's items).
    pub fn merge(&mut self, incoming: Value) {
        if self.is_null() {
            *self = incoming;
            return;
        }

        match self {
            Value::List(items) => match incoming {
                Value::List(more) => items.extend(more),
                other => items.push(other),
            },
            Value::Map(map) => match incoming {
                Value::Map(more) => map.extend(more),
                other => {
                    let key = next_index(map);
                    map.insert(key, other);
                }
            },
            scalar => {
                let mut items = vec![std::mem::take(scalar)];
                match incoming {
                    Value::List(more) => items.extend(more),
                    other => items.push(other),
                }
                *scalar = Value::List(items);
            }
        }
    }
}

/// Next integer key for appending to a map, one past the largest numeric key
fn next_index(map: &Map) -> String {
    map.keys()
        .filter_map(|k| k.parse::<u64>().ok())
        .max()
        .map_or(0, |n| n + 1)
        .to_string()
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(n) => serde_json::Value::from(n),
            // NaN and infinities have no JSON form
            Value::Float(n) => serde_json::Number::from_f64(n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::String(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[test]
    fn test_merge_scalar_becomes_list() {
        let mut value = Value::from("a");
        value.merge(Value::from("b"));
        assert_eq!(value, Value::from(vec!["a", "b"]));
    }

    #[test]
    fn test_merge_scalar_with_list_flattens() {
        let mut value = Value::from(1);
        value.merge(Value::from(vec![2, 3]));
        assert_eq!(value, Value::from(vec![1, 2, 3]));
    }

    #[test]
    fn test_merge_into_list() {
        let mut value = Value::from(vec!["a"]);
        value.merge(Value::from("b"));
        value.merge(Value::from(vec!["c", "d"]));
        assert_eq!(value, Value::from(vec!["a", "b", "c", "d"]));
    }

    #[test]
    fn test_merge_maps_incoming_wins() {
        let mut existing = Map::new();
        existing.insert("name".to_string(), Value::from("old"));
        existing.insert("age".to_string(), Value::from(30));

        let mut incoming = Map::new();
        incoming.insert("name".to_string(), Value::from("new"));
        incoming.insert("city".to_string(), Value::from("Oslo"));

        let mut value = Value::Map(existing);
        value.merge(Value::Map(incoming));

        let map = value.as_map().unwrap();
        assert_eq!(map.get("name"), Some(&Value::from("new")));
        assert_eq!(map.get("age"), Some(&Value::from(30)));
        assert_eq!(map.get("city"), Some(&Value::from("Oslo")));
    }

    #[test]
    fn test_merge_scalar_into_map_appends_next_index() {
        let mut existing = Map::new();
        existing.insert("0".to_string(), Value::from("a"));
        existing.insert("label".to_string(), Value::from("x"));

        let mut value = Value::Map(existing);
        value.merge(Value::from("b"));

        assert_eq!(value.as_map().unwrap().get("1"), Some(&Value::from("b")));
    }

    #[test]
    fn test_merge_into_null_replaces() {
        let mut value = Value::Null;
        value.merge(Value::from(true));
        assert_eq!(value, Value::Bool(true));
    }

    #[test]
    fn test_json_conversion() {
        let json = serde_json::json!({"user": {"id": 7, "roles": ["admin"], "score": 1.5}});
        let value = Value::from(json.clone());

        let user = value.as_map().unwrap().get("user").unwrap().as_map().unwrap();
        assert_eq!(user.get("id"), Some(&Value::Int(7)));
        assert_eq!(user.get("score"), Some(&Value::Float(1.5)));

        assert_eq!(serde_json::Value::from(value), json);
    }

    #[test]
    fn test_typed_round_trip() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Cart {
            items: Vec<String>,
            total: i64,
        }

        let cart = Cart {
            items: vec!["book".to_string()],
            total: 12,
        };
        let value = Value::from_serialize(&cart).unwrap();
        assert_eq!(value.deserialize_into::<Cart>().unwrap(), cart);
        assert!(Value::from("nope").deserialize_into::<Cart>().is_err());
    }

    #[test]
    fn test_untagged_serde() {
        let value: Value = serde_json::from_str(r#"[null, false, 3, 2.5, "s"]"#).unwrap();
        assert_eq!(
            value,
            Value::List(vec![
                Value::Null,
                Value::Bool(false),
                Value::Int(3),
                Value::Float(2.5),
                Value::from("s"),
            ])
        );
    }
}
