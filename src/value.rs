// value.rs
//
// Copyright (c) 2019-2026  Minnesota Department of Transportation
//
//! Property values for tile features.
//!
use std::hash::{Hash, Hasher};

use crate::Error;
use crate::vector_tile::tile::Value as PbfValue;

/// A feature property value.
///
/// Equality is structural and tag-aware: `Bool(true)` is not equal to
/// `Int(1)`, and floating point values compare by bit pattern.
///
/// # Example
/// ```
/// use point_tile::Value;
/// assert_eq!(Value::from(10), Value::Int(10));
/// assert_ne!(Value::from(true), Value::Int(1));
/// assert_eq!(Value::from("élan"), Value::String("élan".to_string()));
/// ```
#[derive(Clone, Debug)]
pub enum Value {
    /// Boolean value
    Bool(bool),
    /// String value
    String(String),
    /// Signed 64-bit integer value
    Int(i64),
    /// 32-bit floating point value
    Float(f32),
    /// 64-bit floating point value
    Double(f64),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Bool(v) => v.hash(state),
            Value::String(v) => v.hash(state),
            Value::Int(v) => v.hash(state),
            Value::Float(v) => v.to_bits().hash(state),
            Value::Double(v) => v.to_bits().hash(state),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = Error;

    fn try_from(v: &serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value as Json;
        match v {
            Json::Bool(b) => Ok(Value::Bool(*b)),
            Json::String(s) => Ok(Value::String(s.clone())),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if n.is_u64() {
                    Err(Error::UnsupportedValueType(format!("integer {}", n)))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Double(f))
                } else {
                    Err(Error::UnsupportedValueType(format!("number {}", n)))
                }
            }
            Json::Null => Err(Error::UnsupportedValueType("null".to_string())),
            Json::Array(_) => {
                Err(Error::UnsupportedValueType("array".to_string()))
            }
            Json::Object(_) => {
                Err(Error::UnsupportedValueType("object".to_string()))
            }
        }
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = Error;

    fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
        Value::try_from(&v)
    }
}

impl TryFrom<&PbfValue> for Value {
    type Error = Error;

    fn try_from(v: &PbfValue) -> Result<Self, Self::Error> {
        if let Some(b) = v.bool_value {
            Ok(Value::Bool(b))
        } else if let Some(s) = &v.string_value {
            Ok(Value::String(s.clone()))
        } else if let Some(i) = v.int_value {
            Ok(Value::Int(i))
        } else if let Some(f) = v.float_value {
            Ok(Value::Float(f))
        } else if let Some(d) = v.double_value {
            Ok(Value::Double(d))
        } else if v.uint_value.is_some() {
            Err(Error::UnsupportedValueType("uint".to_string()))
        } else if v.sint_value.is_some() {
            Err(Error::UnsupportedValueType("sint".to_string()))
        } else {
            Err(Error::UnsupportedValueType("empty".to_string()))
        }
    }
}

impl Value {
    /// Get the protobuf representation.
    pub(crate) fn to_pbf(&self) -> PbfValue {
        let mut value = PbfValue::new();
        match self {
            Value::Bool(v) => value.bool_value = Some(*v),
            Value::String(v) => value.string_value = Some(v.clone()),
            Value::Int(v) => value.int_value = Some(*v),
            Value::Float(v) => value.float_value = Some(*v),
            Value::Double(v) => value.double_value = Some(*v),
        }
        value
    }

    /// Get the JSON representation.
    ///
    /// Non-finite floating point values become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Bool(v) => serde_json::Value::from(*v),
            Value::String(v) => serde_json::Value::from(v.as_str()),
            Value::Int(v) => serde_json::Value::from(*v),
            Value::Float(v) => serde_json::Value::from(*v),
            Value::Double(v) => serde_json::Value::from(*v),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn equality() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_ne!(Value::Bool(true), Value::Int(1));
        assert_ne!(Value::Float(1.5), Value::Double(1.5));
        assert_ne!(Value::Double(0.0), Value::Double(-0.0));
        assert_eq!(Value::Double(f64::NAN), Value::Double(f64::NAN));
        let set: HashSet<Value> = vec![
            Value::Int(1),
            Value::Bool(true),
            Value::Int(1),
            Value::from("1"),
            Value::Double(1.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn json_input() {
        assert_eq!(Value::try_from(&json!(true)).unwrap(), Value::Bool(true));
        assert_eq!(Value::try_from(&json!("DC")).unwrap(), Value::from("DC"));
        assert_eq!(Value::try_from(&json!(10)).unwrap(), Value::Int(10));
        assert_eq!(
            Value::try_from(&json!(i64::MIN)).unwrap(),
            Value::Int(i64::MIN)
        );
        assert_eq!(Value::try_from(&json!(1.5)).unwrap(), Value::Double(1.5));
        assert!(matches!(
            Value::try_from(&json!(u64::MAX)),
            Err(Error::UnsupportedValueType(_))
        ));
        assert!(matches!(
            Value::try_from(json!(null)),
            Err(Error::UnsupportedValueType(_))
        ));
        assert!(Value::try_from(&json!([1, 2])).is_err());
        assert!(Value::try_from(&json!({"a": 1})).is_err());
    }

    #[test]
    fn pbf() {
        let values = [
            Value::Bool(false),
            Value::from("élan"),
            Value::Int(i64::MAX),
            Value::Float(1.5),
            Value::Double(-2.25),
        ];
        for v in &values {
            assert_eq!(&Value::try_from(&v.to_pbf()).unwrap(), v);
        }
        assert_eq!(values[2].to_pbf().int_value, Some(i64::MAX));
        assert_eq!(values[3].to_pbf().float_value, Some(1.5));
        let mut uint = PbfValue::new();
        uint.uint_value = Some(7);
        assert!(Value::try_from(&uint).is_err());
        assert!(Value::try_from(&PbfValue::new()).is_err());
    }

    #[test]
    fn json_output() {
        assert_eq!(Value::Bool(true).to_json(), json!(true));
        assert_eq!(Value::from("élan").to_json(), json!("élan"));
        assert_eq!(Value::Int(i64::MIN).to_json(), json!(i64::MIN));
        assert_eq!(Value::Float(1.5).to_json(), json!(1.5));
        assert_eq!(Value::Double(1e300).to_json(), json!(1e300));
        assert_eq!(Value::Double(f64::INFINITY).to_json(), json!(null));
    }
}
