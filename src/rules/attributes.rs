//! Host-independent access to per-module attribute values
//!
//! The constraint registry never talks to a host scene directly. Anything
//! that can answer "value of key K on module M" implements
//! [`ModuleAttributeSource`].

use num_traits::NumCast;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A raw attribute value as stored by the host
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Boolean flag
    Bool(bool),
    /// Integer number
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Free-form string, usually a comma-separated list
    Text(String),
    /// Boolean vector such as mirror axis flags
    Flags(Vec<bool>),
    /// Numeric vector such as a `(min, max, step)` triple
    Vector(Vec<f64>),
}

impl AttributeValue {
    /// Interpret the value as a number of type `T`
    ///
    /// Integers, floats and numeric strings convert when the value fits the
    /// target type; everything else yields `None`.
    pub fn as_number<T: NumCast>(&self) -> Option<T> {
        match self {
            Self::Int(value) => <T as NumCast>::from(*value),
            Self::Float(value) if value.is_finite() => <T as NumCast>::from(*value),
            Self::Bool(value) => <T as NumCast>::from(<u8 as From<bool>>::from(*value)),
            Self::Text(text) => {
                let trimmed = text.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .and_then(<T as NumCast>::from)
                    .or_else(|| {
                        trimmed
                            .parse::<f64>()
                            .ok()
                            .filter(|value| value.is_finite())
                            .and_then(<T as NumCast>::from)
                    })
            }
            _ => None,
        }
    }

    /// Interpret the value as exactly three numbers of type `T`
    pub fn as_triple<T: NumCast + Copy>(&self) -> Option<[T; 3]> {
        let values: Vec<T> = match self {
            Self::Vector(values) => values
                .iter()
                .map(|&value| <T as NumCast>::from(value))
                .collect::<Option<Vec<T>>>()?,
            Self::Flags(flags) => flags
                .iter()
                .map(|&flag| <T as NumCast>::from(<u8 as From<bool>>::from(flag)))
                .collect::<Option<Vec<T>>>()?,
            _ => return None,
        };
        match values.as_slice() {
            [a, b, c] => Some([*a, *b, *c]),
            _ => None,
        }
    }

    /// Interpret the value as three boolean flags
    pub fn as_flags(&self) -> Option<[bool; 3]> {
        match self {
            Self::Flags(flags) => match flags.as_slice() {
                [a, b, c] => Some([*a, *b, *c]),
                _ => None,
            },
            Self::Vector(_) => self
                .as_triple::<f64>()
                .map(|values| values.map(|value| value != 0.0)),
            _ => None,
        }
    }

    /// Borrow the value as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Int(<i64 as From<i32>>::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<[f64; 3]> for AttributeValue {
    fn from(value: [f64; 3]) -> Self {
        Self::Vector(value.to_vec())
    }
}

impl From<[bool; 3]> for AttributeValue {
    fn from(value: [bool; 3]) -> Self {
        Self::Flags(value.to_vec())
    }
}

/// Key/value store holding the constraint attributes of every module
pub trait ModuleAttributeSource {
    /// Get the value stored under `key` for `module`, if any
    fn attribute(&self, module: &str, key: &str) -> Option<AttributeValue>;

    /// Get the value stored under `key` for `module`, or `default`
    fn attribute_or(&self, module: &str, key: &str, default: AttributeValue) -> AttributeValue {
        self.attribute(module, key).unwrap_or(default)
    }
}

/// Attribute source that knows nothing, leaving every module unrestricted
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAttributes;

impl ModuleAttributeSource for NoAttributes {
    fn attribute(&self, _module: &str, _key: &str) -> Option<AttributeValue> {
        None
    }
}

/// In-memory attribute store keyed by module name and attribute key
#[derive(Clone, Debug, Default)]
pub struct MapAttributeSource {
    values: HashMap<String, HashMap<String, AttributeValue>>,
}

impl MapAttributeSource {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an attribute value, replacing any previous one
    pub fn set(&mut self, module: &str, key: &str, value: impl Into<AttributeValue>) {
        self.values
            .entry(module.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Builder form of [`MapAttributeSource::set`]
    #[must_use]
    pub fn with(mut self, module: &str, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.set(module, key, value);
        self
    }
}

impl ModuleAttributeSource for MapAttributeSource {
    fn attribute(&self, module: &str, key: &str) -> Option<AttributeValue> {
        self.values
            .get(module)
            .and_then(|attributes| attributes.get(key))
            .cloned()
    }
}
