//! Pipeline-node property bags.
//!
//! A property bag is the configuration handed to a pipeline node. Values are
//! either scalars or a [`CustomProperty`]: a named sub-object (such as a
//! boosting-strategy block) with its own scalar members. Both containers
//! keep insertion order so enumeration is deterministic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::ParameterValue;

/// A nested sub-component configuration embedded in a pipeline node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomProperty {
    /// Type identifier of the sub-object.
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Properties")]
    pub properties: IndexMap<String, ParameterValue>,
}

impl CustomProperty {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
        }
    }

    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// One value in a property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Custom(CustomProperty),
    Scalar(ParameterValue),
}

impl PropertyValue {
    pub fn as_scalar(&self) -> Option<&ParameterValue> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Custom(_) => None,
        }
    }

    pub fn as_custom(&self) -> Option<&CustomProperty> {
        match self {
            Self::Custom(custom) => Some(custom),
            Self::Scalar(_) => None,
        }
    }
}

impl From<ParameterValue> for PropertyValue {
    fn from(value: ParameterValue) -> Self {
        Self::Scalar(value)
    }
}

impl From<CustomProperty> for PropertyValue {
    fn from(value: CustomProperty) -> Self {
        Self::Custom(value)
    }
}

/// Name-keyed property map for a pipeline node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag {
    entries: IndexMap<String, PropertyValue>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scalar(mut self, key: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.insert(key, PropertyValue::Scalar(value.into()));
        self
    }

    pub fn with_custom(mut self, key: impl Into<String>, custom: CustomProperty) -> Self {
        self.insert(key, PropertyValue::Custom(custom));
        self
    }

    /// Insert or replace a value, keeping the original position on replace.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: PropertyValue,
    ) -> Option<PropertyValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut PropertyValue> {
        self.entries.get_mut(key)
    }

    pub fn scalar(&self, key: &str) -> Option<&ParameterValue> {
        self.get(key).and_then(PropertyValue::as_scalar)
    }

    pub fn custom(&self, key: &str) -> Option<&CustomProperty> {
        self.get(key).and_then(PropertyValue::as_custom)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, PropertyValue)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
