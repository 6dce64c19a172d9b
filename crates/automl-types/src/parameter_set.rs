//! Flattened, reporting-oriented view of a trial's hyperparameters.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::errors::{AutoMlError, MlResult};
use crate::value::ParameterValue;

/// A single named value rendered in canonical text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterEntry {
    pub name: String,
    pub value_text: String,
}

/// Ordered, name-unique collection of parameter entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: IndexMap<String, ParameterEntry>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Names must be unique within the set.
    pub fn push(&mut self, name: impl Into<String>, value: &ParameterValue) -> MlResult<()> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(AutoMlError::DuplicateParameter { parameter: name });
        }
        let entry = ParameterEntry {
            name: name.clone(),
            value_text: value.to_string(),
        };
        self.entries.insert(name, entry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ParameterEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterEntry> {
        self.entries.values()
    }
}

impl Index<&str> for ParameterSet {
    type Output = ParameterEntry;

    fn index(&self, name: &str) -> &ParameterEntry {
        &self.entries[name]
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for entry in self.entries.values() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", entry.name, entry.value_text)?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for ParameterSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

impl<'de> Deserialize<'de> for ParameterSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let list = Vec::<ParameterEntry>::deserialize(deserializer)?;
        let mut entries = IndexMap::with_capacity(list.len());
        for entry in list {
            if entries.contains_key(&entry.name) {
                return Err(serde::de::Error::custom(format!(
                    "duplicate parameter {}",
                    entry.name
                )));
            }
            entries.insert(entry.name.clone(), entry);
        }
        Ok(Self { entries })
    }
}
