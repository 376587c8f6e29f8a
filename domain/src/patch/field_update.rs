//! Tri-state scalar field update.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Update instruction for an optional scalar field of the aggregate root.
///
/// JSON mapping when used with `#[serde(default)]`:
///
/// | Input            | Value            |
/// |------------------|------------------|
/// | field absent     | `Unchanged`      |
/// | `null`           | `Clear`          |
/// | any other value  | `Set(value)`     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Leave the current value untouched.
    Unchanged,
    /// Remove the current value.
    Clear,
    /// Replace the current value.
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Unchanged
    }
}

impl<T> FieldUpdate<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldUpdate::Unchanged)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Resolve against the current value of an optional field.
    pub fn resolve(self, current: Option<T>) -> Option<T> {
        match self {
            FieldUpdate::Unchanged => current,
            FieldUpdate::Clear => None,
            FieldUpdate::Set(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// `Some` sets, `None` clears. Absence is expressed by not constructing one.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => FieldUpdate::Set(v),
            None => FieldUpdate::Clear,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the field is present; absence falls back to Default.
        Option::<T>::deserialize(deserializer).map(FieldUpdate::from)
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldUpdate::Set(value) => serializer.serialize_some(value),
            FieldUpdate::Unchanged | FieldUpdate::Clear => serializer.serialize_none(),
        }
    }
}
