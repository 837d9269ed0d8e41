//! Explicit partial-update wrapper.
//!
//! A field missing from the JSON body deserializes to [`Patch::Keep`]; a present value becomes
//! [`Patch::Set`]. For non-nullable fields an explicit `null` is rejected by the deserializer
//! instead of being read as "leave unchanged". Nullable fields use `Patch<Option<T>>`, where
//! `null` means "clear".

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Keep,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self { Patch::Keep }
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool { matches!(self, Patch::Keep) }

    pub fn is_set(&self) -> bool { matches!(self, Patch::Set(_)) }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(v) => Some(v),
            Patch::Keep => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Set(v) => Some(v),
            Patch::Keep => None,
        }
    }

    /// Overwrite `target` when set; returns whether it was.
    pub fn apply_to(self, target: &mut T) -> bool {
        match self {
            Patch::Set(v) => {
                *target = v;
                true
            }
            Patch::Keep => false,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Set(v) => Patch::Set(f(v)),
            Patch::Keep => Patch::Keep,
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Patch::Keep, Patch::Set)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Patch::Set)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Set(v) => v.serialize(serializer),
            Patch::Keep => serializer.serialize_none(),
        }
    }
}
