//! Tri-state field updates for PATCH-style commands.
//!
//! JSON distinguishes a missing key from an explicit `null`. `Option<T>`
//! collapses the two, so nullable fields in partial updates use [`Patch`].
//! Fields must be annotated with `#[serde(default)]` so a missing key
//! deserializes to [`Patch::Absent`].

use serde::{Deserialize, Deserializer};

/// A partial update to an optional field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key not present: leave the field unchanged.
    Absent,
    /// Explicit `null`: clear the field.
    Null,
    /// New value.
    Value(T),
}

impl<T> Patch<T> {
    /// Apply the patch to the current value of a nullable field.
    pub fn apply_to(self, current: &mut Option<T>) {
        match self {
            Self::Absent => {}
            Self::Null => *current = None,
            Self::Value(v) => *current = Some(v),
        }
    }

    /// Returns true when the key was present in the request.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Only invoked when the key exists; absence is handled by `#[serde(default)]`.
        Ok(Option::<T>::deserialize(deserializer)?.map_or(Self::Null, Self::Value))
    }
}
