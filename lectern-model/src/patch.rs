//! Three-way field patches for partial update descriptors.
//!
//! A descriptor field is either omitted (`Unset`, leave the stored value
//! alone) or carries a value (`Set`). Nullable columns are expressed as
//! `FieldPatch<Option<T>>`, so an explicit JSON `null` becomes
//! `Set(None)` while a missing key stays `Unset`. For non-nullable fields an
//! explicit `null` fails deserialization instead of silently clearing data.
//!
//! Descriptor structs pair every patch with
//! `#[serde(default, skip_serializing_if = "FieldPatch::is_unset")]`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPatch<T> {
    Unset,
    Set(T),
}

impl<T> Default for FieldPatch<T> {
    fn default() -> Self {
        FieldPatch::Unset
    }
}

impl<T> FieldPatch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, FieldPatch::Unset)
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            FieldPatch::Unset => None,
            FieldPatch::Set(value) => Some(value),
        }
    }
}

impl<T: Clone + PartialEq> FieldPatch<T> {
    /// Write the patched value into `target`, returning whether it changed.
    pub fn apply_to(&self, target: &mut T) -> bool {
        match self {
            FieldPatch::Set(value) if value != target => {
                *target = value.clone();
                true
            }
            _ => false,
        }
    }
}

impl<T> From<Option<T>> for FieldPatch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => FieldPatch::Set(value),
            None => FieldPatch::Unset,
        }
    }
}

impl<T: Serialize> Serialize for FieldPatch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldPatch::Set(value) => value.serialize(serializer),
            FieldPatch::Unset => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldPatch<T> {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(FieldPatch::Set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Probe {
        #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
        name: FieldPatch<String>,
        #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
        color: FieldPatch<Option<String>>,
    }

    #[test]
    fn missing_key_is_unset() {
        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert!(probe.name.is_unset());
        assert!(probe.color.is_unset());
    }

    #[test]
    fn explicit_null_clears_nullable_field() {
        let probe: Probe = serde_json::from_str(r#"{"color":null}"#).unwrap();
        assert_eq!(probe.color, FieldPatch::Set(None));
    }

    #[test]
    fn explicit_null_is_rejected_for_required_field() {
        let result = serde_json::from_str::<Probe>(r#"{"name":null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unset_fields_are_skipped_on_output() {
        let probe = Probe {
            name: FieldPatch::Set("Intro".into()),
            color: FieldPatch::Unset,
        };
        let json = serde_json::to_string(&probe).unwrap();
        assert_eq!(json, r#"{"name":"Intro"}"#);
    }

    #[test]
    fn apply_to_reports_changes() {
        let mut target = String::from("old");
        assert!(!FieldPatch::<String>::Unset.apply_to(&mut target));
        assert!(!FieldPatch::Set("old".to_string()).apply_to(&mut target));
        assert!(FieldPatch::Set("new".to_string()).apply_to(&mut target));
        assert_eq!(target, "new");
    }
}
