//! Typed block state values and the canonical key used to match source states
//! against palette entries.

use std::collections::BTreeMap;
use std::fmt;

use mc_bridge_nbt::{NbtCompound, NbtTag};
use serde::Deserialize;

/// A block state property value, in the shape the target palette stores it.
///
/// Booleans are bytes on the wire, so `true`/`false` normalize to `Byte(1)`/`Byte(0)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "RawStateValue")]
pub enum StateValue {
    Byte(i8),
    Int(i32),
    Str(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStateValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl TryFrom<RawStateValue> for StateValue {
    type Error = String;

    fn try_from(raw: RawStateValue) -> Result<Self, Self::Error> {
        match raw {
            RawStateValue::Bool(b) => Ok(StateValue::Byte(b as i8)),
            RawStateValue::Int(i) => i32::try_from(i)
                .map(StateValue::Int)
                .map_err(|_| format!("state value {i} does not fit in an int")),
            RawStateValue::Str(s) => Ok(StateValue::Str(s)),
        }
    }
}

impl StateValue {
    /// Convert a JSON state value from the source block description.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(StateValue::Byte(*b as i8)),
            serde_json::Value::Number(n) => {
                n.as_i64().and_then(|i| i32::try_from(i).ok()).map(StateValue::Int)
            }
            serde_json::Value::String(s) => Some(StateValue::Str(s.clone())),
            _ => None,
        }
    }

    /// Convert a palette tag. Only byte, int and string tags are state values.
    pub fn from_tag(tag: &NbtTag) -> Option<Self> {
        match tag {
            NbtTag::Byte(b) => Some(StateValue::Byte(*b)),
            NbtTag::Int(i) => Some(StateValue::Int(*i)),
            NbtTag::String(s) => Some(StateValue::Str(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Byte(v) => write!(f, "{v}b"),
            StateValue::Int(v) => write!(f, "{v}"),
            StateValue::Str(v) => write!(f, "\"{v}\""),
        }
    }
}

/// Property set of a block state. Equality is set equality of typed pairs.
pub type StateMap = BTreeMap<String, StateValue>;

/// The `(name, version, states)` tuple both editions are compared by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKey {
    pub name: String,
    pub version: i32,
    pub states: StateMap,
}

impl CanonicalKey {
    pub fn new(name: impl Into<String>, version: i32, states: StateMap) -> Self {
        Self {
            name: name.into(),
            version,
            states,
        }
    }

    /// Build the key of a palette entry. Fields other than `name`, `version`
    /// and `states` do not take part in the key.
    ///
    /// Returns a description of the problem when the entry is not a block state.
    pub fn from_palette_entry(tag: &NbtCompound) -> Result<Self, String> {
        let name = tag
            .get("name")
            .and_then(NbtTag::as_string)
            .ok_or("missing string field `name`")?;
        let version = tag
            .get("version")
            .and_then(NbtTag::as_int)
            .ok_or("missing int field `version`")?;

        let mut states = StateMap::new();
        match tag.get("states") {
            None => {}
            Some(NbtTag::Compound(compound)) => {
                for (property, value) in compound {
                    let value = StateValue::from_tag(value).ok_or_else(|| {
                        format!(
                            "state `{property}` has unsupported tag type {}",
                            value.type_name()
                        )
                    })?;
                    states.insert(property.clone(), value);
                }
            }
            Some(other) => {
                return Err(format!("`states` is a {}, not a compound", other.type_name()))
            }
        }

        Ok(Self::new(name, version, states))
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{name:\"{}\",states:{{", self.name)?;
        for (i, (property, value)) in self.states.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{property}:{value}")?;
        }
        write!(f, "}},version:{}}}", self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, states: NbtCompound, version: i32) -> NbtCompound {
        let mut c = NbtCompound::new();
        c.insert("name".into(), NbtTag::from(name));
        c.insert("states".into(), NbtTag::Compound(states));
        c.insert("version".into(), NbtTag::Int(version));
        c
    }

    #[test]
    fn json_values_take_palette_shape() {
        assert_eq!(
            StateValue::from_json(&serde_json::json!(true)),
            Some(StateValue::Byte(1))
        );
        assert_eq!(
            StateValue::from_json(&serde_json::json!(7)),
            Some(StateValue::Int(7))
        );
        assert_eq!(
            StateValue::from_json(&serde_json::json!("north")),
            Some(StateValue::Str("north".into()))
        );
        assert_eq!(StateValue::from_json(&serde_json::json!(1.5)), None);
        assert_eq!(StateValue::from_json(&serde_json::json!(null)), None);
    }

    #[test]
    fn deserialize_normalizes_bool() {
        let v: StateValue = serde_json::from_str("false").unwrap();
        assert_eq!(v, StateValue::Byte(0));
        let v: StateValue = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(v, StateValue::Str("x".into()));
        assert!(serde_json::from_str::<StateValue>("4294967296").is_err());
    }

    #[test]
    fn key_ignores_decoration_and_insertion_order() {
        let mut a_states = NbtCompound::new();
        a_states.insert("open_bit".into(), NbtTag::Byte(1));
        a_states.insert("direction".into(), NbtTag::Int(2));
        let mut a = entry("minecraft:trapdoor", a_states, 1);
        a.insert("name_hash".into(), NbtTag::Long(99));

        let mut b_states = NbtCompound::new();
        b_states.insert("direction".into(), NbtTag::Int(2));
        b_states.insert("open_bit".into(), NbtTag::Byte(1));
        let b = entry("minecraft:trapdoor", b_states, 1);

        assert_eq!(
            CanonicalKey::from_palette_entry(&a).unwrap(),
            CanonicalKey::from_palette_entry(&b).unwrap()
        );
    }

    #[test]
    fn byte_and_int_are_distinct() {
        let mut byte_states = NbtCompound::new();
        byte_states.insert("age".into(), NbtTag::Byte(1));
        let mut int_states = NbtCompound::new();
        int_states.insert("age".into(), NbtTag::Int(1));
        assert_ne!(
            CanonicalKey::from_palette_entry(&entry("minecraft:x", byte_states, 1)).unwrap(),
            CanonicalKey::from_palette_entry(&entry("minecraft:x", int_states, 1)).unwrap()
        );
    }

    #[test]
    fn missing_states_is_empty_set() {
        let mut c = NbtCompound::new();
        c.insert("name".into(), NbtTag::from("minecraft:air"));
        c.insert("version".into(), NbtTag::Int(3));
        let key = CanonicalKey::from_palette_entry(&c).unwrap();
        assert!(key.states.is_empty());
    }

    #[test]
    fn rejects_non_state_tags() {
        let mut states = NbtCompound::new();
        states.insert("weight".into(), NbtTag::Float(1.0));
        let err = CanonicalKey::from_palette_entry(&entry("minecraft:x", states, 1)).unwrap_err();
        assert!(err.contains("float"));

        let mut no_version = NbtCompound::new();
        no_version.insert("name".into(), NbtTag::from("minecraft:x"));
        assert!(CanonicalKey::from_palette_entry(&no_version).is_err());
    }

    #[test]
    fn display_is_readable() {
        let mut states = StateMap::new();
        states.insert("liquid_depth".into(), StateValue::Int(0));
        let key = CanonicalKey::new("minecraft:water", 17_959_425, states);
        assert_eq!(
            key.to_string(),
            "{name:\"minecraft:water\",states:{liquid_depth:0},version:17959425}"
        );
    }
}
