//! Per-protocol block state quirks, expressed as data.
//!
//! Some palette revisions disagree with the source descriptions in small,
//! version-specific ways (a renamed block, a property the palette dropped).
//! Each protocol has an ordered rule list; one interpreter applies it.

use serde::Deserialize;

use crate::state::{StateMap, StateValue};

/// Bedrock 1.19.0.
pub const PROTOCOL_1_19_0: u32 = 527;
/// Bedrock 1.19.20.
pub const PROTOCOL_1_19_20: u32 = 544;

/// One rewrite applied to a composed block state.
///
/// `identifier` is matched against the target name as it stands when the rule
/// runs, so a rule after a rename must use the new name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuirkRule {
    RenameIdentifier {
        identifier: String,
        to: String,
    },
    RemoveProperty {
        identifier: String,
        property: String,
    },
    /// Replaces the value of a property the state already declares.
    AlterProperty {
        identifier: String,
        property: String,
        value: StateValue,
    },
}

impl QuirkRule {
    fn apply(&self, name: &mut String, states: &mut StateMap) {
        match self {
            QuirkRule::RenameIdentifier { identifier, to } => {
                if name == identifier {
                    *name = to.clone();
                }
            }
            QuirkRule::RemoveProperty {
                identifier,
                property,
            } => {
                if name == identifier {
                    states.remove(property);
                }
            }
            QuirkRule::AlterProperty {
                identifier,
                property,
                value,
            } => {
                if name == identifier {
                    if let Some(existing) = states.get_mut(property) {
                        *existing = value.clone();
                    }
                }
            }
        }
    }
}

/// Ordered quirk rules for one protocol version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuirkTable {
    rules: Vec<QuirkRule>,
}

impl QuirkTable {
    pub fn new(rules: Vec<QuirkRule>) -> Self {
        Self { rules }
    }

    /// Rules known for a protocol. Unknown protocols have none.
    pub fn builtin(protocol: u32) -> Self {
        let rules = match protocol {
            PROTOCOL_1_19_0 => vec![QuirkRule::RemoveProperty {
                identifier: "minecraft:muddy_mangrove_roots".into(),
                property: "pillar_axis".into(),
            }],
            _ => Vec::new(),
        };
        Self { rules }
    }

    /// Append rules after the existing ones.
    pub fn extended(mut self, extra: impl IntoIterator<Item = QuirkRule>) -> Self {
        self.rules.extend(extra);
        self
    }

    pub fn rules(&self) -> &[QuirkRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in order over a name and property set.
    pub fn apply(&self, name: &mut String, states: &mut StateMap) {
        for rule in &self.rules {
            rule.apply(name, states);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(pairs: &[(&str, StateValue)]) -> StateMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn builtin_1_19_0_drops_mangrove_roots_axis() {
        let table = QuirkTable::builtin(PROTOCOL_1_19_0);
        let mut name = "minecraft:muddy_mangrove_roots".to_string();
        let mut s = states(&[("pillar_axis", StateValue::Str("y".into()))]);
        table.apply(&mut name, &mut s);
        assert!(s.is_empty());

        let mut other = "minecraft:oak_log".to_string();
        let mut log = states(&[("pillar_axis", StateValue::Str("y".into()))]);
        table.apply(&mut other, &mut log);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn builtin_1_19_20_is_empty() {
        assert!(QuirkTable::builtin(PROTOCOL_1_19_20).is_empty());
        assert!(QuirkTable::builtin(1).is_empty());
    }

    #[test]
    fn rules_run_in_order_against_current_name() {
        let table = QuirkTable::new(vec![
            QuirkRule::RenameIdentifier {
                identifier: "minecraft:old".into(),
                to: "minecraft:new".into(),
            },
            QuirkRule::AlterProperty {
                identifier: "minecraft:new".into(),
                property: "age".into(),
                value: StateValue::Int(0),
            },
            QuirkRule::RemoveProperty {
                identifier: "minecraft:old".into(),
                property: "age".into(),
            },
        ]);
        let mut name = "minecraft:old".to_string();
        let mut s = states(&[("age", StateValue::Int(5))]);
        table.apply(&mut name, &mut s);
        assert_eq!(name, "minecraft:new");
        assert_eq!(s.get("age"), Some(&StateValue::Int(0)));
    }

    #[test]
    fn alter_does_not_add_missing_property() {
        let table = QuirkTable::new(vec![QuirkRule::AlterProperty {
            identifier: "minecraft:x".into(),
            property: "age".into(),
            value: StateValue::Int(1),
        }]);
        let mut name = "minecraft:x".to_string();
        let mut s = StateMap::new();
        table.apply(&mut name, &mut s);
        assert!(s.is_empty());
    }

    #[test]
    fn deserialize_rule_list() {
        let rules: Vec<QuirkRule> = serde_json::from_str(
            r#"[
                {"kind": "rename_identifier", "identifier": "minecraft:a", "to": "minecraft:b"},
                {"kind": "alter_property", "identifier": "minecraft:b", "property": "lit", "value": true}
            ]"#,
        )
        .unwrap();
        let table = QuirkTable::builtin(PROTOCOL_1_19_20).extended(rules);
        assert_eq!(table.rules().len(), 2);
        assert!(matches!(
            &table.rules()[1],
            QuirkRule::AlterProperty { value: StateValue::Byte(1), .. }
        ));
    }
}
