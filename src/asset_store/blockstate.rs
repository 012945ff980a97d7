//! Blockstate definition parsing.
//!
//! Blockstates define how block properties map to model variants.
//! There are two formats: "variants" and "multipart". Exactly one of the two
//! is evaluated per blockstate.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A blockstate definition from blockstates/*.json.
#[derive(Debug, Clone)]
pub enum BlockstateDefinition {
    /// Simple variants: property combinations map to models.
    ///
    /// Entries keep document order: the selector picks the first key whose
    /// property assignments match, so order is load-bearing.
    Variants(Vec<(String, Vec<ModelVariant>)>),
    /// Multipart: conditional model application.
    Multipart(Vec<MultipartCase>),
}

impl<'de> Deserialize<'de> for BlockstateDefinition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawBlockstate {
            variants: Option<OrderedVariants>,
            multipart: Option<Vec<MultipartCase>>,
        }

        let raw = RawBlockstate::deserialize(deserializer)?;

        if let Some(variants) = raw.variants {
            Ok(BlockstateDefinition::Variants(variants.0))
        } else if let Some(multipart) = raw.multipart {
            Ok(BlockstateDefinition::Multipart(multipart))
        } else {
            // Empty blockstate (shouldn't happen but handle gracefully)
            Ok(BlockstateDefinition::Variants(Vec::new()))
        }
    }
}

/// Variants map deserialized as an ordered entry list.
struct OrderedVariants(Vec<(String, Vec<ModelVariant>)>);

impl<'de> Deserialize<'de> for OrderedVariants {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = OrderedVariants;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of variant keys to model references")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, VariantValue>()? {
                    entries.push((key, value.into_vec()));
                }
                Ok(OrderedVariants(entries))
            }
        }

        deserializer.deserialize_map(Visitor)
    }
}

/// A variant value can be a single model or a list for random choice.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum VariantValue {
    Single(ModelVariant),
    Multiple(Vec<ModelVariant>),
}

impl VariantValue {
    fn into_vec(self) -> Vec<ModelVariant> {
        match self {
            VariantValue::Single(v) => vec![v],
            VariantValue::Multiple(v) => v,
        }
    }
}

/// A model variant reference with optional rotation overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelVariant {
    /// Model resource location (e.g., "block/stone" or "minecraft:block/stone").
    pub model: String,
    /// X rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub x: i32,
    /// Y rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub y: i32,
    /// If true, UV coordinates don't rotate with the block.
    #[serde(default)]
    pub uvlock: bool,
}

impl ModelVariant {
    /// Get the full resource location for the model.
    pub fn model_location(&self) -> String {
        if self.model.contains(':') {
            self.model.clone()
        } else {
            format!("minecraft:{}", self.model)
        }
    }
}

/// A multipart case with optional condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultipartCase {
    /// Condition for when this case applies. Absent = always applies.
    #[serde(default)]
    pub when: Option<MultipartCondition>,
    /// Model(s) to apply when the condition is met.
    pub apply: ApplyValue,
}

/// The apply value can be a single model or a list for random choice.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ApplyValue {
    Single(ModelVariant),
    Multiple(Vec<ModelVariant>),
}

impl ApplyValue {
    pub fn variants(&self) -> &[ModelVariant] {
        match self {
            ApplyValue::Single(v) => std::slice::from_ref(v),
            ApplyValue::Multiple(v) => v,
        }
    }
}

/// Multipart condition for when a case applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MultipartCondition {
    /// OR condition: any of the sub-conditions must match.
    Or {
        #[serde(rename = "OR")]
        or: Vec<HashMap<String, String>>,
    },
    /// AND condition: all of the sub-conditions must match.
    And {
        #[serde(rename = "AND")]
        and: Vec<HashMap<String, String>>,
    },
    /// Simple condition: every listed property must match.
    Simple(HashMap<String, String>),
}

impl MultipartCondition {
    /// Check if the condition matches the given block properties.
    ///
    /// Simple conditions are a logical AND across their keys: every key must
    /// match the corresponding property value.
    pub fn matches(&self, properties: &HashMap<String, String>) -> bool {
        match self {
            MultipartCondition::Or { or } => {
                or.iter().any(|cond| Self::matches_simple(cond, properties))
            }
            MultipartCondition::And { and } => {
                and.iter().all(|cond| Self::matches_simple(cond, properties))
            }
            MultipartCondition::Simple(cond) => Self::matches_simple(cond, properties),
        }
    }

    /// Check if a simple condition (property map) matches.
    fn matches_simple(
        condition: &HashMap<String, String>,
        properties: &HashMap<String, String>,
    ) -> bool {
        condition.iter().all(|(key, expected_value)| {
            // Handle pipe-separated alternatives (e.g., "north|south")
            if expected_value.contains('|') {
                let allowed: Vec<&str> = expected_value.split('|').collect();
                properties
                    .get(key)
                    .map(|v| allowed.contains(&v.as_str()))
                    .unwrap_or(false)
            } else {
                properties.get(key).map(|v| v == expected_value).unwrap_or(false)
            }
        })
    }
}

/// Parse a variant key ("facing=north,half=bottom") into property assignments.
/// Malformed pairs without `=` are skipped; the empty key yields no pairs.
pub fn parse_variant_key(key: &str) -> HashMap<String, String> {
    key.split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Check a variant key against a full property set under restrict-then-compare:
/// properties are restricted to the keys the variant mentions, and the result
/// must equal the variant's declared assignments exactly. Properties the key
/// doesn't mention are ignored.
pub fn variant_key_matches(key: &str, properties: &HashMap<String, String>) -> bool {
    let declared = parse_variant_key(key);
    let restricted: HashMap<&String, &String> = properties
        .iter()
        .filter(|(k, _)| declared.contains_key(*k))
        .collect();

    declared.len() == restricted.len()
        && declared
            .iter()
            .all(|(k, v)| restricted.get(k).map(|p| *p == v).unwrap_or(false))
}
