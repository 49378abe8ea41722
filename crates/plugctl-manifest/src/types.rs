//! Plugin manifest schema
//!
//! Manifests are YAML documents with camelCase keys. Every optional field is
//! omitted when empty so that a decoded manifest serializes back to the same
//! document it was read from.

use serde::de::{self, DeserializeOwned};
use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

// =============================================================================
// PLUGIN - Top-level manifest document
// =============================================================================

/// A plugin manifest as published in the index or frozen in a receipt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: PluginSpec,
}

impl Plugin {
    /// Declared plugin name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
}

/// Descriptive fields and per-platform install instructions
///
/// (De)serialized through a [`Mapping`] rather than `#[serde(flatten)]`:
/// flattening buffers values in a form that drops YAML tags, and unknown keys
/// must come back exactly as they were read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginSpec {
    pub version: String,
    pub short_description: String,
    pub description: String,
    pub caveats: String,
    pub homepage: String,
    pub platforms: Vec<Platform>,

    /// Keys this crate does not model, carried through untouched
    pub extra: Mapping,
}

const VERSION: &str = "version";
const SHORT_DESCRIPTION: &str = "shortDescription";
const DESCRIPTION: &str = "description";
const CAVEATS: &str = "caveats";
const HOMEPAGE: &str = "homepage";
const PLATFORMS: &str = "platforms";

/// Remove `key` from `map` and decode it, defaulting when absent
fn take<T, E>(map: &mut Mapping, key: &str) -> Result<T, E>
where
    T: DeserializeOwned + Default,
    E: de::Error,
{
    match map.remove(key) {
        Some(value) => {
            serde_yaml::from_value(value).map_err(|e| E::custom(format!("{}: {}", key, e)))
        }
        None => Ok(T::default()),
    }
}

fn put_str(map: &mut Mapping, key: &str, value: &str) {
    if !value.is_empty() {
        map.insert(Value::from(key), Value::from(value));
    }
}

impl<'de> Deserialize<'de> for PluginSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Mapping::deserialize(deserializer)?;
        Ok(PluginSpec {
            version: take(&mut map, VERSION)?,
            short_description: take(&mut map, SHORT_DESCRIPTION)?,
            description: take(&mut map, DESCRIPTION)?,
            caveats: take(&mut map, CAVEATS)?,
            homepage: take(&mut map, HOMEPAGE)?,
            platforms: take(&mut map, PLATFORMS)?,
            extra: map,
        })
    }
}

impl Serialize for PluginSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = Mapping::new();
        put_str(&mut map, VERSION, &self.version);
        put_str(&mut map, SHORT_DESCRIPTION, &self.short_description);
        put_str(&mut map, DESCRIPTION, &self.description);
        put_str(&mut map, CAVEATS, &self.caveats);
        put_str(&mut map, HOMEPAGE, &self.homepage);
        if !self.platforms.is_empty() {
            let platforms = serde_yaml::to_value(&self.platforms)
                .map_err(<S::Error as ser::Error>::custom)?;
            map.insert(Value::from(PLATFORMS), platforms);
        }
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }
        map.serialize(serializer)
    }
}

// =============================================================================
// PLATFORM - One install recipe per OS/arch selector
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<Selector>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uri: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sha256: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileOperation>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bin: String,
}

/// Label selector deciding which hosts a [`Platform`] applies to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selector {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_expressions: Vec<SelectorRequirement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorRequirement {
    pub key: String,
    pub operator: SelectorOperator,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorOperator {
    In,
    NotIn,
    Exists,
    DoesNotExist,
}

/// Copy instruction applied when unpacking a plugin archive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOperation {
    pub from: String,
    pub to: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
apiVersion: plugctl.dev/v1alpha2
kind: Plugin
metadata:
  name: ctx
spec:
  version: v0.9.4
  shortDescription: Switch between contexts
  homepage: https://example.com/ctx
  tags:
    - context
  platforms:
    - selector:
        matchLabels:
          os: linux
        matchExpressions:
          - key: arch
            operator: In
            values: [amd64, arm64]
      uri: https://example.com/ctx-linux.tar.gz
      sha256: deadbeef
      files:
        - from: "*"
          to: "."
      bin: ctx
"#;

    #[test]
    fn test_decode_manifest() {
        let plugin: Result<Plugin, _> = serde_yaml::from_str(MANIFEST);
        assert!(plugin.is_ok(), "Failed to decode manifest");
        let Ok(plugin) = plugin else { return };

        assert_eq!(plugin.name(), "ctx");
        assert_eq!(plugin.spec.version, "v0.9.4");
        assert_eq!(plugin.spec.platforms.len(), 1);

        let platform = &plugin.spec.platforms[0];
        assert_eq!(platform.bin, "ctx");
        assert_eq!(platform.files[0].from, "*");
        assert!(platform.selector.as_ref().is_some_and(|s| {
            s.match_labels.get("os").map(String::as_str) == Some("linux")
                && s.match_expressions[0].operator == SelectorOperator::In
        }));
    }

    #[test]
    fn test_unknown_spec_fields_survive_reencoding() {
        let Ok(plugin) = serde_yaml::from_str::<Plugin>(MANIFEST) else {
            return;
        };
        assert!(plugin.spec.extra.contains_key("tags"));

        let encoded = serde_yaml::to_string(&plugin);
        assert!(encoded.as_ref().is_ok_and(|s| s.contains("tags:")));

        let decoded = encoded
            .ok()
            .and_then(|s| serde_yaml::from_str::<Plugin>(&s).ok());
        assert_eq!(decoded, Some(plugin));
    }

    #[test]
    fn test_tagged_spec_values_survive_reencoding() {
        let decoded = serde_yaml::from_str::<Plugin>("metadata: {name: p}\nspec: {t: !custom 1}\n");
        assert!(decoded.is_ok(), "Failed to decode tagged value: {:?}", decoded);
        let Ok(plugin) = decoded else { return };

        let tagged = plugin.spec.extra.get("t");
        assert!(matches!(tagged, Some(Value::Tagged(t)) if t.tag == "custom"));

        let encoded = serde_yaml::to_string(&plugin);
        assert!(encoded.as_ref().is_ok_and(|s| s.contains("!custom 1")));
        let reparsed = encoded
            .ok()
            .and_then(|s| serde_yaml::from_str::<Plugin>(&s).ok());
        assert_eq!(reparsed, Some(plugin));
    }

    #[test]
    fn test_known_field_errors_name_the_key() {
        let result = serde_yaml::from_str::<Plugin>("metadata: {name: p}\nspec: {platforms: 7}\n");
        assert!(result.is_err_and(|e| e.to_string().contains("platforms")));
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let plugin = Plugin {
            metadata: ObjectMeta {
                name: "bare".to_string(),
            },
            ..Default::default()
        };
        let encoded = serde_yaml::to_string(&plugin).unwrap_or_default();
        assert!(!encoded.contains("apiVersion"));
        assert!(!encoded.contains("platforms"));
        assert!(encoded.contains("name: bare"));
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        let result = serde_yaml::from_str::<Plugin>("invalid yaml file");
        assert!(result.is_err());
    }
}
