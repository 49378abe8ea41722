//! Install receipts
//!
//! A receipt is the manifest exactly as it was installed, plus a `status`
//! block naming the index the plugin came from. Receipts stay authoritative
//! for an installed plugin even after the index entry changes or disappears.

use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::{Mapping, Value};

use crate::types::Plugin;

const STATUS: &str = "status";

/// Manifest keys and `status` share one YAML mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Receipt {
    pub plugin: Plugin,
    pub status: Option<ReceiptStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptStatus {
    pub source: SourceIndex,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceIndex {
    pub name: String,
}

impl Receipt {
    /// Name of the index the plugin was installed from, if recorded
    pub fn source_index(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.source.name.as_str())
    }
}

impl<'de> Deserialize<'de> for Receipt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Mapping::deserialize(deserializer)?;
        let status = map
            .remove(STATUS)
            .map(serde_yaml::from_value::<ReceiptStatus>)
            .transpose()
            .map_err(|e| <D::Error as de::Error>::custom(format!("{}: {}", STATUS, e)))?;
        let plugin = serde_yaml::from_value(Value::Mapping(map))
            .map_err(<D::Error as de::Error>::custom)?;
        Ok(Receipt { plugin, status })
    }
}

impl Serialize for Receipt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = serde_yaml::to_value(&self.plugin).map_err(<S::Error as ser::Error>::custom)?;
        let Value::Mapping(mut map) = value else {
            return Err(<S::Error as ser::Error>::custom(
                "plugin manifest is not a mapping",
            ));
        };
        if let Some(status) = &self.status {
            let status = serde_yaml::to_value(status).map_err(<S::Error as ser::Error>::custom)?;
            map.insert(Value::from(STATUS), status);
        }
        map.serialize(serializer)
    }
}
