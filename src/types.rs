use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;

/// An opaque WURFL device id.  Interned: clones share one allocation, so
/// handler tables and the registry reference the same backing string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(Arc<str>);

impl DeviceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for DeviceId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        DeviceId(Arc::from(id))
    }
}

impl From<String> for DeviceId {
    fn from(id: String) -> Self {
        DeviceId(Arc::from(id.as_str()))
    }
}

impl PartialEq<str> for DeviceId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for DeviceId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A typed WURFL capability value.  The catalogue dump types each capability
/// as the narrowest of int / float / bool, falling back to string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CapabilityValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl CapabilityValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CapabilityValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CapabilityValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// One catalogue entry: a device fingerprint plus its capability overrides.
/// Capabilities not set here are inherited through `parent`.
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub id: DeviceId,
    pub user_agent: String,
    pub actual_device_root: bool,
    pub capabilities: IndexMap<String, CapabilityValue>,
    pub parent: Option<DeviceId>,
    pub children: Vec<DeviceId>,
}
