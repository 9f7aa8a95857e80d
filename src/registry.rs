//! The device repository: id → record with inheritance, plus the handler
//! chain the records' UAs are filtered into.
//!
//! Ingest and query are split by type: a [`RepositoryBuilder`] is the only
//! thing that can register devices, and sealing it produces an immutable
//! [`Repository`] whose lookups are safe to run from many threads at once.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;

use crate::chain::Chain;
use crate::db;
use crate::error::{Error, Result};
use crate::types::{CapabilityValue, DeviceId, DeviceRecord};

pub struct RepositoryBuilder {
    devices: HashMap<DeviceId, DeviceRecord>,
    chain: Chain,
}

impl RepositoryBuilder {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            devices: HashMap::new(),
            chain: Chain::new()?,
        })
    }

    /// Register one device.  `parent` must already be registered (device
    /// dumps list parents before children; out-of-order sources go through
    /// the deferring loaders instead).
    pub fn register(
        &mut self,
        id: &str,
        user_agent: &str,
        actual_device_root: bool,
        capabilities: IndexMap<String, CapabilityValue>,
        parent: Option<&str>,
    ) -> Result<()> {
        let parent_id = match parent {
            Some(parent) => match self.devices.get_key_value(parent) {
                Some((key, _)) => Some(key.clone()),
                None => {
                    return Err(Error::UnregisteredParent {
                        id: id.to_string(),
                        parent: parent.to_string(),
                    })
                }
            },
            None => None,
        };

        let device_id = DeviceId::from(id);
        if let Some(parent_id) = &parent_id {
            if let Some(parent_record) = self.devices.get_mut(parent_id.as_str()) {
                parent_record.children.push(device_id.clone());
            }
        }

        let record = DeviceRecord {
            id: device_id.clone(),
            user_agent: user_agent.to_string(),
            actual_device_root,
            capabilities,
            parent: parent_id,
            children: Vec::new(),
        };
        self.devices.insert(device_id.clone(), record);
        self.chain.filter(user_agent, &device_id);
        Ok(())
    }

    /// Load a YAML catalogue, deferring entries whose parent has not been
    /// registered yet.
    pub fn load_yaml_str(&mut self, yaml: &str) -> Result<()> {
        db::load_catalogue(self, yaml)
    }

    pub fn load_yaml_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let yaml = std::fs::read_to_string(path)?;
        db::load_catalogue(self, &yaml)
    }

    pub(crate) fn is_registered(&self, id: &str) -> bool {
        self.devices.contains_key(id)
    }

    /// Seal the registry: build the sorted-key views and freeze everything.
    pub fn seal(mut self) -> Repository {
        self.chain.seal();
        Repository {
            devices: self.devices,
            chain: self.chain,
        }
    }
}

pub struct Repository {
    devices: HashMap<DeviceId, DeviceRecord>,
    chain: Chain,
}

impl Repository {
    pub fn builder() -> Result<RepositoryBuilder> {
        RepositoryBuilder::new()
    }

    /// Build a sealed repository straight from a YAML catalogue file.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut builder = Self::builder()?;
        builder.load_yaml_path(path)?;
        Ok(builder.seal())
    }

    /// The raw engine verdict for a UA.  Never fails; `generic` worst case.
    pub fn match_id(&self, ua: &str) -> DeviceId {
        self.chain.match_id(ua)
    }

    /// Match a UA to its device record.  `None` only when the catalogue has
    /// no record for the sentinel id the cascade fell back to.
    pub fn match_ua(&self, ua: &str) -> Option<&DeviceRecord> {
        self.find(self.match_id(ua).as_str())
    }

    pub fn find(&self, id: &str) -> Option<&DeviceRecord> {
        self.devices.get(id)
    }

    /// Capability lookup with inheritance: the record's own value, or the
    /// closest ancestor's.
    pub fn capability(&self, id: &str, name: &str) -> Option<&CapabilityValue> {
        let mut current = self.find(id)?;
        loop {
            if let Some(value) = current.capabilities.get(name) {
                return Some(value);
            }
            current = self.find(current.parent.as_ref()?.as_str())?;
        }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
