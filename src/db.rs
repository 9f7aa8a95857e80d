//! YAML device catalogue loading.
//!
//! A catalogue is a sequence of entries in any order; the loader registers
//! roots and children-of-registered-parents, defers the rest, and repeats
//! passes until everything lands.  A pass that makes no progress is fatal
//! and names the missing parents.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::registry::RepositoryBuilder;
use crate::types::CapabilityValue;

/// One device entry as it appears in the YAML dump.  `fall_back` is either
/// another device id or the literal `root`.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogueEntry {
    pub id: String,
    pub user_agent: String,
    #[serde(default)]
    pub actual_device_root: bool,
    #[serde(default)]
    pub fall_back: Option<String>,
    #[serde(default)]
    pub capabilities: IndexMap<String, CapabilityValue>,
}

impl CatalogueEntry {
    fn parent(&self) -> Option<&str> {
        match self.fall_back.as_deref() {
            None | Some("root") => None,
            Some(parent) => Some(parent),
        }
    }
}

pub(crate) fn load_catalogue(builder: &mut RepositoryBuilder, yaml: &str) -> Result<()> {
    let entries: Vec<CatalogueEntry> = serde_yaml::from_str(yaml)?;
    let mut pending = entries;

    while !pending.is_empty() {
        let before = pending.len();
        let mut deferred = Vec::new();

        for entry in pending {
            let ready = entry
                .parent()
                .map_or(true, |parent| builder.is_registered(parent));
            if !ready {
                deferred.push(entry);
                continue;
            }
            let CatalogueEntry {
                id,
                user_agent,
                actual_device_root,
                fall_back,
                capabilities,
            } = entry;
            let parent = match fall_back.as_deref() {
                None | Some("root") => None,
                Some(parent) => Some(parent),
            };
            builder.register(&id, &user_agent, actual_device_root, capabilities, parent)?;
        }

        if deferred.len() == before {
            let mut parents: Vec<String> = deferred
                .iter()
                .filter_map(|e| e.parent().map(str::to_string))
                .collect();
            parents.sort();
            parents.dedup();
            return Err(Error::UnresolvedDevices {
                count: deferred.len(),
                parents,
            });
        }
        pending = deferred;
    }
    Ok(())
}
