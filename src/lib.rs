//! WURFL-style device detection: match an HTTP `User-Agent` string against a
//! catalogue of device fingerprints and get back a stable device id.
//!
//! Build a [`Repository`] from a YAML device catalogue (or by registering
//! devices programmatically), seal it, then query:
//!
//! ```no_run
//! use wurfl_rs::Repository;
//!
//! let repo = Repository::from_yaml_path("wurfl.yml").unwrap();
//! let device = repo.match_ua("Mozilla/5.0 (Linux; U; Android 2.2; en-us; Nexus One Build/FRF91)");
//! ```

mod chain;
mod classify;
mod constants;
mod db;
mod error;
mod handlers;
mod helpers;
mod matchers;
mod normalizers;
mod patterns;
mod registry;
mod types;

pub use constants::{GENERIC, GENERIC_MOBILE, GENERIC_WEB_BROWSER, GENERIC_XHTML, RIS_DELIMITER};
pub use error::{Error, Result};
pub use registry::{Repository, RepositoryBuilder};
pub use types::{CapabilityValue, DeviceId, DeviceRecord};
