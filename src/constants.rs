//! Sentinel device ids and the RIS delimiter.

/// Worst-case fallback id; also the "blank" value the cascade keeps trying past.
pub const GENERIC: &str = "generic";
pub const GENERIC_WEB_BROWSER: &str = "generic_web_browser";
pub const GENERIC_XHTML: &str = "generic_xhtml";
pub const GENERIC_MOBILE: &str = "generic_mobile";

/// Marker a specific normalizer prepends to a UA (`"<prefix>---"`); the byte
/// just past it becomes the RIS tolerance for that handler.
pub const RIS_DELIMITER: &str = "---";
