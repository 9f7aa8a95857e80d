//! Desktop browser families: Chrome, Firefox, MSIE, Opera.  Safari and
//! Konqueror only override `can_handle` and ride the default cascade.

use crate::helpers::{first_slash, index_of_or_length};
use crate::patterns::Patterns;
use crate::types::DeviceId;

use super::Handler;

pub(crate) const FIREFOX_CONSTANT_IDS: &[&str] = &[
    "firefox",
    "firefox_1",
    "firefox_2",
    "firefox_3",
    "firefox_4_0",
    "firefox_5_0",
    "firefox_6_0",
    "firefox_7_0",
    "firefox_8_0",
    "firefox_9_0",
    "firefox_10_0",
    "firefox_11_0",
    "firefox_12_0",
];

pub(crate) const MSIE_CONSTANT_IDS: &[&str] = &[
    "msie", "msie_4", "msie_5", "msie_5_5", "msie_6", "msie_7", "msie_8", "msie_9",
];

pub(crate) const OPERA_CONSTANT_IDS: &[&str] = &[
    "opera", "opera_7", "opera_8", "opera_9", "opera_10", "opera_11", "opera_12",
];

pub(crate) fn chrome_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    let from = ua.find("Chrome").unwrap_or(0);
    h.ris_id(ua, index_of_or_length(ua, "/", from))
}

pub(crate) fn firefox_recovery(ua: &str, rx: &Patterns) -> DeviceId {
    if let Ok(Some(caps)) = rx.firefox_version.captures(ua) {
        if let Some(version) = caps.get(1) {
            let major: u32 = version.as_str().parse().unwrap_or(0);
            let id = if major <= 3 {
                format!("firefox_{major}")
            } else {
                format!("firefox_{major}_0")
            };
            if FIREFOX_CONSTANT_IDS.contains(&id.as_str()) {
                return DeviceId::from(id);
            }
        }
    }
    DeviceId::from("firefox")
}

pub(crate) fn msie_conclusive(h: &Handler, ua: &str, rx: &Patterns) -> Option<DeviceId> {
    if let Ok(Some(caps)) = rx.msie_conclusive.captures(ua) {
        let major: u32 = caps.get(1)?.as_str().parse().ok()?;
        let minor: u32 = caps.get(2)?.as_str().parse().ok()?;
        let id = match major {
            7 => "msie_7",
            8 => "msie_8",
            9 => "msie_9",
            6 => "msie_6",
            4 => "msie_4",
            5 => {
                if minor == 5 {
                    "msie_5_5"
                } else {
                    "msie_5"
                }
            }
            _ => "msie",
        };
        return Some(DeviceId::from(id));
    }
    h.ris_id(ua, first_slash(ua))
}

pub(crate) fn opera_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    let from = ua.find("Opera").unwrap_or(0);
    h.ris_id(ua, index_of_or_length(ua, ".", from))
}

pub(crate) fn opera_recovery(ua: &str, rx: &Patterns) -> DeviceId {
    let version = rx
        .opera_version
        .captures(ua)
        .ok()
        .flatten()
        .and_then(|caps| caps.get(1).map(|m| m.as_str().to_string()));
    if let Some(version) = version {
        let major = version.parse::<f32>().map(|v| v.floor() as u32).unwrap_or(0);
        let id = format!("opera_{major}");
        if OPERA_CONSTANT_IDS.contains(&id.as_str()) {
            return DeviceId::from(id);
        }
    }
    DeviceId::from("opera")
}
