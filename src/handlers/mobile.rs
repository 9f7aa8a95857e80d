//! Mobile device families with bespoke conclusive/recovery rules.  The
//! vendors whose handlers are a prefix test plus the default first-slash RIS
//! (Alcatel, BenQ, Grundig, …) live entirely in the dispatch tables.

use crate::constants::RIS_DELIMITER;
use crate::helpers::{
    contains_all, contains_any, first_slash, first_space, index_of_any_or_length,
    index_of_or_length, ordinal_index_of, second_slash, starts_with_any,
};
use crate::patterns::Patterns;
use crate::types::DeviceId;

use super::Handler;

// ---------------------------------------------------------------------------
// Apple
// ---------------------------------------------------------------------------

pub(crate) const APPLE_CONSTANT_IDS: &[&str] = &[
    "apple_ipod_touch_ver1",
    "apple_ipod_touch_ver2",
    "apple_ipod_touch_ver3",
    "apple_ipod_touch_ver4",
    "apple_ipod_touch_ver5",
    "apple_ipad_ver1",
    "apple_ipad_ver1_sub42",
    "apple_ipad_ver1_sub5",
    "apple_iphone_ver1",
    "apple_iphone_ver2",
    "apple_iphone_ver3",
    "apple_iphone_ver4",
    "apple_iphone_ver5",
];

pub(crate) fn apple_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    let tolerance = match ua.find('_') {
        // Through the first underscore of the OS version.
        Some(idx) => idx + 1,
        None => match ua.find("like Mac OS X;") {
            // Through the semicolon at the end of the marker.
            Some(idx) => idx + 14,
            // Non-typical UA; full-length match.
            None => ua.len(),
        },
    };
    h.ris_id(ua, tolerance)
}

pub(crate) fn apple_recovery(ua: &str, rx: &Patterns) -> Option<DeviceId> {
    let major = rx
        .apple_os_version
        .captures(ua)
        .ok()
        .flatten()
        .and_then(|caps| caps.get(1)?.as_str().parse::<i32>().ok())
        .unwrap_or(-1);

    // iPods first; their UAs also contain 'iPhone'.
    if ua.contains("iPod") {
        let device_id = format!("apple_ipod_touch_ver{major}");
        Some(if APPLE_CONSTANT_IDS.contains(&device_id.as_str()) {
            DeviceId::from(device_id)
        } else {
            DeviceId::from("apple_ipod_touch_ver1")
        })
    } else if ua.contains("iPad") {
        Some(match major {
            5 => DeviceId::from("apple_ipad_ver1_sub5"),
            4 => DeviceId::from("apple_ipad_ver1_sub42"),
            _ => DeviceId::from("apple_ipad_ver1"),
        })
    } else if ua.contains("iPhone") {
        let device_id = format!("apple_iphone_ver{major}");
        Some(if APPLE_CONSTANT_IDS.contains(&device_id.as_str()) {
            DeviceId::from(device_id)
        } else {
            DeviceId::from("apple_iphone_ver1")
        })
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// BlackBerry
// ---------------------------------------------------------------------------

/// (version fragment, id) scanned in order; `4.6` must hit before `4.`.
const BLACKBERRY_IDS: &[(&str, &str)] = &[
    ("2.", "blackberry_generic_ver2"),
    ("3.2", "blackberry_generic_ver3_sub2"),
    ("3.3", "blackberry_generic_ver3_sub30"),
    ("3.5", "blackberry_generic_ver3_sub50"),
    ("3.6", "blackberry_generic_ver3_sub60"),
    ("3.7", "blackberry_generic_ver3_sub70"),
    ("4.1", "blackberry_generic_ver4_sub10"),
    ("4.2", "blackberry_generic_ver4_sub20"),
    ("4.3", "blackberry_generic_ver4_sub30"),
    ("4.5", "blackberry_generic_ver4_sub50"),
    ("4.6", "blackberry_generic_ver4_sub60"),
    ("4.7", "blackberry_generic_ver4_sub70"),
    ("4.", "blackberry_generic_ver4"),
    ("5.", "blackberry_generic_ver5"),
    ("6.", "blackberry_generic_ver6"),
];

pub(crate) fn blackberry_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    let tolerance = if ua.starts_with("Mozilla/4") {
        second_slash(ua)
    } else if ua.starts_with("Mozilla/5") {
        ordinal_index_of(ua, ";", 3).unwrap_or(0)
    } else {
        first_slash(ua)
    };
    h.ris_id(ua, tolerance)
}

pub(crate) fn blackberry_recovery(ua: &str, rx: &Patterns) -> Option<DeviceId> {
    // Case repair happened in the normalizer.
    let caps = rx.blackberry_version.captures(ua).ok().flatten()?;
    let version = caps.get(1)?.as_str();
    BLACKBERRY_IDS
        .iter()
        .find(|(fragment, _)| version.contains(fragment))
        .map(|(_, id)| DeviceId::from(*id))
}

// ---------------------------------------------------------------------------
// Kindle
// ---------------------------------------------------------------------------

pub(crate) const KINDLE_CONSTANT_IDS: &[&str] = &[
    "amazon_kindle_ver1",
    "amazon_kindle2_ver1",
    "amazon_kindle3_ver1",
    "amazon_kindle_fire_ver1",
    "generic_amazon_android_kindle",
    "generic_amazon_kindle",
];

pub(crate) fn kindle_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    if let Some(idx) = ua.find("Kindle/") {
        // RIS through the major version digit; e-ink Kindles only.
        let digit = ua.as_bytes().get(idx + "Kindle/".len());
        if matches!(digit, Some(b'1'..=b'3')) {
            let tolerance = (idx + "Kindle/".len() + 1).min(ua.len());
            return h.ris_id(ua, tolerance);
        }
    }
    ris_delimiter_conclusive(h, ua)
}

pub(crate) fn kindle_recovery(ua: &str) -> DeviceId {
    if ua.contains("Kindle/1") {
        return DeviceId::from("amazon_kindle_ver1");
    }
    if ua.contains("Kindle/2") {
        return DeviceId::from("amazon_kindle2_ver1");
    }
    if ua.contains("Kindle/3") {
        return DeviceId::from("amazon_kindle3_ver1");
    }
    if contains_any(ua, &["Kindle Fire", "Silk"]) {
        return DeviceId::from("amazon_kindle_fire_ver1");
    }
    DeviceId::from("generic_amazon_kindle")
}

// ---------------------------------------------------------------------------
// LGUPLUS
// ---------------------------------------------------------------------------

pub(crate) const LGUPLUS_CONSTANT_IDS: &[&str] = &[
    "generic_lguplus_rexos_facebook_browser",
    "generic_lguplus_rexos_webviewer_browser",
    "generic_lguplus_winmo_facebook_browser",
    "generic_lguplus_android_webkit_browser",
];

/// (id, markers that must all be present), in priority order.
const LGUPLUS_BROWSERS: &[(&str, &[&str])] = &[
    ("generic_lguplus_rexos_facebook_browser", &["Windows NT 5", "POLARIS"]),
    ("generic_lguplus_rexos_webviewer_browser", &["Windows NT 5"]),
    ("generic_lguplus_winmo_facebook_browser", &["Windows CE", "POLARIS"]),
    ("generic_lguplus_android_webkit_browser", &["Android", "AppleWebKit"]),
];

pub(crate) fn lg_uplus_recovery(ua: &str) -> Option<DeviceId> {
    LGUPLUS_BROWSERS
        .iter()
        .find(|(_, markers)| contains_all(ua, markers))
        .map(|(id, _)| DeviceId::from(*id))
}

// ---------------------------------------------------------------------------
// Windows Phone
// ---------------------------------------------------------------------------

pub(crate) const WINDOWS_PHONE_CONSTANT_IDS: &[&str] = &[
    "generic_ms_winmo6_5",
    "generic_ms_phone_os7",
    "generic_ms_phone_os7_5",
];

pub(crate) const WINDOWS_PHONE_DESKTOP_CONSTANT_IDS: &[&str] = &[
    "generic_ms_phone_os7_desktopmode",
    "generic_ms_phone_os7_5_desktopmode",
];

pub(crate) fn windows_phone_recovery(ua: &str) -> Option<DeviceId> {
    if ua.contains("Windows Phone 6.5") {
        return Some(DeviceId::from("generic_ms_winmo6_5"));
    }
    if ua.contains("Windows Phone OS 7.0") {
        return Some(DeviceId::from("generic_ms_phone_os7"));
    }
    if ua.contains("Windows Phone OS 7.5") {
        return Some(DeviceId::from("generic_ms_phone_os7_5"));
    }
    None
}

pub(crate) fn windows_phone_desktop_recovery(ua: &str) -> DeviceId {
    if ua.contains("Trident/5.0") {
        DeviceId::from("generic_ms_phone_os7_5_desktopmode")
    } else {
        DeviceId::from("generic_ms_phone_os7_desktopmode")
    }
}

// ---------------------------------------------------------------------------
// Nokia
// ---------------------------------------------------------------------------

pub(crate) const NOKIA_CONSTANT_IDS: &[&str] = &[
    "nokia_generic_series60",
    "nokia_generic_series80",
    "nokia_generic_meego",
];

pub(crate) fn nokia_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    let from = ua.find("Nokia").unwrap_or(0);
    h.ris_id(ua, index_of_any_or_length(ua, &["/", " "], from))
}

pub(crate) fn nokia_recovery(ua: &str) -> Option<DeviceId> {
    if ua.contains("Series60") {
        return Some(DeviceId::from("nokia_generic_series60"));
    }
    if ua.contains("Series80") {
        return Some(DeviceId::from("nokia_generic_series80"));
    }
    if ua.contains("MeeGo") {
        return Some(DeviceId::from("nokia_generic_meego"));
    }
    None
}

pub(crate) fn nokia_ovi_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    let idx = ua.find("Nokia")?;
    h.ris_id(ua, index_of_any_or_length(ua, &["/", " "], idx))
}

// ---------------------------------------------------------------------------
// Samsung
// ---------------------------------------------------------------------------

pub(crate) fn samsung_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    let tolerance = if starts_with_any(ua, &["SEC-", "SAMSUNG-", "SCH"]) {
        first_slash(ua)
    } else if starts_with_any(ua, &["Samsung", "SPH", "SGH"]) {
        first_space(ua)
    } else {
        second_slash(ua)
    };
    h.ris_id(ua, tolerance)
}

pub(crate) fn samsung_recovery(h: &Handler, ua: &str) -> Option<DeviceId> {
    if ua.starts_with("SAMSUNG") {
        h.ld_id(ua, 8)
    } else {
        let from = ua.find("Samsung").unwrap_or(0);
        h.ris_id(ua, index_of_or_length(ua, "/", from))
    }
}

// ---------------------------------------------------------------------------
// SonyEricsson / Motorola
// ---------------------------------------------------------------------------

pub(crate) fn sony_ericsson_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    if ua.starts_with("SonyEricsson") {
        return h.ris_id(ua, first_slash(ua).saturating_sub(1));
    }
    h.ris_id(ua, second_slash(ua))
}

pub(crate) fn motorola_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    if starts_with_any(ua, &["Mot-", "MOT-", "Motorola"]) {
        return h.ris_id(ua, first_slash(ua));
    }
    h.ld_id(ua, 5)
}

pub(crate) fn motorola_recovery(ua: &str) -> Option<DeviceId> {
    if contains_any(ua, &["MIB/2.2", "MIB/BER2.2"]) {
        return Some(DeviceId::from("mot_mib22_generic"));
    }
    None
}

// ---------------------------------------------------------------------------
// DoCoMo / KDDI
// ---------------------------------------------------------------------------

pub(crate) fn docomo_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    let tolerance = match ordinal_index_of(ua, "/", 2) {
        Some(idx) => idx,
        // DoCoMo/2.0 F01A(c100;TB;W24H17)
        None => index_of_or_length(ua, "(", 0),
    };
    h.ris_id(ua, tolerance)
}

pub(crate) fn docomo_recovery(ua: &str) -> DeviceId {
    // The major version sits right after "DoCoMo/".
    if ua.as_bytes().get(7) == Some(&b'2') {
        DeviceId::from("docomo_generic_jap_ver2")
    } else {
        DeviceId::from("docomo_generic_jap_ver1")
    }
}

pub(crate) fn kddi_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    let tolerance = if ua.starts_with("KDDI/") {
        second_slash(ua)
    } else {
        first_slash(ua)
    };
    h.ris_id(ua, tolerance)
}

// ---------------------------------------------------------------------------
// Nintendo / Nec / Pantech / Sanyo / LG
// ---------------------------------------------------------------------------

pub(crate) const NINTENDO_CONSTANT_IDS: &[&str] = &[
    "nintendo_wii_ver1",
    "nintendo_dsi_ver1",
    "nintendo_ds_ver1",
];

pub(crate) fn nintendo_recovery(ua: &str) -> DeviceId {
    if ua.contains("Nintendo Wii") {
        return DeviceId::from("nintendo_wii_ver1");
    }
    if ua.contains("Nintendo DSi") {
        return DeviceId::from("nintendo_dsi_ver1");
    }
    if ua.starts_with("Mozilla/") && contains_all(ua, &["Nitro", "Opera"]) {
        return DeviceId::from("nintendo_ds_ver1");
    }
    DeviceId::from("nintendo_wii_ver1")
}

const NEC_KGT_TOLERANCE: usize = 2;

pub(crate) fn nec_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    if ua.starts_with("NEC-") {
        return h.ris_id(ua, first_slash(ua));
    }
    h.ld_id(ua, NEC_KGT_TOLERANCE)
}

const PANTECH_TOLERANCE: usize = 5;

pub(crate) fn pantech_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    let tolerance = if ua.starts_with("Pantech") {
        PANTECH_TOLERANCE
    } else {
        first_slash(ua)
    };
    h.ris_id(ua, tolerance)
}

pub(crate) fn sanyo_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    let tolerance = match ua.find("MobilePhone") {
        Some(idx) => index_of_or_length(ua, "/", idx),
        None => first_slash(ua),
    };
    h.ris_id(ua, tolerance)
}

pub(crate) fn lg_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    let from = crate::helpers::find_ignore_ascii_case(ua, "LG").unwrap_or(0);
    h.ris_id(ua, index_of_or_length(ua, "/", from))
}

// ---------------------------------------------------------------------------
// SmartTV / OperaMini / webOS / HTC-as-Mac
// ---------------------------------------------------------------------------

pub(crate) const SMART_TV_CONSTANT_IDS: &[&str] = &[
    "generic_smarttv_browser",
    "generic_smarttv_googletv_browser",
    "generic_smarttv_appletv_browser",
    "generic_smarttv_boxeebox_browser",
];

pub(crate) fn smart_tv_recovery(ua: &str) -> DeviceId {
    if ua.contains("SmartTV") {
        return DeviceId::from("generic_smarttv_browser");
    }
    if ua.contains("GoogleTV") {
        return DeviceId::from("generic_smarttv_googletv_browser");
    }
    if ua.contains("AppleTV") {
        return DeviceId::from("generic_smarttv_appletv_browser");
    }
    if ua.contains("Boxee") {
        return DeviceId::from("generic_smarttv_boxeebox_browser");
    }
    DeviceId::from("generic_smarttv_browser")
}

/// (marker, id) in priority order; the paired id is returned.
const OPERA_MINIS: &[(&str, &str)] = &[
    ("Opera Mini/1", "generic_opera_mini_version1"),
    ("Opera Mini/2", "generic_opera_mini_version2"),
    ("Opera Mini/3", "generic_opera_mini_version3"),
    ("Opera Mini/4", "generic_opera_mini_version4"),
    ("Opera Mini/5", "generic_opera_mini_version5"),
];

pub(crate) fn opera_mini_recovery(ua: &str) -> DeviceId {
    if let Some((_, id)) = OPERA_MINIS.iter().find(|(marker, _)| ua.contains(marker)) {
        return DeviceId::from(*id);
    }
    if ua.contains("Opera Mobi") {
        return DeviceId::from("generic_opera_mini_version4");
    }
    DeviceId::from("generic_opera_mini_version1")
}

/// Conclusive match for handlers whose normalizer synthesizes the anchor:
/// RIS past the delimiter when present, otherwise nothing.
pub(crate) fn ris_delimiter_conclusive(h: &Handler, ua: &str) -> Option<DeviceId> {
    let delimiter_idx = ua.find(RIS_DELIMITER)?;
    h.ris_id(ua, delimiter_idx + RIS_DELIMITER.len())
}

pub(crate) fn webos_recovery(ua: &str) -> DeviceId {
    if ua.contains("hpwOS/3") {
        DeviceId::from("hp_tablet_webos_generic")
    } else {
        DeviceId::from("hp_webos_generic")
    }
}

pub(crate) fn get_webos_model_version(ua: &str, rx: &Patterns) -> Option<String> {
    let caps = rx.webos_model.captures(ua).ok().flatten()?;
    Some(format!(
        "{} {}",
        caps.get(1)?.as_str(),
        caps.get(2)?.as_str()
    ))
}

pub(crate) fn get_webos_version(ua: &str, rx: &Patterns) -> Option<String> {
    let caps = rx.webos_version.captures(ua).ok().flatten()?;
    Some(format!("webOS{}", caps.get(1)?.as_str()))
}

pub(crate) fn get_htcmac_model(ua: &str, rx: &Patterns) -> Option<String> {
    let caps = rx.htcmac_model.captures(ua).ok().flatten()?;
    let model: String = caps
        .get(1)?
        .as_str()
        .chars()
        .map(|c| match c {
            ' ' | '_' | '-' | '/' => '~',
            other => other,
        })
        .collect();
    Some(model)
}
