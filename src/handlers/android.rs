//! Android family: the widest taxonomy in the chain.  Conclusive matching is
//! driven by the synthesized `"<ver> <model>---"` anchor when present, with
//! per-browser tolerance rules for the Opera / Fennec / UCWEB / NetFront
//! sub-families; recovery synthesizes `generic_android_ver<X_Y>[_suffix]`
//! ids validated against [`CONSTANT_IDS`].

use crate::constants::RIS_DELIMITER;
use crate::helpers::{contains_any, index_of_or_length, second_slash};
use crate::patterns::Patterns;
use crate::types::DeviceId;

use super::Handler;

pub(crate) const CONSTANT_IDS: &[&str] = &[
    "generic_android",
    "generic_android_ver1_5",
    "generic_android_ver1_6",
    "generic_android_ver2",
    "generic_android_ver2_1",
    "generic_android_ver2_2",
    "generic_android_ver2_3",
    "generic_android_ver3_0",
    "generic_android_ver3_1",
    "generic_android_ver3_2",
    "generic_android_ver3_3",
    "generic_android_ver4",
    "generic_android_ver4_1",
    "uabait_opera_mini_android_v50",
    "uabait_opera_mini_android_v51",
    "generic_opera_mini_android_version5",
    "generic_android_ver1_5_opera_mobi",
    "generic_android_ver1_5_opera_mobi_11",
    "generic_android_ver1_6_opera_mobi",
    "generic_android_ver1_6_opera_mobi_11",
    "generic_android_ver2_0_opera_mobi",
    "generic_android_ver2_0_opera_mobi_11",
    "generic_android_ver2_1_opera_mobi",
    "generic_android_ver2_1_opera_mobi_11",
    "generic_android_ver2_2_opera_mobi",
    "generic_android_ver2_2_opera_mobi_11",
    "generic_android_ver2_3_opera_mobi",
    "generic_android_ver2_3_opera_mobi_11",
    "generic_android_ver4_0_opera_mobi",
    "generic_android_ver4_0_opera_mobi_11",
    "generic_android_ver2_1_opera_tablet",
    "generic_android_ver2_2_opera_tablet",
    "generic_android_ver2_3_opera_tablet",
    "generic_android_ver3_0_opera_tablet",
    "generic_android_ver3_1_opera_tablet",
    "generic_android_ver3_2_opera_tablet",
    "generic_android_ver2_0_fennec",
    "generic_android_ver2_0_fennec_tablet",
    "generic_android_ver2_0_fennec_desktop",
    "generic_android_ver1_6_ucweb",
    "generic_android_ver2_0_ucweb",
    "generic_android_ver2_1_ucweb",
    "generic_android_ver2_2_ucweb",
    "generic_android_ver2_3_ucweb",
    "generic_android_ver2_0_netfrontlifebrowser",
    "generic_android_ver2_1_netfrontlifebrowser",
    "generic_android_ver2_2_netfrontlifebrowser",
    "generic_android_ver2_3_netfrontlifebrowser",
];

/// Opera Mini UAs that hide the device: RIS up to the end of the prefix.
const OPERA_MINI_PREFIXES: &[&str] = &[
    "Opera/9.80 (J2ME/MIDP; Opera Mini/5",
    "Opera/9.80 (Android; Opera Mini/5.0",
    "Opera/9.80 (Android; Opera Mini/5.1",
];

pub(crate) fn apply_conclusive_match(h: &Handler, ua: &str) -> Option<DeviceId> {
    // RIS-delimited UAs first.
    if let Some(delimiter_idx) = ua.find(RIS_DELIMITER) {
        return h.ris_id(ua, delimiter_idx + RIS_DELIMITER.len());
    }

    if ua.contains("Opera Mini") {
        if ua.contains(" Build/") {
            return h.ris_id(ua, index_of_or_length(ua, " Build/", 0));
        }
        for prefix in OPERA_MINI_PREFIXES {
            if ua.starts_with(prefix) {
                return h.ris_id(ua, prefix.len());
            }
        }
    }

    if ua.contains("Opera Mobi") {
        return h.ris_id(ua, second_slash(ua));
    }

    if ua.contains("Opera Tablet") {
        return h.ris_id(ua, second_slash(ua));
    }

    if contains_any(ua, &["Fennec", "Firefox"]) {
        return h.ris_id(ua, index_of_or_length(ua, ")", 0));
    }

    // UCWEB7 / NetFront: the tolerance sits after the browser token.
    if ua.contains("UCWEB7") {
        return h.ris_id(ua, tolerance_after(ua, "UCWEB7"));
    }
    if ua.contains("NetFrontLifeBrowser/2.2") {
        return h.ris_id(ua, tolerance_after(ua, "NetFrontLifeBrowser/2.2"));
    }

    let tolerance = index_of_or_length(ua, " Build/", 0).min(index_of_or_length(ua, " AppleWebKit", 0));
    h.ris_id(ua, tolerance)
}

fn tolerance_after(ua: &str, token: &str) -> usize {
    let idx = ua.find(token).unwrap_or(0);
    (idx + token.len()).min(ua.len())
}

pub(crate) fn apply_recovery_match(ua: &str, rx: &Patterns) -> Option<DeviceId> {
    if ua.contains("Opera Mini") {
        return Some(DeviceId::from("generic_opera_mini_android_version5"));
    }

    if ua.contains("Opera Mobi") {
        let android_version = get_android_version(ua, rx, true).unwrap_or(DEFAULT_ANDROID_VERSION);
        let opera_version = get_opera_on_android_version(ua, rx, true).unwrap_or(DEFAULT_OPERA_VERSION);
        let mut device_id = format!(
            "generic_android_ver{}_opera_mobi",
            android_version.replace('.', "_")
        );
        // Opera Mobi 10 carries no version suffix in its id.
        if opera_version != "10" {
            device_id = format!("{device_id}_{opera_version}");
        }
        return Some(validated(device_id, "generic_android_ver2_0_opera_mobi"));
    }

    if ua.contains("Opera Tablet") {
        let mut version: f32 = get_android_version(ua, rx, true)
            .unwrap_or(DEFAULT_ANDROID_VERSION)
            .parse()
            .unwrap_or(0.0);
        version = version.clamp(2.1, 3.2);
        let device_id = format!(
            "generic_android_ver{}_opera_tablet",
            format!("{version:.1}").replace('.', "_")
        );
        return Some(validated(device_id, "generic_android_ver2_1_opera_tablet"));
    }

    if ua.contains("UCWEB7") {
        let version = get_android_version(ua, rx, true).unwrap_or(DEFAULT_ANDROID_VERSION);
        let device_id = format!("generic_android_ver{}_ucweb", version.replace('.', "_"));
        return Some(validated(device_id, "generic_android_ver2_0_ucweb"));
    }

    let is_fennec = ua.contains("Fennec");
    let is_firefox = ua.contains("Firefox");
    if is_fennec || is_firefox {
        if is_fennec || ua.contains("Mobile") {
            return Some(DeviceId::from("generic_android_ver2_0_fennec"));
        }
        if ua.contains("Tablet") {
            return Some(DeviceId::from("generic_android_ver2_0_fennec_tablet"));
        }
        if ua.contains("Desktop") {
            return Some(DeviceId::from("generic_android_ver2_0_fennec_desktop"));
        }
        return None;
    }

    if ua.contains("NetFrontLifeBrowser") {
        let version = get_android_version(ua, rx, true).unwrap_or(DEFAULT_ANDROID_VERSION);
        let device_id = format!(
            "generic_android_ver{}_netfrontlifebrowser",
            version.replace('.', "_")
        );
        return Some(validated(device_id, "generic_android_ver2_0_netfrontlifebrowser"));
    }

    // Plain Android.
    if ua.contains("Froyo") {
        return Some(DeviceId::from("generic_android_ver2_2"));
    }
    let version = get_android_version(ua, rx, true).unwrap_or(DEFAULT_ANDROID_VERSION);
    let device_id = format!("generic_android_ver{}", version.replace('.', "_"));
    match device_id.as_str() {
        "generic_android_ver2_0" => Some(DeviceId::from("generic_android_ver2")),
        "generic_android_ver4_0" => Some(DeviceId::from("generic_android_ver4")),
        id if CONSTANT_IDS.contains(&id) => Some(DeviceId::from(device_id)),
        _ => Some(DeviceId::from("generic_android")),
    }
}

fn validated(device_id: String, fallback: &'static str) -> DeviceId {
    if CONSTANT_IDS.contains(&device_id.as_str()) {
        DeviceId::from(device_id)
    } else {
        DeviceId::from(fallback)
    }
}

// ---------------------------------------------------------------------------
// Version / model extraction (shared with the Android and Kindle normalizers)
// ---------------------------------------------------------------------------

const DEFAULT_ANDROID_VERSION: &str = "2.0";
const VALID_ANDROID_VERSIONS: &[&str] = &[
    "1.0", "1.5", "1.6", "2.0", "2.1", "2.2", "2.3", "2.4", "3.0", "3.1", "3.2", "3.3", "4.0",
    "4.1",
];
/// Release names some UAs carry instead of a number.
const ANDROID_RELEASES: &[(&str, &str)] = &[
    ("Cupcake", "1.5"),
    ("Donut", "1.6"),
    ("Eclair", "2.1"),
    ("Froyo", "2.2"),
    ("Gingerbread", "2.3"),
    ("Honeycomb", "3.0"),
];

pub(crate) fn get_android_version(
    ua: &str,
    rx: &Patterns,
    use_default: bool,
) -> Option<&'static str> {
    let mut rewritten;
    let mut ua = ua;
    if ANDROID_RELEASES.iter().any(|(name, _)| ua.contains(name)) {
        rewritten = ua.to_string();
        for (name, number) in ANDROID_RELEASES {
            rewritten = rewritten.replace(name, number);
        }
        ua = &rewritten;
    }

    if let Ok(Some(caps)) = rx.android_version.captures(ua) {
        if let Some(version) = caps.get(1) {
            if let Some(valid) = VALID_ANDROID_VERSIONS
                .iter()
                .copied()
                .find(|v| *v == version.as_str())
            {
                return Some(valid);
            }
        }
    }
    use_default.then_some(DEFAULT_ANDROID_VERSION)
}

const DEFAULT_OPERA_VERSION: &str = "10";
const VALID_OPERA_VERSIONS: &[&str] = &["10", "11"];

pub(crate) fn get_opera_on_android_version(
    ua: &str,
    rx: &Patterns,
    use_default: bool,
) -> Option<&'static str> {
    if let Ok(Some(caps)) = rx.opera_on_android_version.captures(ua) {
        if let Some(version) = caps.get(1) {
            if let Some(valid) = VALID_OPERA_VERSIONS
                .iter()
                .copied()
                .find(|v| *v == version.as_str())
            {
                return Some(valid);
            }
        }
    }
    use_default.then_some(DEFAULT_OPERA_VERSION)
}

/// Pull the model token out of `Android …; xx-xx; <model> Build/`, cleaning
/// up the vendor-specific noise around it.
pub(crate) fn get_android_model(ua: &str, rx: &Patterns) -> Option<String> {
    let caps = rx.android_model.captures(ua).ok().flatten()?;
    let mut model = caps.get(1)?.as_str().trim_end_matches([' ', ';']).to_string();

    // Some UAs put the model before "Build/" entirely, leaving nothing here.
    if model.starts_with("Build/") {
        return None;
    }

    if model.contains("HTC") {
        model = rx.android_model_htc.replace_all(&model, "HTC~").into_owned();
        model = rx
            .android_model_htc_version
            .replace_all(&model, "")
            .into_owned();
        model = rx
            .android_model_htc_slash
            .replace_all(&model, "")
            .into_owned();
    }
    model = rx
        .android_model_samsung
        .replace_all(&model, "${1}")
        .into_owned();
    model = rx
        .android_model_orange
        .replace_all(&model, "ORANGE")
        .into_owned();
    model = rx.android_model_lg.replace_all(&model, "${1}").into_owned();
    model = rx
        .android_model_serial
        .replace_all(&model, "")
        .into_owned();

    Some(model.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rx() -> Patterns {
        Patterns::compile().unwrap()
    }

    #[test]
    fn version_from_number() {
        let rx = rx();
        let ua = "Mozilla/5.0 (Linux; U; Android 2.2; xx-xx; Nexus One Build/FRF91)";
        assert_eq!(get_android_version(ua, &rx, false), Some("2.2"));
    }

    #[test]
    fn version_from_release_name() {
        let rx = rx();
        let ua = "HTC_Dream Mozilla/5.0 (Linux; U; Android Cupcake 1.0; xx-xx)";
        // "Cupcake" rewrites to "1.5" before the version regex runs.
        assert_eq!(get_android_version(ua, &rx, false), Some("1.5"));
    }

    #[test]
    fn invalid_version_uses_default_only_when_asked() {
        let rx = rx();
        let ua = "Mozilla/5.0 (Linux; U; Android 9.9; xx-xx)";
        assert_eq!(get_android_version(ua, &rx, false), None);
        assert_eq!(get_android_version(ua, &rx, true), Some("2.0"));
    }

    #[test]
    fn model_extraction_and_cleanup() {
        let rx = rx();
        assert_eq!(
            get_android_model(
                "Mozilla/5.0 (Linux; U; Android 2.2; xx-xx; Nexus One Build/FRF91)",
                &rx
            ),
            Some("Nexus One".to_string())
        );
        assert_eq!(
            get_android_model(
                "Mozilla/5.0 (Linux; U; Android 2.1; xx-xx; SAMSUNG GT-I9000/I9000 Build/ECLAIR)",
                &rx
            ),
            Some("SAMSUNG GT-I9000".to_string())
        );
        assert_eq!(
            get_android_model(
                "Mozilla/5.0 (Linux; U; Android 1.5; xx-xx; Build/CUPCAKE) AppleWebKit/528.5+",
                &rx
            ),
            None
        );
    }

    #[test]
    fn htc_model_normalized() {
        let rx = rx();
        assert_eq!(
            get_android_model(
                "Mozilla/5.0 (Linux; U; Android 2.2; xx-xx; HTC Desire V2.22 Build/FRF91)",
                &rx
            ),
            Some("HTC~Desire".to_string())
        );
    }

    #[test]
    fn recovery_synthesizes_versioned_id() {
        let rx = rx();
        let ua = "Mozilla/5.0 (Linux; U; Android 2.2; xx-xx; Nexus One Build/FRF91) AppleWebKit/533.1";
        assert_eq!(
            apply_recovery_match(ua, &rx),
            Some(DeviceId::from("generic_android_ver2_2"))
        );
    }

    #[test]
    fn recovery_ver2_0_collapses() {
        let rx = rx();
        let ua = "Mozilla/5.0 (Linux; U; Android 2.0; xx-xx)";
        assert_eq!(
            apply_recovery_match(ua, &rx),
            Some(DeviceId::from("generic_android_ver2"))
        );
    }

    #[test]
    fn recovery_opera_mobi_appends_opera_version() {
        let rx = rx();
        let ua = "Opera/9.80 (Android 2.3; Linux; Opera Mobi/ADR-1111101157) Presto/2.9.201 Version/11.50";
        assert_eq!(
            apply_recovery_match(ua, &rx),
            Some(DeviceId::from("generic_android_ver2_3_opera_mobi_11"))
        );
    }

    #[test]
    fn recovery_opera_mobi_version_10_has_no_suffix() {
        let rx = rx();
        let ua = "Opera/9.80 (Android 2.2; Linux; Opera Mobi/29979) Presto/2.4.18 Version/10.00";
        assert_eq!(
            apply_recovery_match(ua, &rx),
            Some(DeviceId::from("generic_android_ver2_2_opera_mobi"))
        );
    }

    #[test]
    fn recovery_results_stay_in_constant_ids() {
        let rx = rx();
        for ua in [
            "Mozilla/5.0 (Linux; U; Android 2.2; xx-xx) UCWEB7.0",
            "Opera/9.80 (Android 3.1; Linux; Opera Tablet/17) Version/11.10",
            "Mozilla/5.0 (Android; Linux armv7l) Gecko/20101025 Fennec/4.0b1",
            "Mozilla/5.0 (Linux; U; Android 2.1; xx-xx) NetFrontLifeBrowser/2.2",
            "Mozilla/5.0 (Linux; U; Android 1.6; xx-xx)",
        ] {
            let id = apply_recovery_match(ua, &rx).unwrap();
            assert!(
                CONSTANT_IDS.contains(&id.as_str()),
                "{} not a constant id (from {ua})",
                id
            );
        }
    }
}
