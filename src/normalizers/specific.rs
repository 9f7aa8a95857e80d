//! Family-specific normalizers, each appended to exactly one handler's
//! pipeline.  The Android/Kindle/HTCMac/WebOS ones synthesize a
//! `"<prefix>---"` RIS anchor; the browser ones cut the UA down to (or
//! repair) the token their handler keys on.

use std::borrow::Cow;

use crate::constants::RIS_DELIMITER;
use crate::handlers::{android, mobile};
use crate::helpers::{contains_all, contains_any, floor_char_boundary};
use crate::patterns::Patterns;

/// Prepend `"<version> <model>---"` unless the UA belongs to one of the
/// browser sub-families with their own tolerance rules.
pub(crate) fn android<'a>(ua: &'a str, rx: &Patterns) -> Cow<'a, str> {
    let ua = rx.android_trailing_version.replace_all(ua, "${1} ${2}");
    const SKIP_NORMALIZATION: &[&str] = &[
        "Opera Mini",
        "Opera Mobi",
        "Opera Tablet",
        "Fennec",
        "Firefox",
        "UCWEB7",
        "NetFrontLifeBrowser/2.2",
    ];
    if !contains_any(&ua, SKIP_NORMALIZATION) {
        if let (Some(model), Some(version)) = (
            android::get_android_model(&ua, rx),
            android::get_android_version(&ua, rx, false),
        ) {
            return Cow::Owned(format!("{version} {model}{RIS_DELIMITER}{ua}"));
        }
    }
    ua
}

/// Cut at `Chrome` and truncate at the next `.`, leaving `Chrome/<major>`.
pub(crate) fn chrome(ua: &str) -> Cow<'_, str> {
    match ua.find("Chrome") {
        Some(start) if start > 0 => match ua[start..].find('.') {
            Some(offset) => Cow::Owned(ua[start..start + offset].to_string()),
            None => Cow::Owned(ua[start..].to_string()),
        },
        _ => Cow::Borrowed(ua),
    }
}

pub(crate) fn firefox(ua: &str) -> Cow<'_, str> {
    match ua.find("Firefox") {
        Some(index) if index > 0 => Cow::Owned(ua[index..].to_string()),
        _ => Cow::Borrowed(ua),
    }
}

pub(crate) fn htc_mac<'a>(ua: &'a str, rx: &Patterns) -> Cow<'a, str> {
    match mobile::get_htcmac_model(ua, rx) {
        Some(model) => Cow::Owned(format!("{model}{RIS_DELIMITER}{ua}")),
        None => Cow::Borrowed(ua),
    }
}

/// Kindle Fire tablets carry a regular Android UA; anchor them the same way
/// the Android normalizer would.
pub(crate) fn kindle<'a>(ua: &'a str, rx: &Patterns) -> Cow<'a, str> {
    if contains_all(ua, &["Android", "Kindle Fire"]) {
        if let (Some(model), Some(version)) = (
            android::get_android_model(ua, rx),
            android::get_android_version(ua, rx, false),
        ) {
            return Cow::Owned(format!("{version} {model}{RIS_DELIMITER}{ua}"));
        }
    }
    Cow::Borrowed(ua)
}

pub(crate) fn konqueror(ua: &str) -> Cow<'_, str> {
    match ua.find("Konqueror") {
        Some(index) if index > 0 => {
            let end = floor_char_boundary(ua, index + 10);
            Cow::Owned(ua[index..end].to_string())
        }
        _ => Cow::Borrowed(ua),
    }
}

pub(crate) fn lg(ua: &str) -> Cow<'_, str> {
    match ua.find("LG") {
        Some(index) if index > 0 => Cow::Owned(ua[index..].to_string()),
        _ => Cow::Borrowed(ua),
    }
}

/// Rewrite LG U+ UAs to `<model> Windows <NT|CE> <POLARIS|WV>`.
pub(crate) fn lg_uplus<'a>(ua: &'a str, rx: &Patterns) -> Cow<'a, str> {
    rx.lguplus.replace_all(ua, "${3} ${1} ${2}")
}

pub(crate) fn msie(ua: &str) -> Cow<'_, str> {
    match ua.find("MSIE") {
        Some(index) if index > 0 => {
            let end = floor_char_boundary(ua, index + 8);
            Cow::Owned(ua[index..end].to_string())
        }
        _ => Cow::Borrowed(ua),
    }
}

/// Opera 10+ hides its real version behind `Opera/9.80`; splice the
/// `Version/` number back in.
pub(crate) fn opera<'a>(ua: &'a str, rx: &Patterns) -> Cow<'a, str> {
    if !ua.starts_with("Opera/9.80") {
        return Cow::Borrowed(ua);
    }
    match rx.opera_fake_version.captures(ua).ok().flatten() {
        Some(caps) => {
            let version = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            Cow::Owned(ua.replace("Opera/9.80", &format!("Opera/{version}")))
        }
        None => Cow::Borrowed(ua),
    }
}

/// Placeholder; Safari UAs are matched as stored.
pub(crate) fn safari(ua: &str) -> Cow<'_, str> {
    Cow::Borrowed(ua)
}

pub(crate) fn web_os<'a>(ua: &'a str, rx: &Patterns) -> Cow<'a, str> {
    match (
        mobile::get_webos_model_version(ua, rx),
        mobile::get_webos_version(ua, rx),
    ) {
        (Some(model), Some(os_version)) => {
            Cow::Owned(format!("{model} {os_version}{RIS_DELIMITER}{ua}"))
        }
        _ => Cow::Borrowed(ua),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rx() -> Patterns {
        Patterns::compile().unwrap()
    }

    #[test]
    fn android_prefix_synthesized() {
        let rx = rx();
        let ua = "Mozilla/5.0 (Linux; U; Android 2.2; xx-xx; Nexus One Build/FRF91) AppleWebKit/533.1";
        let normalized = android(ua, &rx);
        assert!(normalized.starts_with("2.2 Nexus One---Mozilla/5.0"));
    }

    #[test]
    fn android_opera_mini_skipped() {
        let rx = rx();
        let ua = "Opera/9.80 (Android 2.3; Linux; Opera Mini/6.5) Presto/2.8";
        assert!(matches!(android(ua, &rx), Cow::Borrowed(_)));
    }

    #[test]
    fn chrome_truncated_to_major() {
        assert_eq!(
            chrome("Mozilla/5.0 (Windows NT 6.1) AppleWebKit/535.7 Chrome/16.0.912.75 Safari/535.7"),
            "Chrome/16"
        );
    }

    #[test]
    fn opera_fake_version_repaired() {
        let rx = rx();
        assert_eq!(
            opera("Opera/9.80 (X11; Linux x86_64; U; sv) Presto/2.9.168 Version/11.50", &rx),
            "Opera/11.50 (X11; Linux x86_64; U; sv) Presto/2.9.168 Version/11.50"
        );
    }

    #[test]
    fn opera_without_fake_version_untouched() {
        let rx = rx();
        let ua = "Opera/7.60 (Windows NT 5.1; U)";
        assert!(matches!(opera(ua, &rx), Cow::Borrowed(_)));
    }

    #[test]
    fn msie_window_of_eight() {
        assert_eq!(
            msie("Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 6.0)"),
            "MSIE 7.0"
        );
    }

    #[test]
    fn lguplus_rewritten() {
        let rx = rx();
        let ua = "Mozilla/4.0 (compatible; MSIE 6.0; Windows CE; POLARIS 6.100; lgtelecom; 1.0; LG-LU3100;)";
        let rewritten = lg_uplus(ua, &rx);
        assert!(rewritten.starts_with(" LG-LU3100 Windows CE POLARIS"));
    }

    #[test]
    fn webos_prefix() {
        let rx = rx();
        let ua = "Mozilla/5.0 (hp-tablet; Linux; hpwOS/3.0.5; U; xx-xx) AppleWebKit/534.6 (KHTML, like Gecko) wOSBrowser/234.83 Safari/534.6 TouchPad/1.0";
        let normalized = web_os(ua, &rx);
        assert!(normalized.starts_with("TouchPad 1.0 webOS3---"));
    }

    #[test]
    fn htc_mac_prefix() {
        let rx = rx();
        let ua = "Mozilla/5.0 (Macintosh; U; Intel Mac OS X 10_6_3; HTC Sensation_4G Build/GRI40)";
        let normalized = htc_mac(ua, &rx);
        assert!(normalized.starts_with("HTC~Sensation~4G~Build~GRI40---"));
    }
}
