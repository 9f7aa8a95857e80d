//! Shared UA classification: mobile / desktop / smart-TV keyword scans, the
//! bot-and-transcoder list, the heavy-duty desktop analysis, and the mobile
//! catch-all id map.
//!
//! The keyword automata are built once per chain; the per-query verdicts live
//! in a [`ScanCtx`] created at chain entry, so classification is memoised for
//! the duration of one filter/match call and never leaks across queries.

use std::cell::OnceCell;

use aho_corasick::AhoCorasick;
use indexmap::IndexMap;

use crate::constants::GENERIC_XHTML;
use crate::error::Result;
use crate::patterns::Patterns;
use crate::types::DeviceId;

const MOBILE_BROWSERS: &[&str] = &[
    "midp",
    "mobile",
    "android",
    "samsung",
    "nokia",
    "up.browser",
    "phone",
    "opera mini",
    "opera mobi",
    "brew",
    "sonyericsson",
    "blackberry",
    "netfront",
    "uc browser",
    "symbian",
    "j2me",
    "wap2.",
    "up.link",
    "windows ce",
    "vodafone",
    "ucweb",
    "zte-",
    "ipad;",
    "docomo",
    "armv",
    "maemo",
    "palm",
    "bolt",
    "fennec",
    "wireless",
    "adr-",
    // HPM Safari.
    "htc",
    "nintendo",
    // Keeps IE-like phone UAs out of the MSIE bucket.
    "zunewp7",
    "skyfire",
    "silk",
    "untrusted",
    "lgtelecom",
    " gt-",
    "ventana",
];

const SMART_TV_BROWSERS: &[&str] = &[
    "googletv",
    "boxee",
    "sonydtv",
    "appletv",
    "smarttv",
    "dlna",
    "netcast.tv",
];

const DESKTOP_BROWSERS: &[&str] = &[
    "wow64",
    ".net clr",
    "gtb7",
    "macintosh",
    "slcc1",
    "gtb6",
    "funwebproducts",
    "aol 9.",
    "gtb8",
];

const BOT_CRAWLER_TRANSCODER: &[&str] = &[
    "bot",
    "crawler",
    "spider",
    "novarra",
    "transcoder",
    "yahoo! searchmonkey",
    "yahoo! slurp",
    "feedfetcher-google",
    "toolbar",
    "mowser",
    "mediapartners-google",
    "azureus",
    "inquisitor",
    "baiduspider",
    "baidumobaider",
    "holmes/",
    "libwww-perl",
    "netsprint",
    "yandex",
    "cfnetwork",
    "ineturl",
    "jakarta",
    "lorkyll",
    "microsoft url control",
    "indy library",
    "slurp",
    "crawl",
    "wget",
    "ucweblient",
    "rma",
    "snoopy",
    "untrursted",
    "mozfdsilla",
    "ask jeeves",
    "jeeves/teoma",
    "mechanize",
    "http client",
    "servicemonitor",
    "httpunit",
    "hatena",
    "ichiro",
];

/// (marker, device id) pairs scanned in order; the first marker found wins,
/// so the order is the priority order.
fn mobile_catch_all_ids() -> IndexMap<&'static str, &'static str> {
    IndexMap::from([
        // Openwave.
        ("UP.Browser/7.2", "opwv_v72_generic"),
        ("UP.Browser/7", "opwv_v7_generic"),
        ("UP.Browser/6.2", "opwv_v62_generic"),
        ("UP.Browser/6", "opwv_v6_generic"),
        ("UP.Browser/5", "upgui_generic"),
        ("UP.Browser/4", "uptext_generic"),
        ("UP.Browser/3", "uptext_generic"),
        // Series 60.
        ("Series60", "nokia_generic_series60"),
        // Access / NetFront.
        ("NetFront/3.0", "generic_netfront_ver3"),
        ("ACS-NF/3.0", "generic_netfront_ver3"),
        ("NetFront/3.1", "generic_netfront_ver3_1"),
        ("ACS-NF/3.1", "generic_netfront_ver3_1"),
        ("NetFront/3.2", "generic_netfront_ver3_2"),
        ("ACS-NF/3.2", "generic_netfront_ver3_2"),
        ("NetFront/3.3", "generic_netfront_ver3_3"),
        ("ACS-NF/3.3", "generic_netfront_ver3_3"),
        ("NetFront/3.4", "generic_netfront_ver3_4"),
        ("NetFront/3.5", "generic_netfront_ver3_5"),
        ("NetFront/4.0", "generic_netfront_ver4_0"),
        ("NetFront/4.1", "generic_netfront_ver4_1"),
        // CoreMedia.
        ("CoreMedia", "apple_iphone_coremedia_ver1"),
        // Windows CE.
        ("Windows CE", "generic_ms_mobile"),
        // Generic XHTML.
        ("Obigo", GENERIC_XHTML),
        ("AU-MIC/2", GENERIC_XHTML),
        ("AU-MIC-", GENERIC_XHTML),
        ("AU-OBIGO/", GENERIC_XHTML),
        ("Teleca Q03B1", GENERIC_XHTML),
        // Opera Mini.
        ("Opera Mini/1", "generic_opera_mini_version1"),
        ("Opera Mini/2", "generic_opera_mini_version2"),
        ("Opera Mini/3", "generic_opera_mini_version3"),
        ("Opera Mini/4", "generic_opera_mini_version4"),
        ("Opera Mini/5", "generic_opera_mini_version5"),
        // DoCoMo.
        ("DoCoMo", "docomo_generic_jap_ver1"),
        ("KDDI", "docomo_generic_jap_ver1"),
    ])
}

/// Keyword automata shared by all queries, built once per chain.
pub(crate) struct Classifiers {
    mobile: AhoCorasick,
    desktop: AhoCorasick,
    smart_tv: AhoCorasick,
    bot: AhoCorasick,
    mobile_catch_all: IndexMap<&'static str, &'static str>,
}

impl Classifiers {
    pub fn build() -> Result<Self> {
        let automaton = |keys: &[&str]| {
            AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(keys)
        };
        Ok(Self {
            mobile: automaton(MOBILE_BROWSERS)?,
            desktop: automaton(DESKTOP_BROWSERS)?,
            smart_tv: automaton(SMART_TV_BROWSERS)?,
            bot: automaton(BOT_CRAWLER_TRANSCODER)?,
            mobile_catch_all: mobile_catch_all_ids(),
        })
    }

    pub fn is_bot_crawler_transcoder(&self, ua: &str) -> bool {
        self.bot.is_match(ua)
    }

    /// First catch-all marker contained in the UA, in priority order.
    /// Markers are matched case-sensitively.
    pub fn mobile_catch_all_id(&self, ua: &str) -> Option<DeviceId> {
        self.mobile_catch_all
            .iter()
            .find(|(marker, _)| ua.contains(*marker))
            .map(|(_, id)| DeviceId::from(*id))
    }
}

/// Per-query classification of the raw UA presented at chain entry.
/// Each verdict is computed at most once per query.
pub(crate) struct ScanCtx<'a> {
    ua: &'a str,
    mobile: OnceCell<bool>,
    desktop: OnceCell<bool>,
    smart_tv: OnceCell<bool>,
}

impl<'a> ScanCtx<'a> {
    pub fn new(ua: &'a str) -> Self {
        Self {
            ua,
            mobile: OnceCell::new(),
            desktop: OnceCell::new(),
            smart_tv: OnceCell::new(),
        }
    }

    pub fn is_mobile_browser(&self, cls: &Classifiers) -> bool {
        *self.mobile.get_or_init(|| cls.mobile.is_match(self.ua))
    }

    pub fn is_desktop_browser(&self, cls: &Classifiers) -> bool {
        *self.desktop.get_or_init(|| cls.desktop.is_match(self.ua))
    }

    pub fn is_smart_tv(&self, cls: &Classifiers) -> bool {
        *self.smart_tv.get_or_init(|| cls.smart_tv.is_match(self.ua))
    }
}

/// Pattern-level desktop detection, used as the first step of the universal
/// catch-all recovery.  `ua` is the (normalized) UA under test; the memoised
/// keyword verdicts still come from the raw UA the query entered with.
pub(crate) fn is_desktop_browser_heavy_duty_analysis(
    ua: &str,
    scan: &ScanCtx<'_>,
    cls: &Classifiers,
    rx: &Patterns,
) -> bool {
    if scan.is_smart_tv(cls) {
        return false;
    }

    // Chrome, unless disguised as a Ventana tablet.
    if ua.contains("Chrome") && !ua.contains("Ventana") {
        return true;
    }

    if scan.is_mobile_browser(cls) {
        return false;
    }

    // PowerPC; not always mobile, but kicked out either way.
    if ua.contains("PPC") {
        return false;
    }

    // Fennec never reaches this point; the mobile keywords catch it.
    if ua.contains("Firefox") && !ua.contains("Tablet") {
        return true;
    }

    if rx.safari_desktop.is_match(ua).unwrap_or(false) {
        return true;
    }

    if ua.starts_with("Opera/9.80 (Windows NT") || ua.starts_with("Opera/9.80 (Macintosh") {
        return true;
    }

    if scan.is_desktop_browser(cls) {
        return true;
    }

    if rx.msie9_desktop.is_match(ua).unwrap_or(false) {
        return true;
    }
    if rx.msie_old_desktop.is_match(ua).unwrap_or(false) {
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifiers() -> Classifiers {
        Classifiers::build().unwrap()
    }

    #[test]
    fn mobile_keywords_are_case_insensitive() {
        let cls = classifiers();
        let scan = ScanCtx::new("Mozilla/5.0 (Linux; U; ANDROID 2.2)");
        assert!(scan.is_mobile_browser(&cls));
    }

    #[test]
    fn desktop_keywords() {
        let cls = classifiers();
        let scan = ScanCtx::new("Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1; WOW64)");
        assert!(scan.is_desktop_browser(&cls));
        assert!(!scan.is_mobile_browser(&cls));
    }

    #[test]
    fn smart_tv_keywords() {
        let cls = classifiers();
        let scan = ScanCtx::new("Mozilla/5.0 (X11; U; Linux i686) AppleWebKit (GoogleTV/162671)");
        assert!(scan.is_smart_tv(&cls));
    }

    #[test]
    fn verdict_is_memoised_per_query() {
        let cls = classifiers();
        let scan = ScanCtx::new("SomethingWithNokiaInside");
        assert!(scan.is_mobile_browser(&cls));
        assert!(scan.is_mobile_browser(&cls));
    }

    #[test]
    fn bot_list_matches_anywhere() {
        let cls = classifiers();
        assert!(cls.is_bot_crawler_transcoder(
            "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)"
        ));
        assert!(!cls.is_bot_crawler_transcoder("Mozilla/5.0 (iPhone; CPU iPhone OS 5_0)"));
    }

    #[test]
    fn catch_all_map_respects_priority() {
        let cls = classifiers();
        // UP.Browser/7.2 must win over the shorter UP.Browser/7 marker.
        assert_eq!(
            cls.mobile_catch_all_id("SEC-SGHX820/1.0 UP.Browser/7.2.7.2"),
            Some(DeviceId::from("opwv_v72_generic"))
        );
        assert_eq!(
            cls.mobile_catch_all_id("SEC-SGHX820/1.0 UP.Browser/7.0.0.1"),
            Some(DeviceId::from("opwv_v7_generic"))
        );
        assert_eq!(cls.mobile_catch_all_id("nothing to see"), None);
    }

    #[test]
    fn heavy_duty_desktop_detection() {
        let cls = classifiers();
        let rx = Patterns::compile().unwrap();

        let chrome = "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/535.7 (KHTML, like Gecko) Chrome/16.0.912.75 Safari/535.7";
        let scan = ScanCtx::new(chrome);
        assert!(is_desktop_browser_heavy_duty_analysis(chrome, &scan, &cls, &rx));

        let safari = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_7_2) AppleWebKit/534.52.7 (KHTML, like Gecko) Version/5.1.2 Safari/534.52.7";
        let scan = ScanCtx::new(safari);
        assert!(is_desktop_browser_heavy_duty_analysis(safari, &scan, &cls, &rx));

        let midlet = "UNTRUSTED/1.0/LGE-CU920";
        let scan = ScanCtx::new(midlet);
        assert!(!is_desktop_browser_heavy_duty_analysis(midlet, &scan, &cls, &rx));
    }
}
