//! The handler chain's building block: one handler per device family, each
//! owning a table of normalized UA → device id and running the four-tier
//! match cascade (exact → conclusive → recovery → catch-all recovery).

pub(crate) mod android;
pub(crate) mod catch_all;
pub(crate) mod desktop;
pub(crate) mod mobile;

use std::collections::HashMap;

use crate::classify::{is_desktop_browser_heavy_duty_analysis, Classifiers, ScanCtx};
use crate::constants::{GENERIC, GENERIC_MOBILE, GENERIC_WEB_BROWSER};
use crate::helpers::{
    contains_all, contains_any, contains_ignore_ascii_case, first_slash, first_space,
    index_of_or_length, starts_with_any,
};
use crate::matchers::{ld_match, ris_match, DEFAULT_LD_TOLERANCE};
use crate::normalizers::Pipeline;
use crate::patterns::Patterns;
use crate::types::DeviceId;

/// Everything a query needs besides the handler itself: the compiled
/// patterns, the keyword automata, and the per-query classification cache.
pub(crate) struct Env<'a> {
    pub classifiers: &'a Classifiers,
    pub patterns: &'a Patterns,
    pub scan: &'a ScanCtx<'a>,
}

/// Device families, one per handler.  The chain fixes the walk order; the
/// enum order means nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Family {
    JavaMidlet,
    SmartTv,
    Kindle,
    LgUplus,
    Android,
    Apple,
    WindowsPhoneDesktop,
    WindowsPhone,
    NokiaOviBrowser,
    Nokia,
    Samsung,
    BlackBerry,
    SonyEricsson,
    Motorola,
    Alcatel,
    BenQ,
    DoCoMo,
    Grundig,
    HtcMac,
    Htc,
    Kddi,
    Kyocera,
    Lg,
    Mitsubishi,
    Nec,
    Nintendo,
    Panasonic,
    Pantech,
    Philips,
    Portalmmm,
    Qtek,
    Reksio,
    Sagem,
    Sanyo,
    Sharp,
    Siemens,
    Spv,
    Toshiba,
    Vodafone,
    WebOs,
    OperaMini,
    BotCrawlerTranscoder,
    Chrome,
    Firefox,
    Msie,
    Opera,
    Safari,
    Konqueror,
    CatchAll,
}

impl Family {
    /// Pure classifier over the raw UA; the only state consulted is the
    /// per-query classification cache.
    pub fn can_handle(self, ua: &str, env: &Env<'_>) -> bool {
        use Family::*;
        let desktop = || env.scan.is_desktop_browser(env.classifiers);
        let mobile = || env.scan.is_mobile_browser(env.classifiers);
        match self {
            JavaMidlet => ua.contains("UNTRUSTED/1.0"),
            SmartTv => env.scan.is_smart_tv(env.classifiers),
            Kindle => contains_any(ua, &["Kindle", "Silk"]),
            LgUplus => !desktop() && contains_any(ua, &["LGUPLUS", "lgtelecom"]),
            Android => !desktop() && ua.contains("Android"),
            Apple => {
                !desktop()
                    && ua.starts_with("Mozilla/5")
                    && contains_any(ua, &["iPhone", "iPod", "iPad"])
            }
            WindowsPhoneDesktop => ua.contains("ZuneWP7"),
            WindowsPhone => !desktop() && ua.contains("Windows Phone"),
            NokiaOviBrowser => !desktop() && ua.contains("S40OviBrowser"),
            Nokia => !desktop() && ua.contains("Nokia"),
            Samsung => {
                !desktop()
                    && (contains_any(ua, &["Samsung", "SAMSUNG"])
                        || starts_with_any(ua, &["SEC-", "SPH", "SGH", "SCH"]))
            }
            BlackBerry => !desktop() && contains_ignore_ascii_case(ua, "BlackBerry"),
            SonyEricsson => !desktop() && ua.contains("Sony"),
            Motorola => {
                !desktop()
                    && (starts_with_any(ua, &["Mot-", "MOT-", "MOTO", "moto"])
                        || ua.contains("Motorola"))
            }
            Alcatel => !desktop() && starts_with_any(ua, &["Alcatel", "ALCATEL"]),
            BenQ => !desktop() && starts_with_any(ua, &["BenQ", "BENQ"]),
            DoCoMo => !desktop() && ua.starts_with("DoCoMo"),
            Grundig => !desktop() && starts_with_any(ua, &["Grundig", "GRUNDIG"]),
            HtcMac => ua.starts_with("Mozilla/5.0 (Macintosh") && ua.contains("HTC"),
            Htc => !desktop() && contains_any(ua, &["HTC", "XV6875"]),
            Kddi => !desktop() && ua.contains("KDDI-"),
            Kyocera => !desktop() && starts_with_any(ua, &["kyocera", "QC-", "KWC-"]),
            Lg => !desktop() && starts_with_any(ua, &["lg", "LG"]),
            Mitsubishi => !desktop() && ua.starts_with("Mitsu"),
            Nec => !desktop() && starts_with_any(ua, &["NEC-", "KGT"]),
            Nintendo => {
                !desktop()
                    && (ua.contains("Nintendo")
                        || (ua.starts_with("Mozilla/") && contains_all(ua, &["Nitro", "Opera"])))
            }
            Panasonic => !desktop() && ua.starts_with("Panasonic"),
            Pantech => !desktop() && starts_with_any(ua, &["Pantech", "PT-", "PANTECH", "PG-"]),
            Philips => !desktop() && starts_with_any(ua, &["Philips", "PHILIPS"]),
            Portalmmm => !desktop() && ua.starts_with("portalmmm"),
            Qtek => !desktop() && ua.starts_with("Qtek"),
            Reksio => !desktop() && ua.starts_with("Reksio"),
            Sagem => !desktop() && starts_with_any(ua, &["Sagem", "SAGEM"]),
            Sanyo => {
                !desktop()
                    && (starts_with_any(ua, &["Sanyo", "SANYO"]) || ua.contains("MobilePhone"))
            }
            Sharp => !desktop() && starts_with_any(ua, &["Sharp", "SHARP"]),
            Siemens => !desktop() && ua.starts_with("SIE-"),
            Spv => !desktop() && ua.contains("SPV"),
            Toshiba => !desktop() && ua.starts_with("Toshiba"),
            Vodafone => !desktop() && ua.starts_with("Vodafone"),
            WebOs => !desktop() && contains_any(ua, &["webOS", "hpwOS"]),
            OperaMini => ua.contains("Opera Mini"),
            BotCrawlerTranscoder => env.classifiers.is_bot_crawler_transcoder(ua),
            Chrome => !mobile() && ua.contains("Chrome"),
            Firefox => {
                !mobile()
                    && !contains_any(ua, &["Tablet", "Sony", "Novarra", "Opera"])
                    && ua.contains("Firefox")
            }
            Msie => {
                !mobile()
                    && !contains_any(ua, &["Opera", "armv", "MOTO", "BREW"])
                    && ua.starts_with("Mozilla")
                    && ua.contains("MSIE")
            }
            Opera => !mobile() && ua.contains("Opera"),
            Safari => !mobile() && ua.starts_with("Mozilla") && ua.contains("Safari"),
            Konqueror => !mobile() && ua.contains("Konqueror"),
            CatchAll => true,
        }
    }

    fn apply_conclusive_match(self, h: &Handler, ua: &str, env: &Env<'_>) -> Option<DeviceId> {
        use Family::*;
        match self {
            JavaMidlet => Some(DeviceId::from("generic_midp_midlet")),
            Reksio => Some(DeviceId::from("generic_reksio")),
            // Exact and recovery match only.
            LgUplus | Portalmmm | WindowsPhone | WindowsPhoneDesktop => None,
            SmartTv => h.ris_id(ua, ua.len()),
            Android => android::apply_conclusive_match(h, ua),
            Kindle => mobile::kindle_conclusive(h, ua),
            Apple => mobile::apple_conclusive(h, ua),
            NokiaOviBrowser => mobile::nokia_ovi_conclusive(h, ua),
            Nokia => mobile::nokia_conclusive(h, ua),
            Samsung => mobile::samsung_conclusive(h, ua),
            BlackBerry => mobile::blackberry_conclusive(h, ua),
            SonyEricsson => mobile::sony_ericsson_conclusive(h, ua),
            Motorola => mobile::motorola_conclusive(h, ua),
            DoCoMo => mobile::docomo_conclusive(h, ua),
            HtcMac | WebOs => mobile::ris_delimiter_conclusive(h, ua),
            Kddi => mobile::kddi_conclusive(h, ua),
            Lg => mobile::lg_conclusive(h, ua),
            Mitsubishi => h.ris_id(ua, first_space(ua)),
            Nec => mobile::nec_conclusive(h, ua),
            Nintendo => h.ld_id(ua, DEFAULT_LD_TOLERANCE),
            Pantech => mobile::pantech_conclusive(h, ua),
            Sanyo => mobile::sanyo_conclusive(h, ua),
            Spv => h.ris_id(ua, index_of_or_length(ua, ";", ua.find("SPV").unwrap_or(0))),
            Chrome => desktop::chrome_conclusive(h, ua),
            Firefox => h.ris_id(ua, index_of_or_length(ua, ".", 0)),
            Msie => desktop::msie_conclusive(h, ua, env.patterns),
            Opera => desktop::opera_conclusive(h, ua),
            CatchAll => catch_all::apply_conclusive_match(h, ua),
            // First-slash RIS is the default conclusive match.
            Alcatel | BenQ | Grundig | Htc | Kyocera | Panasonic | Philips | Qtek | Sagem
            | Sharp | Siemens | Toshiba | Vodafone | OperaMini | BotCrawlerTranscoder | Safari
            | Konqueror => h.ris_id(ua, first_slash(ua)),
        }
    }

    fn apply_recovery_match(self, h: &Handler, ua: &str, env: &Env<'_>) -> Option<DeviceId> {
        use Family::*;
        match self {
            Android => android::apply_recovery_match(ua, env.patterns),
            Apple => mobile::apple_recovery(ua, env.patterns),
            BlackBerry => mobile::blackberry_recovery(ua, env.patterns),
            Chrome => Some(DeviceId::from("google_chrome")),
            DoCoMo => Some(mobile::docomo_recovery(ua)),
            Firefox => Some(desktop::firefox_recovery(ua, env.patterns)),
            HtcMac => Some(DeviceId::from("generic_android_htc_disguised_as_mac")),
            Kddi => Some(DeviceId::from("opwv_v62_generic")),
            Kindle => Some(mobile::kindle_recovery(ua)),
            Lg => h.ris_id(ua, 7),
            LgUplus => mobile::lg_uplus_recovery(ua),
            Motorola => mobile::motorola_recovery(ua),
            Nintendo => Some(mobile::nintendo_recovery(ua)),
            Nokia => mobile::nokia_recovery(ua),
            NokiaOviBrowser => Some(DeviceId::from("nokia_generic_series40_ovibrosr")),
            Opera => Some(desktop::opera_recovery(ua, env.patterns)),
            OperaMini => Some(mobile::opera_mini_recovery(ua)),
            Samsung => mobile::samsung_recovery(h, ua),
            SmartTv => Some(mobile::smart_tv_recovery(ua)),
            WebOs => Some(mobile::webos_recovery(ua)),
            WindowsPhone => mobile::windows_phone_recovery(ua),
            WindowsPhoneDesktop => Some(mobile::windows_phone_desktop_recovery(ua)),
            _ => None,
        }
    }

    /// Hard-coded generic ids the family's recovery match may synthesize.
    pub fn constant_ids(self) -> &'static [&'static str] {
        use Family::*;
        match self {
            Android => android::CONSTANT_IDS,
            Apple => mobile::APPLE_CONSTANT_IDS,
            Chrome => &["google_chrome"],
            DoCoMo => &["docomo_generic_jap_ver1", "docomo_generic_jap_ver2"],
            Firefox => desktop::FIREFOX_CONSTANT_IDS,
            HtcMac => &["generic_android_htc_disguised_as_mac"],
            JavaMidlet => &["generic_midp_midlet"],
            Kddi => &["opwv_v62_generic"],
            Kindle => mobile::KINDLE_CONSTANT_IDS,
            LgUplus => mobile::LGUPLUS_CONSTANT_IDS,
            Motorola => &["mot_mib22_generic"],
            Msie => desktop::MSIE_CONSTANT_IDS,
            Nintendo => mobile::NINTENDO_CONSTANT_IDS,
            Nokia => mobile::NOKIA_CONSTANT_IDS,
            NokiaOviBrowser => &["nokia_generic_series40_ovibrosr"],
            Opera => desktop::OPERA_CONSTANT_IDS,
            Reksio => &["generic_reksio"],
            SmartTv => mobile::SMART_TV_CONSTANT_IDS,
            WebOs => &["hp_tablet_webos_generic", "hp_webos_generic"],
            WindowsPhone => mobile::WINDOWS_PHONE_CONSTANT_IDS,
            WindowsPhoneDesktop => mobile::WINDOWS_PHONE_DESKTOP_CONSTANT_IDS,
            _ => &[],
        }
    }
}

/// The CatchAll handler's prefix-partitioned sub-tables.
#[derive(Debug, Default)]
pub(crate) struct MozillaBuckets {
    pub mozilla4: HashMap<String, DeviceId>,
    pub mozilla4_sorted: Option<Vec<String>>,
    pub mozilla5: HashMap<String, DeviceId>,
    pub mozilla5_sorted: Option<Vec<String>>,
}

pub(crate) struct Handler {
    pub(crate) family: Family,
    pipeline: Pipeline,
    pub(crate) table: HashMap<String, DeviceId>,
    sorted: Option<Vec<String>>,
    pub(crate) buckets: Option<MozillaBuckets>,
}

impl Handler {
    pub fn new(family: Family, pipeline: Pipeline) -> Self {
        let buckets = (family == Family::CatchAll).then(MozillaBuckets::default);
        Self {
            family,
            pipeline,
            table: HashMap::new(),
            sorted: None,
            buckets,
        }
    }

    /// Ingest one (UA, id) pair.  The key is the normalized UA; CatchAll also
    /// files Mozilla/4 and Mozilla/5 UAs into its sub-tables.
    pub fn filter(&mut self, ua: &str, device_id: &DeviceId, rx: &Patterns) {
        let key = self.pipeline.normalize(ua, rx);
        if let Some(buckets) = &mut self.buckets {
            if ua.starts_with("Mozilla/4") {
                buckets.mozilla4.insert(key.clone(), device_id.clone());
                buckets.mozilla4_sorted = None;
            }
            if ua.starts_with("Mozilla/5") {
                buckets.mozilla5.insert(key.clone(), device_id.clone());
                buckets.mozilla5_sorted = None;
            }
        }
        self.table.insert(key, device_id.clone());
        self.sorted = None;
    }

    /// Build the memoised sorted-key views.  Called once at seal time.
    pub fn build_sorted(&mut self) {
        self.sorted = Some(sorted_keys(&self.table));
        if let Some(buckets) = &mut self.buckets {
            buckets.mozilla4_sorted = Some(sorted_keys(&buckets.mozilla4));
            buckets.mozilla5_sorted = Some(sorted_keys(&buckets.mozilla5));
        }
    }

    pub(crate) fn sorted(&self) -> &[String] {
        self.sorted.as_deref().unwrap_or(&[])
    }

    /// The full cascade.  Always produces an id; `generic` in the worst case.
    pub fn apply_match(&self, raw_ua: &str, env: &Env<'_>) -> DeviceId {
        let ua = self.pipeline.normalize(raw_ua, env.patterns);
        let mut device_id = self.apply_exact_match(&ua);
        if is_blank_or_generic(device_id.as_ref()) {
            device_id = self.family.apply_conclusive_match(self, &ua, env);
            if is_blank_or_generic(device_id.as_ref()) {
                device_id = self.family.apply_recovery_match(self, &ua, env);
                if is_blank_or_generic(device_id.as_ref()) {
                    device_id = apply_recovery_catch_all_match(&ua, env);
                }
            }
        }
        match device_id {
            Some(id) if !is_blank_or_generic(Some(&id)) => id,
            _ => DeviceId::from(GENERIC),
        }
    }

    fn apply_exact_match(&self, ua: &str) -> Option<DeviceId> {
        if let Some(id) = self.table.get(ua) {
            return Some(id.clone());
        }
        if let Some(buckets) = &self.buckets {
            if let Some(id) = buckets.mozilla4.get(ua) {
                return Some(id.clone());
            }
            if let Some(id) = buckets.mozilla5.get(ua) {
                return Some(id.clone());
            }
        }
        None
    }

    pub(crate) fn ris_id(&self, ua: &str, tolerance: usize) -> Option<DeviceId> {
        ris_match(self.sorted(), ua, tolerance)
            .and_then(|m| self.table.get(m))
            .cloned()
    }

    pub(crate) fn ld_id(&self, ua: &str, tolerance: usize) -> Option<DeviceId> {
        ld_match(self.sorted(), ua, tolerance)
            .and_then(|m| self.table.get(m))
            .cloned()
    }
}

fn sorted_keys(table: &HashMap<String, DeviceId>) -> Vec<String> {
    let mut keys: Vec<String> = table.keys().cloned().collect();
    keys.sort();
    keys
}

pub(crate) fn is_blank_or_generic(device_id: Option<&DeviceId>) -> bool {
    match device_id {
        None => true,
        Some(id) => id.as_str() == GENERIC || id.as_str().trim().is_empty(),
    }
}

/// Universal last tier: heavy-duty desktop analysis, then the mobile
/// catch-all map, then the keyword verdicts.
fn apply_recovery_catch_all_match(ua: &str, env: &Env<'_>) -> Option<DeviceId> {
    if is_desktop_browser_heavy_duty_analysis(ua, env.scan, env.classifiers, env.patterns) {
        return Some(DeviceId::from(GENERIC_WEB_BROWSER));
    }
    let mobile = env.scan.is_mobile_browser(env.classifiers);
    let desktop = env.scan.is_desktop_browser(env.classifiers);
    if !desktop {
        if let Some(id) = env.classifiers.mobile_catch_all_id(ua) {
            return Some(id);
        }
    }
    if mobile {
        return Some(DeviceId::from(GENERIC_MOBILE));
    }
    if desktop {
        return Some(DeviceId::from(GENERIC_WEB_BROWSER));
    }
    Some(DeviceId::from(GENERIC))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_view_matches_table_keys() {
        let rx = Patterns::compile().unwrap();
        let mut handler = Handler::new(Family::Nokia, Pipeline::generic());
        for (ua, id) in [
            ("Nokia6300/2.0 (04.20)", "nokia_6300"),
            ("Nokia3510i/1.0 (05.30)", "nokia_3510i"),
            ("NokiaN95/11.0.026", "nokia_n95"),
        ] {
            handler.filter(ua, &DeviceId::from(id), &rx);
        }
        handler.build_sorted();

        let mut expected: Vec<String> = handler.table.keys().cloned().collect();
        expected.sort();
        assert_eq!(handler.sorted(), expected.as_slice());
    }

    #[test]
    fn catch_all_buckets_partition_by_prefix() {
        let rx = Patterns::compile().unwrap();
        let mut handler = Handler::new(Family::CatchAll, Pipeline::generic());
        handler.filter("Mozilla/4.0 (Oddball)", &DeviceId::from("old"), &rx);
        handler.filter("Mozilla/5.0 (Oddball)", &DeviceId::from("new"), &rx);
        handler.filter("Oddball/1.0", &DeviceId::from("other"), &rx);
        handler.build_sorted();

        let buckets = handler.buckets.as_ref().unwrap();
        assert_eq!(buckets.mozilla4.len(), 1);
        assert_eq!(buckets.mozilla5.len(), 1);
        assert_eq!(handler.table.len(), 3);
    }

    #[test]
    fn synthesized_recovery_ids_are_constants() {
        let rx = Patterns::compile().unwrap();
        let cls = Classifiers::build().unwrap();
        let cases = [
            (Family::Apple, "Mozilla/5.0 (iPhone; CPU iPhone OS 5_0 like Mac OS X)"),
            (Family::WindowsPhone, "Mozilla/4.0 (compatible; MSIE 7.0; Windows Phone OS 7.0)"),
            (Family::SmartTv, "Mozilla/5.0 (SmartTV; Linux; WebKit) Maple"),
            (Family::Kindle, "Kindle/3.0 (screen 600x800; rotate)"),
        ];
        for (family, ua) in cases {
            let handler = Handler::new(family, Pipeline::generic());
            let scan = ScanCtx::new(ua);
            let env = Env {
                classifiers: &cls,
                patterns: &rx,
                scan: &scan,
            };
            let id = family
                .apply_recovery_match(&handler, ua, &env)
                .expect("recovery id");
            assert!(
                family.constant_ids().contains(&id.as_str()),
                "{id} is not a constant id of {family:?}"
            );
        }
    }

    #[test]
    fn blank_and_generic_ids_keep_the_cascade_going() {
        assert!(is_blank_or_generic(None));
        assert!(is_blank_or_generic(Some(&DeviceId::from(GENERIC))));
        assert!(is_blank_or_generic(Some(&DeviceId::from("  "))));
        assert!(!is_blank_or_generic(Some(&DeviceId::from("nokia_6300"))));
    }
}
