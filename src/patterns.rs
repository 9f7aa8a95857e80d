use fancy_regex::Regex;

use crate::error::Result;

/// Every regex the engine needs, compiled once when the chain is built.
/// Normalizers and handlers receive this by reference; nothing compiles a
/// pattern per query.
pub(crate) struct Patterns {
    // Generic normalizers.
    pub babel_fish: Regex,
    pub blackberry_case: Regex,
    pub yes_wap: Regex,
    pub serial_numbers: Regex,
    pub novarra_google_translator: Regex,
    pub locale: Regex,
    pub ucweb_juc: Regex,
    pub ucweb_missing_space: Regex,

    // Android family.
    pub android_trailing_version: Regex,
    pub android_version: Regex,
    pub android_model: Regex,
    pub android_model_htc: Regex,
    pub android_model_htc_version: Regex,
    pub android_model_htc_slash: Regex,
    pub android_model_samsung: Regex,
    pub android_model_orange: Regex,
    pub android_model_lg: Regex,
    pub android_model_serial: Regex,
    pub opera_on_android_version: Regex,

    // Browser families.
    pub opera_version: Regex,
    pub opera_fake_version: Regex,
    pub firefox_version: Regex,
    pub msie_conclusive: Regex,

    // Apple / BlackBerry / webOS / HTC-as-Mac.
    pub apple_os_version: Regex,
    pub blackberry_version: Regex,
    pub webos_model: Regex,
    pub webos_version: Regex,
    pub htcmac_model: Regex,

    // LGUPLUS rewrite.
    pub lguplus: Regex,

    // Heavy-duty desktop analysis.
    pub safari_desktop: Regex,
    pub msie9_desktop: Regex,
    pub msie_old_desktop: Regex,
}

impl Patterns {
    pub fn compile() -> Result<Self> {
        Ok(Self {
            babel_fish: Regex::new(r"\s*\(via babelfish\.yahoo\.com\)\s*")?,
            blackberry_case: Regex::new(r"(?i)blackberry")?,
            yes_wap: Regex::new(r"\s*Mozilla/4\.0 \(YesWAP mobile phone proxy\)")?,
            serial_numbers: Regex::new(r"(\[(TF|NT|ST)[\d|X]+\])|(/SN[\d|X]+)")?,
            novarra_google_translator: Regex::new(
                r"(\sNovarra-Vision.*)|(,gzip\(gfe\)\s+\(via translate\.google\.com\))",
            )?,
            locale: Regex::new(r"; ?[a-z]{2}(?:-[a-zA-Z]{2})?(?:\.utf8|\.big5)?\b-?")?,
            ucweb_juc: Regex::new(r"^(JUC \(Linux; U;)(?= \d)")?,
            ucweb_missing_space: Regex::new(r"(Android|JUC|[;\)])(?=[\w|\(])")?,

            android_trailing_version: Regex::new(r"(Android)[ \-](\d\.\d)([^; /\)]+)")?,
            android_version: Regex::new(r"Android (\d\.\d)")?,
            android_model: Regex::new(r"Android [^;]+; xx-xx; (.+?) Build/")?,
            android_model_htc: Regex::new(r"HTC[ _\-/]")?,
            android_model_htc_version: Regex::new(r"(/| V?[\d\.]).*$")?,
            android_model_htc_slash: Regex::new(r"/.*$")?,
            android_model_samsung: Regex::new(r"(SAMSUNG[^/]+)/.*$")?,
            android_model_orange: Regex::new(r"ORANGE/.*$")?,
            android_model_lg: Regex::new(r"(LG-[^/]+)/[vV].*$")?,
            android_model_serial: Regex::new(r"\[[\d]{10}\]")?,
            opera_on_android_version: Regex::new(r"Version/(\d\d)")?,

            opera_version: Regex::new(r"Opera[ /]?(\d+\.\d+)")?,
            opera_fake_version: Regex::new(r"Version/(\d+\.\d+)")?,
            firefox_version: Regex::new(r"Firefox/(\d+)\.\d")?,
            msie_conclusive: Regex::new(r"^Mozilla/4\.0 \(compatible; MSIE (\d)\.(\d);")?,

            apple_os_version: Regex::new(r" (\d)_(\d)[ _]")?,
            blackberry_version: Regex::new(r"BlackBerry[^/\s]+/(\d.\d)")?,
            webos_model: Regex::new(r" ([^/]+)/([\d\.]+)$")?,
            webos_version: Regex::new(r"(?:hpw|web)OS.(\d)\.")?,
            htcmac_model: Regex::new(r"(HTC[^;\)]+)")?,

            lguplus: Regex::new(r"Mozilla.*(Windows (?:NT|CE)).*(POLARIS|WV).*lgtelecom;.*;(.*);.*")?,

            safari_desktop: Regex::new(
                r"^Mozilla/5\.0 \((?:Macintosh|Windows)[^\)]+\) AppleWebKit/[\d\.]+ \(KHTML, like Gecko\) Version/[\d\.]+ Safari/[\d\.]+$",
            )?,
            msie9_desktop: Regex::new(r"^Mozilla/5\.0 \(compatible; MSIE 9\.0; Windows NT \d\.\d")?,
            msie_old_desktop: Regex::new(r"^Mozilla/4\.0 \(compatible; MSIE \d\.\d; Windows NT \d\.\d")?,
        })
    }
}
