//! Generic normalizers applied to every UA before any family-specific step.

use std::borrow::Cow;

use crate::patterns::Patterns;

/// Cut everything from the ` UP.Link` gateway suffix on.
pub(crate) fn up_link(ua: &str) -> Cow<'_, str> {
    match ua.find(" UP.Link") {
        Some(index) if index > 0 => Cow::Owned(ua[..index].to_string()),
        _ => Cow::Borrowed(ua),
    }
}

/// Repair mixed-case `BlackBerry` and drop any proxy preamble before it,
/// unless the UA is a WebKit one.
pub(crate) fn blackberry<'a>(ua: &'a str, rx: &Patterns) -> Cow<'a, str> {
    let ua = rx.blackberry_case.replace_all(ua, "BlackBerry");
    match ua.find("BlackBerry") {
        Some(index) if index > 0 && !ua.contains("AppleWebKit") => {
            Cow::Owned(ua[index..].to_string())
        }
        _ => ua,
    }
}

pub(crate) fn yes_wap<'a>(ua: &'a str, rx: &Patterns) -> Cow<'a, str> {
    rx.yes_wap.replace_all(ua, "")
}

pub(crate) fn babel_fish<'a>(ua: &'a str, rx: &Patterns) -> Cow<'a, str> {
    rx.babel_fish.replace_all(ua, "")
}

/// Remove device serial-number tokens: `[TF…]`, `[NT…]`, `[ST…]`, `/SN…`.
pub(crate) fn serial_numbers<'a>(ua: &'a str, rx: &Patterns) -> Cow<'a, str> {
    rx.serial_numbers.replace_all(ua, "")
}

pub(crate) fn novarra_google_translator<'a>(ua: &'a str, rx: &Patterns) -> Cow<'a, str> {
    rx.novarra_google_translator.replace_all(ua, "")
}

/// Collapse locale tokens (`; en-us`, `; zh-cn.utf8`, …) to `; xx-xx` so the
/// same device registers one table key per firmware rather than one per
/// shipping locale.
pub(crate) fn locale_remover<'a>(ua: &'a str, rx: &Patterns) -> Cow<'a, str> {
    rx.locale.replace_all(ua, "; xx-xx")
}

/// Repair UCWEB UAs: `JUC (Linux; U; 2.3…` is missing its `Android` token and
/// squashed variants (`Mozilla/5.0(Linux;U;Android…`) are missing separator
/// spaces.
pub(crate) fn ucweb<'a>(ua: &'a str, rx: &Patterns) -> Cow<'a, str> {
    if !ua.starts_with("JUC") && !ua.starts_with("Mozilla/5.0(Linux;U;Android") {
        return Cow::Borrowed(ua);
    }
    let repaired = rx.ucweb_juc.replace_all(ua, "${1} Android");
    let repaired = rx.ucweb_missing_space.replace_all(&repaired, "${1} ");
    Cow::Owned(repaired.into_owned())
}
