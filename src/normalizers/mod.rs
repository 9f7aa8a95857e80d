//! UA normalization pipelines.
//!
//! A pipeline is an ordered list of rewriters applied left to right.  Every
//! handler starts from the shared generic pipeline; handlers with a family
//! specific rewrite get a new pipeline with their normalizer appended.
//! [`Pipeline::add_normalizer`] never mutates the receiver.

pub(crate) mod generic;
pub(crate) mod specific;

use std::borrow::Cow;

use crate::patterns::Patterns;

/// One total UA → UA rewrite step.  Normalizers never fail; a step that does
/// not apply returns its input unchanged (borrowed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Normalizer {
    // Generic, shared by every handler, in this order.
    UpLink,
    BlackBerry,
    YesWap,
    BabelFish,
    SerialNumbers,
    NovarraGoogleTranslator,
    LocaleRemover,
    Ucweb,
    // Specific, appended to exactly one handler's pipeline.
    Android,
    Chrome,
    Firefox,
    HtcMac,
    Kindle,
    Konqueror,
    Lg,
    LgUplus,
    Msie,
    Opera,
    Safari,
    WebOs,
}

impl Normalizer {
    fn apply<'a>(self, ua: &'a str, rx: &Patterns) -> Cow<'a, str> {
        match self {
            Normalizer::UpLink => generic::up_link(ua),
            Normalizer::BlackBerry => generic::blackberry(ua, rx),
            Normalizer::YesWap => generic::yes_wap(ua, rx),
            Normalizer::BabelFish => generic::babel_fish(ua, rx),
            Normalizer::SerialNumbers => generic::serial_numbers(ua, rx),
            Normalizer::NovarraGoogleTranslator => generic::novarra_google_translator(ua, rx),
            Normalizer::LocaleRemover => generic::locale_remover(ua, rx),
            Normalizer::Ucweb => generic::ucweb(ua, rx),
            Normalizer::Android => specific::android(ua, rx),
            Normalizer::Chrome => specific::chrome(ua),
            Normalizer::Firefox => specific::firefox(ua),
            Normalizer::HtcMac => specific::htc_mac(ua, rx),
            Normalizer::Kindle => specific::kindle(ua, rx),
            Normalizer::Konqueror => specific::konqueror(ua),
            Normalizer::Lg => specific::lg(ua),
            Normalizer::LgUplus => specific::lg_uplus(ua, rx),
            Normalizer::Msie => specific::msie(ua),
            Normalizer::Opera => specific::opera(ua, rx),
            Normalizer::Safari => specific::safari(ua),
            Normalizer::WebOs => specific::web_os(ua, rx),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Pipeline {
    normalizers: Vec<Normalizer>,
}

impl Pipeline {
    /// The pipeline every handler shares, in its fixed order.
    pub fn generic() -> Self {
        Self {
            normalizers: vec![
                Normalizer::UpLink,
                Normalizer::BlackBerry,
                Normalizer::YesWap,
                Normalizer::BabelFish,
                Normalizer::SerialNumbers,
                Normalizer::NovarraGoogleTranslator,
                Normalizer::LocaleRemover,
                Normalizer::Ucweb,
            ],
        }
    }

    /// Returns a new pipeline with `normalizer` appended; the receiver is
    /// left untouched.
    pub fn add_normalizer(&self, normalizer: Normalizer) -> Self {
        let mut normalizers = self.normalizers.clone();
        normalizers.push(normalizer);
        Self { normalizers }
    }

    pub fn normalize(&self, ua: &str, rx: &Patterns) -> String {
        let mut current = ua.to_string();
        for normalizer in &self.normalizers {
            // A borrowed result means the step didn't apply; keep the buffer.
            let rewritten = match normalizer.apply(&current, rx) {
                Cow::Owned(rewritten) => Some(rewritten),
                Cow::Borrowed(_) => None,
            };
            if let Some(rewritten) = rewritten {
                current = rewritten;
            }
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_normalizer_does_not_mutate_receiver() {
        let rx = Patterns::compile().unwrap();
        let base = Pipeline::generic();
        let ua = "Mozilla/5.0 (Linux; U; Android 2.2; en-us; Nexus One Build/FRF91)";
        let before = base.normalize(ua, &rx);

        let extended = base.add_normalizer(Normalizer::Android);
        let after = base.normalize(ua, &rx);

        assert_eq!(before, after);
        assert_ne!(extended.normalize(ua, &rx), before);
    }

    #[test]
    fn generic_pipeline_applies_in_order() {
        let rx = Patterns::compile().unwrap();
        let base = Pipeline::generic();
        // Locale token rewritten, UP.Link suffix dropped.
        let ua = "SonyEricssonK750i/R1CA Browser/SEMC-Browser/4.2 Profile/MIDP-2.0; en-us UP.Link/6.3.0.0.0";
        let normalized = base.normalize(ua, &rx);
        assert!(!normalized.contains("UP.Link"));
        assert!(!normalized.contains("en-us"));
    }
}
