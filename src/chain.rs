//! The ordered handler chain.  The walk order is load-bearing: a UA is owned
//! by the first handler whose `can_handle` accepts it, both at ingest and at
//! query time, and the terminal CatchAll accepts unconditionally.

use rayon::prelude::*;

use crate::classify::{Classifiers, ScanCtx};
use crate::constants::GENERIC;
use crate::error::Result;
use crate::handlers::{Env, Family, Handler};
use crate::normalizers::{Normalizer, Pipeline};
use crate::patterns::Patterns;
use crate::types::DeviceId;

pub(crate) struct Chain {
    pub(crate) handlers: Vec<Handler>,
    classifiers: Classifiers,
    patterns: Patterns,
}

impl Chain {
    /// Build the full chain: compile the pattern set and keyword automata,
    /// then wire every handler with the shared generic pipeline plus its
    /// family-specific normalizer where one exists.
    pub fn new() -> Result<Self> {
        let classifiers = Classifiers::build()?;
        let patterns = Patterns::compile()?;
        let generic = Pipeline::generic();

        let mut handlers = Vec::with_capacity(49);
        let mut add = |family: Family, pipeline: Pipeline| {
            handlers.push(Handler::new(family, pipeline));
        };

        // Java midlets and smart TVs.
        add(Family::JavaMidlet, generic.clone());
        add(Family::SmartTv, generic.clone());

        // Mobile devices.
        add(Family::Kindle, generic.add_normalizer(Normalizer::Kindle));
        add(Family::LgUplus, generic.add_normalizer(Normalizer::LgUplus));

        // Mobile platforms.
        add(Family::Android, generic.add_normalizer(Normalizer::Android));
        add(Family::Apple, generic.clone());
        add(Family::WindowsPhoneDesktop, generic.clone());
        add(Family::WindowsPhone, generic.clone());
        add(Family::NokiaOviBrowser, generic.clone());

        // High-workload mobile matchers.
        add(Family::Nokia, generic.clone());
        add(Family::Samsung, generic.clone());
        add(Family::BlackBerry, generic.clone());
        add(Family::SonyEricsson, generic.clone());
        add(Family::Motorola, generic.clone());

        // Other mobile matchers.
        add(Family::Alcatel, generic.clone());
        add(Family::BenQ, generic.clone());
        add(Family::DoCoMo, generic.clone());
        add(Family::Grundig, generic.clone());
        add(Family::HtcMac, generic.add_normalizer(Normalizer::HtcMac));
        add(Family::Htc, generic.clone());
        add(Family::Kddi, generic.clone());
        add(Family::Kyocera, generic.clone());
        add(Family::Lg, generic.add_normalizer(Normalizer::Lg));
        add(Family::Mitsubishi, generic.clone());
        add(Family::Nec, generic.clone());
        add(Family::Nintendo, generic.clone());
        add(Family::Panasonic, generic.clone());
        add(Family::Pantech, generic.clone());
        add(Family::Philips, generic.clone());
        add(Family::Portalmmm, generic.clone());
        add(Family::Qtek, generic.clone());
        add(Family::Reksio, generic.clone());
        add(Family::Sagem, generic.clone());
        add(Family::Sanyo, generic.clone());
        add(Family::Sharp, generic.clone());
        add(Family::Siemens, generic.clone());
        add(Family::Spv, generic.clone());
        add(Family::Toshiba, generic.clone());
        add(Family::Vodafone, generic.clone());
        add(Family::WebOs, generic.add_normalizer(Normalizer::WebOs));
        add(Family::OperaMini, generic.clone());

        // Robots, crawlers and transcoders.
        add(Family::BotCrawlerTranscoder, generic.clone());

        // Desktop browsers.
        add(Family::Chrome, generic.add_normalizer(Normalizer::Chrome));
        add(Family::Firefox, generic.add_normalizer(Normalizer::Firefox));
        add(Family::Msie, generic.add_normalizer(Normalizer::Msie));
        add(Family::Opera, generic.add_normalizer(Normalizer::Opera));
        add(Family::Safari, generic.add_normalizer(Normalizer::Safari));
        add(Family::Konqueror, generic.add_normalizer(Normalizer::Konqueror));

        // Everything else.
        add(Family::CatchAll, generic.clone());

        Ok(Self {
            handlers,
            classifiers,
            patterns,
        })
    }

    /// Ingest one (UA, id) pair into the first accepting handler's table.
    pub fn filter(&mut self, ua: &str, device_id: &DeviceId) {
        let scan = ScanCtx::new(ua);
        let env = Env {
            classifiers: &self.classifiers,
            patterns: &self.patterns,
            scan: &scan,
        };
        for handler in &mut self.handlers {
            if handler.family.can_handle(ua, &env) {
                handler.filter(ua, device_id, env.patterns);
                return;
            }
        }
    }

    /// Route a query through the first accepting handler's cascade.
    pub fn match_id(&self, ua: &str) -> DeviceId {
        let scan = ScanCtx::new(ua);
        let env = Env {
            classifiers: &self.classifiers,
            patterns: &self.patterns,
            scan: &scan,
        };
        for handler in &self.handlers {
            if handler.family.can_handle(ua, &env) {
                return handler.apply_match(ua, &env);
            }
        }
        DeviceId::from(GENERIC)
    }

    /// Build every handler's sorted-key view; called once at seal time so
    /// queries never contend on lazy initialization.
    pub fn seal(&mut self) {
        self.handlers.par_iter_mut().for_each(Handler::build_sorted);
    }
}
