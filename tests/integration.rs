//! End-to-end tests over a small embedded catalogue: exact recall for every
//! registered UA, the cascade scenarios, and the sentinel fallbacks.

use wurfl_rs::{CapabilityValue, Repository, GENERIC, GENERIC_MOBILE, GENERIC_WEB_BROWSER};

/// A trimmed device catalogue in the dump format the loader consumes.  The
/// `child before parent` ordering near the top exercises the deferral path.
const CATALOGUE: &str = r#"
- id: htc_dream
  user_agent: "Mozilla/5.0 (Linux; U; Android 1.5; en-us; HTC Dream Build/CUPCAKE) AppleWebKit/528.5+ (KHTML, like Gecko) Version/3.1.2 Mobile Safari/525.20.1"
  actual_device_root: true
  fall_back: generic_android
  capabilities:
    model_name: Dream
    brand_name: HTC

- id: generic
  user_agent: ""
  fall_back: root
  capabilities:
    is_wireless_device: false
    xhtml_support_level: 0

- id: generic_xhtml
  user_agent: DO_NOT_MATCH_GENERIC_XHTML
  fall_back: generic
  capabilities:
    xhtml_support_level: 1

- id: generic_mobile
  user_agent: DO_NOT_MATCH_GENERIC_MOBILE
  fall_back: generic_xhtml
  capabilities:
    is_wireless_device: true

- id: generic_web_browser
  user_agent: DO_NOT_MATCH_GENERIC_WEB_BROWSER
  fall_back: generic

- id: generic_android
  user_agent: DO_NOT_MATCH_GENERIC_ANDROID
  fall_back: generic_mobile

- id: generic_android_ver2_2
  user_agent: DO_NOT_MATCH_GENERIC_ANDROID_VER2_2
  fall_back: generic_android

- id: apple_iphone_ver5
  user_agent: DO_NOT_MATCH_APPLE_IPHONE_VER5
  fall_back: generic_mobile

- id: blackberry_generic_ver4_sub60
  user_agent: DO_NOT_MATCH_BB_4_6
  fall_back: generic_mobile

- id: generic_opera_mini_version5
  user_agent: DO_NOT_MATCH_OPERA_MINI_VERSION5
  fall_back: generic_mobile

- id: opwv_v62_generic
  user_agent: DO_NOT_MATCH_OPWV_V62
  fall_back: generic_mobile

- id: google_chrome
  user_agent: DO_NOT_MATCH_GOOGLE_CHROME
  fall_back: generic_web_browser

- id: msie_7
  user_agent: "Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 5.1)"
  fall_back: generic_web_browser

- id: firefox_12_0
  user_agent: "Mozilla/5.0 (Windows NT 6.1; rv:12.0) Gecko/20100101 Firefox/12.0"
  fall_back: generic_web_browser

- id: nokia_6300
  user_agent: "Nokia6300/2.0 (04.20) Profile/MIDP-2.0 Configuration/CLDC-1.1"
  actual_device_root: true
  fall_back: generic_mobile
  capabilities:
    brand_name: Nokia
    model_name: "6300"

- id: sonyericsson_k750i
  user_agent: "SonyEricssonK750i/R1CA Browser/SEMC-Browser/4.2 Profile/MIDP-2.0 Configuration/CLDC-1.1"
  actual_device_root: true
  fall_back: generic_mobile

- id: samsung_sghx210
  user_agent: "SEC-SGHX210/1.0 UP.Browser/6.2.3.2 (GUI) MMP/1.0"
  actual_device_root: true
  fall_back: generic_mobile

- id: amazon_kindle2
  user_agent: "Mozilla/4.0 (compatible; Linux 2.6.22) NetFront/3.4 Kindle/2.0 (screen 600x800)"
  actual_device_root: true
  fall_back: generic_mobile

- id: docomo_f01a
  user_agent: "DoCoMo/2.0 F01A(c100;TB;W24H17)"
  actual_device_root: true
  fall_back: generic_mobile
"#;

fn repository() -> Repository {
    let mut builder = Repository::builder().expect("chain build");
    builder.load_yaml_str(CATALOGUE).expect("catalogue load");
    builder.seal()
}

/// (registered UA, id) pairs from the catalogue above.
fn registered_pairs() -> Vec<(String, String)> {
    let entries: Vec<serde_yaml::Value> = serde_yaml::from_str(CATALOGUE).unwrap();
    entries
        .into_iter()
        .map(|e| {
            (
                e["user_agent"].as_str().unwrap().to_string(),
                e["id"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

#[test]
fn exact_recall_for_every_registered_ua() {
    let repo = repository();
    for (ua, id) in registered_pairs() {
        assert_eq!(
            repo.match_id(&ua).as_str(),
            id,
            "self-recall failed for {ua:?}"
        );
    }
}

#[test]
fn match_is_deterministic_across_calls() {
    let repo = repository();
    let queries = [
        "Mozilla/5.0 (Linux; U; Android 2.2; en-us; Nexus One Build/FRF91) AppleWebKit/533.1",
        "BlackBerry9000/4.6.0.167 Profile/MIDP-2.0 Configuration/CLDC-1.1 VendorID/102",
        "totally unknown agent",
    ];
    for ua in queries {
        let first = repo.match_id(ua);
        for _ in 0..3 {
            assert_eq!(repo.match_id(ua), first);
        }
    }
}

#[test]
fn android_recovery_synthesizes_version_id() {
    let repo = repository();
    let ua = "Mozilla/5.0 (Linux; U; Android 2.2; en-us; Nexus One Build/FRF91) AppleWebKit/533.1 (KHTML, like Gecko) Version/4.0 Mobile Safari/533.1";
    assert_eq!(repo.match_id(ua).as_str(), "generic_android_ver2_2");
    // The id resolves to a record, which inherits mobile capabilities.
    let record = repo.match_ua(ua).expect("record for synthesized id");
    assert_eq!(record.id.as_str(), "generic_android_ver2_2");
    assert_eq!(
        repo.capability(record.id.as_str(), "is_wireless_device"),
        Some(&CapabilityValue::Bool(true))
    );
}

#[test]
fn apple_recovery_maps_os_version() {
    let repo = repository();
    let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 5_0 like Mac OS X) AppleWebKit/534.46 (KHTML, like Gecko) Version/5.1 Mobile/9A334 Safari/7534.48.3";
    assert_eq!(repo.match_id(ua).as_str(), "apple_iphone_ver5");
}

#[test]
fn blackberry_recovery_maps_firmware_version() {
    let repo = repository();
    let ua = "BlackBerry9000/4.6.0.167 Profile/MIDP-2.0 Configuration/CLDC-1.1 VendorID/102";
    assert_eq!(repo.match_id(ua).as_str(), "blackberry_generic_ver4_sub60");
}

#[test]
fn bots_fall_through_to_generic() {
    let repo = repository();
    let ua = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";
    assert_eq!(repo.match_id(ua).as_str(), GENERIC);
}

#[test]
fn msie_exact_after_normalization() {
    let repo = repository();
    // Different Windows version than the registered UA; both normalize to
    // the same "MSIE 7.0" key.
    let ua = "Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 6.0)";
    assert_eq!(repo.match_id(ua).as_str(), "msie_7");
}

#[test]
fn firefox_normalization_collapses_platform_noise() {
    let repo = repository();
    let ua = "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:12.0) Gecko/20100101 Firefox/12.0";
    assert_eq!(repo.match_id(ua).as_str(), "firefox_12_0");
}

#[test]
fn opera_mini_recovery_picks_versioned_generic() {
    let repo = repository();
    let ua = "Opera/9.80 (J2ME/MIDP; Opera Mini/5.0.16823/1428; U; en) Presto/2.2.0";
    assert_eq!(repo.match_id(ua).as_str(), "generic_opera_mini_version5");
}

#[test]
fn kindle_conclusive_matches_nearby_firmware() {
    let repo = repository();
    let ua = "Mozilla/4.0 (compatible; Linux 2.6.22) NetFront/3.4 Kindle/2.5 (screen 600x800)";
    assert_eq!(repo.match_id(ua).as_str(), "amazon_kindle2");
}

#[test]
fn openwave_hits_the_mobile_catch_all_map() {
    let repo = repository();
    let ua = "SEC-SGHX820/1.0 UP.Browser/6.2.3.2 (GUI) MMP/1.0";
    assert_eq!(repo.match_id(ua).as_str(), "opwv_v62_generic");
}

#[test]
fn unknown_mobile_degrades_to_generic_mobile() {
    let repo = repository();
    let ua = "SAMSUNG-SGH-A867/A867 SHP/VPP/R5 NetFront/35 SMM-MMS/1.2.0 profile/MIDP-2.0 configuration/CLDC-1.1 UP.Link/6.3.0.0.0";
    assert_eq!(repo.match_id(ua).as_str(), GENERIC_MOBILE);
}

#[test]
fn desktop_safari_degrades_to_generic_web_browser() {
    let repo = repository();
    let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_7_2) AppleWebKit/534.52.7 (KHTML, like Gecko) Version/5.1.2 Safari/534.52.7";
    assert_eq!(repo.match_id(ua).as_str(), GENERIC_WEB_BROWSER);
}

#[test]
fn chrome_recovery_returns_family_constant() {
    let repo = repository();
    let ua = "Mozilla/5.0 (Windows NT 6.2; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/27.0.1453.93 Safari/537.36";
    assert_eq!(repo.match_id(ua).as_str(), "google_chrome");
}

#[test]
fn find_and_inheritance() {
    let repo = repository();
    let dream = repo.find("htc_dream").expect("registered device");
    assert_eq!(dream.parent.as_ref().unwrap().as_str(), "generic_android");
    assert!(dream.actual_device_root);
    assert_eq!(
        dream.capabilities.get("model_name"),
        Some(&CapabilityValue::Str("Dream".to_string()))
    );
    // Inherited through generic_android → generic_mobile.
    assert_eq!(
        repo.capability("htc_dream", "is_wireless_device"),
        Some(&CapabilityValue::Bool(true))
    );
    // And overridden values win over ancestors.
    assert_eq!(
        repo.capability("generic_mobile", "xhtml_support_level"),
        Some(&CapabilityValue::Int(1))
    );
    assert!(repo.find("missing_device").is_none());
}

#[test]
fn totally_unknown_ua_still_resolves() {
    let repo = repository();
    let record = repo.match_ua("Some/0.0 Never Seen Agent").expect("generic record");
    assert_eq!(record.id.as_str(), GENERIC);
}
