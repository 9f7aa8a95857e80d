//! The terminal handler.  Accepts everything; Mozilla UAs are matched by
//! edit distance inside their `Mozilla/4` / `Mozilla/5` bucket, everything
//! else falls back to first-slash RIS over the main table.

use crate::helpers::first_slash;
use crate::matchers::ld_match;
use crate::types::DeviceId;

use super::Handler;

const MOZILLA_TOLERANCE: usize = 5;

pub(crate) fn apply_conclusive_match(h: &Handler, ua: &str) -> Option<DeviceId> {
    if ua.starts_with("Mozilla") {
        return apply_mozilla_conclusive_match(h, ua);
    }
    h.ris_id(ua, first_slash(ua))
}

fn apply_mozilla_conclusive_match(h: &Handler, ua: &str) -> Option<DeviceId> {
    let buckets = h.buckets.as_ref()?;
    if ua.starts_with("Mozilla/5") {
        let sorted = buckets.mozilla5_sorted.as_deref().unwrap_or(&[]);
        return ld_match(sorted, ua, MOZILLA_TOLERANCE)
            .and_then(|m| buckets.mozilla5.get(m))
            .cloned();
    }
    if ua.starts_with("Mozilla/4") {
        let sorted = buckets.mozilla4_sorted.as_deref().unwrap_or(&[]);
        return ld_match(sorted, ua, MOZILLA_TOLERANCE)
            .and_then(|m| buckets.mozilla4.get(m))
            .cloned();
    }
    // Other Mozilla/N prefixes: edit distance over the whole table.
    h.ld_id(ua, MOZILLA_TOLERANCE)
}
