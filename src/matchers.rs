//! RIS and LD matching over a handler's sorted UA table.
//!
//! RIS (Reduction In String) finds the table entry sharing the longest common
//! prefix with the needle, subject to a minimum prefix length.  LD finds the
//! entry with the smallest Levenshtein distance, subject to a length-delta
//! bound.  Both are stateless free functions.

use std::cmp::Ordering;

/// Tolerance used by LD call sites that don't pick their own.
pub(crate) const DEFAULT_LD_TOLERANCE: usize = 7;

/// Longest-common-prefix match against a lexicographically sorted slice.
///
/// Binary-searches `collection` for the needle, tracking the entry with the
/// longest shared prefix of at least `tolerance` bytes.  When several entries
/// tie on prefix length, the leftmost (lexicographically smallest) one wins;
/// callers depend on that for deterministic results.
pub(crate) fn ris_match<'a>(
    collection: &'a [String],
    needle: &str,
    tolerance: usize,
) -> Option<&'a str> {
    if collection.is_empty() {
        return None;
    }

    let tolerance = tolerance as isize;
    let mut best_distance: isize = -1;
    let mut best_index: usize = 0;
    let mut low: isize = 0;
    let mut high: isize = collection.len() as isize - 1;

    while low <= high {
        let mid = ((low + high) / 2) as usize;
        let find = &collection[mid];
        let distance = common_prefix_len(needle, find) as isize;
        if distance >= tolerance && distance > best_distance {
            best_index = mid;
            best_distance = distance;
        }

        match find.as_str().cmp(needle) {
            Ordering::Less => low = mid as isize + 1,
            Ordering::Greater => high = mid as isize - 1,
            Ordering::Equal => break,
        }
    }

    if best_distance < tolerance {
        return None;
    }

    // First of the bests: step left over entries sharing exactly the same
    // prefix length with the needle.
    while best_index > 0
        && common_prefix_len(&collection[best_index - 1], needle) as isize == best_distance
    {
        best_index -= 1;
    }
    Some(&collection[best_index])
}

/// Bounded Levenshtein match.
///
/// Scans `collection`; candidates whose length differs from the needle by
/// more than `tolerance` are skipped without computing a distance.  After a
/// candidate is accepted the running threshold drops to `distance - 1`, so
/// the matcher gets progressively stricter and ties resolve to the first
/// entry accepted.
pub(crate) fn ld_match<'a>(
    collection: &'a [String],
    needle: &str,
    tolerance: usize,
) -> Option<&'a str> {
    let mut best = tolerance as isize;
    let mut matched: Option<&'a str> = None;
    let needle_len = needle.chars().count() as isize;

    for ua in collection {
        let ua_len = ua.chars().count() as isize;
        if (needle_len - ua_len).abs() <= tolerance as isize {
            let current = strsim::levenshtein(needle, ua) as isize;
            if current <= best {
                best = current - 1;
                matched = Some(ua);
            }
        }
    }
    matched
}

fn common_prefix_len(s: &str, t: &str) -> usize {
    s.as_bytes()
        .iter()
        .zip(t.as_bytes())
        .take_while(|(a, b)| a == b)
        .count()
}
