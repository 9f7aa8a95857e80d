//! String helpers the handlers use to derive RIS tolerances.
//!
//! All offsets are byte indices.  The tolerance helpers mirror WURFL's
//! matcher arithmetic exactly, including `second_slash` returning
//! `first + relative_offset` (one byte before the second `/`) and
//! `first_slash` falling back to the full string length.  Registered
//! fingerprints were filed under these tolerances, so "fixing" them would
//! change match results.

/// Byte index of the first `/`, or the string length when absent.
pub(crate) fn first_slash(s: &str) -> usize {
    s.find('/').unwrap_or(s.len())
}

/// Tolerance anchored near the second `/`: `first + offset_of_next_in_tail`.
/// Falls back to `first_slash` when there is only one `/`, and to the string
/// length when there is none.
pub(crate) fn second_slash(s: &str) -> usize {
    let first = match s.find('/') {
        Some(i) => i,
        None => return s.len(),
    };
    match s[first + 1..].find('/') {
        Some(offset) => first + offset,
        None => first,
    }
}

/// Byte index of the first space, or the string length when absent.
pub(crate) fn first_space(s: &str) -> usize {
    s.find(' ').unwrap_or(s.len())
}

/// Byte index of `target` at or after `from`, or the string length.
pub(crate) fn index_of_or_length(s: &str, target: &str, from: usize) -> usize {
    let from = from.min(s.len());
    match s[from..].find(target) {
        Some(offset) => from + offset,
        None => s.len(),
    }
}

/// Smallest byte index of any of `targets` at or after `from`, or the string
/// length when none occurs.
pub(crate) fn index_of_any_or_length(s: &str, targets: &[&str], from: usize) -> usize {
    let from = from.min(s.len());
    targets
        .iter()
        .filter_map(|t| s[from..].find(t).map(|offset| from + offset))
        .min()
        .unwrap_or(s.len())
}

/// Byte index of the `ordinal`-th occurrence of `target` (1-based), if any.
pub(crate) fn ordinal_index_of(s: &str, target: &str, ordinal: usize) -> Option<usize> {
    let mut found = 0;
    let mut start = 0;
    while let Some(offset) = s[start..].find(target) {
        let index = start + offset;
        found += 1;
        if found >= ordinal {
            return Some(index);
        }
        start = index + target.len();
    }
    None
}

pub(crate) fn contains_any(s: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| s.contains(n))
}

pub(crate) fn contains_all(s: &str, needles: &[&str]) -> bool {
    needles.iter().all(|n| s.contains(n))
}

pub(crate) fn starts_with_any(s: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| s.starts_with(p))
}

/// ASCII-case-insensitive substring search; returns the byte index of the
/// first occurrence.
pub(crate) fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() {
        return Some(0);
    }
    if n.len() > h.len() {
        return None;
    }
    h.windows(n.len())
        .position(|window| window.eq_ignore_ascii_case(n))
}

pub(crate) fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    find_ignore_ascii_case(haystack, needle).is_some()
}

/// Largest char boundary `<= index`, so normalizers can slice UAs at offsets
/// derived from byte arithmetic without panicking on multi-byte input.
pub(crate) fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
