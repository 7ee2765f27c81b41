//! Ordering for release version strings.
//!
//! Deprecation versions come straight from Javadoc `@Deprecated(since = "...")`
//! values, so they are mostly dotted numbers with the odd prefix or suffix.
//!
//! # Conventions
//!
//! - Dotted numeric: 1.20, 1.20.1, 1.21.3
//! - Optional `v` prefix: v1.21 is the same as 1.21
//! - Pre-release suffixes: 1.21-pre1 compares as 1.21 (leading digits only)
//! - More segments is newer when the shared prefix is equal: 1.21.1 > 1.21

use std::cmp::Ordering;

/// Compare two version strings segment by segment.
///
/// # Algorithm
///
/// 1. Strip a leading `v` and split on `.`
/// 2. Each segment's leading ASCII digits parse to a number (none → 0)
/// 3. The first differing segment decides
/// 4. Equal shared prefix → the version with more segments is greater
/// 5. Still equal → plain string comparison, so the order stays total
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a_parts = segments(a);
    let b_parts = segments(b);

    for (x, y) in a_parts.iter().zip(b_parts.iter()) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    a_parts
        .len()
        .cmp(&b_parts.len())
        .then_with(|| a.cmp(b))
}

/// `true` if `a` is a strictly newer version than `b`.
pub fn is_newer(a: &str, b: &str) -> bool {
    compare_versions(a, b) == Ordering::Greater
}

fn segments(version: &str) -> Vec<u64> {
    let trimmed = version.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    trimmed.split('.').map(leading_number).collect()
}

fn leading_number(segment: &str) -> u64 {
    let digit_end = segment
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(segment.len());
    segment[..digit_end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: assert a list of versions is in strictly ascending order.
    fn assert_ascending(inputs: &[&str]) {
        for pair in inputs.windows(2) {
            assert_eq!(
                compare_versions(pair[0], pair[1]),
                Ordering::Less,
                "expected {:?} < {:?}",
                pair[0],
                pair[1],
            );
        }
    }

    #[test]
    fn numeric_not_lexical() {
        assert!(!is_newer("1.21.3", "1.21.10"));
        assert!(!is_newer("1.3", "1.21"));
        assert!(is_newer("1.21.10", "1.21.3"));
    }

    #[test]
    fn patch_beats_minor_prefix() {
        assert!(is_newer("1.21.3", "1.20.1"));
        assert!(is_newer("1.21.1", "1.21"));
    }

    #[test]
    fn release_sequence() {
        assert_ascending(&["1.8", "1.9", "1.12.2", "1.13", "1.20", "1.20.1", "1.21", "1.21.3"]);
    }

    #[test]
    fn v_prefix_ignored() {
        assert!(is_newer("v1.21", "1.20.6"));
        assert!(!is_newer("v1.20", "1.20.6"));
    }

    #[test]
    fn suffix_uses_leading_digits() {
        assert!(is_newer("1.21-pre2", "1.20"));
        assert_eq!(leading_number("21-pre2"), 21);
        assert_eq!(leading_number("snapshot"), 0);
    }

    #[test]
    fn total_order_on_numeric_ties() {
        assert_eq!(compare_versions("1.0", "1.0"), Ordering::Equal);
        assert_ne!(compare_versions("1.0", "1.00"), Ordering::Equal);
        assert_eq!(
            compare_versions("1.0", "1.00"),
            compare_versions("1.00", "1.0").reverse()
        );
    }

    #[test]
    fn transitive_over_sorted_set() {
        let mut versions = vec!["1.21.10", "1.3", "1.21", "1.21.3", "1.20.1", "1.4.7"];
        versions.sort_by(|a, b| compare_versions(a, b));
        assert_eq!(
            versions,
            vec!["1.3", "1.4.7", "1.20.1", "1.21", "1.21.3", "1.21.10"]
        );
    }
}
