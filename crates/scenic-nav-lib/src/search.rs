//! Search primitives shared by the spot catalog.

use std::cmp::Ordering;

/// Maximum edit distance accepted by fuzzy name matching.
pub const DEFAULT_FUZZY_THRESHOLD: usize = 2;

/// Return the index of the first element matching `predicate`.
pub fn sequential_search<T, P>(items: &[T], mut predicate: P) -> Option<usize>
where
    P: FnMut(&T) -> bool,
{
    items.iter().position(|item| predicate(item))
}

/// Classic binary search over a slice sorted consistently with `probe`.
///
/// `probe` compares an element against the sought key: `Less` means the
/// element sorts before the key, `Greater` after it. Returns the index of any
/// matching element.
pub fn binary_search_by<T, F>(items: &[T], mut probe: F) -> Option<usize>
where
    F: FnMut(&T) -> Ordering,
{
    let mut low = 0usize;
    let mut high = items.len();
    while low < high {
        let mid = low + (high - low) / 2;
        match probe(&items[mid]) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }
    None
}

/// Knuth-Morris-Pratt substring search.
///
/// Works on characters rather than bytes so CJK names are handled correctly.
/// Returns the character offset of the first occurrence; an empty pattern
/// matches at offset 0.
pub fn kmp_search(text: &str, pattern: &str) -> Option<usize> {
    let pattern: Vec<char> = pattern.chars().collect();
    if pattern.is_empty() {
        return Some(0);
    }
    let failure = failure_table(&pattern);

    let mut matched = 0usize;
    for (i, ch) in text.chars().enumerate() {
        while matched > 0 && ch != pattern[matched] {
            matched = failure[matched - 1];
        }
        if ch == pattern[matched] {
            matched += 1;
            if matched == pattern.len() {
                return Some(i + 1 - matched);
            }
        }
    }
    None
}

/// `failure[i]` is the length of the longest proper prefix of
/// `pattern[..=i]` that is also its suffix.
fn failure_table(pattern: &[char]) -> Vec<usize> {
    let mut failure = vec![0usize; pattern.len()];
    let mut k = 0usize;
    for i in 1..pattern.len() {
        while k > 0 && pattern[i] != pattern[k] {
            k = failure[k - 1];
        }
        if pattern[i] == pattern[k] {
            k += 1;
        }
        failure[i] = k;
    }
    failure
}

/// Case-insensitive Levenshtein distance.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

/// Find the element whose extracted string is closest to `query`, provided
/// the edit distance does not exceed `max_distance`. Earlier elements win ties.
pub fn fuzzy_search<T, F>(
    items: &[T],
    query: &str,
    extract: F,
    max_distance: usize,
) -> Option<usize>
where
    F: Fn(&T) -> &str,
{
    let mut best: Option<(usize, usize)> = None;
    for (index, item) in items.iter().enumerate() {
        let distance = edit_distance(query, extract(item));
        if distance > max_distance {
            continue;
        }
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_search_finds_present_and_rejects_absent() {
        let items = [1, 3, 5, 7, 9, 11];
        assert_eq!(binary_search_by(&items, |x| x.cmp(&7)), Some(3));
        assert_eq!(binary_search_by(&items, |x| x.cmp(&1)), Some(0));
        assert_eq!(binary_search_by(&items, |x| x.cmp(&11)), Some(5));
        assert_eq!(binary_search_by(&items, |x| x.cmp(&4)), None);
        assert_eq!(binary_search_by(&[] as &[i32], |x| x.cmp(&4)), None);
    }

    #[test]
    fn kmp_matches_character_offsets() {
        assert_eq!(kmp_search("Hall of Prayer", "Prayer"), Some(8));
        assert_eq!(kmp_search("abababca", "ababca"), Some(2));
        assert_eq!(kmp_search("天坛公园东门", "东门"), Some(4));
        assert_eq!(kmp_search("Echo Wall", "wall"), None);
        assert_eq!(kmp_search("anything", ""), Some(0));
    }

    #[test]
    fn fuzzy_search_picks_closest_within_threshold() {
        let names = ["Echo Wall", "Danbi Bridge", "Echo Hall"];
        let found = fuzzy_search(&names, "echo wal", |s| *s, DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(found, Some(0));
        assert_eq!(fuzzy_search(&names, "pagoda", |s| *s, 2), None);
    }

    #[test]
    fn sequential_search_returns_first_match() {
        let items = [2, 4, 6, 8];
        assert_eq!(sequential_search(&items, |x| *x > 3), Some(1));
        assert_eq!(sequential_search(&items, |x| *x > 10), None);
    }
}
