// src/utils.rs
//! Generic helpers with no framework flavor at all.

use std::collections::HashMap;
use std::hash::Hash;

/// First element of `iter`, or `None` if it is empty. Absence is a value
/// here, not an error — the get-or-none idiom for lookups.
pub fn first_or_none<I: IntoIterator>(iter: I) -> Option<I::Item> {
    iter.into_iter().next()
}

/// Reverse lookup: the key of `map` holding `value`. If several keys match,
/// one of them is returned; `None` for no match.
pub fn find_key<'a, K: Eq + Hash, V: PartialEq>(map: &'a HashMap<K, V>, value: &V) -> Option<&'a K> {
    map.iter().find(|(_, v)| *v == value).map(|(k, _)| k)
}

/// Round `amount` to `places` decimal places, for money-ish display values.
pub fn round_to_places(amount: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (amount * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_or_none_treats_empty_as_none() {
        assert_eq!(first_or_none(vec![3, 4, 5]), Some(3));
        assert_eq!(first_or_none(Vec::<i32>::new()), None);
    }

    #[test]
    fn find_key_reverses_the_map() {
        let mut map = HashMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(find_key(&map, &2), Some(&"b"));
        assert_eq!(find_key(&map, &9), None);
    }

    #[test]
    fn rounding_hits_the_requested_precision() {
        assert_eq!(round_to_places(1.005_4, 2), 1.01);
        assert_eq!(round_to_places(2.0, 2), 2.0);
        assert_eq!(round_to_places(1.23456, 3), 1.235);
    }
}
