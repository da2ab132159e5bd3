//! Grouping of flat relation rows into lookup maps.

use std::collections::{BTreeMap, BTreeSet};

/// Group `rows` into `key → ordered set of values`.
///
/// Duplicate `(key, value)` pairs collapse into one entry. Keys with no rows
/// are simply absent from the map.
pub fn group_by<I, T, K, V, FK, FV>(rows: I, key: FK, value: FV) -> BTreeMap<K, BTreeSet<V>>
where
    I: IntoIterator<Item = T>,
    K: Ord,
    V: Ord,
    FK: Fn(&T) -> K,
    FV: Fn(&T) -> V,
{
    let mut out: BTreeMap<K, BTreeSet<V>> = BTreeMap::new();
    for row in rows {
        out.entry(key(&row)).or_default().insert(value(&row));
    }
    out
}
