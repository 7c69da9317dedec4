//! Stable top-K grouping over the module table.

use std::collections::HashMap;
use std::hash::Hash;

/// Groups `items` by `key`, ranks groups by size descending and returns the
/// first `k`. Grouping is stable: members keep their input order, groups
/// keep discovery order, and the size sort is stable too, so equal-sized
/// groups tie-break on first appearance. Deterministic for a fixed input
/// order.
pub fn top_groups<'a, T, K, F>(items: &'a [T], key: F, k: usize) -> Vec<(K, Vec<&'a T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&T>)> = Vec::new();

    for item in items {
        let group_key = key(item);
        match index.get(&group_key) {
            Some(&slot) => groups[slot].1.push(item),
            None => {
                index.insert(group_key.clone(), groups.len());
                groups.push((group_key, vec![item]));
            }
        }
    }

    groups.sort_by_key(|(_, members)| std::cmp::Reverse(members.len()));
    groups.truncate(k);
    groups
}
