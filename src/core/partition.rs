//! Order-preserving partitioning, the building block of every counting
//! funnel in the summarizer.

/// Splits `items` into (matching, rest). Relative order is preserved in
/// both halves; every element lands in exactly one of them.
pub fn partition_by<T>(items: Vec<T>, pred: impl Fn(&T) -> bool) -> (Vec<T>, Vec<T>) {
    items.into_iter().partition(|item| pred(item))
}

/// An ordered first-match-wins funnel: each item is assigned the label of
/// the first rule whose predicate matches it, or falls through into the
/// remainder. Buckets come back in rule order, so "remainder carries
/// forward" is an explicit policy instead of an implicit call sequence.
pub fn funnel<T, L: Copy>(
    items: Vec<T>,
    rules: &[(L, &dyn Fn(&T) -> bool)],
) -> (Vec<(L, Vec<T>)>, Vec<T>) {
    let mut buckets: Vec<(L, Vec<T>)> = rules.iter().map(|(label, _)| (*label, Vec::new())).collect();
    let mut remainder = Vec::new();

    for item in items {
        match rules.iter().position(|(_, pred)| pred(&item)) {
            Some(index) => buckets[index].1.push(item),
            None => remainder.push(item),
        }
    }

    (buckets, remainder)
}
