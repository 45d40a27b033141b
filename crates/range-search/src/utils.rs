//! Utility functions for the crate.

/// Return the index and value of the maximum value among the given pairs.
///
/// Ties are broken in favor of the last maximum. This will return `None` if
/// there are no pairs.
pub fn arg_max<I: IntoIterator<Item = (usize, f64)>>(pairs: I) -> Option<(usize, f64)> {
    pairs.into_iter().max_by(|(_, a), (_, b)| a.total_cmp(b))
}

/// Moves the items that satisfy `predicate` to the front of the slice,
/// preserving no particular order, and returns how many there are.
pub fn partition_in_place<T, P: FnMut(&T) -> bool>(items: &mut [T], mut predicate: P) -> usize {
    let mut split = 0;
    for i in 0..items.len() {
        if predicate(&items[i]) {
            items.swap(i, split);
            split += 1;
        }
    }
    split
}
