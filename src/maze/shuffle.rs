//! Unbiased in-place shuffle

use rand::Rng;

/// Fisher–Yates shuffle: every permutation of `items` is equally likely.
///
/// Walks `i` from the last index down to 1 and swaps `items[i]` with a
/// uniformly chosen index in `0..=i`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
