//! In-place comparison sorts
//!
//! The roster is ordered with two quadratic, constant-space sorts:
//!
//! - [`bubble_sort_by`]: adjacent swaps only, so equal keys keep their
//!   relative order.
//! - [`selection_sort_by`]: swaps each minimum into place, which can move
//!   equal keys past each other.
//!
//! Both take a strict "less than" predicate.

/// Bubble sort with a full set of passes.
///
/// Pass `i` walks `0..n - i - 1` and swaps neighbours when the right one is
/// strictly less than the left one.
pub fn bubble_sort_by<T, F>(items: &mut [T], mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let n = items.len();
    for i in 0..n {
        for j in 0..n - i - 1 {
            if less(&items[j + 1], &items[j]) {
                items.swap(j, j + 1);
            }
        }
    }
}

/// Selection sort.
///
/// For each position the first strictly smallest remaining element is
/// swapped into place.
pub fn selection_sort_by<T, F>(items: &mut [T], mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let n = items.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in (i + 1)..n {
            if less(&items[j], &items[min]) {
                min = j;
            }
        }
        items.swap(i, min);
    }
}
