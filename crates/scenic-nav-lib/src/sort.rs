//! Comparator-driven in-place sorting primitives.
//!
//! All algorithms take a comparator closure so callers can sort spots by name,
//! popularity, visit time or any ad-hoc key without the element type having to
//! implement [`Ord`]. Only [`merge_sort`] is stable.

use std::cmp::Ordering;

/// Sorting algorithm selector for [`crate::SpotList::sort_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortAlgorithm {
    #[default]
    Quick,
    Merge,
    Heap,
    Insertion,
}

impl SortAlgorithm {
    /// Sort `items` in place with this algorithm.
    pub fn sort<T, F>(self, items: &mut [T], compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        match self {
            SortAlgorithm::Quick => quick_sort(items, compare),
            SortAlgorithm::Merge => merge_sort(items, compare),
            SortAlgorithm::Heap => heap_sort(items, compare),
            SortAlgorithm::Insertion => insertion_sort(items, compare),
        }
    }
}

/// Quicksort with a last-element pivot (Lomuto partition).
///
/// Recurses into the smaller partition and loops over the larger one, so stack
/// depth stays logarithmic even on already-sorted input.
pub fn quick_sort<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if is_sorted_by(items, &mut compare) {
        return;
    }
    quick_sort_range(items, &mut compare);
}

fn quick_sort_range<T, F>(mut items: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    while items.len() > 1 {
        let pivot = partition(items, compare);
        let (left, right) = std::mem::take(&mut items).split_at_mut(pivot);
        let right = &mut right[1..];
        if left.len() < right.len() {
            quick_sort_range(left, compare);
            items = right;
        } else {
            quick_sort_range(right, compare);
            items = left;
        }
    }
}

fn partition<T, F>(items: &mut [T], compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let high = items.len() - 1;
    let mut store = 0;
    for j in 0..high {
        if compare(&items[j], &items[high]) != Ordering::Greater {
            items.swap(store, j);
            store += 1;
        }
    }
    items.swap(store, high);
    store
}

/// Top-down merge sort. Stable.
pub fn merge_sort<T, F>(items: &mut [T], mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }
    let mut scratch = items.to_vec();
    merge_sort_range(items, &mut scratch, &mut compare);
}

fn merge_sort_range<T, F>(items: &mut [T], scratch: &mut [T], compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }
    let mid = len / 2;
    {
        let (left, right) = items.split_at_mut(mid);
        let (scratch_left, scratch_right) = scratch.split_at_mut(mid);
        merge_sort_range(left, scratch_left, compare);
        merge_sort_range(right, scratch_right, compare);
    }

    scratch[..len].clone_from_slice(items);
    let (mut i, mut j, mut k) = (0, mid, 0);
    while i < mid && j < len {
        // `<=` keeps equal elements in their original order.
        if compare(&scratch[i], &scratch[j]) != Ordering::Greater {
            items[k] = scratch[i].clone();
            i += 1;
        } else {
            items[k] = scratch[j].clone();
            j += 1;
        }
        k += 1;
    }
    while i < mid {
        items[k] = scratch[i].clone();
        i += 1;
        k += 1;
    }
    // Remaining right-half elements are already in place.
}

/// In-place heapsort over a max-heap.
///
/// Input that is already ordered under `compare` is left untouched, so
/// re-sorting never shuffles elements that compare equal.
pub fn heap_sort<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if is_sorted_by(items, &mut compare) {
        return;
    }
    let len = items.len();
    for root in (0..len / 2).rev() {
        sift_down(items, root, len, &mut compare);
    }
    for end in (1..len).rev() {
        items.swap(0, end);
        sift_down(items, 0, end, &mut compare);
    }
}

fn sift_down<T, F>(items: &mut [T], mut root: usize, len: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;
        if left < len && compare(&items[left], &items[largest]) == Ordering::Greater {
            largest = left;
        }
        if right < len && compare(&items[right], &items[largest]) == Ordering::Greater {
            largest = right;
        }
        if largest == root {
            return;
        }
        items.swap(root, largest);
        root = largest;
    }
}

fn is_sorted_by<T, F>(items: &[T], compare: &mut F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    items
        .windows(2)
        .all(|pair| compare(&pair[0], &pair[1]) != Ordering::Greater)
}

/// Insertion sort; cheap for small or nearly sorted input. Stable.
pub fn insertion_sort<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
