//! Partition-exchange sort over original positions.
//!
//! The sort permutes `map` (positions into `keys`) rather than the elements.
//! Ties on the key fall back to the original position, which makes the
//! otherwise unstable quicksort stable and every comparison strict.

use std::cmp::Ordering;

use lazyq_core::compare::Comparer;

/// Permutation that orders `keys` stably under `comparer`.
///
/// Fewer than two keys never invoke the comparer.
pub(crate) fn sorted_map<K, C: Comparer<K>>(keys: &[K], comparer: &C) -> Vec<usize> {
    let mut map: Vec<usize> = (0..keys.len()).collect();
    if keys.len() > 1 {
        let cmp = |a: usize, b: usize| compare_key_index(keys, comparer, a, b);
        quick_sort(&mut map, 0, keys.len() - 1, &cmp);
    }
    map
}

/// Key-index comparison: composite key first, original position on ties.
fn compare_key_index<K, C: Comparer<K>>(keys: &[K], comparer: &C, a: usize, b: usize) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    match comparer.compare(&keys[a], &keys[b]) {
        Ordering::Equal => a.cmp(&b),
        other => other,
    }
}

/// Middle pivot, in-place partition; recurse into the smaller side and loop
/// on the larger so stack depth stays logarithmic.
fn quick_sort<F>(map: &mut [usize], mut left: usize, mut right: usize, cmp: &F)
where
    F: Fn(usize, usize) -> Ordering,
{
    loop {
        let pivot = map[left + ((right - left) >> 1)];
        let mut i = left as isize;
        let mut j = right as isize;
        loop {
            while (i as usize) < map.len() && cmp(pivot, map[i as usize]) == Ordering::Greater {
                i += 1;
            }
            while j >= 0 && cmp(pivot, map[j as usize]) == Ordering::Less {
                j -= 1;
            }
            if i > j {
                break;
            }
            if i < j {
                map.swap(i as usize, j as usize);
            }
            i += 1;
            j -= 1;
            if i > j {
                break;
            }
        }

        // [left, j] and [i, right] remain
        if j - (left as isize) <= (right as isize) - i {
            if (left as isize) < j {
                quick_sort(map, left, j as usize, cmp);
            }
            left = i as usize;
        } else {
            if i < right as isize {
                quick_sort(map, i as usize, right, cmp);
            }
            right = j as usize;
        }
        if left >= right {
            break;
        }
    }
}
