//! Ordering primitives shared by Series and DataFrame

use crate::error::{Error, Result};

/// Stable merge sort over positions `0..len`, returning positions in ascending order
pub(crate) fn merge_sort_indices<F>(len: usize, mut less: F) -> Vec<usize>
where
    F: FnMut(usize, usize) -> bool,
{
    let mut index: Vec<usize> = (0..len).collect();
    if len <= 1 {
        return index;
    }
    let mut scratch = vec![0; len];
    merge_sort_range(&mut index, &mut scratch, 0, len, &mut less);
    index
}

fn merge_sort_range<F>(index: &mut [usize], scratch: &mut [usize], lo: usize, hi: usize, less: &mut F)
where
    F: FnMut(usize, usize) -> bool,
{
    if hi - lo <= 1 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    merge_sort_range(index, scratch, lo, mid, less);
    merge_sort_range(index, scratch, mid, hi, less);

    let (mut i, mut j, mut k) = (lo, mid, lo);
    while i < mid && j < hi {
        // ties keep the left run first
        if less(index[j], index[i]) {
            scratch[k] = index[j];
            j += 1;
        } else {
            scratch[k] = index[i];
            i += 1;
        }
        k += 1;
    }
    while i < mid {
        scratch[k] = index[i];
        i += 1;
        k += 1;
    }
    while j < hi {
        scratch[k] = index[j];
        j += 1;
        k += 1;
    }
    index[lo..hi].copy_from_slice(&scratch[lo..hi]);
}

/// Checks that `positions` is a permutation of `0..len`
pub(crate) fn validate_permutation(positions: &[usize], len: usize) -> Result<()> {
    if positions.len() != len {
        return Err(Error::LengthMismatch {
            expected: len,
            actual: positions.len(),
        });
    }
    let mut seen = vec![false; len];
    for &p in positions {
        if p >= len {
            return Err(Error::IndexOutOfBounds { index: p, size: len });
        }
        if seen[p] {
            return Err(Error::InvalidInput(format!(
                "position {} appears more than once in permutation",
                p
            )));
        }
        seen[p] = true;
    }
    Ok(())
}

/// Applies a validated permutation in place through `swap`
///
/// After the call, position `p` holds what was previously at `positions[p]`.
/// Each cycle is walked once, so at most `len - 1` swaps are issued.
pub(crate) fn apply_permutation<S>(positions: &[usize], mut swap: S)
where
    S: FnMut(usize, usize),
{
    let mut placed = vec![false; positions.len()];
    for start in 0..positions.len() {
        if placed[start] {
            continue;
        }
        placed[start] = true;
        let mut current = start;
        loop {
            let next = positions[current];
            if next == start {
                break;
            }
            swap(current, next);
            placed[next] = true;
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permute(values: &[i32], positions: &[usize]) -> Vec<i32> {
        let mut out = values.to_vec();
        apply_permutation(positions, |a, b| out.swap(a, b));
        out
    }

    #[test]
    fn permutation_gathers_from_positions() {
        assert_eq!(permute(&[1, 2, 3], &[2, 1, 0]), vec![3, 2, 1]);
        assert_eq!(permute(&[1, 2, 3], &[2, 0, 1]), vec![3, 1, 2]);
        assert_eq!(permute(&[10, 20, 30, 40, 50], &[3, 4, 0, 1, 2]), vec![40, 50, 10, 20, 30]);
    }

    #[test]
    fn permutation_swap_count_is_linear() {
        let n = 1000;
        let positions: Vec<usize> = (0..n).map(|i| (i + 1) % n).collect();
        let mut swaps = 0;
        apply_permutation(&positions, |_, _| swaps += 1);
        assert_eq!(swaps, n - 1);
    }

    #[test]
    fn merge_sort_is_stable() {
        let keys = [2, 1, 2, 1, 0];
        let idx = merge_sort_indices(keys.len(), |a, b| keys[a] < keys[b]);
        assert_eq!(idx, vec![4, 1, 3, 0, 2]);
    }

    #[test]
    fn invalid_permutations_are_rejected() {
        assert!(validate_permutation(&[0, 1], 3).is_err());
        assert!(validate_permutation(&[0, 0, 1], 3).is_err());
        assert!(validate_permutation(&[0, 1, 3], 3).is_err());
        assert!(validate_permutation(&[2, 0, 1], 3).is_ok());
    }
}
