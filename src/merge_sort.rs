// The MIT License (MIT)

// Copyright (c) 2015 Rustcc developers

// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Bottom-up merge sort, generic over a yield hook so it can be driven by a
//! live scheduler or by a plain counting closure in tests.
//!
//! Two entry points share the same pass/merge structure: [`sort_array`]
//! sorts one worker's numbers; [`sort_runs`] sorts the concatenation of all
//! workers' already-sorted runs, using an offset table instead of raw
//! indices. The yield hook is called at the start of every pass, at the
//! reader/writer handoff, between every pairwise merge, and once per element
//! copied inside the merge itself - the full set of points named in the
//! preemption-aware sort design.

use std::cmp::min;

/// Sorts `arr` in place, ascending, stably.
pub fn sort_array<F: FnMut()>(arr: &mut [i32], mut yield_hook: F) {
    let n = arr.len();
    if n < 2 {
        return;
    }

    let mut buf_a = arr.to_vec();
    let mut buf_b = vec![0i32; n];
    let mut data_in_a = true;
    let mut width = 1;

    while width < n {
        yield_hook();
        yield_hook();

        {
            let (reader, writer): (&[i32], &mut [i32]) = if data_in_a {
                (&buf_a, &mut buf_b)
            } else {
                (&buf_b, &mut buf_a)
            };

            let mut i = 0;
            while i < n {
                let mid = min(i + width, n);
                let hi = min(i + 2 * width, n);
                merge(reader, writer, i, mid, hi, &mut yield_hook);
                yield_hook();
                i += 2 * width;
            }
        }

        data_in_a = !data_in_a;
        width *= 2;
    }

    if data_in_a {
        arr.copy_from_slice(&buf_a);
    } else {
        arr.copy_from_slice(&buf_b);
    }
}

/// Sorts the concatenation `data` of `offsets.len() - 1` already-sorted runs
/// in place. `offsets` has one entry per run plus a trailing sentinel equal
/// to `data.len()` (see DESIGN.md decision 3 on why the sentinel exists).
pub fn sort_runs<F: FnMut()>(data: &mut [i32], offsets: &[usize], mut yield_hook: F) {
    assert!(!offsets.is_empty(), "offsets must include at least the sentinel");
    let n_runs = offsets.len() - 1;
    let total = *offsets.last().unwrap();
    assert_eq!(total, data.len(), "offset sentinel must equal data length");

    if n_runs < 2 {
        return;
    }

    let mut buf_a = data.to_vec();
    let mut buf_b = vec![0i32; total];
    let mut data_in_a = true;
    let mut width = 1;

    while width < n_runs {
        yield_hook();
        yield_hook();

        {
            let (reader, writer): (&[i32], &mut [i32]) = if data_in_a {
                (&buf_a, &mut buf_b)
            } else {
                (&buf_b, &mut buf_a)
            };

            let mut i = 0;
            while i < n_runs {
                let mid_run = min(i + width, n_runs);
                let end_run = min(i + 2 * width, n_runs);
                let lo = offsets[i];
                let mid = offsets[mid_run];
                let hi = offsets[end_run];
                merge(reader, writer, lo, mid, hi, &mut yield_hook);
                yield_hook();
                i += 2 * width;
            }
        }

        data_in_a = !data_in_a;
        width *= 2;
    }

    if data_in_a {
        data.copy_from_slice(&buf_a);
    } else {
        data.copy_from_slice(&buf_b);
    }
}

/// Merges `reader[lo..mid]` and `reader[mid..hi]` into `writer[lo..hi]`.
/// Ties break toward the left run, so the sort is stable.
fn merge<F: FnMut()>(reader: &[i32], writer: &mut [i32], lo: usize, mid: usize, hi: usize, yield_hook: &mut F) {
    let mut i = lo;
    let mut j = mid;
    let mut k = lo;

    while i < mid && j < hi {
        if reader[i] <= reader[j] {
            writer[k] = reader[i];
            i += 1;
        } else {
            writer[k] = reader[j];
            j += 1;
        }
        k += 1;
        yield_hook();
    }
    while i < mid {
        writer[k] = reader[i];
        i += 1;
        k += 1;
        yield_hook();
    }
    while j < hi {
        writer[k] = reader[j];
        j += 1;
        k += 1;
        yield_hook();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() {}

    #[test]
    fn sorts_random_array() {
        let mut arr = vec![3, 1, 4, 1, 5, 9, 2, 6];
        sort_array(&mut arr, noop);
        assert_eq!(arr, vec![1, 1, 2, 3, 4, 5, 6, 9]);
    }

    #[test]
    fn sorts_empty_and_singleton() {
        let mut empty: Vec<i32> = vec![];
        sort_array(&mut empty, noop);
        assert!(empty.is_empty());

        let mut one = vec![42];
        sort_array(&mut one, noop);
        assert_eq!(one, vec![42]);
    }

    #[test]
    fn sorts_odd_length_array() {
        let mut arr = vec![9, 7, 5, 3, 1];
        sort_array(&mut arr, noop);
        assert_eq!(arr, vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn counts_yields() {
        let mut arr = vec![5, 4, 3, 2, 1, 0, -1, -2];
        let mut yields = 0;
        sort_array(&mut arr, || yields += 1);
        assert_eq!(arr, vec![-2, -1, 0, 1, 2, 3, 4, 5]);
        assert!(yields > 0);
    }

    #[test]
    fn stable_across_equal_keys() {
        // Encode (key, original index) as key*100 + index so we can verify
        // relative order survives the sort for equal keys.
        let mut arr = vec![100, 1, 100, 102, 100, 3, 101];
        sort_array(&mut arr, noop);
        assert_eq!(arr, vec![1, 3, 100, 100, 100, 101, 102]);
    }

    #[test]
    fn run_merge_concatenates_and_sorts() {
        // Three pre-sorted runs concatenated: [1,4,8] [2,2,9] [0,3]
        let mut data = vec![1, 4, 8, 2, 2, 9, 0, 3];
        let offsets = vec![0, 3, 6, 8];
        sort_runs(&mut data, &offsets, noop);
        assert_eq!(data, vec![0, 1, 2, 2, 3, 4, 8, 9]);
    }

    #[test]
    fn run_merge_single_run_is_noop() {
        let mut data = vec![3, 1, 2];
        let offsets = vec![0, 3];
        sort_runs(&mut data, &offsets, noop);
        // A single run is already sorted input in these fixtures would stay
        // untouched; here it's intentionally unsorted to prove sort_runs
        // does nothing below two runs, matching sort_array's own n<2 guard.
        assert_eq!(data, vec![3, 1, 2]);
    }
}
