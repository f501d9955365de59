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

//! A latency-bounded cooperative coroutine scheduler driving a two-level
//! merge sort over asynchronous file I/O.
//!
//! [`run_pipeline`] is the single entry point: it spins up one worker
//! coroutine per input file, each of which reads, parses and locally sorts
//! its file while cooperating with the others under a shared latency
//! budget, then concatenates and merges the per-file runs into one globally
//! sorted sequence.

pub mod async_io;
pub mod context;
pub mod coroutine;
pub mod error;
pub mod merge_sort;
pub mod options;
pub mod parse;
pub mod scheduler;
pub mod worker;

use std::path::PathBuf;

pub use error::{CoreError, CoreResult};
pub use options::Options;

use scheduler::Scheduler;

/// Runs the full pipeline over `paths` and returns the globally sorted
/// sequence. An empty `paths` produces an empty result without touching the
/// scheduler at all.
pub fn run_pipeline(paths: &[PathBuf], options: Options) -> CoreResult<Vec<i32>> {
    run_pipeline_with_stats(paths, options).map(|(sorted, _stats)| sorted)
}

/// Same as [`run_pipeline`], but also returns each worker's accumulated
/// execution time and yield count for the binary's stdout diagnostics.
pub fn run_pipeline_with_stats(paths: &[PathBuf], options: Options) -> CoreResult<(Vec<i32>, Vec<WorkerStats>)> {
    if paths.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }

    let n = paths.len();
    let stack_size = options.stack_size;

    let mut scheduler = Scheduler::setup(n, &options)?;
    scheduler.register_entry_point(stack_size, worker::trampoline)?;

    for (record, path) in scheduler.workers_mut().iter_mut().zip(paths) {
        record.path = Some(path.clone());
    }

    let outcome = scheduler.run().and_then(|()| concatenate_and_merge(&mut scheduler));
    let stats = worker_stats(&scheduler);

    scheduler.cleanup();
    outcome.map(|sorted| (sorted, stats))
}

/// Builds the N+1-entry offset table (see DESIGN.md decision 3) and runs
/// the final cross-file merge.
fn concatenate_and_merge(scheduler: &mut Scheduler) -> CoreResult<Vec<i32>> {
    let n = scheduler.n_workers();
    let mut offsets = Vec::with_capacity(n + 1);
    offsets.push(0usize);

    let mut concatenated = Vec::new();
    for record in scheduler.workers_mut().iter_mut() {
        concatenated.extend_from_slice(&record.storage);
        offsets.push(concatenated.len());
    }

    merge_sort::sort_runs(&mut concatenated, &offsets, scheduler::yield_now);

    Ok(concatenated)
}

/// Per-worker diagnostics gathered after a successful run, for the binary's
/// stdout report.
pub struct WorkerStats {
    pub exec_time_usec: f64,
    pub times_passed_control: u64,
}

pub fn worker_stats(scheduler: &Scheduler) -> Vec<WorkerStats> {
    scheduler
        .workers()
        .iter()
        .map(|w| WorkerStats {
            exec_time_usec: w.exec_time_usec,
            times_passed_control: w.times_passed_control,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn single_file_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_temp(&dir, "a.txt", "3 1 4 1 5 9 2 6");

        let result = run_pipeline(&[a], Options::new(1000.0)).unwrap();
        assert_eq!(result, vec![1, 1, 2, 3, 4, 5, 6, 9]);
    }

    #[test]
    fn two_files_merge() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_temp(&dir, "a.txt", "5 2 8");
        let b = write_temp(&dir, "b.txt", "1 9 3");

        let result = run_pipeline(&[a, b], Options::new(1000.0)).unwrap();
        assert_eq!(result, vec![1, 2, 3, 5, 8, 9]);
    }

    #[test]
    fn empty_file_sorts_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_temp(&dir, "a.txt", "");

        let result = run_pipeline(&[a], Options::new(1000.0)).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist.txt");

        let err = run_pipeline(&[missing], Options::new(1000.0)).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
    }

    #[test]
    fn duplicates_and_negatives() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_temp(&dir, "a.txt", "-1 0 -1 2");
        let b = write_temp(&dir, "b.txt", "0 -1 2");

        let result = run_pipeline(&[a, b], Options::new(1000.0)).unwrap();
        assert_eq!(result, vec![-1, -1, -1, 0, 0, 2, 2]);
    }

    #[test]
    fn many_small_files_stay_fair() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = Vec::new();
        for i in 0..8 {
            let contents: Vec<String> = (0..50).map(|v| ((v * 7 + i) % 997).to_string()).collect();
            paths.push(write_temp(&dir, &format!("f{}.txt", i), &contents.join(" ")));
        }

        // A tight latency target forces many quantum-triggered yields.
        let result = run_pipeline(&paths, Options::new(800.0)).unwrap();
        let mut expected = result.clone();
        expected.sort();
        assert_eq!(result, expected);
        assert_eq!(result.len(), 400);
    }
}
