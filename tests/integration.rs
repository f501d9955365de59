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

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use coro_merge_sort::{run_pipeline, run_pipeline_with_stats, CoreError, Options};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut f = File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn s1_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "3 1 4 1 5 9 2 6");

    let sorted = run_pipeline(&[a], Options::new(1000.0)).unwrap();
    assert_eq!(sorted, vec![1, 1, 2, 3, 4, 5, 6, 9]);
}

#[test]
fn s2_two_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "5 2 8");
    let b = write_file(dir.path(), "b.txt", "1 9 3");

    let sorted = run_pipeline(&[a, b], Options::new(1000.0)).unwrap();
    assert_eq!(sorted, vec![1, 2, 3, 5, 8, 9]);
}

#[test]
fn s3_empty_input() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "");

    let sorted = run_pipeline(&[a], Options::new(1000.0)).unwrap();
    assert!(sorted.is_empty());
}

#[test]
fn s4_large_n_small_latency_stays_fair() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for i in 0..8u32 {
        let values: Vec<String> = (0..1000u32).map(|v| ((v * 31 + i * 17) % 9973).to_string()).collect();
        paths.push(write_file(dir.path(), &format!("f{}.txt", i), &values.join(" ")));
    }

    // Quantum works out to 800 / 8 = 100us per worker.
    let (sorted, stats) = run_pipeline_with_stats(&paths, Options::new(800.0)).unwrap();

    assert_eq!(sorted.len(), 8000);
    let mut expected = sorted.clone();
    expected.sort();
    assert_eq!(sorted, expected);

    assert_eq!(stats.len(), 8);
    for (i, s) in stats.iter().enumerate() {
        assert!(
            s.times_passed_control >= 1,
            "worker {} never relinquished control",
            i
        );
    }
}

#[test]
fn s5_missing_file_fails_without_writing_output() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "1 2 3");
    let missing = dir.path().join("nope.txt");

    let err = run_pipeline(&[a, missing], Options::new(1000.0)).unwrap_err();
    assert!(matches!(err, CoreError::Io { .. }));
}

#[test]
fn s6_duplicates_and_negatives() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "-1 0 -1 2");
    let b = write_file(dir.path(), "b.txt", "0 -1 2");

    let sorted = run_pipeline(&[a, b], Options::new(1000.0)).unwrap();
    assert_eq!(sorted, vec![-1, -1, -1, 0, 0, 2, 2]);
}

#[test]
fn determinism_is_independent_of_latency_target() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "7 3 9 1 2 8 4 6 5 0");
    let b = write_file(dir.path(), "b.txt", "10 20 15 5 25");

    let fast = run_pipeline(&[a.clone(), b.clone()], Options::new(50.0)).unwrap();
    let slow = run_pipeline(&[a, b], Options::new(5_000_000.0)).unwrap();

    assert_eq!(fast, slow);
}

#[test]
fn idempotent_on_its_own_output() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "9 3 7 1 5");
    let once = run_pipeline(&[a], Options::new(1000.0)).unwrap();

    let rendered = once.iter().map(i32::to_string).collect::<Vec<_>>().join(" ");
    let b = write_file(dir.path(), "b.txt", &rendered);
    let twice = run_pipeline(&[b], Options::new(1000.0)).unwrap();

    assert_eq!(once, twice);
}
