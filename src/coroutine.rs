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

//! Per-worker bookkeeping: one record per input file, holding its resumable
//! context, accounting fields and eventual sorted storage.

use std::path::PathBuf;

use crate::context::Slot;

/// A single worker's state, indexed by pool slot.
///
/// Pool slot 0 is the parker and never carries a `Slot` or input path; it
/// exists only so that worker indices `1..=n` line up with their 1-based
/// diagnostic numbering without an off-by-one at every call site.
pub struct WorkerRecord {
    pub slot: Option<Slot>,
    pub path: Option<PathBuf>,
    pub storage: Vec<i32>,
    pub done: bool,
    pub exec_time_usec: f64,
    pub times_passed_control: u64,
}

impl WorkerRecord {
    pub fn parker() -> WorkerRecord {
        WorkerRecord {
            slot: None,
            path: None,
            storage: Vec::new(),
            done: false,
            exec_time_usec: 0.0,
            times_passed_control: 0,
        }
    }
}
