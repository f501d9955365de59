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

//! Scheduler run options

const DEFAULT_STACK_SIZE: usize = 256 * 1024; // 256K, enough for the merge sort's recursion-free passes

/// Options controlling a single pipeline run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Target end-to-end scheduling latency, in microseconds. Divided by the
    /// worker count to get each worker's quantum.
    pub target_latency_usec: f64,

    /// The size of each worker's guarded stack.
    pub stack_size: usize,
}

impl Options {
    pub fn new(target_latency_usec: f64) -> Options {
        Options {
            target_latency_usec,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl Default for Options {
    fn default() -> Options {
        Options {
            target_latency_usec: 1000.0,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}
