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

//! The worker coroutine body: one state machine per input file.
//!
//! Steps: open the file, submit an async read, poll it to completion
//! (suspending between polls), count tokens, allocate storage, parse, sort
//! locally, then signal done. Any failure past the open step releases what
//! it owns and calls `scheduler::error`.

use std::fs::File;

use context::Transfer;
use log::{debug, trace};

use crate::async_io::{PendingRead, PollStatus};
use crate::error::CoreError;
use crate::merge_sort;
use crate::parse;
use crate::scheduler::{self, Scheduler};

/// The entry point bound to every worker's context. Runs exactly once per
/// worker; never returns (it always terminates via `scheduler::done` or
/// `scheduler::error`, both of which diverge).
pub extern "C" fn trampoline(t: Transfer) -> ! {
    let index = t.data;
    scheduler::install_return_context(t.context);
    run(index);
}

fn run(index: usize) -> ! {
    match run_fallible(index) {
        Ok(storage) => {
            Scheduler::current().workers_mut()[index - 1].storage = storage;
            scheduler::done();
        }
        Err(e) => scheduler::error(e),
    }
}

fn run_fallible(index: usize) -> Result<Vec<i32>, CoreError> {
    let path = Scheduler::current().path_for(index).clone();

    // 1. OPEN
    trace!("worker {} opening {:?}", index, path);
    let file = File::open(&path).map_err(|source| CoreError::Io {
        path: path.clone(),
        source,
    })?;

    // 2. SUBMIT
    let pending = PendingRead::submit(&path, file);

    // 3. POLL (suspend between polls; this is the only genuinely blocking wait)
    let bytes = loop {
        match pending.poll() {
            PollStatus::Done(Ok(bytes)) => break bytes,
            PollStatus::Done(Err(e)) => return Err(e),
            PollStatus::InProgress => scheduler::suspend(),
        }
    };

    // 4. FINALIZE READ - `bytes` already holds the full contents.
    debug!("worker {} read {} bytes from {:?}", index, bytes.len(), path);

    // 5. COUNT
    let expected_count = parse::count_tokens(&bytes);

    // 6. ALLOCATE STORAGE happens inside parse_into / 7. PARSE
    let mut storage = parse::parse_into(&path, &bytes, expected_count)?;

    // 8. LOCAL SORT, preemption-aware
    merge_sort::sort_array(&mut storage, || scheduler::yield_now());

    debug!("worker {} sorted {} values", index, storage.len());

    Ok(storage)
}
