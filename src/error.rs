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

//! Error types shared by the scheduler, worker state machine and sort engine.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can fail while driving a pipeline run.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Allocation or stack-creation failure inside the scheduler.
    #[error("resource exhausted: {0}")]
    Resource(String),

    /// A file-level I/O failure (open, read, write).
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed or miscounted integer token in an input file.
    #[error("parse error in {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// A context switch failed. Unrecoverable; the process should abort.
    #[error("scheduler fatal: {0}")]
    SchedulerFatal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
