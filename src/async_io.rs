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

//! Non-blocking-from-the-scheduler's-perspective file reads.
//!
//! A background OS thread performs the actual blocking read and reports
//! completion over a channel. The coroutine polls it with `try_recv()` from
//! inside a `suspend()` loop, standing in for the POSIX `aio_read`/`aio_error`
//! polling the original worker state machine used.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::CoreError;

pub enum PollStatus {
    InProgress,
    Done(Result<Vec<u8>, CoreError>),
}

/// A single in-flight read, submitted to a background thread at construction.
pub struct PendingRead {
    rx: Receiver<Result<Vec<u8>, std::io::Error>>,
    path: PathBuf,
}

impl PendingRead {
    /// Hands an already-opened file to a background thread for reading.
    /// Taking ownership of an open `File` (rather than re-opening by path)
    /// keeps the "open" and "submit read" steps of the worker state machine
    /// distinct, as in the original design's `open()` followed by `aio_read()`.
    pub fn submit(path: &Path, mut file: File) -> PendingRead {
        let (tx, rx) = mpsc::channel();
        let owned_path = path.to_path_buf();

        thread::spawn(move || {
            let mut buf = Vec::new();
            let result = file.read_to_end(&mut buf).map(|_| buf);
            // The receiving coroutine may have already errored out and
            // stopped polling; a dropped receiver here is not our problem.
            let _ = tx.send(result);
        });

        PendingRead { rx, path: owned_path }
    }

    /// Non-blocking poll, analogous to `aio_error`.
    pub fn poll(&self) -> PollStatus {
        match self.rx.try_recv() {
            Ok(Ok(bytes)) => PollStatus::Done(Ok(bytes)),
            Ok(Err(io_err)) => PollStatus::Done(Err(CoreError::Io {
                path: self.path.clone(),
                source: io_err,
            })),
            Err(TryRecvError::Empty) => PollStatus::InProgress,
            Err(TryRecvError::Disconnected) => PollStatus::Done(Err(CoreError::Io {
                path: self.path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "read thread vanished"),
            })),
        }
    }
}
