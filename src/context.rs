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

//! Guarded stacks and raw context switching.
//!
//! This is a thin wrapper around the `context` crate's `Context` and
//! `ProtectedFixedSizeStack`. It exists so the rest of the crate talks in
//! terms of "slot" and "transfer" rather than the `context` crate's own
//! vocabulary, and so the guard-page stack allocation lives in one place.

use context::stack::{ProtectedFixedSizeStack, StackError};
use context::{Context, Transfer};

use crate::error::CoreError;

/// An owned, guarded coroutine stack.
pub struct Stack {
    inner: ProtectedFixedSizeStack,
}

impl Stack {
    pub fn new(size: usize) -> Result<Stack, CoreError> {
        ProtectedFixedSizeStack::new(size)
            .map(|inner| Stack { inner })
            .map_err(|e: StackError| CoreError::Resource(format!("stack allocation failed: {}", e)))
    }
}

/// A resumable execution context bound to a [`Stack`].
///
/// `slot` holds `None` exactly when control currently lives inside this
/// context (it has been moved out by `resume` and not yet handed back).
pub struct Slot {
    slot: Option<Context>,
    _stack: Stack,
}

impl Slot {
    /// Create a new slot whose entry point is `entry`. The entry function is
    /// invoked the first time this slot is resumed; it must never return
    /// normally (coroutine bodies terminate by calling `scheduler::done` or
    /// `scheduler::error`, never by falling off the end).
    pub fn new(stack: Stack, entry: extern "C" fn(Transfer) -> !) -> Slot {
        let ctx = unsafe { Context::new(&stack.inner, entry) };
        Slot {
            slot: Some(ctx),
            _stack: stack,
        }
    }

    /// Resume this slot, passing `data` through to whichever side it last
    /// switched away from. Panics if this slot's context is not currently
    /// resumable (already running, or a parker slot).
    pub fn resume(&mut self, data: usize) -> Transfer {
        let ctx = self.slot.take().expect("attempted to resume a slot that is already active");
        let transfer = unsafe { ctx.resume(data) };
        self.slot = Some(transfer.context);
        transfer
    }
}
