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

//! The cooperative, latency-bounded scheduler.
//!
//! One parker (the driver's own stack) round-robins over N worker
//! coroutines. Every worker suspension - `yield_now`, `suspend`, `done` or
//! `error` - resumes directly into the parker; the parker alone decides who
//! runs next. See DESIGN.md decision 1 for why this differs from the
//! originating design's direct peer-to-peer `swapcontext`.

use std::cell::Cell;
use std::path::PathBuf;
use std::ptr;
use std::time::Instant;

use context::Context;
use log::{debug, trace};

use crate::context::{Slot, Stack};
use crate::coroutine::WorkerRecord;
use crate::error::{CoreError, CoreResult};
use crate::options::Options;

thread_local!(static CURRENT: Cell<*mut Scheduler> = Cell::new(ptr::null_mut()));

pub struct Scheduler {
    pool: Vec<WorkerRecord>,
    n_workers: usize,
    quantum_usec: f64,
    has_error: bool,
    stored_error: Option<CoreError>,
    pending_count: usize,
    current_index: usize,
    /// The pool index last handed control by the parker, kept even after
    /// that worker hands control back (`current_index` resets to 0 on every
    /// return to the parker). `pick_next` scans forward from here so the
    /// round-robin advances instead of re-picking the lowest-indexed worker.
    last_dispatched: usize,
    resume_time: Instant,
    running: bool,
    /// The worker currently running's handle back to the parker. `None`
    /// whenever the parker itself has control.
    return_ctx: Option<Context>,
}

impl Scheduler {
    /// Allocate the pool (parker + N empty worker records). Stacks and
    /// contexts are not created until `register_entry_point`.
    pub fn setup(n_workers: usize, options: &Options) -> CoreResult<Scheduler> {
        if n_workers == 0 {
            return Err(CoreError::Resource("scheduler requires at least one worker".into()));
        }

        let mut pool = Vec::with_capacity(n_workers + 1);
        pool.push(WorkerRecord::parker());
        for _ in 0..n_workers {
            pool.push(WorkerRecord::parker());
        }

        Ok(Scheduler {
            pool,
            n_workers,
            quantum_usec: options.target_latency_usec / n_workers as f64,
            has_error: false,
            stored_error: None,
            pending_count: n_workers,
            current_index: 0,
            last_dispatched: 0,
            resume_time: Instant::now(),
            running: false,
            return_ctx: None,
        })
    }

    /// Binds `entry` to every worker slot, allocating a guarded stack each.
    /// Must run before `run` and after `setup`.
    pub fn register_entry_point(&mut self, stack_size: usize, entry: extern "C" fn(context::Transfer) -> !) -> CoreResult<()> {
        for i in 1..=self.n_workers {
            let stack = Stack::new(stack_size)?;
            self.pool[i].slot = Some(Slot::new(stack, entry));
        }
        Ok(())
    }

    /// The worker slice (1-based workers only; the parker is not exposed).
    pub fn workers_mut(&mut self) -> &mut [WorkerRecord] {
        &mut self.pool[1..]
    }

    pub fn workers(&self) -> &[WorkerRecord] {
        &self.pool[1..]
    }

    pub fn n_workers(&self) -> usize {
        self.n_workers
    }

    fn install(&mut self) {
        CURRENT.with(|c| c.set(self as *mut Scheduler));
    }

    fn uninstall() {
        CURRENT.with(|c| c.set(ptr::null_mut()));
    }

    /// Access the scheduler driving the current thread. Panics outside a
    /// live `run()` call, exactly as `Coroutine::current()` would in the
    /// teacher crate this is descended from.
    pub fn current() -> &'static mut Scheduler {
        CURRENT.with(|c| {
            let ptr = c.get();
            assert!(!ptr.is_null(), "Scheduler::current() called with no scheduler running");
            unsafe { &mut *ptr }
        })
    }

    /// The pool index (1-based) of whichever worker currently has control.
    /// Valid only from inside a worker.
    pub fn current_worker(&self) -> usize {
        assert!(self.current_index != 0, "not currently inside a worker");
        self.current_index
    }

    pub fn path_for(&self, idx: usize) -> &PathBuf {
        self.pool[idx].path.as_ref().expect("worker has no path assigned")
    }

    /// Round-robins worker coroutines until every one is done or one
    /// reports error. Returns `Err` in the latter case.
    pub fn run(&mut self) -> CoreResult<()> {
        self.install();
        self.running = true;

        loop {
            if self.has_error || self.pending_count == 0 {
                break;
            }
            match self.pick_next() {
                Some(idx) => self.switch_to(idx),
                None => break,
            }
        }

        self.running = false;

        // Deliberately left installed as Scheduler::current() past this
        // point: the post-run concatenation sort in lib.rs still drives
        // yield_now() as its hook, which is a safe no-op once `running` is
        // false, exactly as the originating design's own post-scheduler
        // merge pass relied on.
        if self.has_error {
            Err(self
                .stored_error
                .take()
                .unwrap_or_else(|| CoreError::SchedulerFatal("worker reported error".into())))
        } else {
            Ok(())
        }
    }

    /// Release every worker's stack and detach this scheduler as the
    /// thread's current one. Safe to call even if `register_entry_point`
    /// never ran (slots are simply `None`).
    pub fn cleanup(&mut self) {
        for record in self.pool.iter_mut() {
            record.slot = None;
        }
        Scheduler::uninstall();
    }

    fn pick_next(&self) -> Option<usize> {
        let n = self.n_workers;
        let base = self.last_dispatched;
        for step in 1..=n {
            let idx = ((base + step - 1) % n) + 1;
            if !self.pool[idx].done {
                return Some(idx);
            }
        }
        None
    }

    fn switch_to(&mut self, idx: usize) {
        trace!("parker dispatching worker {}", idx);
        self.current_index = idx;
        self.last_dispatched = idx;
        self.resume_time = Instant::now();
        let slot = self.pool[idx].slot.as_mut().expect("worker has no registered context");
        let _transfer = slot.resume(idx);
        self.current_index = 0;
    }

    fn elapsed_usec(&self) -> f64 {
        self.resume_time.elapsed().as_secs_f64() * 1_000_000.0
    }

    fn credit_current(&mut self, elapsed_usec: f64) {
        let idx = self.current_index;
        self.pool[idx].exec_time_usec += elapsed_usec;
        self.pool[idx].times_passed_control += 1;
    }

    /// Resumes the parker, recording that control passed back to it. Called
    /// only from the four free functions below, always from worker context.
    fn switch_to_parker(&mut self, data: usize) {
        let ctx = self.return_ctx.take().expect("switch_to_parker called outside a worker");
        let transfer = unsafe { ctx.resume(data) };
        self.return_ctx = Some(transfer.context);
        self.resume_time = Instant::now();
    }
}

/// Called once, from inside the trampoline, the first time a worker's
/// context is entered. Stores the handle back to the parker.
pub(crate) fn install_return_context(ctx: Context) {
    Scheduler::current().return_ctx = Some(ctx);
}

/// Conditional context switch: only actually switches once the current
/// worker has held control for at least one scheduling quantum. A no-op
/// outside of a live `run()`.
pub fn yield_now() {
    let s = Scheduler::current();
    if !s.running {
        return;
    }
    let elapsed = s.elapsed_usec();
    if elapsed < s.quantum_usec {
        return;
    }
    s.credit_current(elapsed);
    debug!("worker {} yielding after {:.1}us", s.current_index, elapsed);
    s.switch_to_parker(0);
}

/// Unconditional context switch, for a worker that is genuinely blocked
/// (waiting on the background read thread).
pub fn suspend() {
    let s = Scheduler::current();
    if !s.running {
        return;
    }
    let elapsed = s.elapsed_usec();
    s.credit_current(elapsed);
    s.switch_to_parker(0);
}

/// Marks the current worker complete and switches away permanently.
pub fn done() -> ! {
    let s = Scheduler::current();
    let elapsed = s.elapsed_usec();
    s.credit_current(elapsed);
    let idx = s.current_index;
    s.pool[idx].done = true;
    s.pending_count -= 1;
    debug!("worker {} done, {} pending", idx, s.pending_count);
    let ctx = s.return_ctx.take().expect("done() called outside a worker");
    unsafe {
        ctx.resume(0);
    }
    unreachable!("a done worker was resumed");
}

/// Poisons the run and switches away permanently.
pub fn error(err: CoreError) -> ! {
    let s = Scheduler::current();
    log::error!("worker {} failed: {}", s.current_index, err);
    s.has_error = true;
    s.stored_error = Some(err);
    let idx = s.current_index;
    s.pool[idx].done = true;
    s.pending_count = 0;
    let ctx = s.return_ctx.take().expect("error() called outside a worker");
    unsafe {
        ctx.resume(0);
    }
    unreachable!("an errored worker was resumed");
}
