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
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use coro_merge_sort::{run_pipeline_with_stats, Options, WorkerStats};

/// Sort the concatenation of several files' whitespace-separated integers
/// under a shared scheduling latency budget.
#[derive(Parser, Debug)]
#[command(name = "coro-merge-sort", version, about)]
struct Cli {
    /// Target scheduling latency, in microseconds, divided evenly across
    /// the input files' worker coroutines.
    target_latency_usec: f64,

    /// Input files, each a whitespace-separated list of signed integers.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let options = Options::new(cli.target_latency_usec);

    match run_pipeline_with_stats(&cli.files, options) {
        Ok((sorted, stats)) => {
            if let Err(e) = write_result(&sorted) {
                eprintln!("failed to write result.txt: {}", e);
                return ExitCode::FAILURE;
            }
            print_diagnostics(&stats);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("coro-merge-sort failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn write_result(sorted: &[i32]) -> std::io::Result<()> {
    let mut file = File::create("result.txt")?;
    let rendered = sorted.iter().map(i32::to_string).collect::<Vec<_>>().join(" ");
    file.write_all(rendered.as_bytes())
}

fn print_diagnostics(stats: &[WorkerStats]) {
    let mut total_usec = 0.0;
    for (i, s) in stats.iter().enumerate() {
        println!(
            "Worker {}: {:.1}us execution time, {} control transfers",
            i + 1,
            s.exec_time_usec,
            s.times_passed_control
        );
        total_usec += s.exec_time_usec;
    }
    println!("Total execution time: {:.1}us", total_usec);
    info!("pipeline finished, {} workers, {:.1}us total", stats.len(), total_usec);
}
