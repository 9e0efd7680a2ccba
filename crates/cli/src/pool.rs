// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fan a suite out over a fixed number of workers.
//!
//! Every test is queued before any worker starts. Workers pop until the
//! queue is empty, each running one test at a time on its own session, and
//! push results onto a channel sized to the suite so no send ever waits.
//! Results are consumed only after every worker has finished.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use r2r_suite::{RegressionSuite, TestCase};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::exec::{run_test, ExecutionResult};
use crate::options::TestsOptions;
use crate::pipe::PipeConfig;
use crate::report::{Outcome, Reporter, Summary};

/// FIFO of tests waiting for a worker.
#[derive(Debug, Default)]
pub struct WorkQueue {
    tests: Mutex<VecDeque<TestCase>>,
}

impl WorkQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tests: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn push(&self, test: TestCase) {
        self.tests.lock().push_back(test);
    }

    /// Next test, or `None` once the queue is drained.
    pub fn try_pop(&self) -> Option<TestCase> {
        self.tests.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.tests.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.lock().is_empty()
    }
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct PoolReport {
    /// Results in the order they arrived.
    pub results: Vec<ExecutionResult>,
    /// False if any test not marked broken failed.
    pub success: bool,
    pub summary: Summary,
}

/// Read-only state shared by all workers.
struct Shared<W> {
    options: TestsOptions,
    pipe: PipeConfig,
    reporter: Reporter<W>,
}

/// Runs suites with the configured concurrency.
pub struct Pool<W> {
    shared: Arc<Shared<W>>,
}

impl<W: Write + Send + 'static> Pool<W> {
    pub fn new(options: TestsOptions, reporter: Reporter<W>) -> Self {
        let pipe = options.pipe_config();
        Self {
            shared: Arc::new(Shared {
                options,
                pipe,
                reporter,
            }),
        }
    }

    pub fn reporter(&self) -> &Reporter<W> {
        &self.shared.reporter
    }

    /// Run every test in `suite` and report each result once.
    pub async fn perform(&self, suite: RegressionSuite) -> PoolReport {
        let length = suite.len();
        debug!("Preparing {length} tests..");

        let queue = Arc::new(WorkQueue::with_capacity(length));
        for test in suite.tests {
            queue.push(test);
        }
        let (results_tx, mut results_rx) = mpsc::channel(length.max(1));

        let jobs = self.shared.options.jobs.get();
        if jobs > 1 {
            debug!(jobs, "Starting worker pool");
            let workers: Vec<_> = (0..jobs)
                .map(|id| {
                    tokio::spawn(work(
                        id,
                        Arc::clone(&queue),
                        results_tx.clone(),
                        Arc::clone(&self.shared),
                    ))
                })
                .collect();
            drop(results_tx);
            for worker in workers {
                if let Err(e) = worker.await {
                    warn!(error = %e, "worker stopped abnormally");
                }
            }
        } else {
            debug!("Running single-threaded");
            work(0, queue, results_tx, Arc::clone(&self.shared)).await;
        }

        let mut report = PoolReport {
            results: Vec::with_capacity(length),
            success: true,
            summary: Summary::default(),
        };
        while let Some(result) = results_rx.recv().await {
            let outcome = if self.shared.options.sequence {
                Outcome::classify(&result)
            } else {
                self.shared.reporter.report(&result)
            };
            report.summary.record(outcome);
            if result.fails_run() {
                report.success = false;
            }
            report.results.push(result);
        }
        report
    }
}

async fn work<W: Write>(
    id: usize,
    queue: Arc<WorkQueue>,
    results: mpsc::Sender<ExecutionResult>,
    shared: Arc<Shared<W>>,
) {
    while let Some(test) = queue.try_pop() {
        debug!(worker = id, test = %test.name, "Executing");
        let result = run_test(test, &shared.pipe).await;
        if shared.options.sequence {
            shared.reporter.report(&result);
        }
        if results.send(result).await.is_err() {
            warn!(worker = id, "results channel closed");
            return;
        }
        debug!(worker = id, "Result returned");
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
