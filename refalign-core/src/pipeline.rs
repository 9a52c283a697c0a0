//! Ordered parallel alignment pipeline
//!
//! One producer thread pulls inputs, a rayon pool aligns them, and the
//! calling thread emits results strictly in input order. At most
//! `2 * jobs` items are in flight at any time.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::aligner::Aligner;
use crate::types::{AlgorithmInput, AlgorithmOutput};

/// Worker count for a configured job count; unset or non-positive means all
/// hardware threads.
pub fn resolve_jobs(jobs: Option<i64>) -> usize {
    match jobs {
        Some(jobs) if jobs > 0 => jobs as usize,
        _ => num_cpus::get(),
    }
}

/// Counters reported once the stream is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub processed: usize,
    pub failed: usize,
}

pub struct Pipeline<'a> {
    aligner: &'a Aligner,
    pool: ThreadPool,
    jobs: usize,
}

impl<'a> Pipeline<'a> {
    pub fn new(aligner: &'a Aligner, jobs: Option<i64>) -> Result<Self, ThreadPoolBuildError> {
        let jobs = resolve_jobs(jobs);
        let pool = ThreadPoolBuilder::new()
            .num_threads(jobs)
            .thread_name(|index| format!("refalign-worker-{}", index))
            .build()?;
        Ok(Self { aligner, pool, jobs })
    }

    /// Align every input and hand the outputs to `on_output` in input order.
    ///
    /// Alignment failures are delivered as outputs carrying the error. An
    /// error from the input stream or from `on_output` stops the run and is
    /// returned once in-flight work has drained. A panic inside a worker is
    /// resumed on the calling thread.
    pub fn run<I, E, F>(&self, inputs: I, on_output: F) -> Result<PipelineStats, E>
    where
        I: IntoIterator<Item = Result<AlgorithmInput, E>>,
        I::IntoIter: Send,
        E: Send,
        F: FnMut(AlgorithmOutput) -> Result<(), E>,
    {
        let aligner = self.aligner;
        self.run_with(inputs, |input| aligner.align_input(input), on_output)
    }

    fn run_with<I, E, W, F>(&self, inputs: I, work: W, mut on_output: F) -> Result<PipelineStats, E>
    where
        I: IntoIterator<Item = Result<AlgorithmInput, E>>,
        I::IntoIter: Send,
        E: Send,
        W: Fn(AlgorithmInput) -> AlgorithmOutput + Sync,
        F: FnMut(AlgorithmOutput) -> Result<(), E>,
    {
        let capacity = 2 * self.jobs;
        let (permit_tx, permit_rx) = mpsc::sync_channel::<()>(capacity);
        let (result_tx, result_rx) = mpsc::sync_channel::<(usize, thread::Result<AlgorithmOutput>)>(capacity);
        for _ in 0..capacity {
            // The receiver is alive and the buffer has room for every permit.
            let _ = permit_tx.send(());
        }

        log::info!("Aligning with {} worker thread(s)", self.jobs);

        let inputs = inputs.into_iter();
        let work = &work;
        let pool = &self.pool;

        thread::scope(|scope| {
            let producer = scope.spawn(move || -> Result<(), E> {
                pool.in_place_scope(|tasks| {
                    for (sequence_number, input) in inputs.enumerate() {
                        let input = input?;
                        if permit_rx.recv().is_err() {
                            break;
                        }
                        let result_tx = result_tx.clone();
                        tasks.spawn(move |_| {
                            // Every sequence number gets a message, or the consumer waits forever.
                            let output = panic::catch_unwind(AssertUnwindSafe(|| work(input)));
                            // A closed channel means the consumer stopped early.
                            let _ = result_tx.send((sequence_number, output));
                        });
                    }
                    Ok(())
                })
            });

            let mut stats = PipelineStats::default();
            let mut consumer_result = Ok(());
            let mut worker_panic = None;
            let mut pending = BTreeMap::new();
            let mut next = 0;

            'receive: for (sequence_number, output) in result_rx.iter() {
                pending.insert(sequence_number, output);
                while let Some(output) = pending.remove(&next) {
                    let output = match output {
                        Ok(output) => output,
                        Err(payload) => {
                            log::error!("Alignment worker panicked on sequence #{}", next);
                            worker_panic = Some(payload);
                            break 'receive;
                        }
                    };
                    if output.result.is_err() {
                        stats.failed += 1;
                    }
                    if let Err(err) = on_output(output) {
                        consumer_result = Err(err);
                        break 'receive;
                    }
                    stats.processed += 1;
                    next += 1;
                    let _ = permit_tx.send(());
                }
            }

            // Unblock the producer if the consumer stopped early.
            drop(result_rx);
            drop(permit_tx);

            let producer_result = match producer.join() {
                Ok(result) => result,
                Err(payload) => panic::resume_unwind(payload),
            };
            if let Some(payload) = worker_panic {
                panic::resume_unwind(payload);
            }

            consumer_result.and(producer_result)?;
            log::info!(
                "Processed {} sequence(s), {} failed",
                stats.processed,
                stats.failed
            );
            Ok(stats)
        })
    }
}
