//! Composition executor: runs dispatcher, matching workers and assembler together
//!
//! One dispatcher feeds a work queue bounded to the worker count, N workers
//! match cells in parallel, and one assembler paints results as they arrive.
//! Shutdown is driven by sentinels: one per worker on the work queue, and one
//! from each worker on the result queue. The assembler finishes only after it
//! has counted all N result sentinels.

use crate::algorithm::assembler::{Assembly, MosaicAssembler, MosaicImage};
use crate::algorithm::cancellation::CancellationToken;
use crate::algorithm::dispatch::{DispatchReport, Dispatcher};
use crate::algorithm::messages::{ResultMessage, WorkMessage};
use crate::algorithm::worker::MatchWorker;
use crate::analysis::library::TileLibrary;
use crate::analysis::target::TargetCanvas;
use crate::io::error::{MosaicError, Result, invalid_parameter, pipeline_error};
use crate::io::progress::ProgressManager;
use std::sync::Mutex;
use std::sync::mpsc;
use std::thread;

/// Counters describing one composition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositionReport {
    /// Cells in the grid
    pub cells: usize,
    /// Cells put on the work queue
    pub dispatched: usize,
    /// Cells matched by workers
    pub matched: usize,
    /// Placements applied by the assembler
    pub placed: usize,
    /// Distinct cells painted on the output canvas
    pub painted: usize,
    /// Worker sentinels received by the assembler
    pub sentinels: usize,
    /// Whether dispatch stopped early on cancellation
    pub interrupted: bool,
}

impl CompositionReport {
    /// Whether every cell of the grid was painted
    pub const fn is_complete(&self) -> bool {
        !self.interrupted && self.painted == self.cells
    }
}

/// Painted mosaic plus the counters that produced it
#[derive(Debug, Clone)]
pub struct Composition {
    /// Output canvas, complete or partial
    pub mosaic: MosaicImage,
    /// Pipeline counters
    pub report: CompositionReport,
}

/// Parallel best-fit composition of a target from a tile library
pub struct Composer<'a> {
    target: &'a TargetCanvas,
    library: &'a TileLibrary,
    worker_count: usize,
}

impl<'a> Composer<'a> {
    /// Create a composer using `worker_count` matching workers
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `worker_count` is zero
    /// - Target and library were prepared with different scales
    pub fn new(
        target: &'a TargetCanvas,
        library: &'a TileLibrary,
        worker_count: usize,
    ) -> Result<Self> {
        if worker_count == 0 {
            return Err(invalid_parameter(
                "workers",
                &worker_count,
                &"at least one matching worker is required",
            ));
        }
        if target.grid().scale() != library.scale() {
            return Err(MosaicError::InvalidSourceData {
                reason: format!(
                    "target scale {:?} differs from tile library scale {:?}",
                    target.grid().scale(),
                    library.scale()
                ),
            });
        }

        Ok(Self {
            target,
            library,
            worker_count,
        })
    }

    /// Number of matching workers
    pub const fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Match every cell and paint the result
    ///
    /// On cancellation the dispatcher stops early, workers still drain and
    /// the partial canvas is returned with `report.interrupted` set.
    ///
    /// # Errors
    ///
    /// Returns an error if a queue fails, a thread panics, or a worker or the
    /// assembler reports a failure
    pub fn compose(
        &self,
        cancel: &CancellationToken,
        progress: Option<&ProgressManager>,
    ) -> Result<Composition> {
        let grid = self.target.grid();
        log::info!(
            "Building mosaic of {} cells with {} workers",
            grid.cell_count(),
            self.worker_count
        );

        let (work_tx, work_rx) = mpsc::sync_channel::<WorkMessage>(self.worker_count);
        let work_queue = Mutex::new(work_rx);
        let (result_tx, result_rx) = mpsc::channel::<ResultMessage>();

        let (dispatch, worker_outcomes, assembly) = thread::scope(|scope| {
            let assembler = MosaicAssembler::new(grid, self.library, self.worker_count);
            let assembler_handle = scope.spawn(move || assembler.run(&result_rx, progress));

            let worker_handles: Vec<_> = (0..self.worker_count)
                .map(|id| {
                    let worker = MatchWorker::new(id, self.library.small());
                    let results = result_tx.clone();
                    let queue = &work_queue;
                    scope.spawn(move || worker.run(queue, &results))
                })
                .collect();
            // Workers hold the only result senders from here on
            drop(result_tx);

            let dispatcher = Dispatcher::new(self.target, self.worker_count);
            let dispatch = dispatcher.run(&work_tx, cancel);
            drop(work_tx);

            let worker_outcomes: Vec<Result<usize>> = worker_handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_panic| {
                        Err(pipeline_error("worker", &"matching thread panicked"))
                    })
                })
                .collect();

            let assembly: Result<Assembly> = assembler_handle.join().unwrap_or_else(|_panic| {
                Err(pipeline_error("assembler", &"assembler thread panicked"))
            });

            (dispatch, worker_outcomes, assembly)
        });

        let DispatchReport {
            dispatched,
            interrupted,
            ..
        } = dispatch?;
        let mut matched = 0;
        for outcome in worker_outcomes {
            matched += outcome?;
        }
        let assembly = assembly?;

        let report = CompositionReport {
            cells: grid.cell_count(),
            dispatched,
            matched,
            placed: assembly.placed,
            painted: assembly.mosaic.painted_cells(),
            sentinels: assembly.sentinels,
            interrupted,
        };
        if interrupted {
            log::warn!(
                "Composition interrupted: {} of {} cells painted",
                report.painted,
                report.cells
            );
        } else {
            log::info!("Composition finished: {} cells painted", report.painted);
        }

        Ok(Composition {
            mosaic: assembly.mosaic,
            report,
        })
    }
}
