//! Dispatcher: enumerates cells onto the bounded work queue

use crate::algorithm::cancellation::CancellationToken;
use crate::algorithm::messages::{WorkItem, WorkMessage};
use crate::analysis::target::TargetCanvas;
use crate::io::error::{Result, pipeline_error};
use std::sync::mpsc::SyncSender;

/// Outcome of one dispatch pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Cells placed on the work queue
    pub dispatched: usize,
    /// Shutdown messages delivered
    pub sentinels: usize,
    /// Whether dispatch stopped early on cancellation
    pub interrupted: bool,
}

/// Producer side of the pipeline
pub struct Dispatcher<'a> {
    target: &'a TargetCanvas,
    worker_count: usize,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher for `target` feeding `worker_count` workers
    pub const fn new(target: &'a TargetCanvas, worker_count: usize) -> Self {
        Self {
            target,
            worker_count,
        }
    }

    /// Enqueue every cell once, then one shutdown message per worker
    ///
    /// Blocks while the queue is full. Cancellation is checked before each
    /// cell; shutdown messages are sent however dispatch ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the work queue closes before every cell or shutdown
    /// message is delivered
    pub fn run(
        &self,
        queue: &SyncSender<WorkMessage>,
        cancel: &CancellationToken,
    ) -> Result<DispatchReport> {
        let mut report = DispatchReport::default();
        let outcome = self.dispatch_cells(queue, cancel, &mut report);

        for _ in 0..self.worker_count {
            if queue.send(WorkMessage::Shutdown).is_err() {
                break;
            }
            report.sentinels += 1;
        }

        outcome?;
        if report.sentinels < self.worker_count {
            return Err(pipeline_error(
                "dispatcher",
                &format!(
                    "only {} of {} shutdown messages delivered",
                    report.sentinels, self.worker_count
                ),
            ));
        }

        Ok(report)
    }

    fn dispatch_cells(
        &self,
        queue: &SyncSender<WorkMessage>,
        cancel: &CancellationToken,
        report: &mut DispatchReport,
    ) -> Result<()> {
        let grid = self.target.grid();

        for cell in grid.cells() {
            if cancel.is_cancelled() {
                log::warn!(
                    "Dispatch halted after {} of {} cells",
                    report.dispatched,
                    grid.cell_count()
                );
                report.interrupted = true;
                return Ok(());
            }

            let item = WorkItem {
                pixels: self.target.cell_pixels(cell),
                large_box: grid.large_box(cell),
            };
            queue.send(WorkMessage::Cell(item)).map_err(|e| {
                pipeline_error("dispatcher", &format!("work queue closed: {e}"))
            })?;
            report.dispatched += 1;
        }

        Ok(())
    }
}
