//! Matching worker: pulls cells from the work queue and reports best tiles

use crate::algorithm::best_fit::best_fit;
use crate::algorithm::messages::{Placement, ResultMessage, WorkItem, WorkMessage};
use crate::io::error::{MosaicError, Result, pipeline_error};
use image::RgbImage;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Mutex, PoisonError};

/// One of N parallel matchers sharing the read-only coarse tile set
pub struct MatchWorker<'a> {
    id: usize,
    candidates: &'a [RgbImage],
}

impl<'a> MatchWorker<'a> {
    /// Create worker `id` matching against `candidates`
    pub const fn new(id: usize, candidates: &'a [RgbImage]) -> Self {
        Self { id, candidates }
    }

    /// Match cells until a shutdown message arrives, then send this worker's sentinel
    ///
    /// After a failure the worker keeps draining the queue without matching so
    /// the dispatcher never blocks on a full queue. Returns the number of cells
    /// matched.
    ///
    /// # Errors
    ///
    /// Returns the first failure: no candidates to match against, or the result
    /// queue closing early
    pub fn run(
        &self,
        queue: &Mutex<Receiver<WorkMessage>>,
        results: &Sender<ResultMessage>,
    ) -> Result<usize> {
        let mut matched = 0;
        let mut failure: Option<MosaicError> = None;

        loop {
            let message = {
                // The receiver stays usable even if another worker panicked holding the lock
                let receiver = queue.lock().unwrap_or_else(PoisonError::into_inner);
                receiver.recv()
            };

            let item = match message {
                Ok(WorkMessage::Cell(item)) => item,
                Ok(WorkMessage::Shutdown) => break,
                Err(_) => {
                    log::warn!(
                        "Worker {} found the work queue closed before shutdown",
                        self.id
                    );
                    break;
                }
            };

            if failure.is_some() {
                continue;
            }

            match self.match_item(&item, results) {
                Ok(()) => matched += 1,
                Err(error) => {
                    log::error!("Worker {} stopped matching: {error}", self.id);
                    failure = Some(error);
                }
            }
        }

        let sentinel = results.send(ResultMessage::WorkerFinished { worker: self.id });
        log::debug!("Worker {} finished after {matched} cells", self.id);

        if let Some(error) = failure {
            return Err(error);
        }
        sentinel.map_err(|e| pipeline_error("worker", &format!("sentinel not delivered: {e}")))?;

        Ok(matched)
    }

    fn match_item(&self, item: &WorkItem, results: &Sender<ResultMessage>) -> Result<()> {
        let tile_index = best_fit(&item.pixels, self.candidates)
            .ok_or_else(|| pipeline_error("worker", &"no tiles to match against"))?;

        log::trace!(
            "Worker {} matched box at ({}, {}) to tile {tile_index}",
            self.id,
            item.large_box.left,
            item.large_box.top
        );

        results
            .send(ResultMessage::Placed(Placement {
                large_box: item.large_box,
                tile_index,
            }))
            .map_err(|e| pipeline_error("worker", &format!("result queue closed: {e}")))
    }
}
