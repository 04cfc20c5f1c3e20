//! Messages exchanged through the work and result queues

use crate::spatial::PixelBox;

/// Coarse pixels of one cell, addressed by its full resolution box
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkItem {
    /// Flat RGB data cut from the coarse target canvas
    pub pixels: Vec<u8>,
    /// Region of the output canvas the match will be painted into
    pub large_box: PixelBox,
}

/// Entry on the bounded work queue
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkMessage {
    /// A cell waiting to be matched
    Cell(WorkItem),
    /// No more work for the worker that receives this
    Shutdown,
}

/// Best tile chosen for one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Region of the output canvas to paint
    pub large_box: PixelBox,
    /// Index into the tile library
    pub tile_index: usize,
}

/// Entry on the unbounded result queue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultMessage {
    /// A matched cell
    Placed(Placement),
    /// The named worker will send nothing further
    WorkerFinished {
        /// Identifier of the finished worker
        worker: usize,
    },
}
