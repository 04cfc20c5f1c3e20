/// Mosaic assembler owning the output canvas
pub mod assembler;
/// Best-fit tile search with early exit
pub mod best_fit;
/// Cancellation token and interrupt handler
pub mod cancellation;
/// Cell dispatcher feeding the bounded work queue
pub mod dispatch;
/// Composition executor and orchestration
pub mod executor;
/// Work and result queue messages
pub mod messages;
/// Parallel matching workers
pub mod worker;
