//! Common types shared across precis modules.

mod cancellation;

pub use cancellation::{CancelOnDrop, CancellationHandle, CancellationToken};
