//! Error types for queue operations.
//!
//! Every variant is an allocation failure: either a real one reported by the
//! allocator, or a simulated one configured through
//! [`QueueConfig`](crate::QueueConfig). The queue is left untouched whenever one
//! of these is returned.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors returned by fallible [`Queue`](crate::Queue) operations.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The ghost node of a new queue could not be allocated.
    #[error("failed to allocate the queue head")]
    QueueAlloc,

    /// The node holding a new element could not be allocated.
    #[error("failed to allocate a queue element")]
    ElementAlloc,

    /// The owned copy of a value could not be allocated.
    #[error("failed to copy a value of {len} bytes")]
    ValueAlloc {
        /// Length of the value that was being copied.
        len: usize,
        /// The allocator's report.
        #[source]
        source: TryReserveError,
    },

    /// The configured element limit was reached.
    #[error("element limit of {limit} reached")]
    ElementLimit {
        /// The configured limit.
        limit: usize,
    },

    /// The value is longer than the configured copy limit.
    #[error("value of {len} bytes exceeds the copy limit of {limit} bytes")]
    ValueLimit {
        /// Length of the rejected value.
        len: usize,
        /// The configured limit.
        limit: usize,
    },
}

impl QueueError {
    /// Returns `true` if the failure was injected by a [`QueueConfig`](crate::QueueConfig)
    /// limit rather than reported by the allocator.
    #[must_use]
    pub fn is_simulated(&self) -> bool {
        matches!(self, Self::ElementLimit { .. } | Self::ValueLimit { .. })
    }
}
