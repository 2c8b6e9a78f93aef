//! Queue configuration.
//!
//! Limits in a [`QueueConfig`] turn allocations past a threshold into
//! failures, so that callers can exercise their allocation-failure paths
//! deterministically.

/// Allocation limits applied by a [`Queue`](crate::Queue).
///
/// The limits are checked only when a value is inserted, since that is when
/// a node and a copy of the value are allocated. Splicing and
/// [`merge`](crate::merge) move existing nodes and never fail, so they can
/// grow a queue past its element limit.
///
/// The default configuration has no limits.
///
/// # Examples
///
/// ```
/// use cyclic_queue::{Queue, QueueConfig};
///
/// let config = QueueConfig::new().with_element_limit(1);
/// let mut queue = Queue::with_config(config);
///
/// assert!(queue.insert_tail("a").is_ok());
/// assert!(queue.insert_tail("b").is_err());
/// assert_eq!(queue.size(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueueConfig {
    element_limit: Option<usize>,
    value_limit: Option<usize>,
}

impl QueueConfig {
    /// A configuration without limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail element allocations once the queue holds `limit` elements.
    #[must_use]
    pub fn with_element_limit(mut self, limit: usize) -> Self {
        self.element_limit = Some(limit);
        self
    }

    /// Fail value copies longer than `limit` bytes.
    #[must_use]
    pub fn with_value_limit(mut self, limit: usize) -> Self {
        self.value_limit = Some(limit);
        self
    }

    pub fn element_limit(&self) -> Option<usize> {
        self.element_limit
    }

    pub fn value_limit(&self) -> Option<usize> {
        self.value_limit
    }
}
