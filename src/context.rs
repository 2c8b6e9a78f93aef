//! Identified queues and the k-way merge over them.

use tracing::debug;

use crate::queue::Queue;

/// A [`Queue`] together with an identifier and a cached element count.
///
/// The cached size is kept in step with the queue by every method that
/// mutates it through the context, so merging can sum sizes without walking
/// any queue.
#[derive(Debug, Default)]
pub struct QueueContext {
    id: usize,
    size: usize,
    queue: Queue,
}

impl QueueContext {
    /// Creates a context owning an empty queue.
    pub fn new(id: usize) -> Self {
        Self::with_queue(id, Queue::new())
    }

    /// Creates a context owning `queue`.
    pub fn with_queue(id: usize, queue: Queue) -> Self {
        let size = queue.len();
        Self { id, size, queue }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// The cached element count of the queue.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Runs `f` on the queue and refreshes the cached size afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueContext;
    ///
    /// let mut context = QueueContext::new(7);
    /// context.update(|queue| {
    ///     queue.insert_tail("a")?;
    ///     queue.insert_tail("b")
    /// })
    /// .unwrap();
    /// assert_eq!(context.size(), 2);
    /// ```
    pub fn update<R>(&mut self, f: impl FnOnce(&mut Queue) -> R) -> R {
        let result = f(&mut self.queue);
        self.size = self.queue.len();
        result
    }

    pub fn into_queue(self) -> Queue {
        self.queue
    }

    /// Moves every element of `donor` to the tail of this queue in *O*(1),
    /// carrying its cached size over.
    pub(crate) fn absorb(&mut self, donor: &mut QueueContext) {
        self.queue.splice_tail(&mut donor.queue);
        self.size += donor.size;
        donor.size = 0;
    }

    /// Sorts the accumulated queue and returns its size.
    pub(crate) fn settle(&mut self, descend: bool) -> usize {
        self.queue.sort(descend);
        self.size
    }
}

/// Merges every queue of `contexts` into the first one, sorted ascending, or
/// descending if `descend` is set, and returns the size of the merged queue.
///
/// Each donor queue is moved to the tail of the first queue in *O*(1) and is
/// left valid and empty. The merged queue is then sorted once. An empty slice
/// yields `0`.
///
/// Moving nodes allocates nothing, so the [`QueueConfig`] limits of the first
/// queue are not checked and the merged queue may hold more elements than its
/// element limit. Later insertions into it fail until it shrinks below the
/// limit again.
///
/// [`QueueConfig`]: crate::QueueConfig
///
/// # Examples
///
/// ```
/// use cyclic_queue::{merge, Queue, QueueContext};
///
/// let mut contexts = vec![
///     QueueContext::with_queue(0, ["c", "a"].iter().copied().collect()),
///     QueueContext::with_queue(1, ["b"].iter().copied().collect()),
/// ];
/// assert_eq!(merge(&mut contexts, false), 3);
/// assert_eq!(contexts[0].queue().values().collect::<Vec<_>>(), ["a", "b", "c"]);
/// assert!(contexts[1].queue().is_empty());
/// ```
pub fn merge(contexts: &mut [QueueContext], descend: bool) -> usize {
    let (first, rest) = match contexts.split_first_mut() {
        Some(split) => split,
        None => return 0,
    };
    for donor in rest.iter_mut() {
        first.absorb(donor);
    }
    let total = first.settle(descend);
    debug!(contexts = contexts.len(), total, descend, "merged queues");
    total
}

#[cfg(test)]
mod tests {
    use crate::{merge, Queue, QueueConfig, QueueContext, QueueError};

    fn context(id: usize, values: &[&str]) -> QueueContext {
        QueueContext::with_queue(id, values.iter().copied().collect())
    }

    fn values(context: &QueueContext) -> Vec<&str> {
        context.queue().values().collect()
    }

    #[test]
    fn merge_three_queues() {
        let mut contexts = vec![
            context(0, &["3", "1"]),
            context(1, &["2"]),
            context(2, &["5", "4"]),
        ];
        assert_eq!(merge(&mut contexts, false), 5);
        assert_eq!(values(&contexts[0]), ["1", "2", "3", "4", "5"]);
        assert_eq!(contexts[0].size(), 5);
        for donor in &contexts[1..] {
            assert_eq!(donor.size(), 0);
            assert!(donor.queue().is_empty());
        }
        assert_eq!(
            contexts.iter().map(QueueContext::id).collect::<Vec<_>>(),
            [0, 1, 2]
        );
    }

    #[test]
    fn merge_descending() {
        let mut contexts = vec![context(0, &[]), context(1, &["a", "c"]), context(2, &["b"])];
        assert_eq!(merge(&mut contexts, true), 3);
        assert_eq!(values(&contexts[0]), ["c", "b", "a"]);
    }

    #[test]
    fn merge_single_and_none() {
        assert_eq!(merge(&mut [], false), 0);

        let mut contexts = vec![context(0, &["b", "a"])];
        assert_eq!(merge(&mut contexts, false), 2);
        assert_eq!(values(&contexts[0]), ["a", "b"]);
    }

    #[test]
    fn donors_stay_usable() {
        let mut contexts = vec![context(0, &["x"]), context(1, &["y"])];
        merge(&mut contexts, false);
        contexts[1].update(|queue| queue.insert_tail("z")).unwrap();
        assert_eq!(contexts[1].size(), 1);
        assert_eq!(values(&contexts[1]), ["z"]);
    }

    #[test]
    fn merge_ignores_element_limit() {
        let limited = Queue::with_config(QueueConfig::new().with_element_limit(2));
        let mut contexts = vec![
            QueueContext::with_queue(0, limited),
            context(1, &["b", "a", "c"]),
        ];
        contexts[0].update(|queue| queue.insert_tail("d")).unwrap();

        assert_eq!(merge(&mut contexts, false), 4);
        assert_eq!(values(&contexts[0]), ["a", "b", "c", "d"]);

        let err = contexts[0].update(|queue| queue.insert_tail("e")).unwrap_err();
        assert!(matches!(err, QueueError::ElementLimit { limit: 2 }));
        assert_eq!(contexts[0].size(), 4);
    }

    #[test]
    fn update_refreshes_size() {
        let mut context = QueueContext::new(3);
        assert_eq!(context.size(), 0);
        context.update(|queue| {
            queue.extend(["a", "b", "c"]);
            queue.remove_head();
        });
        assert_eq!(context.size(), 2);
        let queue: Queue = context.into_queue();
        assert_eq!(queue.size(), 2);
    }
}
