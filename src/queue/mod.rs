use std::fmt;

use tracing::{trace, warn};

use crate::config::QueueConfig;
use crate::error::QueueError;
use crate::list::iterator::Iter;
use crate::list::List;

pub use self::element::Element;

mod element;

/// A queue of strings backed by a cyclic [`List`] of [`Element`]s.
///
/// Elements are inserted and removed at both ends in *O*(1) time. The queue
/// also provides in-place algorithms (reversal, grouped reversal, pairwise
/// swap, duplicate elimination, monotonic pruning and merge sort) that only
/// relink nodes and never copy values.
///
/// Queries on an empty queue return neutral results (`0`, `false` or `None`)
/// rather than failing.
///
/// # Examples
///
/// ```
/// use cyclic_queue::Queue;
///
/// let mut queue = Queue::new();
/// queue.insert_tail("b").unwrap();
/// queue.insert_head("a").unwrap();
/// queue.insert_tail("c").unwrap();
/// assert_eq!(queue.size(), 3);
///
/// queue.reverse();
/// assert_eq!(queue.values().collect::<Vec<_>>(), ["c", "b", "a"]);
///
/// let element = queue.remove_head().unwrap();
/// assert_eq!(element.value(), "c");
/// ```
pub struct Queue {
    list: List<Element>,
    config: QueueConfig,
}

impl Queue {
    /// Creates an empty queue without allocation limits.
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    /// Creates an empty queue whose insertions are checked against `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::{Queue, QueueConfig};
    ///
    /// let queue = Queue::with_config(QueueConfig::new().with_value_limit(16));
    /// assert_eq!(queue.config().value_limit(), Some(16));
    /// ```
    pub fn with_config(config: QueueConfig) -> Self {
        Self {
            list: List::new(),
            config,
        }
    }

    /// Creates an empty queue, reporting failure to allocate its head instead
    /// of aborting.
    pub fn try_new() -> Result<Self, QueueError> {
        Self::try_with_config(QueueConfig::default())
    }

    /// Like [`Queue::with_config`], but fails with [`QueueError::QueueAlloc`]
    /// if the queue head cannot be allocated.
    pub fn try_with_config(config: QueueConfig) -> Result<Self, QueueError> {
        let list = List::try_new().ok_or_else(|| {
            warn!("failed to allocate queue head");
            QueueError::QueueAlloc
        })?;
        Ok(Self { list, config })
    }

    /// The limits this queue checks on insertion.
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    fn new_element(&self, value: &str) -> Result<Element, QueueError> {
        if let Some(limit) = self.config.element_limit() {
            if self.list.len() >= limit {
                warn!(limit, "element limit reached, refusing insertion");
                return Err(QueueError::ElementLimit { limit });
            }
        }
        if let Some(limit) = self.config.value_limit() {
            if value.len() > limit {
                warn!(len = value.len(), limit, "value exceeds copy limit");
                return Err(QueueError::ValueLimit {
                    len: value.len(),
                    limit,
                });
            }
        }
        Element::try_new(value).map_err(|err| {
            warn!(len = value.len(), error = %err, "failed to copy value");
            err
        })
    }

    /// Inserts a copy of `value` at the head of the queue.
    ///
    /// On failure the queue is left unchanged.
    pub fn insert_head(&mut self, value: &str) -> Result<(), QueueError> {
        let element = self.new_element(value)?;
        self.list.try_push_front(element).map_err(|_| {
            warn!("failed to allocate queue element");
            QueueError::ElementAlloc
        })
    }

    /// Inserts a copy of `value` at the tail of the queue.
    ///
    /// On failure the queue is left unchanged.
    pub fn insert_tail(&mut self, value: &str) -> Result<(), QueueError> {
        let element = self.new_element(value)?;
        self.list.try_push_back(element).map_err(|_| {
            warn!("failed to allocate queue element");
            QueueError::ElementAlloc
        })
    }

    /// Removes the head element and hands it to the caller, or returns `None`
    /// if the queue is empty.
    pub fn remove_head(&mut self) -> Option<Element> {
        self.list.pop_front()
    }

    /// Removes the tail element and hands it to the caller, or returns `None`
    /// if the queue is empty.
    pub fn remove_tail(&mut self) -> Option<Element> {
        self.list.pop_back()
    }

    /// Like [`Queue::remove_head`], and also copies the value into `buf` as
    /// described in [`Element::copy_into`].
    pub fn remove_head_into(&mut self, buf: &mut [u8]) -> Option<Element> {
        let element = self.list.pop_front()?;
        element.copy_into(buf);
        Some(element)
    }

    /// Like [`Queue::remove_tail`], and also copies the value into `buf` as
    /// described in [`Element::copy_into`].
    pub fn remove_tail_into(&mut self, buf: &mut [u8]) -> Option<Element> {
        let element = self.list.pop_back()?;
        element.copy_into(buf);
        Some(element)
    }

    /// Counts the elements by a full forward traversal.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time. [`Queue::len`] returns
    /// the same number in *O*(1).
    pub fn size(&self) -> usize {
        self.list.size()
    }

    /// Returns the cached number of elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the queue holds no element.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Peeks at the head value, or returns `None` if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert_eq!(queue.front(), None);
    ///
    /// queue.insert_tail("otter").unwrap();
    /// queue.insert_tail("stoat").unwrap();
    /// assert_eq!(queue.front(), Some("otter"));
    /// assert_eq!(queue.back(), Some("stoat"));
    /// ```
    pub fn front(&self) -> Option<&str> {
        self.list.front().map(Element::value)
    }

    /// Peeks at the tail value, or returns `None` if the queue is empty.
    pub fn back(&self) -> Option<&str> {
        self.list.back().map(Element::value)
    }

    /// Iterates over the elements from head to tail.
    pub fn iter(&self) -> Iter<'_, Element> {
        self.list.iter()
    }

    /// Iterates over the values from head to tail.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator + '_ {
        self.list.iter().map(Element::value)
    }

    /// Releases every element.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Moves every element of `other` to the head of this queue in *O*(1),
    /// leaving `other` empty.
    pub fn splice(&mut self, other: &mut Queue) {
        self.list.splice(&mut other.list);
    }

    /// Moves every element of `other` to the tail of this queue in *O*(1),
    /// leaving `other` empty.
    pub fn splice_tail(&mut self, other: &mut Queue) {
        self.list.splice_tail(&mut other.list);
    }

    /// Deletes the element at 0-based index `⌊n/2⌋`. Returns `false` if the
    /// queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue: Queue = ["x", "y", "z"].iter().copied().collect();
    /// assert!(queue.delete_mid());
    /// assert_eq!(queue.values().collect::<Vec<_>>(), ["x", "z"]);
    /// ```
    pub fn delete_mid(&mut self) -> bool {
        self.list.remove_middle().is_some()
    }

    /// Deletes every element whose value equals an adjacent one, so that only
    /// values that were unique within their run remain. Returns `false` if the
    /// queue is empty.
    ///
    /// Equal values must already be adjacent, e.g. after [`Queue::sort`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue: Queue = ["a", "a", "b", "c", "c", "c"].iter().copied().collect();
    /// assert!(queue.delete_dup());
    /// assert_eq!(queue.values().collect::<Vec<_>>(), ["b"]);
    /// ```
    pub fn delete_dup(&mut self) -> bool {
        if self.list.is_empty() {
            return false;
        }
        let removed = self.list.remove_duplicate_runs();
        trace!(removed, "deleted duplicate runs");
        true
    }

    /// Swaps every two adjacent elements.
    pub fn swap(&mut self) {
        self.list.swap_pairs();
    }

    /// Reverses the queue in place.
    pub fn reverse(&mut self) {
        self.list.reverse();
    }

    /// Reverses every run of `k` elements from the head; a trailing run shorter
    /// than `k` is left in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue: Queue = ["1", "2", "3", "4", "5"].iter().copied().collect();
    /// queue.reverse_k(2);
    /// assert_eq!(queue.values().collect::<Vec<_>>(), ["2", "1", "4", "3", "5"]);
    /// ```
    pub fn reverse_k(&mut self, k: usize) {
        trace!(k, len = self.list.len(), "reversing queue in groups");
        self.list.reverse_groups(k);
    }

    /// Sorts the queue by byte-wise lexicographic order of the values,
    /// ascending, or descending if `descend` is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue: Queue = ["b", "c", "a"].iter().copied().collect();
    /// queue.sort(true);
    /// assert_eq!(queue.values().collect::<Vec<_>>(), ["c", "b", "a"]);
    /// ```
    pub fn sort(&mut self, descend: bool) {
        trace!(len = self.list.len(), descend, "sorting queue");
        self.list.sort();
        if descend {
            self.list.reverse();
        }
    }

    /// Deletes every element that has a strictly smaller value anywhere to its
    /// right, and returns the remaining size. The remaining values are
    /// non-decreasing and end with the original tail.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue: Queue = ["5", "2", "9", "3", "8"].iter().copied().collect();
    /// assert_eq!(queue.ascend(), 3);
    /// assert_eq!(queue.values().collect::<Vec<_>>(), ["2", "3", "8"]);
    /// ```
    pub fn ascend(&mut self) -> usize {
        self.list.prune_by(|element, kept| element > kept)
    }

    /// Deletes every element that has a strictly greater value anywhere to its
    /// right, and returns the remaining size. The remaining values are
    /// non-increasing and end with the original tail.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue: Queue = ["5", "2", "9", "3", "8"].iter().copied().collect();
    /// assert_eq!(queue.descend(), 2);
    /// assert_eq!(queue.values().collect::<Vec<_>>(), ["9", "8"]);
    /// ```
    pub fn descend(&mut self) -> usize {
        self.list.prune_by(|element, kept| element < kept)
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}

impl<'a> FromIterator<&'a str> for Queue {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut queue = Queue::new();
        queue.extend(iter);
        queue
    }
}

/// Appends copies of the values at the tail. Allocation failure aborts, as
/// with [`List::push_back`], and the configured limits are not applied.
impl<'a> Extend<&'a str> for Queue {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        self.list.extend(iter.into_iter().map(Element::from));
    }
}

impl IntoIterator for Queue {
    type Item = Element;
    type IntoIter = crate::list::iterator::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}
