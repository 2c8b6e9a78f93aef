use std::alloc::{self, Layout};
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use crate::list::iterator::{IntoIter, Iter, IterMut};

pub mod iterator;

mod algorithms;

/// The `List` is a doubly-linked list with owned nodes, implemented as a cyclic list.
/// It allows inserting, removing elements at both ends in constant time, and moving
/// whole runs of nodes between lists without touching their payloads.
///
/// The `List` contains:
/// - a pointer `ghost` that points to the ghost node;
/// - a length field `len` caching the number of elements, kept in sync by every
///   attach and detach. [`List::size`] recounts it by walking the ring.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of list nodes, both inclusive;
/// - `start..end`: a half-open range of list nodes, left inclusive and right
///   exclusive (probably the ghost node).
pub struct List<T> {
    ghost: Box<Node<Erased>>,
    /// the length of the list
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) element: T,
}

#[derive(Default)]
struct Erased;

/// Nodes fragment detached from a list, used in list cutting or
/// splicing.
///
/// When detached from a list, reading of `front.prev` and `back.next`
/// is invalid.
pub(crate) struct DetachedNodes<T> {
    pub(crate) front: NonNull<Node<T>>,
    pub(crate) back: NonNull<Node<T>>,
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

/// Reads the `next` link of `node`.
///
/// Only the link fields are touched, so it is valid on the ghost node too.
#[inline]
pub(crate) unsafe fn next<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    (*node.as_ptr()).next
}

/// Reads the `prev` link of `node`. Valid on the ghost node.
#[inline]
pub(crate) unsafe fn prev<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    (*node.as_ptr()).prev
}

/// Makes `prev` and `next` adjacent: `prev.next = next` and `next.prev = prev`.
#[inline]
pub(crate) unsafe fn connect<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    (*prev.as_ptr()).next = next;
    (*next.as_ptr()).prev = prev;
}

/// Exchanges the `next` and `prev` links of `node`, and returns the new `prev`
/// (which is the old `next`).
#[inline]
pub(crate) unsafe fn flip<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    let raw = node.as_ptr();
    ptr::swap(ptr::addr_of_mut!((*raw).next), ptr::addr_of_mut!((*raw).prev));
    (*raw).prev
}

/// Borrows the payload of an element node. Must never be called on the ghost node.
#[inline]
pub(crate) unsafe fn element<'a, T>(node: NonNull<Node<T>>) -> &'a T {
    &(*node.as_ptr()).element
}

// private methods
impl<T> List<T> {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        NonNull::from(self.ghost.as_ref()).cast()
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.next` is always valid (either `ghost` itself, or the first element
        // in the list).
        unsafe { next(self.ghost_node()) }
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.prev` is always valid (either `ghost` itself, or the last element
        // in the list).
        unsafe { prev(self.ghost_node()) }
    }

    /// Detach a single node `node` from the list, and return it as a box.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the list.
    ///
    /// If the `node` does not belong to the list, this function call will make
    /// the list ill-formed.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        self.len -= 1;
        connect(prev(node), next(node));
        Box::from_raw(node.as_ptr())
    }

    /// Attach a single node `node` to the list, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belongs
    /// to the list, or whether the `prev` and `next` is adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    ///
    /// If the `prev` and `next` does not belong to the list, or they are not
    /// adjacent nodes, this function call will make the list ill-formed.
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
        self.len += 1;
    }

    /// Attach `node` right after `anchor`.
    pub(crate) unsafe fn insert_after(&mut self, anchor: NonNull<Node<T>>, node: NonNull<Node<T>>) {
        self.attach_node(anchor, next(anchor), node);
    }

    /// Attach `node` right before `anchor`.
    pub(crate) unsafe fn insert_before(&mut self, anchor: NonNull<Node<T>>, node: NonNull<Node<T>>) {
        self.attach_node(prev(anchor), anchor, node);
    }

    /// Unlink `node` from the list and hand its element back to the caller.
    ///
    /// Same contract as [`List::detach_node`].
    pub(crate) unsafe fn unlink(&mut self, node: NonNull<Node<T>>) -> T {
        self.detach_node(node).into_element()
    }

    /// Detach a range of nodes `front..=back` from the list, and return the detached
    /// nodes.
    ///
    /// It is unsafe because it does not check whether `front..=back` is a valid range
    /// (i.e. `front` must **NOT** be at the right of `back`), whether it belongs
    /// to the list, or whether it holds exactly `len` nodes.
    ///
    /// If `front..=back` is not a valid range or it does not belong to the list,
    /// this function call will make the list ill-formed.
    pub(crate) unsafe fn detach_nodes(
        &mut self,
        front: NonNull<Node<T>>,
        back: NonNull<Node<T>>,
        len: usize,
    ) -> DetachedNodes<T> {
        self.len -= len;
        connect(prev(front), next(back));
        DetachedNodes::new(front, back, len)
    }

    /// Attach a range of detached nodes to the list, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belongs
    /// to the list, or whether the `prev` and `next` is adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    ///
    /// If the `prev` and `next` does not belong to the list, or they are not
    /// adjacent nodes, this function call will make the list ill-formed.
    pub(crate) unsafe fn attach_nodes(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        detached: DetachedNodes<T>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, detached.front);
        connect(detached.back, next);
        self.len += detached.len;
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, detached.front);
            assert_adjacent(detached.back, next);
        }
    }

    /// Detach all nodes from the list, and return the detached nodes, or return
    /// `None` if the list is empty. The list is left as an empty self-loop.
    ///
    /// It is safe because `self.front_node()..=self.back_node()` is a valid range.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes<T>> {
        if self.is_empty() {
            return None;
        }
        unsafe { Some(self.detach_nodes(self.front_node(), self.back_node(), self.len)) }
    }
}

impl<T> List<T> {
    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use cyclic_queue::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        match Self::try_new() {
            Some(list) => list,
            None => alloc::handle_alloc_error(Layout::new::<Node<Erased>>()),
        }
    }

    /// Create an empty `List`, or return `None` if the ghost node cannot be
    /// allocated.
    pub fn try_new() -> Option<Self> {
        let ghost = try_new_ghost()?;
        Some(Self {
            ghost,
            len: 0,
            _marker: PhantomData,
        })
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns `true` if the `List` holds exactly one element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_singular(&self) -> bool {
        !self.is_empty() && self.front_node() == self.back_node()
    }

    /// Returns the cached length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Counts the elements by walking the ring from the ghost node back to
    /// itself.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let list: List<_> = (0..4).collect();
    /// assert_eq!(list.size(), 4);
    /// assert_eq!(list.size(), list.len());
    /// ```
    pub fn size(&self) -> usize {
        let ghost = self.ghost_node();
        let mut node = self.front_node();
        let mut count = 0;
        while node != ghost {
            count += 1;
            // SAFETY: every node reachable from the ghost node is valid.
            node = unsafe { next(node) };
        }
        count
    }

    /// Removes all elements from the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the front node is an element node.
        Some(unsafe { element(self.front_node()) })
    }

    /// Provides a reference to the back element, or `None` if the list is
    /// empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the back node is an element node.
        Some(unsafe { element(self.back_node()) })
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front(), Some(&2));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    pub fn push_front(&mut self, elt: T) {
        let node = Node::new_detached(elt);
        // SAFETY: the ghost node belongs to the list.
        unsafe { self.insert_after(self.ghost_node(), node) }
    }

    /// Appends an element to the back of a list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back(), Some(&3));
    /// ```
    pub fn push_back(&mut self, elt: T) {
        let node = Node::new_detached(elt);
        // SAFETY: the ghost node belongs to the list.
        unsafe { self.insert_before(self.ghost_node(), node) }
    }

    /// Like [`List::push_front`], but hands the element back if its node cannot
    /// be allocated. The list is untouched on failure.
    pub fn try_push_front(&mut self, elt: T) -> Result<(), T> {
        let node = Node::try_new_detached(elt)?;
        // SAFETY: the ghost node belongs to the list.
        unsafe { self.insert_after(self.ghost_node(), node) };
        Ok(())
    }

    /// Like [`List::push_back`], but hands the element back if its node cannot
    /// be allocated. The list is untouched on failure.
    pub fn try_push_back(&mut self, elt: T) -> Result<(), T> {
        let node = Node::try_new_detached(elt)?;
        // SAFETY: the ghost node belongs to the list.
        unsafe { self.insert_before(self.ghost_node(), node) };
        Ok(())
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the front node is an element node of it.
        Some(unsafe { self.unlink(self.front_node()) })
    }

    /// Removes the last element from a list and returns it, or `None` if
    /// it is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the back node is an element node of it.
        Some(unsafe { self.unlink(self.back_node()) })
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Moves all elements from `other` to the end of the list.
    ///
    /// This reuses all the nodes from `other` and moves them into `self`. After
    /// this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list1 = List::new();
    /// list1.push_back('a');
    ///
    /// let mut list2 = List::new();
    /// list2.push_back('b');
    /// list2.push_back('c');
    ///
    /// list1.splice_tail(&mut list2);
    ///
    /// let mut iter = list1.iter();
    /// assert_eq!(iter.next(), Some(&'a'));
    /// assert_eq!(iter.next(), Some(&'b'));
    /// assert_eq!(iter.next(), Some(&'c'));
    /// assert!(iter.next().is_none());
    ///
    /// assert!(list2.is_empty());
    /// ```
    pub fn splice_tail(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // `self.back_node()` and `self.ghost_node()` are valid
            // nodes in the list and they are adjacent, so it is safe.
            unsafe { self.attach_nodes(self.back_node(), self.ghost_node(), detached) }
        }
    }

    /// Moves all elements from `other` to the begin of the list.
    /// This reuses all the nodes from `other` and moves them into `self`. After
    /// this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list1 = List::new();
    /// list1.push_back('a');
    ///
    /// let mut list2 = List::new();
    /// list2.push_back('b');
    /// list2.push_back('c');
    ///
    /// list2.splice(&mut list1);
    ///
    /// let mut iter = list2.iter();
    /// assert_eq!(iter.next(), Some(&'a'));
    /// assert_eq!(iter.next(), Some(&'b'));
    /// assert_eq!(iter.next(), Some(&'c'));
    /// assert!(iter.next().is_none());
    ///
    /// assert!(list1.is_empty());
    /// ```
    pub fn splice(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // `self.ghost_node()` and `self.front_node()` are valid
            // nodes in the list and they are adjacent, so it is safe.
            unsafe { self.attach_nodes(self.ghost_node(), self.front_node(), detached) }
        }
    }

    /// Cuts the run `0..=position` off the front of the list and moves it
    /// into `sink`, whose previous elements are dropped.
    ///
    /// # Complexity
    ///
    /// Locating `position` takes *O*(`position`) time; the relinking itself is
    /// *O*(1).
    ///
    /// # Panics
    ///
    /// Panics if `position >= len`
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list: List<_> = (0..5).collect();
    /// let mut sink = List::new();
    ///
    /// list.cut_position(&mut sink, 1);
    ///
    /// assert_eq!(sink.into_iter().collect::<Vec<_>>(), vec![0, 1]);
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![2, 3, 4]);
    /// ```
    pub fn cut_position(&mut self, sink: &mut Self, position: usize) {
        let ghost = self.ghost_node();
        let mut back = self.front_node();
        for _ in 0..position {
            if back == ghost {
                break;
            }
            // SAFETY: `back` is reachable from the ghost node.
            back = unsafe { next(back) };
        }
        assert!(back != ghost, "Cannot cut at a nonexistent position");

        sink.clear();
        // SAFETY: `front..=back` is a valid range of `position + 1` nodes of the
        // list, and the ghost node of the empty `sink` is adjacent to itself.
        unsafe {
            let detached = self.detach_nodes(self.front_node(), back, position + 1);
            sink.attach_nodes(sink.ghost_node(), sink.ghost_node(), detached);
        }
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Create a detached node with given element, or give the element back
    /// if the node cannot be allocated.
    ///
    /// The node starts out linked to itself.
    pub(crate) fn try_new_detached(element: T) -> Result<NonNull<Node<T>>, T> {
        let layout = Layout::new::<Node<T>>();
        // SAFETY: `Node<T>` holds two pointers, so `layout` is never zero-sized.
        let raw = unsafe { alloc::alloc(layout) }.cast::<Node<T>>();
        let node = match NonNull::new(raw) {
            Some(node) => node,
            None => return Err(element),
        };
        // SAFETY: `raw` is freshly allocated with the layout of `Node<T>`, and every
        // field is written before the node is read. The allocation matches what
        // `Box<Node<T>>` expects, so it is later released with `Box::from_raw`.
        unsafe {
            ptr::addr_of_mut!((*raw).next).write(node);
            ptr::addr_of_mut!((*raw).prev).write(node);
            ptr::addr_of_mut!((*raw).element).write(element);
        }
        Ok(node)
    }

    /// Create a detached node with given element, aborting on allocation failure
    /// like `Box::new` does.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        match Self::try_new_detached(element) {
            Ok(node) => node,
            Err(_) => alloc::handle_alloc_error(Layout::new::<Node<T>>()),
        }
    }

    pub(crate) fn into_element(self: Box<Self>) -> T {
        self.element
    }
}

impl<T> DetachedNodes<T> {
    /// If is unsafe because it must be guaranteed that `front..=back` is
    /// a valid range and its length must be equal to `len`.
    unsafe fn new(front: NonNull<Node<T>>, back: NonNull<Node<T>>, len: usize) -> Self {
        debug_assert!(len > 0, "Cannot detach nodes of length 0");
        Self {
            front,
            back,
            len,
            _marker: PhantomData,
        }
    }
}

fn try_new_ghost() -> Option<Box<Node<Erased>>> {
    let ghost_ptr = Node::try_new_detached(Erased::default()).ok()?;
    // SAFETY:
    // - `ghost.next`, `ghost.prev` already point to the ghost itself.
    // - `ghost.element` is never read, so it is erased out.
    Some(unsafe { Box::from_raw(ghost_ptr.as_ptr()) })
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev_node: NonNull<Node<T>>, next_node: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(next(prev_node), next_node);
        assert_eq!(prev(next_node), prev_node);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use std::cell::RefCell;
    use std::fmt::Debug;

    fn list_eq<T, I>(list: &List<T>, expected: I)
    where
        T: Debug + Clone + Eq,
        I: IntoIterator<Item = T>,
    {
        let expected: Vec<T> = expected.into_iter().collect();
        assert_eq!(list.iter().cloned().collect::<Vec<_>>(), expected);
        let mut backward: Vec<T> = list.iter().rev().cloned().collect();
        backward.reverse();
        assert_eq!(backward, expected);
        assert_eq!(list.size(), expected.len());
        assert_eq!(list.len(), expected.len());
    }

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        assert!(!list.is_singular());
        list.push_back(1);
        assert!(!list.is_empty());
        assert!(list.is_singular());
        assert_eq!(list.pop_back(), Some(1));
        assert!(list.is_empty());
    }

    #[test]
    fn list_drop() {
        #[derive(Debug)]
        struct DropChecker<'a, T: Copy> {
            value: T,
            dropped: &'a RefCell<Vec<T>>,
        }
        impl<'a, T: Copy> DropChecker<'a, T> {
            fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
                Self { value, dropped }
            }
        }
        impl<'a, T: Copy> Drop for DropChecker<'a, T> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        list.push_back(DropChecker::new(1, &dropped));
        list.push_back(DropChecker::new(2, &dropped));
        list.push_back(DropChecker::new(3, &dropped));
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn list_push_and_pop() {
        let mut list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);

        list.push_back(1);
        assert_eq!(list.back(), Some(&1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());

        list.push_front(1);
        list.push_front(2);
        assert_eq!(list.try_push_back(3), Ok(()));
        assert_eq!(list.try_push_front(0), Ok(()));
        list_eq(&list, [0, 2, 1, 3]);
        assert_eq!(list.pop_front(), Some(0));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_back(), Some(3));

        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn list_splice_and_splice_tail() {
        fn test_splice<T, I1, I2, I3>(list: I1, other: I2, appended: I3)
        where
            T: Clone + Eq + Debug,
            I1: IntoIterator<Item = T>,
            I2: IntoIterator<Item = T>,
            I3: IntoIterator<Item = T>,
        {
            let list: List<T> = list.into_iter().collect();
            let other: List<T> = other.into_iter().collect();
            let appended: Vec<T> = appended.into_iter().collect();

            let mut tail = list.clone();
            let mut donor = other.clone();
            tail.splice_tail(&mut donor);
            assert!(donor.is_empty());
            assert_eq!(donor.size(), 0);
            list_eq(&tail, appended.clone());

            let mut head = other.clone();
            let mut donor = list.clone();
            head.splice(&mut donor);
            assert!(donor.is_empty());
            list_eq(&head, appended);
        }
        test_splice(0..5, 5..7, 0..7);
        test_splice(0..5, None, 0..5);
        test_splice(0..1, 1..3, 0..3);
        test_splice(None, 0..2, 0..2);
        test_splice::<i32, _, _, _>(None, None, None);
    }

    #[test]
    fn list_cut_position() {
        let mut list: List<_> = (0..6).collect();
        let mut sink: List<_> = (10..12).collect();

        list.cut_position(&mut sink, 2);
        list_eq(&sink, 0..3);
        list_eq(&list, 3..6);

        list.cut_position(&mut sink, 2);
        list_eq(&sink, 3..6);
        list_eq(&list, None);
    }

    #[test]
    #[should_panic(expected = "Cannot cut at a nonexistent position")]
    fn list_cut_past_the_end() {
        let mut list: List<_> = (0..3).collect();
        let mut sink = List::new();
        list.cut_position(&mut sink, 3);
    }

    #[test]
    fn list_len() {
        let mut list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        list.push_back(1);
        assert_eq!(list.len(), 1);

        list.pop_front();
        assert_eq!(list.len(), 0);

        list.splice_tail(&mut (0..5).collect());
        assert_eq!(list.len(), 5);

        let mut sink = List::new();
        list.cut_position(&mut sink, 3);
        assert_eq!(list.len(), 1);
        assert_eq!(sink.len(), 4);

        list.splice(&mut (7..10).collect());
        assert_eq!(list.len(), 4);
        assert_eq!(list.size(), 4);

        list.clear();
        assert_eq!(list.len(), 0);
    }
}
