use crate::list::{connect, element, flip, next, prev, List};
use std::cmp::Ordering;

mod sort;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> List<T> {
    /// Reverses the order of the list in place, by exchanging the `next` and
    /// `prev` links of every node, the ghost node included.
    ///
    /// Reversing twice restores the original order.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list: List<_> = (0..4).collect();
    /// list.reverse();
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![3, 2, 1, 0]);
    /// ```
    pub fn reverse(&mut self) {
        let ghost = self.ghost_node();
        let mut node = ghost;
        loop {
            // SAFETY: the walk visits every node of the ring exactly once,
            // following the old `next` links returned by `flip`.
            node = unsafe { flip(node) };
            if node == ghost {
                break;
            }
        }
    }

    /// Reverses every consecutive run of `k` nodes, counted from the front.
    /// A trailing run shorter than `k` keeps its order.
    ///
    /// Each run is cut off the front with [`List::cut_position`], reversed on
    /// its own, and spliced to the tail of the finished part.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time. No element node is
    /// allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list: List<_> = (1..=8).collect();
    /// list.reverse_groups(3);
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![3, 2, 1, 6, 5, 4, 7, 8]);
    /// ```
    pub fn reverse_groups(&mut self, k: usize) {
        if k <= 1 || self.len() < k {
            return;
        }
        let mut finished = List::new();
        let mut group = List::new();
        while self.len() >= k {
            self.cut_position(&mut group, k - 1);
            group.reverse();
            finished.splice_tail(&mut group);
        }
        self.splice(&mut finished);
    }

    /// Swaps every two adjacent nodes, from the front. With an odd length, the
    /// last node stays in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list: List<_> = (1..=5).collect();
    /// list.swap_pairs();
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![2, 1, 4, 3, 5]);
    /// ```
    pub fn swap_pairs(&mut self) {
        let ghost = self.ghost_node();
        let mut first = self.front_node();
        while first != ghost {
            // SAFETY: `first` is an element node of the list, and so is `second`
            // unless it is the ghost node.
            unsafe {
                let second = next(first);
                if second == ghost {
                    break;
                }
                let (before, after) = (prev(first), next(second));
                connect(before, second);
                connect(second, first);
                connect(first, after);
                first = after;
            }
        }
    }

    /// Removes the node at index `len / 2` and returns its element, or `None` if
    /// the list is empty.
    ///
    /// The middle is found by a slow/fast walk, so the cached length is not
    /// consulted.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list: List<_> = (0..4).collect();
    /// assert_eq!(list.remove_middle(), Some(2));
    /// assert_eq!(list.remove_middle(), Some(1));
    /// ```
    pub fn remove_middle(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let ghost = self.ghost_node();
        let (mut slow, mut fast) = (self.front_node(), self.front_node());
        // SAFETY: `fast` only advances over nodes of the ring, and stops before
        // passing the ghost node.
        unsafe {
            while fast != ghost && next(fast) != ghost {
                slow = next(slow);
                fast = next(next(fast));
            }
            Some(self.unlink(slow))
        }
    }

    /// Removes every node of each maximal run of equal adjacent elements
    /// (runs of length one are kept), and returns how many nodes were removed.
    ///
    /// Duplicates must already be grouped together, e.g. by sorting.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list: List<_> = [1, 1, 2, 3, 3, 3, 4].iter().copied().collect();
    /// assert_eq!(list.remove_duplicate_runs(), 5);
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![2, 4]);
    /// ```
    pub fn remove_duplicate_runs(&mut self) -> usize
    where
        T: PartialEq,
    {
        let ghost = self.ghost_node();
        let mut removed = 0;
        let mut node = self.front_node();
        while node != ghost {
            // SAFETY: `node` and every node up to `run_end` are element nodes of
            // the list. Nodes are only unlinked after their successor is read.
            unsafe {
                let mut run_end = next(node);
                while run_end != ghost && element(run_end) == element(node) {
                    run_end = next(run_end);
                }
                if next(node) != run_end {
                    while node != run_end {
                        let following = next(node);
                        drop(self.unlink(node));
                        removed += 1;
                        node = following;
                    }
                }
                node = run_end;
            }
        }
        removed
    }

    /// Drops nodes against the nearest kept node on their right.
    ///
    /// The list is scanned from the back; a node is removed when
    /// `remove(node, kept)` holds, where `kept` is the closest node to its
    /// right that survived. The back node always survives. Returns the new
    /// length.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// // Keep a non-decreasing sequence ending at the back.
    /// let mut list: List<_> = [5, 2, 13, 3, 8].iter().copied().collect();
    /// assert_eq!(list.prune_by(|node, kept| node > kept), 3);
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![2, 3, 8]);
    /// ```
    pub fn prune_by<F>(&mut self, mut remove: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.reverse();
        let ghost = self.ghost_node();
        let mut kept = self.front_node();
        if kept != ghost {
            // SAFETY: the scan walks the element nodes of the list once; `kept` is
            // never unlinked, and `node` is unlinked only after reading its
            // successor.
            unsafe {
                let mut node = next(kept);
                while node != ghost {
                    let following = next(node);
                    if remove(element(node), element(kept)) {
                        drop(self.unlink(node));
                    } else {
                        kept = node;
                    }
                    node = following;
                }
            }
        }
        self.reverse();
        self.size()
    }

    /// Sort the list.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time, and never
    /// allocates nodes.
    ///
    /// # Current Implementation
    ///
    /// A top-down merge sort: the middle is found with a slow/fast walk, each
    /// half is sorted recursively, and the halves are merged by moving runs of
    /// nodes. If the comparison panics, the list keeps all of its elements in
    /// some unspecified order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// let mut list: List<_> = [5, 2, 4, 3, 1].iter().copied().collect();
    ///
    /// list.sort();
    ///
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        sort::merge_sort(self, |a, b| a.lt(b));
    }

    /// Sort the list with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the list. If the ordering is not total, the order
    /// of the elements is unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// let mut v: List<_> = [5, 4, 1, 3, 2].iter().copied().collect();
    /// v.sort_by(|a, b| a.cmp(b));
    /// assert_eq!(v.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    ///
    /// // reverse sorting
    /// v.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(v.iter().copied().collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        sort::merge_sort(self, |a, b| compare(a, b) == Ordering::Less)
    }
}

#[cfg(test)]
mod tests {
    use crate::list::iterator::assert_ring;
    use crate::List;
    use std::fmt::Debug;

    fn to_vec<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    fn check<T: Clone + Debug + Eq>(list: &List<T>, expected: &[T]) {
        assert_ring(list);
        assert_eq!(to_vec(list), expected);
        assert_eq!(list.size(), expected.len());
        assert_eq!(list.len(), expected.len());
    }

    #[test]
    fn reverse_is_an_involution() {
        for n in 0..6 {
            let mut list: List<_> = (0..n).collect();
            list.reverse();
            let reversed: Vec<_> = (0..n).rev().collect();
            check(&list, &reversed);
            list.reverse();
            let original: Vec<_> = (0..n).collect();
            check(&list, &original);
        }
    }

    #[test]
    fn reverse_groups() {
        fn test_case(n: i32, k: usize, expected: &[i32]) {
            let mut list: List<_> = (1..=n).collect();
            list.reverse_groups(k);
            check(&list, expected);
        }
        test_case(5, 2, &[2, 1, 4, 3, 5]);
        test_case(6, 3, &[3, 2, 1, 6, 5, 4]);
        test_case(5, 3, &[3, 2, 1, 4, 5]);
        test_case(4, 4, &[4, 3, 2, 1]);
        test_case(3, 4, &[1, 2, 3]);
        test_case(4, 1, &[1, 2, 3, 4]);
        test_case(4, 0, &[1, 2, 3, 4]);
        test_case(1, 2, &[1]);
        test_case(0, 2, &[]);
    }

    #[test]
    fn swap_pairs() {
        fn test_case(n: i32, expected: &[i32]) {
            let mut list: List<_> = (1..=n).collect();
            list.swap_pairs();
            check(&list, expected);
        }
        test_case(0, &[]);
        test_case(1, &[1]);
        test_case(2, &[2, 1]);
        test_case(3, &[2, 1, 3]);
        test_case(4, &[2, 1, 4, 3]);
    }

    #[test]
    fn remove_middle() {
        let mut list: List<_> = (0..5).collect();
        assert_eq!(list.remove_middle(), Some(2));
        check(&list, &[0, 1, 3, 4]);
        assert_eq!(list.remove_middle(), Some(3));
        assert_eq!(list.remove_middle(), Some(1));
        check(&list, &[0, 4]);
        assert_eq!(list.remove_middle(), Some(4));
        assert_eq!(list.remove_middle(), Some(0));
        assert_eq!(list.remove_middle(), None);
        check(&list, &[]);
    }

    #[test]
    fn remove_duplicate_runs() {
        fn test_case(input: &[i32], removed: usize, expected: &[i32]) {
            let mut list: List<_> = input.iter().copied().collect();
            assert_eq!(list.remove_duplicate_runs(), removed);
            check(&list, expected);
        }
        test_case(&[], 0, &[]);
        test_case(&[1], 0, &[1]);
        test_case(&[1, 1], 2, &[]);
        test_case(&[1, 2, 2], 2, &[1]);
        test_case(&[1, 1, 2, 3, 3], 4, &[2]);
        test_case(&[1, 2, 3], 0, &[1, 2, 3]);
    }

    #[test]
    fn prune_by() {
        let mut list: List<_> = [1, 3, 2, 2, 5, 4].iter().copied().collect();
        assert_eq!(list.prune_by(|node, kept| node > kept), 4);
        check(&list, &[1, 2, 2, 4]);

        let mut list: List<_> = [1, 3, 2, 2, 5, 4].iter().copied().collect();
        assert_eq!(list.prune_by(|node, kept| node < kept), 2);
        check(&list, &[5, 4]);

        let mut list = List::<i32>::new();
        assert_eq!(list.prune_by(|node, kept| node > kept), 0);
    }

    #[test]
    fn sort() {
        fn test_case(input: &[i32]) {
            let mut expected = input.to_vec();
            expected.sort();
            let mut list: List<_> = input.iter().copied().collect();
            list.sort();
            check(&list, &expected);
            // sorting a sorted list changes nothing
            list.sort();
            check(&list, &expected);
        }
        test_case(&[]);
        test_case(&[1]);
        test_case(&[2, 1]);
        test_case(&[3, 1, 2]);
        test_case(&[5, 2, 4, 3, 1, 0, 9, 7, 8, 6]);
        test_case(&[1, 1, 1, 0, 0, 0]);
        test_case(&(0..100).rev().collect::<Vec<_>>());
    }

    #[test]
    fn sort_is_stable() {
        let mut list: List<_> = [(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')].iter().copied().collect();
        list.sort_by(|a, b| a.0.cmp(&b.0));
        check(&list, &[(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }

    #[test]
    fn sort_keeps_ring_when_comparator_panics() {
        use std::panic::{catch_unwind, AssertUnwindSafe};

        for panic_at in 1..30 {
            let mut list: List<_> = (0..16).rev().collect();
            let mut calls = 0;
            let result = catch_unwind(AssertUnwindSafe(|| {
                list.sort_by(|a, b| {
                    calls += 1;
                    if calls == panic_at {
                        panic!("comparator gave up");
                    }
                    a.cmp(b)
                })
            }));
            assert!(result.is_err());

            assert_ring(&list);
            assert_eq!(list.size(), 16);
            let mut values = to_vec(&list);
            values.sort();
            assert_eq!(values, (0..16).collect::<Vec<_>>());

            // the list is still fully usable
            list.sort();
            check(&list, &(0..16).collect::<Vec<_>>());
            assert_eq!(list.pop_back(), Some(15));
        }
    }
}
