use crate::list::{connect, element, next, prev, List, Node};
use std::ptr::NonNull;

/// Merge sort over the nodes of `list`, ordered by `less`.
///
/// Runs are moved with complete `connect` calls between two comparisons, so
/// the ring stays well formed at every point where `less` may panic. No node
/// is allocated and no element is moved.
pub(crate) fn merge_sort<T, F>(list: &mut List<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    if list.len() < 2 {
        return;
    }
    // SAFETY: `front..ghost` is the whole range of element nodes of the list.
    unsafe { sort_range(list.front_node(), list.ghost_node(), &mut less) };
}

/// Returns the node starting the second half of `start..end` and the length
/// of the whole range, found with a slow/fast walk.
unsafe fn halve<T>(start: NonNull<Node<T>>, end: NonNull<Node<T>>) -> (NonNull<Node<T>>, usize) {
    let (mut slow, mut fast, mut len) = (start, start, 0);
    while fast != end {
        fast = next(fast);
        len += 1;
        if fast != end {
            fast = next(fast);
            len += 1;
            slow = next(slow);
        }
    }
    (slow, len)
}

/// Sorts the range `start..end` in place and returns its new first node.
unsafe fn sort_range<T, F>(start: NonNull<Node<T>>, end: NonNull<Node<T>>, less: &mut F) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    let (mid, len) = halve(start, end);
    if len < 2 {
        return start;
    }
    // Sorting one half never moves a node across `mid`.
    let left = sort_range(start, mid, less);
    let right = sort_range(mid, end, less);
    merge_runs(left, right, end, less)
}

/// Merges the sorted ranges `left..right` and `right..end`, which are
/// adjacent in the ring, and returns the first node of the merged range.
///
/// Every run of right nodes smaller than the current left node is moved
/// before it at once. On ties the left node goes first.
unsafe fn merge_runs<T, F>(
    mut left: NonNull<Node<T>>,
    mut right: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    let mut first = left;
    while left != right && right != end {
        if !less(element(right), element(left)) {
            left = next(left);
            continue;
        }
        let run_front = right;
        let mut run_back = right;
        right = next(right);
        while right != end && less(element(right), element(left)) {
            run_back = right;
            right = next(right);
        }
        if left == first {
            first = run_front;
        }
        move_run(run_front, run_back, left);
    }
    first
}

/// Unlinks `front..=back` and links it again right before `anchor`.
unsafe fn move_run<T>(front: NonNull<Node<T>>, back: NonNull<Node<T>>, anchor: NonNull<Node<T>>) {
    connect(prev(front), next(back));
    connect(prev(anchor), front);
    connect(back, anchor);
}
