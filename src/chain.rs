//! A doubly-linked chain of [`QueueContext`]s.
//!
//! The chain is safe code: every node is shared by its two neighbours through
//! two halves of a [`StaticRc`], and all access goes through a [`GhostCell`]
//! branded by a [`GhostToken`]. A chain only exists inside
//! [`QueueChain::scope`], which hands every context back when the scope ends.

use std::mem;
use std::ops::Deref;

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use tracing::{debug, warn};

use crate::context::QueueContext;

/// An ordered chain of queue contexts.
///
/// # Examples
///
/// ```
/// use cyclic_queue::{QueueChain, QueueContext};
///
/// let contexts = vec![
///     QueueContext::with_queue(0, ["b"].iter().copied().collect()),
///     QueueContext::with_queue(1, ["a"].iter().copied().collect()),
/// ];
/// let (total, contexts) = QueueChain::scope(contexts, |chain, token| chain.merge(false, token));
/// assert_eq!(total, 2);
/// assert_eq!(contexts[0].queue().values().collect::<Vec<_>>(), ["a", "b"]);
/// assert!(contexts[1].queue().is_empty());
/// ```
pub struct QueueChain<'id> {
    ends: [Option<LinkPtr<'id>>; 2],
    len: usize,
}

struct ChainNode<'id> {
    links: [Option<LinkPtr<'id>>; 2],
    context: QueueContext,
}

type LinkPtr<'id> = Half<GhostCell<'id, ChainNode<'id>>>;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

const NEXT: usize = 0;
const PREV: usize = 1;

/// One end of the chain.
///
/// `End::Front` indexes both the front slot of the chain and the `next` link
/// of a node, which is the link pointing inwards from the front. The same
/// holds for `End::Back`, the back slot and `prev`.
#[derive(Clone, Copy)]
enum End {
    Front = 0,
    Back = 1,
}

impl End {
    fn slot(self) -> usize {
        self as usize
    }
    fn inward(self) -> usize {
        self as usize
    }
    fn outward(self) -> usize {
        1 - self as usize
    }
    fn opposite(self) -> Self {
        match self {
            End::Front => End::Back,
            End::Back => End::Front,
        }
    }
}

impl<'id> ChainNode<'id> {
    fn new(context: QueueContext) -> Self {
        Self {
            links: [None, None],
            context,
        }
    }
}

impl<'id> QueueChain<'id> {
    fn empty() -> Self {
        Self {
            ends: [None, None],
            len: 0,
        }
    }

    fn end(&self, end: End) -> Option<&LinkPtr<'id>> {
        self.ends[end.slot()].as_ref()
    }

    // A node at an end keeps one half in the chain's slot for that end. The
    // other half sits in its inward neighbour, or in the opposite slot when the
    // node is alone.
    fn attach(&mut self, end: End, context: QueueContext, token: &mut GhostToken<'id>) {
        let (outer, inner) = Full::split(Full::new(GhostCell::new(ChainNode::new(context))));
        match self.ends[end.slot()].take() {
            Some(old_end) => {
                old_end.deref().borrow_mut(token).links[end.outward()] = Some(inner);
                outer.deref().borrow_mut(token).links[end.inward()] = Some(old_end);
            }
            None => self.ends[end.opposite().slot()] = Some(inner),
        }
        self.ends[end.slot()] = Some(outer);
        self.len += 1;
    }

    fn detach(&mut self, end: End, token: &mut GhostToken<'id>) -> Option<QueueContext> {
        let outer = self.ends[end.slot()].take()?;
        let neighbour = outer.deref().borrow_mut(token).links[end.inward()].take();
        let inner = match neighbour {
            Some(neighbour) => {
                let inner = neighbour.deref().borrow_mut(token).links[end.outward()].take();
                self.ends[end.slot()] = Some(neighbour);
                inner
            }
            None => self.ends[end.opposite().slot()].take(),
        };
        let node = match inner {
            Some(inner) => Full::join(outer, inner),
            None => {
                // unreachable while both halves are linked
                mem::forget(outer);
                return None;
            }
        };
        self.len -= 1;
        Some(Full::into_box(node).into_inner().context)
    }

    /// Empties the chain, returning its contexts in order.
    fn drain(&mut self, token: &mut GhostToken<'id>) -> Vec<QueueContext> {
        let mut contexts = Vec::with_capacity(self.len);
        while let Some(context) = self.detach(End::Front, token) {
            contexts.push(context);
        }
        contexts
    }
}

impl QueueChain<'_> {
    /// Links `contexts` into a chain, runs `f` on it, and returns the result of
    /// `f` together with every context left in the chain, front to back.
    ///
    /// The chain and its token cannot leave `f`, so no context is lost when
    /// the scope ends.
    pub fn scope<I, F, R>(contexts: I, f: F) -> (R, Vec<QueueContext>)
    where
        I: IntoIterator<Item = QueueContext>,
        F: for<'id> FnOnce(&mut QueueChain<'id>, &mut GhostToken<'id>) -> R,
    {
        GhostToken::new(|mut token| {
            let mut chain = QueueChain::empty();
            for context in contexts {
                chain.push_back(context, &mut token);
            }
            let result = f(&mut chain, &mut token);
            let contexts = chain.drain(&mut token);
            (result, contexts)
        })
    }
}

impl<'id> QueueChain<'id> {
    pub fn is_empty(&self) -> bool {
        self.end(End::Front).is_none()
    }

    /// Number of contexts in the chain.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn push_back(&mut self, context: QueueContext, token: &mut GhostToken<'id>) {
        self.attach(End::Back, context, token);
    }

    pub fn push_front(&mut self, context: QueueContext, token: &mut GhostToken<'id>) {
        self.attach(End::Front, context, token);
    }

    pub fn pop_back(&mut self, token: &mut GhostToken<'id>) -> Option<QueueContext> {
        self.detach(End::Back, token)
    }

    pub fn pop_front(&mut self, token: &mut GhostToken<'id>) -> Option<QueueContext> {
        self.detach(End::Front, token)
    }

    pub fn front<'a>(&'a self, token: &'a GhostToken<'id>) -> Option<&'a QueueContext> {
        self.end(End::Front).map(|node| &node.deref().borrow(token).context)
    }

    pub fn back<'a>(&'a self, token: &'a GhostToken<'id>) -> Option<&'a QueueContext> {
        self.end(End::Back).map(|node| &node.deref().borrow(token).context)
    }

    pub fn iter<'a>(&'a self, token: &'a GhostToken<'id>) -> Iter<'a, 'id> {
        Iter {
            front: self.end(End::Front),
            back: self.end(End::Back),
            len: self.len,
            token,
        }
    }

    /// Merges the queues of every context into the front one, as
    /// [`merge`](crate::merge) does for a slice, and returns the merged size.
    ///
    /// The chain is walked once and every donor queue is spliced in *O*(1).
    /// Contexts keep their nodes and positions in the chain, and donors are
    /// left empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::{QueueChain, QueueContext};
    ///
    /// let contexts = (0..3).map(|id| {
    ///     let value = ["c", "a", "b"][id];
    ///     QueueContext::with_queue(id, [value].iter().copied().collect())
    /// });
    /// let (sizes, contexts) = QueueChain::scope(contexts, |chain, token| {
    ///     chain.merge(true, token);
    ///     chain.iter(token).map(QueueContext::size).collect::<Vec<_>>()
    /// });
    /// assert_eq!(sizes, [3, 0, 0]);
    /// assert_eq!(contexts[0].queue().values().collect::<Vec<_>>(), ["c", "b", "a"]);
    /// ```
    pub fn merge(&mut self, descend: bool, token: &mut GhostToken<'id>) -> usize {
        let front = match self.ends[End::Front.slot()].take() {
            Some(front) => front,
            None => return 0,
        };
        // The accumulator is held outside the chain while donors are borrowed
        // one at a time through the token.
        let mut accumulator = mem::take(&mut front.deref().borrow_mut(token).context);

        // Walking forward takes each `next` half out of its node, so the walk
        // owns every node it visits. The halves are put back afterwards.
        let mut visited = Vec::with_capacity(self.len);
        let mut link = front.deref().borrow_mut(token).links[NEXT].take();
        visited.push(front);
        while let Some(node) = link {
            let donor = node.deref().borrow_mut(token);
            link = donor.links[NEXT].take();
            accumulator.absorb(&mut donor.context);
            visited.push(node);
        }
        let total = accumulator.settle(descend);

        let mut following = None;
        while let Some(node) = visited.pop() {
            node.deref().borrow_mut(token).links[NEXT] = following;
            following = Some(node);
        }
        if let Some(front) = &following {
            front.deref().borrow_mut(token).context = accumulator;
        }
        self.ends[End::Front.slot()] = following;

        debug!(contexts = self.len, total, descend, "merged queue chain");
        total
    }
}

impl Drop for QueueChain<'_> {
    // Only reached with contexts left when `scope` unwinds. The token is gone
    // by then, so the halves are leaked rather than dropped apart.
    fn drop(&mut self) {
        if !self.is_empty() {
            warn!(len = self.len, "queue chain unwound with contexts left, leaking them");
        }
        for end in self.ends.iter_mut() {
            if let Some(link) = end.take() {
                mem::forget(link);
            }
        }
    }
}

/// An iterator over the contexts of a [`QueueChain`], front to back.
pub struct Iter<'a, 'id> {
    front: Option<&'a LinkPtr<'id>>,
    back: Option<&'a LinkPtr<'id>>,
    len: usize,
    token: &'a GhostToken<'id>,
}

impl<'a, 'id> Iterator for Iter<'a, 'id> {
    type Item = &'a QueueContext;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.front?.deref().borrow(self.token);
        self.front = node.links[NEXT].as_ref();
        self.len -= 1;
        Some(&node.context)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, 'id> DoubleEndedIterator for Iter<'a, 'id> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.back?.deref().borrow(self.token);
        self.back = node.links[PREV].as_ref();
        self.len -= 1;
        Some(&node.context)
    }
}

impl ExactSizeIterator for Iter<'_, '_> {}

#[cfg(test)]
mod tests {
    use ghost_cell::GhostToken;

    use crate::{QueueChain, QueueContext};

    fn context(id: usize, values: &[&str]) -> QueueContext {
        QueueContext::with_queue(id, values.iter().copied().collect())
    }

    fn ids<'id>(chain: &QueueChain<'id>, token: &GhostToken<'id>) -> Vec<usize> {
        chain.iter(token).map(QueueContext::id).collect()
    }

    fn values(context: &QueueContext) -> Vec<&str> {
        context.queue().values().collect()
    }

    #[test]
    fn chain_push_pop() {
        let (popped, left) = QueueChain::scope(Vec::new(), |chain, token| {
            assert!(chain.is_empty());
            assert!(chain.pop_front(token).is_none());

            chain.push_back(context(1, &[]), token);
            chain.push_front(context(2, &[]), token);
            chain.push_back(context(3, &[]), token);
            assert_eq!(chain.len(), 3);
            assert_eq!(ids(chain, token), [2, 1, 3]);
            assert_eq!(chain.front(token).map(QueueContext::id), Some(2));
            assert_eq!(chain.back(token).map(QueueContext::id), Some(3));

            let mut popped = Vec::new();
            popped.extend(chain.pop_back(token).map(|c| c.id()));
            popped.extend(chain.pop_front(token).map(|c| c.id()));
            popped.extend(chain.pop_back(token).map(|c| c.id()));
            assert!(chain.pop_back(token).is_none());
            assert!(chain.is_empty());
            assert_eq!(chain.len(), 0);
            popped
        });
        assert_eq!(popped, [3, 2, 1]);
        assert!(left.is_empty());
    }

    #[test]
    fn chain_iter_both_ways() {
        let contexts = (0..5).map(|id| context(id, &[]));
        let ((), contexts) = QueueChain::scope(contexts, |chain, token| {
            let backward: Vec<_> = chain.iter(token).rev().map(QueueContext::id).collect();
            assert_eq!(backward, [4, 3, 2, 1, 0]);

            let mut iter = chain.iter(token);
            assert_eq!(iter.len(), 5);
            assert_eq!(iter.next().map(QueueContext::id), Some(0));
            assert_eq!(iter.next_back().map(QueueContext::id), Some(4));
            assert_eq!(iter.map(QueueContext::id).collect::<Vec<_>>(), [1, 2, 3]);
        });
        assert_eq!(
            contexts.iter().map(QueueContext::id).collect::<Vec<_>>(),
            [0, 1, 2, 3, 4]
        );
    }

    #[test]
    fn scope_returns_every_context() {
        let contexts = vec![context(0, &["a"]), context(1, &["b", "c"])];
        let ((), contexts) = QueueChain::scope(contexts, |chain, token| {
            chain.push_front(context(9, &["z"]), token);
        });
        assert_eq!(
            contexts.iter().map(QueueContext::id).collect::<Vec<_>>(),
            [9, 0, 1]
        );
        assert_eq!(values(&contexts[2]), ["b", "c"]);
    }

    #[test]
    fn chain_merge_in_place() {
        let contexts = vec![
            context(0, &["3", "1"]),
            context(1, &["2"]),
            context(2, &["5", "4"]),
        ];
        let (total, contexts) = QueueChain::scope(contexts, |chain, token| {
            let total = chain.merge(false, token);
            assert_eq!(chain.len(), 3);
            assert_eq!(ids(chain, token), [0, 1, 2]);
            let backward: Vec<_> = chain.iter(token).rev().map(QueueContext::id).collect();
            assert_eq!(backward, [2, 1, 0]);
            let sizes: Vec<_> = chain.iter(token).map(QueueContext::size).collect();
            assert_eq!(sizes, [5, 0, 0]);

            // the chain stays usable after merging
            chain.push_back(context(3, &["0"]), token);
            assert_eq!(chain.merge(false, token), 6);
            total
        });
        assert_eq!(total, 5);
        assert_eq!(values(&contexts[0]), ["0", "1", "2", "3", "4", "5"]);
        assert!(contexts[1..].iter().all(|c| c.size() == 0 && c.queue().is_empty()));
    }

    #[test]
    fn chain_merge_single_and_empty() {
        let (total, contexts) = QueueChain::scope(Vec::new(), |chain, token| chain.merge(true, token));
        assert_eq!(total, 0);
        assert!(contexts.is_empty());

        let (total, contexts) =
            QueueChain::scope(vec![context(4, &["a", "b"])], |chain, token| chain.merge(true, token));
        assert_eq!(total, 2);
        assert_eq!(contexts[0].id(), 4);
        assert_eq!(values(&contexts[0]), ["b", "a"]);
    }
}
