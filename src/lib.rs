//! This crate provides a queue of strings backed by a doubly-linked list with
//! owned nodes, implemented as a cyclic list with a ghost node.
//!
//! The [`Queue`] inserts and removes elements at both ends in constant time,
//! and rearranges itself in place: reversal, reversal in groups, pairwise swap,
//! duplicate elimination, monotonic pruning and a stable merge sort all work
//! by relinking nodes and never copy a value. Several queues held in
//! [`QueueContext`]s can be merged into one with [`merge`].
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use cyclic_queue::Queue;
//!
//! let mut queue = Queue::new();
//! queue.insert_tail("pear").unwrap();
//! queue.insert_tail("fig").unwrap();
//! queue.insert_head("apple").unwrap();
//!
//! queue.sort(false);
//! assert_eq!(queue.values().collect::<Vec<_>>(), ["apple", "fig", "pear"]);
//!
//! let mut buf = [0u8; 4];
//! queue.remove_tail_into(&mut buf);
//! assert_eq!(&buf, b"pea\0");
//! assert_eq!(queue.size(), 2);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the underlying [`List`] is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ payload T ║           ║ payload T ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                               ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║    len    ║
//! ╚═══════════╝
//!     List
//! ```
//! The ghost node carries no payload. In an empty list its `next` and `prev`
//! point to itself; otherwise `ghost.next` is the first element and
//! `ghost.prev` the last one. A [`Queue`] is a `List<Element>`, where each
//! [`Element`] owns a copy of the inserted string.
//!
//! In a list with length *n*, the nodes are indexed by 0, 1, ..., *n* - 1, and
//! the ghost node is always indexed by *n*.
//!
//! # Allocation Failure
//!
//! Every insertion allocates a node and a copy of the value, and reports
//! failure of either as a [`QueueError`], leaving the queue untouched. A
//! [`QueueConfig`] can impose element and value limits that fail the same way,
//! for exercising those paths.
//!
//! ```
//! use cyclic_queue::{Queue, QueueConfig, QueueError};
//!
//! let mut queue = Queue::with_config(QueueConfig::new().with_value_limit(4));
//! assert!(matches!(
//!     queue.insert_head("hedgehog"),
//!     Err(QueueError::ValueLimit { len: 8, limit: 4 })
//! ));
//! assert!(queue.is_empty());
//! ```
//!
//! # Iteration
//!
//! [`Iter`] and [`IterMut`] iterate a list like an array: they are
//! double-ended, fused and non-cyclic.
//!
//! ```
//! use cyclic_queue::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next_back(), Some(&3));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), None);
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```

#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;

pub use chain::QueueChain;
pub use config::QueueConfig;
pub use context::{merge, QueueContext};
pub use error::QueueError;
pub use queue::{Element, Queue};

pub mod chain;
pub mod list;

mod config;
mod context;
mod error;
mod queue;
