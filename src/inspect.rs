use crate::Weight;
use pathfinding::matrix::Matrix;
use std::time::{Duration, Instant};
use tracing::debug;

/// A tree edit distance engine bound to a pair of trees and a cost model.
pub trait EditDistance {
    type Weight: Weight;

    /// The cost of transforming the left-hand tree into the right-hand one.
    ///
    /// Engines memoize their work, so repeated calls are cheap and return the same value.
    fn distance(&mut self) -> Self::Weight;

    /// Drops everything memoized by the engine and its cost model.
    fn reset(&mut self);
}

/// Read-only diagnostics exposed by an engine.
pub trait Inspect {
    type Weight;

    /// The number of memoized subproblems.
    fn memo_len(&self) -> usize;

    /// The last dynamic programming matrix computed, if any.
    fn last_matrix(&self) -> Option<&Matrix<Self::Weight>>;
}

/// Times every call to [EditDistance::distance] of the wrapped engine.
///
/// # Example
///
/// ```rust
/// use forest_distance::*;
///
/// let a = IndexedTree::new(&TreeNode::with_children("A", [TreeNode::new("B")]));
/// let b = IndexedTree::new(&TreeNode::new("A"));
///
/// let mut engine = Instrumented::new(ZhangShasha::new(&a, &b));
/// assert_eq!(engine.elapsed(), None);
/// assert_eq!(engine.distance(), 1);
/// assert!(engine.elapsed().is_some());
/// assert_eq!(engine.memo_len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Instrumented<E> {
    engine: E,
    elapsed: Option<Duration>,
}

impl<E> Instrumented<E> {
    pub fn new(engine: E) -> Self {
        Instrumented {
            engine,
            elapsed: None,
        }
    }

    /// The wall time spent by the last call to [EditDistance::distance].
    #[inline]
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    #[inline]
    pub fn get_ref(&self) -> &E {
        &self.engine
    }

    #[inline]
    pub fn into_inner(self) -> E {
        self.engine
    }
}

impl<E: EditDistance> EditDistance for Instrumented<E> {
    type Weight = E::Weight;

    fn distance(&mut self) -> Self::Weight {
        let start = Instant::now();
        let distance = self.engine.distance();
        let elapsed = start.elapsed();

        debug!(?distance, ?elapsed, "Measured edit distance");
        self.elapsed = Some(elapsed);
        distance
    }

    fn reset(&mut self) {
        self.engine.reset();
        self.elapsed = None;
    }
}

impl<E: Inspect> Inspect for Instrumented<E> {
    type Weight = E::Weight;

    #[inline]
    fn memo_len(&self) -> usize {
        self.engine.memo_len()
    }

    #[inline]
    fn last_matrix(&self) -> Option<&Matrix<Self::Weight>> {
        self.engine.last_matrix()
    }
}
