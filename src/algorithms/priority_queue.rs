//! Fixed-capacity binary min-heap ordered by a caller supplied comparator.
//!
//! The element that compares least sits at the top. Storage is allocated once, up front,
//! and the queue never grows: inserting into a full queue hands the element back.

use core::cmp::Ordering;
use core::error::Error;
use core::fmt;

/// Returned by [`PriorityQueue::insert`] when the queue is already at capacity.
///
/// Ownership of the rejected element goes back to the caller.
pub struct QueueFull<T> {
    pub element: T,
    pub capacity: usize,
}

impl<T> QueueFull<T> {
    pub fn into_inner(self) -> T {
        self.element
    }
}

impl<T> fmt::Debug for QueueFull<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueFull").field("capacity", &self.capacity).finish_non_exhaustive()
    }
}

impl<T> fmt::Display for QueueFull<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "priority queue is full (capacity {})", self.capacity)
    }
}

impl<T> Error for QueueFull<T> {}

pub struct PriorityQueue<T, F> {
    buffer: Vec<T>,
    capacity: usize,
    cmp: F,
}

impl<T: Ord> PriorityQueue<T, fn(&T, &T) -> Ordering> {
    /// A queue ordered by `T`'s own [`Ord`] implementation.
    pub fn natural(capacity: usize) -> Self {
        Self::new(capacity, T::cmp)
    }
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Allocates a queue that holds at most `capacity` elements.
    ///
    /// `cmp(a, b)` returning [`Ordering::Less`] means `a` is popped before `b`.
    pub fn new(capacity: usize, cmp: F) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            capacity,
            cmp,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buffer.len() == self.capacity
    }

    /// The element [`pop`](Self::pop) would return next.
    pub fn peek(&self) -> Option<&T> {
        self.buffer.first()
    }

    /// Inserts an element, restoring heap order by sifting it toward the root.
    ///
    /// # Errors
    ///
    /// Returns [`QueueFull`] carrying `element` back if the queue is at capacity.
    pub fn insert(&mut self, element: T) -> Result<(), QueueFull<T>> {
        if self.is_full() {
            return Err(QueueFull {
                element,
                capacity: self.capacity,
            });
        }

        self.buffer.push(element);
        self.sift_up(self.buffer.len() - 1);
        debug_assert!(self.is_heap_ordered());
        Ok(())
    }

    /// Removes and returns the least element, or `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.buffer.is_empty() {
            return None;
        }

        let last = self.buffer.len() - 1;
        self.buffer.swap(0, last);
        let top = self.buffer.pop();
        self.sift_down(0);
        debug_assert!(self.is_heap_ordered());
        top
    }

    /// Runs `destroyer` on every element still queued, then releases the storage.
    ///
    /// Elements are visited in storage order, not priority order. Dropping the queue
    /// releases remaining elements too; this exists for callers that must observe them.
    pub fn destroy_with<D: FnMut(T)>(self, destroyer: D) {
        self.buffer.into_iter().for_each(destroyer);
    }

    /// Whether every non-root element compares no less than its parent.
    pub fn is_heap_ordered(&self) -> bool {
        (1..self.buffer.len()).all(|i| (self.cmp)(&self.buffer[parent(i)], &self.buffer[i]) != Ordering::Greater)
    }

    fn sift_up(&mut self, mut n: usize) {
        while n > 0 {
            let p = parent(n);
            if (self.cmp)(&self.buffer[n], &self.buffer[p]) != Ordering::Less {
                break;
            }
            self.buffer.swap(n, p);
            n = p;
        }
    }

    fn sift_down(&mut self, mut n: usize) {
        let size = self.buffer.len();
        loop {
            let left = 2 * n + 1;
            let right = left + 1;
            if left >= size {
                break;
            }

            // pick the smaller child first, then decide whether to move at all
            let mut smallest = left;
            if right < size && (self.cmp)(&self.buffer[right], &self.buffer[left]) == Ordering::Less {
                smallest = right;
            }
            if (self.cmp)(&self.buffer[smallest], &self.buffer[n]) != Ordering::Less {
                break;
            }
            self.buffer.swap(n, smallest);
            n = smallest;
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for PriorityQueue<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("capacity", &self.capacity)
            .field("buffer", &self.buffer)
            .finish()
    }
}

#[inline]
const fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descending(a: &i32, b: &i32) -> Ordering {
        b.cmp(a)
    }

    #[test]
    fn new_queue_is_empty_and_not_full() {
        let queue = PriorityQueue::<i32, _>::new(10, descending);
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.capacity(), 10);
        assert!(queue.is_empty());
        assert!(!queue.is_full());
    }

    #[test]
    fn pop_from_empty_is_none() {
        let mut queue = PriorityQueue::<i32, _>::natural(4);
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.peek(), None);
    }

    #[test]
    fn is_full_at_exact_capacity() {
        let mut queue = PriorityQueue::new(3, descending);
        queue.insert(10).unwrap();
        queue.insert(4).unwrap();
        assert!(!queue.is_full());
        queue.insert(8).unwrap();
        assert!(queue.is_full());
    }

    #[test]
    fn insert_into_full_queue_returns_element() {
        let mut queue = PriorityQueue::new(3, descending);
        for x in [1, 2, 3] {
            queue.insert(x).unwrap();
        }
        let err = queue.insert(42).unwrap_err();
        assert_eq!(err.capacity, 3);
        assert_eq!(err.into_inner(), 42);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut queue = PriorityQueue::<u8, _>::natural(0);
        assert!(queue.is_full());
        assert!(queue.insert(1).is_err());
    }

    #[test]
    fn interleaved_inserts_and_pops_follow_comparator() {
        // comparator puts larger values on top
        let mut queue = PriorityQueue::new(5, descending);
        for x in [5, 10, 8, 1, 6] {
            queue.insert(x).unwrap();
        }
        assert_eq!(queue.pop(), Some(10));
        assert_eq!(queue.pop(), Some(8));

        queue.insert(4).unwrap();
        queue.insert(2).unwrap();
        assert_eq!(queue.pop(), Some(6));
        assert_eq!(queue.pop(), Some(5));

        queue.insert(10).unwrap();
        queue.insert(3).unwrap();
        let rest: Vec<_> = core::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(rest, vec![10, 4, 3, 2, 1]);
        assert!(queue.is_empty());
    }

    #[test]
    fn heap_invariant_holds_under_mixed_workload() {
        let mut queue = PriorityQueue::<u32, _>::natural(64);
        let mut state = 0x9e37_79b9u32;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state
        };

        for round in 0..500 {
            if next() % 3 == 0 || queue.is_full() {
                queue.pop();
            } else {
                // small range forces many equal keys
                queue.insert(next() % 16).unwrap();
            }
            assert!(queue.is_heap_ordered(), "heap order broken at round {}", round);
        }

        let mut last = 0;
        while let Some(x) = queue.pop() {
            assert!(x >= last);
            last = x;
        }
    }

    #[test]
    fn equal_keys_drain_completely() {
        let mut queue = PriorityQueue::new(8, |a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0));
        for c in "abcdefgh".chars() {
            queue.insert((7, c)).unwrap();
        }
        let mut seen: Vec<char> = core::iter::from_fn(|| queue.pop()).map(|(_, c)| c).collect();
        seen.sort_unstable();
        assert_eq!(seen.into_iter().collect::<String>(), "abcdefgh");
    }

    #[test]
    fn destroy_with_visits_every_remaining_element() {
        let mut queue = PriorityQueue::new(5, descending);
        for x in [5, 10, 8, 1, 6] {
            queue.insert(x).unwrap();
        }
        queue.pop();

        let mut calls = 0;
        let mut sum = 0;
        queue.destroy_with(|x| {
            calls += 1;
            sum += x;
        });
        assert_eq!(calls, 4);
        assert_eq!(sum, 5 + 8 + 1 + 6);
    }
}
