//! Size-capped priority queue that keeps the best `capacity` items seen.
//!
//! Internally a binary max-heap under the supplied comparator, so the root is
//! always the worst retained item. Pushing into a full queue costs O(log k)
//! and only displaces the root when the newcomer is strictly better.

use std::cmp::Ordering;

/// Bounded priority queue parameterized by a comparator.
///
/// The comparator orders items best-first: `cmp(a, b) == Less` means `a` is
/// better than `b`.
pub struct BoundedPriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    items: Vec<T>,
    capacity: usize,
    cmp: F,
}

impl<T, F> BoundedPriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn with_capacity(capacity: usize, cmp: F) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            cmp,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Worst retained item.
    pub fn peek_worst(&self) -> Option<&T> {
        self.items.first()
    }

    /// Offer an item. Returns `true` if it was retained.
    ///
    /// Below capacity every item is kept. At capacity the item replaces the
    /// current worst only if it compares strictly better.
    pub fn push_bounded(&mut self, item: T) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if !self.is_full() {
            self.items.push(item);
            self.sift_up(self.items.len() - 1);
            return true;
        }

        let better = self
            .items
            .first()
            .is_some_and(|worst| (self.cmp)(&item, worst) == Ordering::Less);
        if !better {
            return false;
        }
        if let Some(root) = self.items.first_mut() {
            *root = item;
        }
        self.sift_down(0);
        true
    }

    /// Remove and return the worst retained item.
    pub fn pop_worst(&mut self) -> Option<T> {
        let last = self.items.len().checked_sub(1)?;
        self.items.swap(0, last);
        let worst = self.items.pop();
        self.sift_down(0);
        worst
    }

    /// Consume the queue, returning items best-first.
    pub fn into_sorted_vec(self) -> Vec<T> {
        let Self { mut items, cmp, .. } = self;
        items.sort_by(|a, b| cmp(a, b));
        items
    }

    /// `true` if the item at `a` ranks worse than the item at `b`.
    fn is_worse(&self, a: usize, b: usize) -> bool {
        match (self.items.get(a), self.items.get(b)) {
            (Some(x), Some(y)) => (self.cmp)(x, y) == Ordering::Greater,
            _ => false,
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.is_worse(index, parent) {
                break;
            }
            self.items.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut worst = index;

            if self.is_worse(left, worst) {
                worst = left;
            }
            if self.is_worse(right, worst) {
                worst = right;
            }
            if worst == index {
                break;
            }
            self.items.swap(index, worst);
            index = worst;
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    fn ascending(capacity: usize) -> BoundedPriorityQueue<i32, fn(&i32, &i32) -> Ordering> {
        BoundedPriorityQueue::with_capacity(capacity, i32::cmp)
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let mut q = ascending(0);
        assert!(!q.push_bounded(1));
        assert!(q.is_empty());
        assert!(q.peek_worst().is_none());
    }

    #[test]
    fn test_fills_unconditionally_below_capacity() {
        let mut q = ascending(3);
        assert!(q.push_bounded(50));
        assert!(q.push_bounded(10));
        assert!(q.push_bounded(30));
        assert_eq!(q.len(), 3);
        assert_eq!(q.peek_worst(), Some(&50));
    }

    #[test]
    fn test_keeps_smallest_k() {
        let mut q = ascending(3);
        for v in [9, 4, 7, 1, 8, 2, 6, 3, 5] {
            q.push_bounded(v);
        }
        assert_eq!(q.into_sorted_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_equal_to_worst_is_rejected() {
        let mut q = ascending(2);
        q.push_bounded(1);
        q.push_bounded(5);
        assert!(!q.push_bounded(5));
        assert!(!q.push_bounded(6));
        assert!(q.push_bounded(4));
        assert_eq!(q.peek_worst(), Some(&4));
    }

    #[test]
    fn test_pop_worst_drains_descending() {
        let mut q = ascending(4);
        for v in [3, 1, 4, 1, 5] {
            q.push_bounded(v);
        }
        let mut drained = Vec::new();
        while let Some(v) = q.pop_worst() {
            drained.push(v);
        }
        assert_eq!(drained, vec![4, 3, 1, 1]);
    }

    #[test]
    fn test_custom_comparator_descending() {
        let mut q = BoundedPriorityQueue::with_capacity(2, |a: &u32, b: &u32| b.cmp(a));
        for v in [1, 9, 3, 7] {
            q.push_bounded(v);
        }
        assert_eq!(q.capacity(), 2);
        assert_eq!(q.into_sorted_vec(), vec![9, 7]);
    }
}
