use std::collections::VecDeque;

/// Abstraction over [`VecDeque`] that limits the number of waiting elements.
/// This means that push operations can fail.
///
/// [`VecDeque`]: https://doc.rust-lang.org/std/collections/struct.VecDeque.html
///
/// # Examples
///
/// ```
/// # use mm1sim::Queue;
/// let mut queue: Queue<f64> = Queue::bounded(2);
/// assert!(queue.push_back(1.0).is_ok());
/// assert!(queue.push_back(2.0).is_ok());
/// assert_eq!(queue.push_back(3.0), Err(3.0));
/// assert_eq!(queue.pop_front(), Some(1.0));
/// ```
#[derive(Debug, Clone)]
pub struct Queue<T> {
    inner: VecDeque<T>,
    capacity: usize,
}

impl<T> Queue<T> {
    /// Creates a queue with the given capacity.
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        Self {
            inner: VecDeque::new(),
            capacity,
        }
    }

    /// Appends an element to the back of the `Queue`.
    ///
    /// # Errors
    ///
    /// Gives the value back if the queue is already full.
    pub fn push_back(&mut self, value: T) -> Result<(), T> {
        if self.inner.len() < self.capacity {
            self.inner.push_back(value);
            Ok(())
        } else {
            Err(value)
        }
    }

    /// Removes the first element and returns it, or `None` if the `Queue` is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    /// Returns the element that has been waiting the longest.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.inner.front()
    }

    /// Returns the number of elements in the `Queue`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks if the `Queue` is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Maximum number of elements the `Queue` accepts.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates from the front to the back.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.inner.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bounded_queue() {
        let mut queue = Queue::bounded(2);
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), 2);

        assert!(queue.push_back("A").is_ok());
        assert!(queue.push_back("B").is_ok());
        assert_eq!(queue.push_back("C"), Err("C"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.front(), Some(&"A"));

        assert_eq!(queue.pop_front(), Some("A"));
        assert!(queue.push_back("C").is_ok());
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec!["B", "C"]);
        assert_eq!(queue.pop_front(), Some("B"));
        assert_eq!(queue.pop_front(), Some("C"));
        assert_eq!(queue.pop_front(), None);
    }

    #[test]
    fn test_zero_capacity() {
        let mut queue = Queue::bounded(0);
        assert_eq!(queue.push_back(1), Err(1));
        assert!(queue.is_empty());
    }
}
