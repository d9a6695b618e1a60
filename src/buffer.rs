use crate::error::Full;
use crate::Item;
use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// A fixed-capacity FIFO of [`Item`]s.
///
/// Nothing here blocks and nothing here locks. The parallel runner keeps the
/// buffer behind the exchange lock, the sequential runner owns it outright.
#[derive(Debug, Clone)]
pub struct BoundedBuffer {
    items: VecDeque<Item>,
    capacity: NonZeroUsize,
    high_water: usize,
}

impl BoundedBuffer {
    /// Creates an empty buffer holding at most `capacity` items.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.get()),
            capacity,
            high_water: 0,
        }
    }

    /// Appends `item` at the back, or hands it back if the buffer is full.
    pub fn try_push(&mut self, item: Item) -> Result<(), Full<Item>> {
        if self.is_full() {
            return Err(Full(item));
        }
        self.items.push_back(item);
        self.high_water = self.high_water.max(self.items.len());
        debug_assert!(self.items.len() <= self.capacity.get());
        Ok(())
    }

    /// Removes the front item, if any.
    pub fn try_pop(&mut self) -> Option<Item> {
        self.items.pop_front()
    }

    /// Current fill level.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Maximum fill level.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Whether there is nothing to pop.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a push would be rejected.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity.get()
    }

    /// The largest fill level seen since creation.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(cap: usize) -> BoundedBuffer {
        BoundedBuffer::new(NonZeroUsize::new(cap).unwrap())
    }

    #[test]
    fn push_pop_fifo() {
        let mut buf = buffer(3);

        assert_eq!(buf.try_push(1), Ok(()));
        assert_eq!(buf.try_push(2), Ok(()));
        assert_eq!(buf.try_push(3), Ok(()));
        assert_eq!(buf.try_push(4), Err(Full(4)));
        assert!(buf.is_full());

        assert_eq!(buf.try_pop(), Some(1));
        assert_eq!(buf.try_push(4), Ok(()));
        assert_eq!(buf.try_pop(), Some(2));
        assert_eq!(buf.try_pop(), Some(3));
        assert_eq!(buf.try_pop(), Some(4));
        assert_eq!(buf.try_pop(), None);
        assert!(buf.is_empty());
    }

    #[test]
    fn capacity_one() {
        let mut buf = buffer(1);
        assert_eq!(buf.try_push(1), Ok(()));
        assert_eq!(buf.try_push(2), Err(Full(2)));
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.high_water(), 1);
    }

    #[test]
    fn high_water_survives_drain() {
        let mut buf = buffer(4);
        for i in 1..=3 {
            buf.try_push(i).unwrap();
        }
        buf.try_pop();
        buf.try_pop();
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.high_water(), 3);
        assert_eq!(buf.capacity(), 4);
    }
}
