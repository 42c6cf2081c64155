//! FIFO queue of block positions for light propagation.
//!
//! Uses a simple ring buffer so that flood fills do not reallocate once warmed up.

use lumen_utils::BlockPos;

/// A FIFO queue of positions backed by a power-of-two ring buffer.
#[derive(Debug)]
pub struct LightQueue {
    buffer: Vec<BlockPos>,
    head: usize,
    size: usize,
}

impl LightQueue {
    /// Creates a new empty light queue with room for 4096 entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Creates a new light queue with at least the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        // Power-of-2 capacity lets wrapping use a mask
        let capacity = capacity.max(16).next_power_of_two();
        Self {
            buffer: vec![BlockPos::default(); capacity],
            head: 0,
            size: 0,
        }
    }

    /// Enqueues a position.
    #[inline]
    pub fn enqueue(&mut self, pos: BlockPos) {
        if self.size == self.buffer.len() {
            self.grow();
        }

        let tail = (self.head + self.size) & (self.buffer.len() - 1);
        self.buffer[tail] = pos;
        self.size += 1;
    }

    /// Dequeues the oldest position.
    ///
    /// Returns `None` if the queue is empty.
    #[inline]
    pub fn dequeue(&mut self) -> Option<BlockPos> {
        if self.size == 0 {
            return None;
        }

        let item = self.buffer[self.head];
        self.head = (self.head + 1) & (self.buffer.len() - 1);
        self.size -= 1;

        Some(item)
    }

    /// Checks if the queue is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of entries in the queue.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Doubles the buffer, unrolling the ring so the oldest entry lands at index 0.
    fn grow(&mut self) {
        let old_capacity = self.buffer.len();
        let mut new_buffer = Vec::with_capacity(old_capacity * 2);

        for i in 0..self.size {
            new_buffer.push(self.buffer[(self.head + i) & (old_capacity - 1)]);
        }
        new_buffer.resize(old_capacity * 2, BlockPos::default());

        self.buffer = new_buffer;
        self.head = 0;
    }
}

impl Default for LightQueue {
    fn default() -> Self {
        Self::new()
    }
}
