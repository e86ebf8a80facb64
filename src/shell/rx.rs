//! Receive buffer between the transport callback and the shell.
//!
//! The receive callback usually runs in interrupt context, so the only thing
//! it does is push the byte into a lock-free single-producer/single-consumer
//! ring. Parsing happens later, when the main loop calls
//! [`Shell::poll`](super::Shell::poll).
//!
//! When the ring is full the newest byte is dropped and counted; the count is
//! visible through [`RxBuffer::dropped`] and [`RxConsumer::dropped`].
//!
//! # Examples
//!
//! ```rust
//! use libcdli::shell::rx::{ByteSource, RxBuffer};
//!
//! let mut rx: RxBuffer = RxBuffer::new();
//! let (mut producer, mut consumer) = rx.split();
//!
//! // Receive interrupt
//! producer.push(b'h').unwrap();
//!
//! // Main loop
//! assert_eq!(consumer.pull(), Some(b'h'));
//! assert!(consumer.is_empty());
//! ```

use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

use heapless::spsc::{Consumer, Producer, Queue};

use super::error::Error;

/// Ring size of the default receive buffer. One slot is kept free, so the
/// buffer holds up to `RX_BUFFER_SIZE - 1` bytes.
pub const RX_BUFFER_SIZE: usize = 256;

/// Anything the shell can drain received bytes from.
pub trait ByteSource {
    /// Takes the oldest received byte.
    fn pull(&mut self) -> Option<u8>;

    /// Returns `true` if no byte is waiting.
    fn is_empty(&self) -> bool;
}

/// Bounded FIFO of received bytes.
pub struct RxBuffer<const N: usize = RX_BUFFER_SIZE> {
    queue: Queue<u8, N>,
    dropped: AtomicUsize,
}

impl<const N: usize> Default for RxBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RxBuffer<N> {
    /// Creates an empty buffer. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            queue: Queue::new(),
            dropped: AtomicUsize::new(0),
        }
    }

    /// Appends a byte, dropping it if the buffer is full.
    pub fn push(&mut self, byte: u8) -> Result<(), Error> {
        let result = self.queue.enqueue(byte);
        record(result, &self.dropped)
    }

    /// Number of bytes waiting.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Number of bytes the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Number of bytes dropped because the buffer was full.
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Splits the buffer into a producer for the receive callback and a
    /// consumer for the polling loop.
    pub fn split(&mut self) -> (RxProducer<'_, N>, RxConsumer<'_, N>) {
        let Self { queue, dropped } = self;
        let dropped = &*dropped;
        let (producer, consumer) = queue.split();
        (
            RxProducer {
                inner: producer,
                dropped,
            },
            RxConsumer {
                inner: consumer,
                dropped,
            },
        )
    }
}

impl<const N: usize> ByteSource for RxBuffer<N> {
    fn pull(&mut self) -> Option<u8> {
        self.queue.dequeue()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Write half of an [`RxBuffer`], owned by the receive callback.
pub struct RxProducer<'a, const N: usize = RX_BUFFER_SIZE> {
    inner: Producer<'a, u8, N>,
    dropped: &'a AtomicUsize,
}

impl<const N: usize> RxProducer<'_, N> {
    /// Appends a byte, dropping it if the buffer is full. Never blocks.
    pub fn push(&mut self, byte: u8) -> Result<(), Error> {
        let result = self.inner.enqueue(byte);
        record(result, self.dropped)
    }
}

/// Read half of an [`RxBuffer`], drained by [`Shell::poll`](super::Shell::poll).
pub struct RxConsumer<'a, const N: usize = RX_BUFFER_SIZE> {
    inner: Consumer<'a, u8, N>,
    dropped: &'a AtomicUsize,
}

impl<const N: usize> RxConsumer<'_, N> {
    /// Number of bytes dropped by the producer so far.
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<const N: usize> ByteSource for RxConsumer<'_, N> {
    fn pull(&mut self) -> Option<u8> {
        self.inner.dequeue()
    }

    fn is_empty(&self) -> bool {
        !self.inner.ready()
    }
}

impl<const N: usize> fmt::Debug for RxBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RxBuffer")
            .field("len", &self.len())
            .field("dropped", &self.dropped())
            .finish()
    }
}

impl<const N: usize> fmt::Debug for RxProducer<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RxProducer")
            .field("dropped", &self.dropped.load(Ordering::Relaxed))
            .finish()
    }
}

impl<const N: usize> fmt::Debug for RxConsumer<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RxConsumer")
            .field("ready", &self.inner.ready())
            .field("dropped", &self.dropped())
            .finish()
    }
}

// The producer is the only writer of the counter, so a plain load/store pair
// is enough and works on targets without atomic read-modify-write. The count
// wraps around after `usize::MAX` drops.
pub(super) fn record(result: Result<(), u8>, dropped: &AtomicUsize) -> Result<(), Error> {
    match result {
        Ok(()) => Ok(()),
        Err(_byte) => {
            let count = dropped.load(Ordering::Relaxed).wrapping_add(1);
            dropped.store(count, Ordering::Relaxed);
            #[cfg(feature = "defmt")]
            defmt::warn!("rx buffer full, byte dropped");
            Err(Error::BufferOverflow)
        }
    }
}
