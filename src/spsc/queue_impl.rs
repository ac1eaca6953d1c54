use std::fmt;
use std::io;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};

use crossbeam_utils::CachePadded;

use super::consumer::Consumer;
use super::producer::Producer;
use super::queue::BatchedSpscQueue;

impl<'buf> BatchedSpscQueue<'buf> {
    /// Creates a queue over a pre-allocated buffer.
    ///
    /// `buffer` must hold at least `nb_slots * element_size` bytes; it is
    /// borrowed for the queue's lifetime and the queue never frees it.
    ///
    /// # Errors
    /// Returns `InvalidInput` if a size parameter is zero, `nb_slots` is
    /// not a multiple of both batch sizes, or the buffer is too small.
    pub fn new(
        nb_slots: usize,
        enqueue_batch_size: usize,
        dequeue_batch_size: usize,
        element_size: usize,
        buffer: &'buf mut [u8],
    ) -> io::Result<Self> {
        if nb_slots == 0 || enqueue_batch_size == 0 || dequeue_batch_size == 0 || element_size == 0
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "BatchedSpscQueue::new(): sizes must be non-zero.\n\
                    ├─ nb_slots:           {nb_slots}\n\
                    ├─ enqueue_batch_size: {enqueue_batch_size}\n\
                    ├─ dequeue_batch_size: {dequeue_batch_size}\n\
                    ╰─ element_size:       {element_size}"
                ),
            ));
        }

        if nb_slots % enqueue_batch_size != 0 || nb_slots % dequeue_batch_size != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "BatchedSpscQueue::new(): nb_slots must be a multiple of both batch sizes.\n\
                    ├─ nb_slots:           {nb_slots}\n\
                    ├─ enqueue_batch_size: {enqueue_batch_size} (remainder {})\n\
                    ╰─ dequeue_batch_size: {dequeue_batch_size} (remainder {})",
                    nb_slots % enqueue_batch_size,
                    nb_slots % dequeue_batch_size
                ),
            ));
        }

        let needed = nb_slots * element_size;
        if buffer.len() < needed {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "BatchedSpscQueue::new(): buffer too small.\n\
                    ├─ Buffer size: {} bytes\n\
                    ╰─ Expected:    at least {needed} bytes (nb_slots * element_size)",
                    buffer.len()
                ),
            ));
        }

        Ok(Self {
            nb_slots,
            enqueue_batch_size,
            dequeue_batch_size,
            element_size,
            // SAFETY: slice pointers are never null.
            buffer: unsafe { NonNull::new_unchecked(buffer.as_mut_ptr()) },
            write_idx: CachePadded::new(AtomicUsize::new(0)),
            read_idx: CachePadded::new(AtomicUsize::new(0)),
            _storage: PhantomData,
        })
    }

    /// Splits the queue into its two role handles.
    ///
    /// The exclusive borrow guarantees no other handle pair is alive, so
    /// the single-thread-per-role contract holds by construction. Each
    /// handle is `Send` and can be moved to its own thread.
    pub fn split(&mut self) -> (Producer<'_, 'buf>, Consumer<'_, 'buf>) {
        let queue = &*self;
        (Producer::new(queue), Consumer::new(queue))
    }

    /// Returns a pointer to the next batch of `enqueue_batch_size`
    /// contiguous slots to be written, or `None` if the queue cannot
    /// accept a full batch. Producer thread only.
    ///
    /// Not committing an acquired batch does not lead to undefined
    /// behavior; it cancels the enqueue. The pointer must not be used
    /// after [`commit_write`](Self::commit_write), and the whole batch
    /// must be written before committing.
    pub fn write_ptr(&self) -> Option<NonNull<u8>> {
        if self.nb_slots - self.writer_size() < self.enqueue_batch_size + 1 {
            return None;
        }

        let write_idx = self.write_idx.load(Relaxed);
        // SAFETY: write_idx is a multiple of enqueue_batch_size below
        // nb_slots, and batch sizes divide nb_slots, so the whole batch
        // lies inside the backing buffer.
        Some(unsafe { NonNull::new_unchecked(self.buffer.as_ptr().add(write_idx * self.element_size)) })
    }

    /// Publishes the batch acquired by the preceding successful
    /// [`write_ptr`](Self::write_ptr). Producer thread only.
    pub fn commit_write(&self) {
        let write_idx = self.write_idx.load(Relaxed);
        let mut next_write_idx = write_idx + self.enqueue_batch_size;
        if next_write_idx == self.nb_slots {
            next_write_idx = 0;
        }

        self.write_idx.store(next_write_idx, Release);
    }

    /// Returns a pointer to the next batch of `dequeue_batch_size`
    /// contiguous slots to be read, or `None` if fewer than a full batch
    /// of elements is available. Consumer thread only.
    ///
    /// Not committing an acquired batch cancels the dequeue. The pointer
    /// must not be used after [`commit_read`](Self::commit_read).
    pub fn read_ptr(&self) -> Option<NonNull<u8>> {
        if self.reader_size() < self.dequeue_batch_size {
            return None;
        }

        let read_idx = self.read_idx.load(Relaxed);
        // SAFETY: same bounds argument as write_ptr.
        Some(unsafe { NonNull::new_unchecked(self.buffer.as_ptr().add(read_idx * self.element_size)) })
    }

    /// Releases the batch acquired by the preceding successful
    /// [`read_ptr`](Self::read_ptr), freeing its slots for the producer.
    /// Consumer thread only.
    pub fn commit_read(&self) {
        let read_idx = self.read_idx.load(Relaxed);
        let mut next_read_idx = read_idx + self.dequeue_batch_size;
        if next_read_idx == self.nb_slots {
            next_read_idx = 0;
        }

        self.read_idx.store(next_read_idx, Release);
    }

    /// Instantaneous number of elements in the queue.
    ///
    /// Observational only: by the time the value is returned the peer
    /// thread may already have moved its index.
    pub fn size(&self) -> usize {
        let write_idx = self.write_idx.load(Acquire);
        let read_idx = self.read_idx.load(Acquire);

        self.occupancy(write_idx, read_idx)
    }

    /// Empties the queue.
    ///
    /// Not thread-safe; must only be called while neither role is
    /// active. Provided for testing and benchmarking purposes only.
    pub fn reset(&self) {
        self.write_idx.store(0, Release);
        self.read_idx.store(0, Release);
    }

    /// Marks the queue as holding `nb_slots` elements.
    ///
    /// After this call the queue admits no writes; only dequeues (and
    /// [`reset`](Self::reset)) are meaningful until the next reset. Not
    /// thread-safe; provided for testing and benchmarking purposes only.
    pub fn fill(&self) {
        self.write_idx.store(self.nb_slots, Release);
        self.read_idx.store(0, Release);
    }

    /// Total slot count.
    pub fn nb_slots(&self) -> usize {
        self.nb_slots
    }

    /// Slots advanced per producer commit.
    pub fn enqueue_batch_size(&self) -> usize {
        self.enqueue_batch_size
    }

    /// Slots advanced per consumer commit.
    pub fn dequeue_batch_size(&self) -> usize {
        self.dequeue_batch_size
    }

    /// Byte size of one slot's payload.
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Maximum sustainable occupancy: `nb_slots - enqueue_batch_size`.
    pub fn capacity(&self) -> usize {
        self.nb_slots - self.enqueue_batch_size
    }

    pub(crate) fn enqueue_batch_bytes(&self) -> usize {
        self.enqueue_batch_size * self.element_size
    }

    pub(crate) fn dequeue_batch_bytes(&self) -> usize {
        self.dequeue_batch_size * self.element_size
    }

    /// Occupancy as seen by the producer. Only accurate on the producer
    /// thread: its own index is loaded relaxed, the peer's with acquire.
    fn writer_size(&self) -> usize {
        let write_idx = self.write_idx.load(Relaxed);
        let read_idx = self.read_idx.load(Acquire);

        self.occupancy(write_idx, read_idx)
    }

    /// Occupancy as seen by the consumer.
    fn reader_size(&self) -> usize {
        let write_idx = self.write_idx.load(Acquire);
        let read_idx = self.read_idx.load(Relaxed);

        self.occupancy(write_idx, read_idx)
    }

    fn occupancy(&self, write_idx: usize, read_idx: usize) -> usize {
        if write_idx >= read_idx {
            write_idx - read_idx
        } else {
            self.nb_slots - (read_idx - write_idx)
        }
    }
}

/// Displays the buffer's location and configuration without touching the
/// payload, which may be mid-write on another thread.
impl fmt::Debug for BatchedSpscQueue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchedSpscQueue")
            .field("buffer", &format_args!("{:p}", self.buffer.as_ptr()))
            .field("nb_slots", &self.nb_slots)
            .field("enqueue_batch_size", &self.enqueue_batch_size)
            .field("dequeue_batch_size", &self.dequeue_batch_size)
            .field("element_size", &self.element_size)
            .finish_non_exhaustive()
    }
}
