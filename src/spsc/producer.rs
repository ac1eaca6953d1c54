use std::fmt;
use std::io;
use std::slice;

use super::queue::BatchedSpscQueue;

/// The writer half of a split [`BatchedSpscQueue`].
///
/// There is exactly one `Producer` per queue at any time; move it to the
/// thread that enqueues. An acquired batch borrows the handle mutably, so
/// the compiler rejects any use of the batch after [`commit`](Self::commit)
/// and any overlapping acquire.
pub struct Producer<'q, 'buf> {
    queue: &'q BatchedSpscQueue<'buf>,
}

impl<'q, 'buf> Producer<'q, 'buf> {
    pub(crate) fn new(queue: &'q BatchedSpscQueue<'buf>) -> Self {
        Self { queue }
    }

    /// Acquires the next write batch as a mutable slice of exactly
    /// [`batch_bytes`](Self::batch_bytes) bytes, or `None` if the queue
    /// cannot accept a full batch.
    ///
    /// Dropping the slice without calling [`commit`](Self::commit)
    /// cancels the enqueue.
    pub fn acquire(&mut self) -> Option<&mut [u8]> {
        let ptr = self.queue.write_ptr()?;
        // SAFETY: the admission check reserved these slots for the
        // producer, and this handle is the queue's only writer. The
        // region stays invisible to the consumer until commit.
        Some(unsafe { slice::from_raw_parts_mut(ptr.as_ptr(), self.queue.enqueue_batch_bytes()) })
    }

    /// Publishes the batch acquired by the preceding successful
    /// [`acquire`](Self::acquire).
    pub fn commit(&mut self) {
        self.queue.commit_write();
    }

    /// Copies `batch` into the queue and commits it in one call.
    ///
    /// # Errors
    /// * `InvalidInput`: `batch` is not exactly one enqueue batch long.
    /// * `WouldBlock`: the queue is full; retry after the consumer
    ///   catches up.
    pub fn push(&mut self, batch: &[u8]) -> io::Result<()> {
        if batch.len() != self.queue.enqueue_batch_bytes() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "push() takes exactly one batch ({} bytes), got {}",
                    self.queue.enqueue_batch_bytes(),
                    batch.len()
                ),
            ));
        }

        match self.acquire() {
            Some(slots) => {
                slots.copy_from_slice(batch);
                self.commit();
                Ok(())
            }
            None => Err(io::Error::new(io::ErrorKind::WouldBlock, "queue full")),
        }
    }

    /// Byte length of one enqueue batch.
    pub fn batch_bytes(&self) -> usize {
        self.queue.enqueue_batch_bytes()
    }

    /// Instantaneous queue occupancy in elements. Observational only.
    pub fn size(&self) -> usize {
        self.queue.size()
    }
}

impl fmt::Debug for Producer<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("queue", &format_args!("{:p}", self.queue))
            .field("batch_bytes", &self.batch_bytes())
            .finish()
    }
}
