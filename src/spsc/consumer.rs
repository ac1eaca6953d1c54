use std::fmt;
use std::io;
use std::slice;

use super::queue::BatchedSpscQueue;

/// The reader half of a split [`BatchedSpscQueue`].
///
/// There is exactly one `Consumer` per queue at any time; move it to the
/// thread that dequeues. An acquired batch borrows the handle, so the
/// compiler rejects any use of the batch after [`commit`](Self::commit).
pub struct Consumer<'q, 'buf> {
    queue: &'q BatchedSpscQueue<'buf>,
}

impl<'q, 'buf> Consumer<'q, 'buf> {
    pub(crate) fn new(queue: &'q BatchedSpscQueue<'buf>) -> Self {
        Self { queue }
    }

    /// Acquires the next read batch as a slice of exactly
    /// [`batch_bytes`](Self::batch_bytes) bytes, or `None` if fewer than
    /// a full batch of elements is available.
    ///
    /// The slice is mutable: until [`commit`](Self::commit) the consumer
    /// owns the unread head exclusively, so in-place transforms (or
    /// wrapping the batch in a [`TensorView`](crate::TensorView)) are
    /// allowed. Dropping the slice without committing cancels the
    /// dequeue; the same batch is returned again next time.
    pub fn acquire(&mut self) -> Option<&mut [u8]> {
        let ptr = self.queue.read_ptr()?;
        // SAFETY: the admission check saw the producer's release store
        // for these slots, so their contents are fully published, and
        // the producer cannot touch them again before commit_read.
        Some(unsafe { slice::from_raw_parts_mut(ptr.as_ptr(), self.queue.dequeue_batch_bytes()) })
    }

    /// Releases the batch acquired by the preceding successful
    /// [`acquire`](Self::acquire), freeing its slots for the producer.
    pub fn commit(&mut self) {
        self.queue.commit_read();
    }

    /// Copies the next batch into `out` and commits it in one call.
    ///
    /// # Errors
    /// * `InvalidInput`: `out` is not exactly one dequeue batch long.
    /// * `WouldBlock`: not enough elements are available; retry after
    ///   the producer catches up.
    pub fn pop_into(&mut self, out: &mut [u8]) -> io::Result<()> {
        if out.len() != self.queue.dequeue_batch_bytes() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "pop_into() takes exactly one batch ({} bytes), got {}",
                    self.queue.dequeue_batch_bytes(),
                    out.len()
                ),
            ));
        }

        match self.acquire() {
            Some(batch) => {
                out.copy_from_slice(batch);
                self.commit();
                Ok(())
            }
            None => Err(io::Error::new(io::ErrorKind::WouldBlock, "queue empty")),
        }
    }

    /// Byte length of one dequeue batch.
    pub fn batch_bytes(&self) -> usize {
        self.queue.dequeue_batch_bytes()
    }

    /// Instantaneous queue occupancy in elements. Observational only.
    pub fn size(&self) -> usize {
        self.queue.size()
    }
}

impl fmt::Debug for Consumer<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("queue", &format_args!("{:p}", self.queue))
            .field("batch_bytes", &self.batch_bytes())
            .finish()
    }
}
