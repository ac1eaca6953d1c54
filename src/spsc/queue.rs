// Batched SPSC ring buffer over caller-owned storage.

use std::marker::PhantomData;
use std::ptr::NonNull;
use std::sync::atomic::AtomicUsize;

use crossbeam_utils::CachePadded;

/// A lock-free, single-producer single-consumer (SPSC) queue designed for
/// batched operations.
///
/// The producer enqueues a batch of elements and the consumer dequeues a
/// batch of elements, improving throughput by reducing the frequency of
/// synchronization operations. A batch of elements is always contiguous in
/// memory, so the queue can be used to extend a batch size in a context of
/// tensor processing, for example.
///
/// The queue follows an acquire/commit pattern. The producer acquires a
/// pointer to the next batch of elements to be written, writes the data,
/// and then commits the write operation. The consumer acquires a pointer
/// to the next batch of elements to be read, reads the data, and then
/// commits the read operation. Both sides work directly in the backing
/// storage without staging copies or per-batch allocation.
///
/// ### Concurrency design
/// - **Producer**: publishes a batch with a release store of `write_idx`
///   in [`commit_write`](Self::commit_write); the admission check in
///   [`write_ptr`](Self::write_ptr) loads the consumer's `read_idx` with
///   acquire ordering.
/// - **Consumer**: symmetric, on `read_idx`.
/// - **Cache-line padding**: the two atomic indices are wrapped in
///   `CachePadded` so that updates to one never invalidate the cache line
///   holding the other.
///
/// The actual capacity of the queue is `nb_slots - enqueue_batch_size`:
/// a circular buffer keeps one gap to distinguish full from empty, and
/// because `nb_slots` is a multiple of `enqueue_batch_size` the minimum
/// reserved gap is one whole enqueue batch.
///
/// The queue is subject to the following constraints; if they are not
/// respected, the behavior is undefined:
/// - `nb_slots` must be a multiple of both batch sizes (checked at
///   construction).
/// - A single thread performs enqueue operations and a single thread
///   performs dequeue operations for the queue's whole lifetime.
/// - Each `commit_write` is preceded by a successful `write_ptr`, the
///   whole batch is written before the commit, and the pointer is not
///   used afterwards. Likewise for reads.
///
/// [`split`](Self::split) turns these last rules into compile-time
/// properties: it hands out one [`Producer`](super::Producer) and one
/// [`Consumer`](super::Consumer) handle whose borrows tie every acquired
/// batch slice to its commit.
///
/// The methods [`reset`](Self::reset) and [`fill`](Self::fill) are not
/// thread-safe. They are provided for testing and benchmarking purposes
/// only.
pub struct BatchedSpscQueue<'buf> {
    /// The number of slots in the circular buffer.
    pub(crate) nb_slots: usize,

    /// The number of elements enqueued in a single batch.
    pub(crate) enqueue_batch_size: usize,

    /// The number of elements dequeued in a single batch.
    pub(crate) dequeue_batch_size: usize,

    /// The size of each element in bytes.
    pub(crate) element_size: usize,

    /// Caller-owned backing storage of at least `nb_slots * element_size`
    /// bytes; borrowed for the queue's lifetime.
    pub(crate) buffer: NonNull<u8>,

    /// The next slot the producer will write. Always a multiple of
    /// `enqueue_batch_size`.
    pub(crate) write_idx: CachePadded<AtomicUsize>,

    /// The next slot the consumer will read. Always a multiple of
    /// `dequeue_batch_size`.
    pub(crate) read_idx: CachePadded<AtomicUsize>,

    pub(crate) _storage: PhantomData<&'buf mut [u8]>,
}

// The queue only ever hands a slot to one side at a time; the index
// protocol makes the write and read windows disjoint.
unsafe impl Send for BatchedSpscQueue<'_> {}
unsafe impl Sync for BatchedSpscQueue<'_> {}

#[cfg(test)]
mod tests {
    // Layout conformance: the two atomic indices must live on separate
    // cache lines, otherwise false sharing destroys throughput.
    use memoffset::offset_of;

    use super::BatchedSpscQueue;

    type Queue = BatchedSpscQueue<'static>;

    #[test]
    fn indices_are_on_separate_cache_lines() {
        let off_write = offset_of!(Queue, write_idx);
        let off_read = offset_of!(Queue, read_idx);

        println!("write_idx offset: {off_write}, read_idx offset: {off_read}");

        let distance = off_write.abs_diff(off_read);
        assert!(distance >= 64, "indices share a cache line ({distance} bytes apart)");
    }

    #[test]
    fn padded_index_spans_a_cache_line() {
        use crossbeam_utils::CachePadded;
        use std::sync::atomic::AtomicUsize;

        assert!(std::mem::size_of::<CachePadded<AtomicUsize>>() >= 64);
        assert!(std::mem::align_of::<CachePadded<AtomicUsize>>() >= 64);
    }
}
