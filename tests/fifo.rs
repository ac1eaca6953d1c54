// Single-threaded FIFO semantics: the bytes come out exactly as they
// went in, across batch boundaries and wrap-arounds.

use frameflow::BatchedSpscQueue;

#[test]
fn single_element_roundtrip() {
    let mut buffer = vec![0u8; 100];
    let mut queue = BatchedSpscQueue::new(100, 1, 1, 1, &mut buffer).unwrap();
    let (mut producer, mut consumer) = queue.split();

    let slot = producer.acquire().expect("an empty queue must accept a batch");
    slot[0] = 0x2A;
    producer.commit();

    let batch = consumer.acquire().expect("one element must be readable");
    assert_eq!(&batch[..], &[0x2A][..]);
    consumer.commit();

    assert!(consumer.acquire().is_none());
    assert_eq!(consumer.size(), 0);
}

#[test]
fn fill_then_drain() {
    let mut buffer = vec![0u8; 100];
    let queue = BatchedSpscQueue::new(100, 1, 1, 1, &mut buffer).unwrap();

    for i in 0..99 {
        assert!(queue.write_ptr().is_some(), "enqueue {i} should succeed");
        queue.commit_write();
    }
    assert!(queue.write_ptr().is_none(), "the 100th enqueue must be refused");

    for i in 0..99 {
        assert!(queue.read_ptr().is_some(), "dequeue {i} should succeed");
        queue.commit_read();
    }
    assert!(queue.read_ptr().is_none(), "the 100th dequeue must be refused");
}

#[test]
fn asymmetric_batches() {
    let mut buffer = vec![0u8; 102];
    let mut queue = BatchedSpscQueue::new(102, 3, 2, 1, &mut buffer).unwrap();
    let (mut producer, mut consumer) = queue.split();

    // Two enqueue batches make six elements, which is three dequeue
    // batches exactly.
    let mut data = 0u8;
    for _ in 0..2 {
        let batch = producer.acquire().unwrap();
        for byte in batch.iter_mut() {
            *byte = data;
            data += 1;
        }
        producer.commit();
    }

    let mut expected = 0u8;
    for _ in 0..3 {
        let batch = consumer.acquire().expect("six elements are available");
        for &byte in batch.iter() {
            assert_eq!(byte, expected);
            expected += 1;
        }
        consumer.commit();
    }
    assert!(consumer.acquire().is_none(), "the queue is drained");

    // One more enqueue batch leaves three elements; a single dequeue
    // fits and one element stays behind.
    let batch = producer.acquire().unwrap();
    for byte in batch.iter_mut() {
        *byte = data;
        data += 1;
    }
    producer.commit();

    let batch = consumer.acquire().expect("three elements are available");
    for &byte in batch.iter() {
        assert_eq!(byte, expected);
        expected += 1;
    }
    consumer.commit();
    assert_eq!(consumer.size(), 1);
}

#[test]
fn interleaved_stream_preserves_order() {
    let mut buffer = vec![0u8; 102];
    let mut queue = BatchedSpscQueue::new(102, 3, 2, 1, &mut buffer).unwrap();
    let (mut producer, mut consumer) = queue.split();

    let mut produced = 0u8;
    let mut consumed = 0u8;
    let mut total = 0usize;

    // Run the indices around the ring many times.
    while total < 3_000 {
        while let Some(batch) = producer.acquire() {
            for byte in batch.iter_mut() {
                *byte = produced;
                produced = produced.wrapping_add(1);
            }
            producer.commit();
        }

        while let Some(batch) = consumer.acquire() {
            for &byte in batch.iter() {
                assert_eq!(byte, consumed, "byte {total} out of order");
                consumed = consumed.wrapping_add(1);
                total += 1;
            }
            consumer.commit();
        }
    }
}
