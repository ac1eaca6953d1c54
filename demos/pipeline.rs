// Streams counter frames from a producer thread to a consumer thread
// and prints the achieved throughput. The producer batches four frames
// per commit while the consumer drains eight at a time, so the queue
// doubles the batch size between the two stages.

use std::thread;
use std::time::Instant;

use frameflow::BatchedSpscQueue;

const NB_SLOTS: usize = 256;
const ENQUEUE_BATCH_SIZE: usize = 4;
const DEQUEUE_BATCH_SIZE: usize = 8;
const ELEMENT_SIZE: usize = 64 * 64; // one 64x64 single-byte frame
const TOTAL_FRAMES: usize = 1 << 16;

fn main() -> std::io::Result<()> {
    let mut storage = vec![0u8; NB_SLOTS * ELEMENT_SIZE];
    let mut queue = BatchedSpscQueue::new(
        NB_SLOTS,
        ENQUEUE_BATCH_SIZE,
        DEQUEUE_BATCH_SIZE,
        ELEMENT_SIZE,
        &mut storage,
    )?;

    println!(
        "streaming {TOTAL_FRAMES} frames of {ELEMENT_SIZE} bytes through {} slots \
         (capacity {} frames)",
        queue.nb_slots(),
        queue.capacity()
    );

    let (mut producer, mut consumer) = queue.split();
    let start = Instant::now();

    thread::scope(|s| {
        s.spawn(move || {
            let mut frame_id = 0u8;

            for _ in 0..TOTAL_FRAMES / ENQUEUE_BATCH_SIZE {
                loop {
                    if let Some(batch) = producer.acquire() {
                        for frame in batch.chunks_exact_mut(ELEMENT_SIZE) {
                            frame.fill(frame_id);
                            frame_id = frame_id.wrapping_add(1);
                        }
                        producer.commit();
                        break;
                    }

                    std::hint::spin_loop();
                }
            }
        });

        s.spawn(move || {
            let mut expected = 0u8;

            for _ in 0..TOTAL_FRAMES / DEQUEUE_BATCH_SIZE {
                loop {
                    if let Some(batch) = consumer.acquire() {
                        for frame in batch.chunks_exact(ELEMENT_SIZE) {
                            assert!(
                                frame.iter().all(|&byte| byte == expected),
                                "corrupted frame {expected}"
                            );
                            expected = expected.wrapping_add(1);
                        }
                        consumer.commit();
                        break;
                    }

                    std::hint::spin_loop();
                }
            }
        });
    });

    let elapsed = start.elapsed();
    let bytes = TOTAL_FRAMES * ELEMENT_SIZE;
    println!(
        "moved {bytes} bytes in {elapsed:.2?} ({:.1} MiB/s)",
        bytes as f64 / f64::from(1 << 20) / elapsed.as_secs_f64()
    );

    Ok(())
}
