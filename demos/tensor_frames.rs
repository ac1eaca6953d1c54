// Sends one tensor frame through the queue and reads it back through a
// typed view, without copying the payload at any point.

use frameflow::{BatchedSpscQueue, TensorDescriptor, TensorView};

fn main() -> std::io::Result<()> {
    // A 4x4 matrix of 16-bit elements, rows packed.
    let desc = TensorDescriptor::new("uint16_t", 2, vec![4, 4], vec![8, 2]);
    println!("frame descriptor: {desc:?} ({} bytes)", desc.size_in_bytes());

    let element_size = desc.size_in_bytes();
    let mut storage = vec![0u8; 16 * element_size];
    let mut queue = BatchedSpscQueue::new(16, 1, 1, element_size, &mut storage)?;
    let (mut producer, mut consumer) = queue.split();

    // Produce one frame directly inside the ring.
    let frame = producer.acquire().expect("an empty queue must accept a frame");
    let mut view = TensorView::new(desc.clone(), frame);
    let data = view.data_mut::<u16>();
    for row in 0..4 {
        for col in 0..4 {
            unsafe { data.add(row * 4 + col).write((row * 4 + col) as u16) };
        }
    }
    drop(view);
    producer.commit();

    // Consume it as a typed tensor.
    let frame = consumer.acquire().expect("the produced frame must be readable");
    let view = TensorView::new(desc.clone(), frame);
    let data = view.data::<u16>();

    println!("tensor values:");
    for row in 0..4 {
        let mut line = String::new();
        for col in 0..4 {
            line.push_str(&format!("{:3} ", unsafe { data.add(row * 4 + col).read() }));
        }
        println!("{line}");
    }

    drop(view);
    consumer.commit();

    // Descriptors with different layouts still denote the same tensor.
    let padded = TensorDescriptor::new("uint16_t", 2, vec![4, 4], vec![16, 4]);
    assert_eq!(desc, padded);
    println!("packed and padded descriptors compare equal");

    Ok(())
}
