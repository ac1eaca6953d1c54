//! Zero-copy streaming of fixed-size frames between exactly two threads.
//!
//! The core of the crate is [`BatchedSpscQueue`], a lock-free
//! single-producer single-consumer ring buffer that hands out contiguous
//! batches of slots directly inside caller-owned storage. On top of it,
//! [`TensorDescriptor`] and [`TensorView`] describe and access a frame's
//! payload as a strided N-D array.

pub mod spsc;
pub mod tensor;

pub use spsc::{BatchedSpscQueue, Consumer, Producer};
pub use tensor::{TensorDescriptor, TensorView};
