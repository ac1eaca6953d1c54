mod consumer;
mod producer;
mod queue;
mod queue_impl;

pub use consumer::Consumer;
pub use producer::Producer;
pub use queue::BatchedSpscQueue;
