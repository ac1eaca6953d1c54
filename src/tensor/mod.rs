mod descriptor;
mod view;

pub use descriptor::TensorDescriptor;
pub use view::TensorView;
