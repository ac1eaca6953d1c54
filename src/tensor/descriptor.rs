/// Describes the metadata of a tensor: scalar type, shape, and strides.
///
/// A descriptor is an immutable value type. Construction validates that
/// the strides are compatible with the shape and scalar size, so any
/// descriptor in existence describes a reachable memory layout.
#[derive(Clone, Debug)]
pub struct TensorDescriptor {
    type_name: String,
    type_size: usize,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl TensorDescriptor {
    /// Creates a descriptor for a strided N-D array.
    ///
    /// `shape[i]` is the extent of dimension `i`; `strides[i]` is the
    /// byte distance between consecutive elements along dimension `i`.
    ///
    /// # Panics
    /// Construction is fatal if `shape` and `strides` differ in length,
    /// if the innermost stride cannot hold one element of `type_size`
    /// bytes, or if any outer stride cannot hold the sub-tensor of the
    /// dimension below it. These are programming errors, not runtime
    /// conditions.
    pub fn new(
        type_name: impl Into<String>,
        type_size: usize,
        shape: Vec<usize>,
        strides: Vec<usize>,
    ) -> Self {
        assert_eq!(
            shape.len(),
            strides.len(),
            "shape and strides must have the same number of dimensions"
        );

        if !shape.is_empty() {
            let last = shape.len() - 1;
            assert!(
                strides[last] >= type_size,
                "stride {} at dimension {last} cannot hold elements of {type_size} bytes",
                strides[last]
            );

            for curr in (0..last).rev() {
                let next = curr + 1;
                assert!(
                    strides[curr] >= shape[next] * strides[next],
                    "stride {} at dimension {curr} cannot hold {} sub-tensors of {} bytes",
                    strides[curr],
                    shape[next],
                    strides[next]
                );
            }
        }

        Self {
            type_name: type_name.into(),
            type_size,
            shape,
            strides,
        }
    }

    /// Name of the scalar type, e.g. `"float"`. Informational only.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Size of the scalar type in bytes.
    pub fn type_size(&self) -> usize {
        self.type_size
    }

    /// Extent of each dimension.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Byte stride of each dimension.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Total byte footprint of the tensor, padding included.
    pub fn size_in_bytes(&self) -> usize {
        if self.shape.is_empty() {
            return 0;
        }

        self.shape[0] * self.strides[0]
    }
}

/// Equality deliberately ignores strides: they describe a memory layout,
/// while equality describes the logical identity of the array.
impl PartialEq for TensorDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && self.type_size == other.type_size
            && self.shape == other.shape
    }
}

impl Eq for TensorDescriptor {}
