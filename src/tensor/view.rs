use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use super::descriptor::TensorDescriptor;

/// A tensor: a descriptor paired with a raw byte region it interprets.
///
/// The view does not own the storage; it borrows it for `'data`. Frames
/// pulled out of a queue batch can be wrapped directly, without copying.
pub struct TensorView<'data> {
    desc: TensorDescriptor,
    data: NonNull<u8>,
    _storage: PhantomData<&'data mut [u8]>,
}

impl<'data> TensorView<'data> {
    /// Creates a view of `data` described by `desc`.
    ///
    /// # Panics
    /// Fatal if `data` is smaller than `desc.size_in_bytes()`.
    pub fn new(desc: TensorDescriptor, data: &'data mut [u8]) -> Self {
        assert!(
            data.len() >= desc.size_in_bytes(),
            "storage of {} bytes cannot back a tensor of {} bytes",
            data.len(),
            desc.size_in_bytes()
        );

        Self {
            desc,
            // SAFETY: slice pointers are never null.
            data: unsafe { NonNull::new_unchecked(data.as_mut_ptr()) },
            _storage: PhantomData,
        }
    }

    /// The descriptor of this tensor.
    pub fn desc(&self) -> &TensorDescriptor {
        &self.desc
    }

    /// The tensor data reinterpreted as `T`.
    ///
    /// Element offsets follow the descriptor's strides; the pointer is
    /// valid for the storage's lifetime. The descriptor's type name is
    /// not checked against `T`.
    ///
    /// # Panics
    /// Fatal if `size_of::<T>()` differs from the descriptor's
    /// `type_size`.
    pub fn data<T>(&self) -> *const T {
        self.check_type::<T>();
        self.data.as_ptr().cast_const().cast()
    }

    /// Mutable variant of [`data`](Self::data).
    pub fn data_mut<T>(&mut self) -> *mut T {
        self.check_type::<T>();
        self.data.as_ptr().cast()
    }

    fn check_type<T>(&self) {
        assert_eq!(
            mem::size_of::<T>(),
            self.desc.type_size(),
            "the requested element type does not match the descriptor's type size"
        );
    }
}

impl fmt::Debug for TensorView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorView")
            .field("desc", &self.desc)
            .field("data", &format_args!("{:p}", self.data.as_ptr()))
            .finish()
    }
}
