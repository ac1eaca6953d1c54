// Descriptor validation, stride-blind equality, and typed view access.

use frameflow::{TensorDescriptor, TensorView};

#[test]
fn descriptor_reports_its_fields() {
    let desc = TensorDescriptor::new("float", 4, vec![4, 4], vec![16, 4]);

    assert_eq!(desc.type_name(), "float");
    assert_eq!(desc.type_size(), 4);
    assert_eq!(desc.shape(), &[4, 4]);
    assert_eq!(desc.strides(), &[16, 4]);
}

#[test]
#[should_panic(expected = "same number of dimensions")]
fn descriptor_rejects_mismatched_shape_and_strides() {
    TensorDescriptor::new("float", 4, vec![4, 4], vec![16]);
}

#[test]
#[should_panic(expected = "cannot hold")]
fn descriptor_rejects_outer_stride_too_small() {
    // Stride 8 cannot hold a row of four 4-byte elements.
    TensorDescriptor::new("float", 4, vec![4, 4], vec![8, 4]);
}

#[test]
#[should_panic(expected = "cannot hold")]
fn descriptor_rejects_inner_stride_below_type_size() {
    TensorDescriptor::new("float", 4, vec![4], vec![2]);
}

#[test]
fn descriptor_allows_empty_shape() {
    let desc = TensorDescriptor::new("float", 4, vec![], vec![]);

    assert!(desc.shape().is_empty());
    assert!(desc.strides().is_empty());
    assert_eq!(desc.size_in_bytes(), 0);
}

#[test]
fn descriptor_allows_padded_strides() {
    // Rows padded to 32 bytes; still a valid layout.
    let desc = TensorDescriptor::new("float", 4, vec![4, 4], vec![32, 8]);
    assert_eq!(desc.size_in_bytes(), 4 * 32);
}

#[test]
fn equality_ignores_strides() {
    let packed = TensorDescriptor::new("float", 4, vec![4, 4], vec![16, 4]);
    let padded = TensorDescriptor::new("float", 4, vec![4, 4], vec![32, 8]);

    assert_eq!(packed, padded);
}

#[test]
fn equality_compares_logical_identity() {
    let a = TensorDescriptor::new("float", 4, vec![4, 4], vec![16, 4]);
    let b = TensorDescriptor::new("float", 4, vec![4, 5], vec![20, 4]);
    let c = TensorDescriptor::new("int", 4, vec![4, 4], vec![16, 4]);

    assert_ne!(a, b);
    assert_ne!(a, c);
}

#[test]
fn size_in_bytes_uses_the_outermost_dimension() {
    let desc = TensorDescriptor::new("float", 4, vec![4, 4], vec![16, 4]);
    assert_eq!(desc.size_in_bytes(), 64);
}

#[test]
fn view_exposes_descriptor_and_data() {
    let desc = TensorDescriptor::new("float", 4, vec![4, 4], vec![16, 4]);
    let mut storage = vec![0u8; desc.size_in_bytes()];
    let base = storage.as_ptr();

    let view = TensorView::new(desc.clone(), &mut storage);
    assert_eq!(*view.desc(), desc);
    assert_eq!(view.data::<f32>().cast::<u8>(), base);
}

#[test]
fn view_typed_access_roundtrip() {
    let desc = TensorDescriptor::new("uint16_t", 2, vec![4, 4], vec![8, 2]);
    let mut storage = vec![0u8; desc.size_in_bytes()];
    let mut view = TensorView::new(desc, &mut storage);

    let data = view.data_mut::<u16>();
    unsafe {
        for i in 0..16 {
            data.add(i).write(i as u16);
        }
        assert_eq!(data.read(), 0);
        assert_eq!(data.add(15).read(), 15);
    }
}

#[test]
#[should_panic(expected = "does not match the descriptor's type size")]
fn view_rejects_wrong_type_size() {
    let desc = TensorDescriptor::new("float", 4, vec![4, 4], vec![16, 4]);
    let mut storage = vec![0u8; desc.size_in_bytes()];
    let view = TensorView::new(desc, &mut storage);

    view.data::<u8>();
}

#[test]
#[should_panic(expected = "cannot back a tensor")]
fn view_rejects_undersized_storage() {
    let desc = TensorDescriptor::new("float", 4, vec![4, 4], vec![16, 4]);
    let mut storage = vec![0u8; 16];

    TensorView::new(desc, &mut storage);
}
