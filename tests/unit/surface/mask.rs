use super::*;
use crate::foundation::core::Rgba8;

#[test]
fn alpha_strictly_above_threshold_is_barrier() {
    let mut outline = Surface::new(3, 1).unwrap();
    outline.set_pixel(0, 0, Rgba8::new(0, 0, 0, 10));
    outline.set_pixel(1, 0, Rgba8::new(0, 0, 0, 11));
    outline.set_pixel(2, 0, Rgba8::new(0, 0, 0, 255));

    let mask = OutlineMask::from_outline(&outline, DEFAULT_BARRIER_ALPHA_THRESHOLD);
    assert!(!mask.is_barrier(0, 0));
    assert!(mask.is_barrier(1, 0));
    assert!(mask.is_barrier(2, 0));
    assert_eq!(mask.barrier_count(), 2);
    assert!(!mask.is_barrier(9, 9));
}

#[test]
fn flags_must_match_dimensions() {
    assert!(OutlineMask::from_flags(2, 2, vec![false; 3]).is_err());
    let m = OutlineMask::from_flags(2, 1, vec![false, true]).unwrap();
    assert!(m.is_barrier(1, 0));
    assert_eq!(OutlineMask::empty(4, 4).barrier_count(), 0);
}
