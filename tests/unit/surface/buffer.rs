use super::*;

#[test]
fn new_surface_is_transparent_and_validated() {
    let s = Surface::new(3, 2).unwrap();
    assert_eq!(s.data().len(), 3 * 2 * 4);
    assert!(s.data().iter().all(|&b| b == 0));

    assert!(Surface::new(0, 2).is_err());
    assert!(Surface::new(MAX_BACKING_DIM + 1, 1).is_err());
    assert!(Surface::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
}

#[test]
fn set_pixel_stores_premultiplied_and_reads_straight() {
    let mut s = Surface::new(2, 2).unwrap();
    s.set_pixel(1, 0, Rgba8::new(200, 100, 0, 128));

    let p = s.pixel_premul(1, 0);
    assert_eq!(p.a, 128);
    assert_eq!(p.r, ((200u16 * 128 + 127) / 255) as u8);

    let straight = s.pixel(1, 0);
    assert_eq!(straight.a, 128);
    assert!((i32::from(straight.r) - 200).abs() <= 1);
    assert_eq!(s.alpha(1, 0), 128);
    assert_eq!(s.pixel(0, 0), Rgba8::TRANSPARENT);
}

#[test]
fn contains_checks_both_axes() {
    let s = Surface::new(4, 3).unwrap();
    assert!(s.contains(0, 0));
    assert!(s.contains(3, 2));
    assert!(!s.contains(4, 0));
    assert!(!s.contains(0, 3));
    assert!(!s.contains(-1, 0));
}

#[test]
fn straight_snapshot_unpremultiplies() {
    let mut s = Surface::new(1, 1).unwrap();
    s.set_pixel(0, 0, Rgba8::new(255, 255, 255, 51));
    let snap = s.straight_snapshot();
    assert_eq!(snap[3], 51);
    assert!(snap[0] >= 254);
}

#[test]
fn resample_preserves_flat_color_and_sizes() {
    let mut s = Surface::new(4, 4).unwrap();
    for y in 0..4 {
        for x in 0..4 {
            s.set_pixel(x, y, Rgba8::opaque(10, 20, 30));
        }
    }
    let up = s.resampled(12, 12).unwrap();
    assert_eq!((up.width(), up.height()), (12, 12));
    assert_eq!(up.pixel(5, 7), Rgba8::opaque(10, 20, 30));

    let same = s.resampled(4, 4).unwrap();
    assert_eq!(same, s);

    let mut c = s.clone();
    c.clear();
    assert!(c.data().iter().all(|&b| b == 0));
}
