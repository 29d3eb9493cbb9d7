use super::*;
use crate::assets::decode::parse_svg;

#[test]
fn fit_preserves_aspect_and_centers() {
    let logical = LogicalSize::new(1200, 720).unwrap();
    let fit = fit_outline((400.0, 400.0), logical, 16.0).unwrap();
    assert!((fit.scale - (720.0 - 32.0) / 400.0).abs() < 1e-9);
    let drawn = 400.0 * fit.scale;
    assert!((fit.offset.y - 16.0).abs() < 1e-9);
    assert!((fit.offset.x - (1200.0 - drawn) / 2.0).abs() < 1e-9);
}

#[test]
fn oversized_margin_is_ignored() {
    let logical = LogicalSize::new(20, 20).unwrap();
    let fit = fit_outline((10.0, 10.0), logical, 50.0).unwrap();
    assert_eq!(fit.scale, 2.0);
    assert_eq!(fit.offset, Vec2::ZERO);
}

#[test]
fn degenerate_svg_size_is_rejected() {
    let logical = LogicalSize::new(20, 20).unwrap();
    assert!(fit_outline((0.0, 10.0), logical, 0.0).is_err());
    assert!(fit_outline((f64::NAN, 10.0), logical, 0.0).is_err());
}

#[test]
fn rasterized_outline_matches_backing_size_and_scales_with_dpr() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect x="0" y="0" width="5" height="10" fill="black"/></svg>"#;
    let tree = parse_svg(svg).unwrap();
    let logical = LogicalSize::new(10, 10).unwrap();

    for dpr in [1.0, 2.0, 3.0] {
        let t = BackingTransform::new(logical, dpr).unwrap();
        let s = rasterize_outline(&tree, &t, 0.0).unwrap();
        assert_eq!((s.width(), s.height()), (t.width(), t.height()));

        let mid = t.height() / 2;
        assert_eq!(s.alpha(1, mid), 255, "dpr {dpr}");
        assert_eq!(s.alpha(t.width() - 2, mid), 0, "dpr {dpr}");
    }
}
