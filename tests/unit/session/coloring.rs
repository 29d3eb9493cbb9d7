use std::time::Duration;

use rand::SeedableRng;

use super::*;
use crate::foundation::core::DisplayRect;
use crate::view::viewport::FixedViewport;

const FRAME_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="60">
  <rect x="20" y="20" width="60" height="20" fill="none" stroke="black" stroke-width="2"/>
</svg>"#;

const BLUE: Rgba8 = Rgba8::opaque(0, 0, 255);

fn config() -> ColoringConfig {
    ColoringConfig {
        logical_width: 100,
        logical_height: 60,
        outline_margin: 0.0,
        ..ColoringConfig::default()
    }
}

fn session(dpr: f64) -> ColoringSession<FixedViewport> {
    let vp = FixedViewport::new(DisplayRect::from_size(200.0, 120.0), dpr);
    let mut s = ColoringSession::new(config(), vp).unwrap();
    s.attach().unwrap();
    s
}

fn tools(tool: Tool) -> ToolState {
    ToolState {
        tool,
        color: BLUE,
        brush_size: 8.0,
    }
}

fn frame() -> OutlineArt {
    OutlineArt::from_svg_bytes("frame", FRAME_SVG.as_bytes()).unwrap()
}

#[test]
fn input_before_attach_is_ignored() {
    let vp = FixedViewport::new(DisplayRect::from_size(200.0, 120.0), 1.0);
    let mut s = ColoringSession::new(config(), vp).unwrap();
    let t = tools(Tool::Brush);
    assert_eq!(
        s.pointer_down(Some(Point::new(10.0, 10.0)), &t).unwrap(),
        InputEffect::Ignored
    );
    assert_eq!(s.gesture(), GestureState::Idle);
    assert!(matches!(
        s.fill_at(Point::new(1.0, 1.0), BLUE),
        Err(ColorbookError::Precondition(_))
    ));
    assert!(matches!(s.export(), Err(ColorbookError::Precondition(_))));
}

#[test]
fn brush_down_paints_a_dab_at_the_mapped_point() {
    let mut s = session(1.0);
    // Display is twice the logical size: client (100, 60) -> logical (50, 30).
    let out = s
        .pointer_down(Some(Point::new(100.0, 60.0)), &tools(Tool::Brush))
        .unwrap();
    assert!(matches!(out, InputEffect::Stroked { touched: Some(_) }));
    assert_eq!(s.paint().unwrap().pixel(50, 30), BLUE);
    assert_eq!(
        s.gesture(),
        GestureState::Drawing {
            last: Point::new(50.0, 30.0)
        }
    );
}

#[test]
fn gesture_lifecycle() {
    let mut s = session(1.0);
    let t = tools(Tool::Brush);
    assert_eq!(
        s.pointer_move(Some(Point::new(10.0, 10.0)), &t).unwrap(),
        InputEffect::Ignored
    );
    assert_eq!(s.pointer_up(), InputEffect::Ignored);

    s.pointer_down(Some(Point::new(20.0, 20.0)), &t).unwrap();
    let out = s.pointer_move(Some(Point::new(60.0, 20.0)), &t).unwrap();
    assert!(matches!(out, InputEffect::Stroked { .. }));
    assert_eq!(s.pointer_up(), InputEffect::Released);
    assert_eq!(s.gesture(), GestureState::Idle);

    s.pointer_down(Some(Point::new(20.0, 20.0)), &t).unwrap();
    assert_eq!(s.pointer_cancel(), InputEffect::Released);
    assert_eq!(
        s.pointer_move(Some(Point::new(90.0, 90.0)), &t).unwrap(),
        InputEffect::Ignored
    );
}

#[test]
fn display_change_mid_gesture_is_honored() {
    let mut s = session(1.0);
    let t = tools(Tool::Brush);
    s.pointer_down(Some(Point::new(100.0, 60.0)), &t).unwrap();

    s.viewport_mut()
        .set_display(DisplayRect::from_size(400.0, 240.0));
    s.pointer_move(Some(Point::new(200.0, 60.0)), &t).unwrap();
    assert_eq!(
        s.gesture(),
        GestureState::Drawing {
            last: Point::new(50.0, 15.0)
        }
    );
    assert_eq!(s.paint().unwrap().pixel(50, 22), BLUE);
}

#[test]
fn missing_pointer_position_maps_to_origin() {
    let mut s = session(1.0);
    s.pointer_down(None, &tools(Tool::Brush)).unwrap();
    assert_eq!(s.paint().unwrap().pixel(0, 0), BLUE);
}

#[test]
fn fill_tool_stays_inside_the_outline_and_drag_only_tracks() {
    let mut s = session(1.0);
    s.set_outline(frame()).unwrap();
    assert!(s.mask().unwrap().barrier_count() > 0);

    let t = tools(Tool::Fill);
    let out = s.pointer_down(Some(Point::new(100.0, 60.0)), &t).unwrap();
    assert!(matches!(out, InputEffect::Filled(FillOutcome::Filled { .. })));

    let paint = s.paint().unwrap();
    assert_eq!(paint.pixel(50, 30), BLUE);
    assert_eq!(paint.pixel(25, 25), BLUE);
    assert_eq!(paint.pixel(5, 5), Rgba8::TRANSPARENT);
    assert_eq!(paint.pixel(50, 50), Rgba8::TRANSPARENT);

    let before = s.paint().unwrap().clone();
    assert_eq!(
        s.pointer_move(Some(Point::new(10.0, 10.0)), &t).unwrap(),
        InputEffect::Tracked
    );
    assert_eq!(s.paint().unwrap(), &before);

    s.pointer_up();
    let again = s.pointer_down(Some(Point::new(100.0, 60.0)), &t).unwrap();
    assert_eq!(again, InputEffect::Filled(FillOutcome::AlreadyFilled));
}

#[test]
fn eraser_removes_paint() {
    let mut s = session(1.0);
    s.pointer_down(Some(Point::new(100.0, 60.0)), &tools(Tool::Brush))
        .unwrap();
    s.pointer_up();
    s.pointer_down(Some(Point::new(100.0, 60.0)), &tools(Tool::Eraser))
        .unwrap();
    assert_eq!(s.paint().unwrap().pixel(50, 30), Rgba8::TRANSPARENT);
}

#[test]
fn dpr_change_reallocates_after_debounce_and_keeps_content_in_place() {
    let mut s = session(1.0);
    s.set_outline(frame()).unwrap();
    s.pointer_down(Some(Point::new(100.0, 60.0)), &tools(Tool::Brush))
        .unwrap();
    s.pointer_up();

    let t0 = Instant::now();
    s.viewport_mut().set_dpr(2.0);
    s.notify_resize(t0);
    assert!(s.resize_pending());
    assert_eq!(s.poll(t0 + Duration::from_millis(10)).unwrap(), None);
    assert_eq!(
        s.poll(t0 + Duration::from_millis(80)).unwrap(),
        Some(ResizeEffect::Reallocated)
    );

    let t = s.transform().unwrap();
    assert_eq!((t.width(), t.height()), (200, 120));
    assert_eq!(s.paint().unwrap().width(), 200);
    assert_eq!(s.outline().unwrap().width(), 200);
    assert_eq!(s.mask().unwrap().width(), 200);
    assert_eq!(s.paint().unwrap().pixel(100, 60), BLUE);
    // The outline's top edge sits at logical y=20 at every ratio.
    assert!(s.mask().unwrap().is_barrier(100, 40));
}

#[test]
fn display_only_resize_keeps_buffers() {
    let mut s = session(2.0);
    s.pointer_down(Some(Point::new(100.0, 60.0)), &tools(Tool::Brush))
        .unwrap();
    s.pointer_up();
    let before = s.paint().unwrap().clone();

    s.viewport_mut()
        .set_display(DisplayRect::new(10.0, 10.0, 50.0, 30.0));
    assert_eq!(s.resize_now().unwrap(), ResizeEffect::DisplayOnly);
    assert_eq!(s.paint().unwrap(), &before);
}

#[test]
fn resize_waits_for_gesture_to_end() {
    let mut s = session(1.0);
    let t = tools(Tool::Brush);
    s.pointer_down(Some(Point::new(20.0, 20.0)), &t).unwrap();

    let t0 = Instant::now();
    s.viewport_mut().set_dpr(3.0);
    s.notify_resize(t0);
    assert_eq!(s.poll(t0 + Duration::from_secs(1)).unwrap(), None);
    assert_eq!(s.transform().unwrap().width(), 100);

    s.pointer_up();
    assert_eq!(
        s.poll(t0 + Duration::from_secs(1)).unwrap(),
        Some(ResizeEffect::Reallocated)
    );
    assert_eq!(s.transform().unwrap().width(), 300);
}

#[test]
fn new_image_clears_paint_and_uses_builtin_when_library_is_missing() {
    let mut s = session(1.0);
    s.pointer_down(Some(Point::new(100.0, 60.0)), &tools(Tool::Brush))
        .unwrap();
    s.pointer_up();

    let catalog = OutlineCatalog::load("target/colorbook_session_unit/no_library");
    let mut rng = rand::rngs::StdRng::seed_from_u64(3);
    let entry = s.new_image(&catalog, &mut rng).unwrap();
    assert!(entry.starts_with("images/sample"));
    assert!(s.outline_art().unwrap().name().starts_with("builtin/"));
    assert!(s.paint().unwrap().data().iter().all(|&b| b == 0));
    assert!(s.outline().unwrap().data().iter().any(|&b| b != 0));
}

#[test]
fn export_is_logical_size_at_any_ratio() {
    let mut s = session(3.0);
    s.set_outline(frame()).unwrap();
    let img = s.export().unwrap();
    assert_eq!(img.dimensions(), (100, 60));
    let png = s.export_png().unwrap();
    assert!(!png.is_empty());
}
