use super::*;

#[test]
fn defaults_match_stock_settings() {
    let cfg = ColoringConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.logical_size().unwrap(), LogicalSize::new(1200, 720).unwrap());
    assert_eq!(cfg.fill_tolerance, 30);
    assert_eq!(cfg.barrier_alpha_threshold, 10);
    assert_eq!(cfg.resize_debounce(), Duration::from_millis(80));
    assert_eq!(cfg.color.to_hex(), "#ff6b6b");

    let tools = cfg.default_tool_state();
    assert_eq!(tools.tool, Tool::Brush);
    assert_eq!(tools.brush_size, 12.0);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = ColoringConfig::from_json_str(
        &serde_json::json!({
            "logical_width": 800,
            "color": "#00f",
        })
        .to_string(),
    )
    .unwrap();
    assert_eq!(cfg.logical_width, 800);
    assert_eq!(cfg.logical_height, 720);
    assert_eq!(cfg.color, Rgba8::opaque(0, 0, 255));
}

#[test]
fn unknown_fields_and_bad_values_are_rejected() {
    let err = ColoringConfig::from_json_str(r#"{"tolerance": 3}"#).unwrap_err();
    assert!(matches!(err, ColorbookError::Serde(_)));

    let err = ColoringConfig::from_json_str(r#"{"logical_height": 0}"#).unwrap_err();
    assert!(matches!(err, ColorbookError::Validation(_)));

    let err = ColoringConfig::from_json_str(r#"{"brush_size": -1.0}"#).unwrap_err();
    assert!(matches!(err, ColorbookError::Validation(_)));
}

#[test]
fn from_json_file_reports_missing_path() {
    let err =
        ColoringConfig::from_json_file(std::path::Path::new("target/nope/colorbook.json"))
            .unwrap_err();
    assert!(err.to_string().contains("colorbook.json"));
}
