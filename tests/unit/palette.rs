use super::*;

fn c(hex: &str) -> Rgba8 {
    Rgba8::from_hex(hex).unwrap()
}

#[test]
fn default_palette_matches_stock_hex_list() {
    assert_eq!(DEFAULT_PALETTE.len(), 21);
    assert_eq!(DEFAULT_PALETTE[0].to_hex(), "#000000");
    assert_eq!(DEFAULT_PALETTE[6].to_hex(), "#e63946");
    assert_eq!(DEFAULT_PALETTE[20].to_hex(), "#3b82f6");
    assert!(DEFAULT_PALETTE.iter().all(|p| p.a == 255));
}

#[test]
fn add_is_newest_first_and_ignores_duplicates() {
    let mut f = Favorites::new();
    assert!(f.add(c("#111111")));
    assert!(f.add(c("#222222")));
    assert!(!f.add(c("#111111")));
    assert_eq!(f.colors(), &[c("#222222"), c("#111111")]);
}

#[test]
fn add_caps_the_list() {
    let mut f = Favorites::new();
    for i in 0..60u8 {
        f.add(Rgba8::opaque(i, 0, 0));
    }
    assert_eq!(f.len(), MAX_FAVORITES);
    assert_eq!(f.colors()[0], Rgba8::opaque(59, 0, 0));
    assert!(!f.colors().contains(&Rgba8::opaque(0, 0, 0)));
}

#[test]
fn remove_and_clear() {
    let mut f = Favorites::new();
    f.add(c("#abcdef"));
    f.add(c("#123456"));
    assert!(f.remove(c("#abcdef")));
    assert!(!f.remove(c("#abcdef")));
    assert_eq!(f.len(), 1);
    f.clear();
    assert!(f.is_empty());
}

#[test]
fn json_keeps_order_and_uses_hex() {
    let f = Favorites::from_json_str(r##"["#ff0000", "#00ff00", "#ff0000"]"##).unwrap();
    assert_eq!(f.colors(), &[c("#ff0000"), c("#00ff00")]);

    let json = serde_json::to_value(&f).unwrap();
    assert_eq!(json, serde_json::json!(["#ff0000", "#00ff00"]));
}

#[test]
fn load_treats_missing_and_corrupt_files_as_empty() {
    let dir = std::path::PathBuf::from("target").join("colorbook_palette_unit");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("favorites.json");

    assert!(Favorites::load(&path).is_empty());

    let mut f = Favorites::new();
    f.add(c("#0b8a3e"));
    f.add(c("#ffd16680"));
    f.save(&path).unwrap();
    assert_eq!(Favorites::load(&path), f);

    std::fs::write(&path, "{not json").unwrap();
    assert!(Favorites::load(&path).is_empty());
}
