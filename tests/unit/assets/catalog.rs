use rand::SeedableRng;

use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("colorbook_catalog_unit").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("images")).unwrap();
    dir
}

const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect x="1" y="1" width="8" height="8" fill="none" stroke="black"/></svg>"#;

#[test]
fn manifest_names_get_images_prefix() {
    let root = scratch("prefix");
    std::fs::write(
        root.join(MANIFEST_PATH),
        serde_json::json!(["cat.svg", "images/dog.svg", "./sub/bird.svg"]).to_string(),
    )
    .unwrap();

    let cat = OutlineCatalog::load(&root);
    assert_eq!(cat.source(), CatalogSource::Manifest);
    assert_eq!(
        cat.entries(),
        &["images/cat.svg", "images/dog.svg", "images/sub/bird.svg"]
    );
}

#[test]
fn missing_empty_or_invalid_manifest_falls_back() {
    let root = scratch("missing");
    let cat = OutlineCatalog::load(&root);
    assert_eq!(cat.source(), CatalogSource::Fallback);
    assert_eq!(cat.entries(), &FALLBACK_FILES);

    std::fs::write(root.join(MANIFEST_PATH), "[]").unwrap();
    assert_eq!(OutlineCatalog::load(&root).source(), CatalogSource::Fallback);

    std::fs::write(root.join(MANIFEST_PATH), r#"{"files": ["a.svg"]}"#).unwrap();
    assert_eq!(OutlineCatalog::load(&root).source(), CatalogSource::Fallback);

    std::fs::write(root.join(MANIFEST_PATH), r#"["../escape.svg"]"#).unwrap();
    assert_eq!(OutlineCatalog::load(&root).source(), CatalogSource::Fallback);
}

#[test]
fn entry_normalization_rejects_escapes() {
    assert_eq!(normalize_entry("a\\b.svg").unwrap(), "images/a/b.svg");
    assert!(normalize_entry("/etc/passwd").is_err());
    assert!(normalize_entry("images/../../x.svg").is_err());
    assert!(normalize_entry("./").is_err());
}

#[test]
fn choose_is_deterministic_for_a_seed_and_covers_entries() {
    let cat = OutlineCatalog::from_entries("lib", ["a.svg", "b.svg", "c.svg"]).unwrap();
    let mut r1 = rand::rngs::StdRng::seed_from_u64(7);
    let mut r2 = rand::rngs::StdRng::seed_from_u64(7);
    for _ in 0..20 {
        assert_eq!(cat.choose(&mut r1), cat.choose(&mut r2));
    }

    let mut seen = std::collections::BTreeSet::new();
    let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    for _ in 0..200 {
        seen.insert(cat.choose(&mut rng).to_owned());
    }
    assert_eq!(seen.len(), 3);
}

#[test]
fn from_entries_rejects_empty_list() {
    let none: [&str; 0] = [];
    assert!(OutlineCatalog::from_entries("lib", none).is_err());
}

#[test]
fn load_outline_reads_svg_and_builtin_covers_failures() {
    let root = scratch("load");
    std::fs::write(root.join("images").join("square.svg"), SQUARE).unwrap();
    std::fs::write(root.join("images").join("broken.svg"), "<svg").unwrap();
    let cat = OutlineCatalog::from_entries(&root, ["square.svg", "broken.svg", "gone.svg"]).unwrap();

    let art = cat.load_outline("square.svg").unwrap();
    assert_eq!(art.size(), (10.0, 10.0));

    assert!(cat.load_outline("broken.svg").is_err());
    assert!(cat.load_outline("gone.svg").is_err());

    let fallback = cat.load_or_builtin("images/gone.svg").unwrap();
    assert!(fallback.name().starts_with("builtin/"));
    assert_eq!(
        fallback.name(),
        crate::assets::builtin::builtin_for("images/gone.svg").name
    );
}

#[test]
fn every_builtin_outline_parses() {
    for b in crate::assets::builtin::BUILTIN_OUTLINES {
        let art = OutlineArt::builtin(b).unwrap();
        let (w, h) = art.size();
        assert!(w > 0.0 && h > 0.0, "{}", b.name);
    }
}
