//! Line art compiled into the binary, used when no outline can be read from disk.

use crate::foundation::math::Fnv1a64;

/// A named embedded SVG outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuiltinOutline {
    /// Stable identifier.
    pub name: &'static str,
    /// SVG document.
    pub svg: &'static str,
}

const FLOWER: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="400" viewBox="0 0 400 400">
  <g fill="none" stroke="#000" stroke-width="6" stroke-linejoin="round">
    <circle cx="200" cy="150" r="40"/>
    <ellipse cx="200" cy="70" rx="34" ry="42"/>
    <ellipse cx="200" cy="230" rx="34" ry="42"/>
    <ellipse cx="120" cy="150" rx="42" ry="34"/>
    <ellipse cx="280" cy="150" rx="42" ry="34"/>
    <path d="M200 272 L200 380"/>
    <path d="M200 330 C160 300 130 310 120 330 C150 350 180 345 200 330 Z"/>
    <path d="M200 350 C240 320 270 330 280 350 C250 370 220 365 200 350 Z"/>
  </g>
</svg>"##;

const HOUSE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="480" height="400" viewBox="0 0 480 400">
  <g fill="none" stroke="#000" stroke-width="6" stroke-linejoin="round">
    <path d="M60 180 L240 40 L420 180 Z"/>
    <rect x="90" y="180" width="300" height="190"/>
    <rect x="210" y="260" width="60" height="110"/>
    <rect x="120" y="210" width="60" height="60"/>
    <rect x="300" y="210" width="60" height="60"/>
    <path d="M150 210 L150 270 M120 240 L180 240"/>
    <path d="M330 210 L330 270 M300 240 L360 240"/>
    <circle cx="240" cy="130" r="22"/>
  </g>
</svg>"##;

const FISH: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="500" height="300" viewBox="0 0 500 300">
  <g fill="none" stroke="#000" stroke-width="6" stroke-linejoin="round">
    <path d="M60 150 C120 50 300 40 370 150 C300 260 120 250 60 150 Z"/>
    <path d="M370 150 L460 80 L440 150 L460 220 Z"/>
    <circle cx="130" cy="130" r="14"/>
    <path d="M200 70 C215 110 215 190 200 230"/>
    <path d="M260 68 C275 110 275 190 260 232"/>
    <path d="M190 60 C220 20 280 20 300 60"/>
  </g>
</svg>"##;

/// Every embedded outline.
pub const BUILTIN_OUTLINES: [BuiltinOutline; 3] = [
    BuiltinOutline {
        name: "builtin/flower",
        svg: FLOWER,
    },
    BuiltinOutline {
        name: "builtin/house",
        svg: HOUSE,
    },
    BuiltinOutline {
        name: "builtin/fish",
        svg: FISH,
    },
];

/// Pick a built-in outline deterministically from `key` (typically the path that failed to load).
pub fn builtin_for(key: &str) -> BuiltinOutline {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(key.as_bytes());
    let idx = (h.finish() % BUILTIN_OUTLINES.len() as u64) as usize;
    BUILTIN_OUTLINES[idx]
}
