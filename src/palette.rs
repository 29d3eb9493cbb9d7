//! Built-in palette and the user's favorite colors.

use std::path::Path;

use anyhow::Context;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{ColorbookError, ColorbookResult};

/// Most favorites kept; older ones are dropped.
pub const MAX_FAVORITES: usize = 48;

/// The stock palette, darkest neutrals first.
pub const DEFAULT_PALETTE: [Rgba8; 21] = [
    Rgba8::opaque(0x00, 0x00, 0x00),
    Rgba8::opaque(0x47, 0x47, 0x47),
    Rgba8::opaque(0x7f, 0x7f, 0x7f),
    Rgba8::opaque(0xbf, 0xbf, 0xbf),
    Rgba8::opaque(0xff, 0xff, 0xff),
    Rgba8::opaque(0xff, 0x4d, 0x4d),
    Rgba8::opaque(0xe6, 0x39, 0x46),
    Rgba8::opaque(0xb0, 0x00, 0x20),
    Rgba8::opaque(0xff, 0xb7, 0x03),
    Rgba8::opaque(0xfb, 0x85, 0x00),
    Rgba8::opaque(0xff, 0xd1, 0x66),
    Rgba8::opaque(0xff, 0xd5, 0x4f),
    Rgba8::opaque(0xc5, 0xa3, 0x00),
    Rgba8::opaque(0x9a, 0x7d, 0x00),
    Rgba8::opaque(0x4c, 0xaf, 0x50),
    Rgba8::opaque(0x2e, 0x8b, 0x57),
    Rgba8::opaque(0x0b, 0x8a, 0x3e),
    Rgba8::opaque(0x06, 0xb6, 0xd4),
    Rgba8::opaque(0x08, 0x91, 0xb2),
    Rgba8::opaque(0x05, 0x66, 0x8d),
    Rgba8::opaque(0x3b, 0x82, 0xf6),
];

/// User-picked colors, newest first, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    colors: Vec<Rgba8>,
}

impl Favorites {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Colors, newest first.
    pub fn colors(&self) -> &[Rgba8] {
        &self.colors
    }

    /// Number of favorites.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// `true` when no favorites are stored.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Insert at the front. Returns `false` if the color was already present (list unchanged).
    pub fn add(&mut self, color: Rgba8) -> bool {
        if self.colors.contains(&color) {
            return false;
        }
        self.colors.insert(0, color);
        self.colors.truncate(MAX_FAVORITES);
        true
    }

    /// Remove a color. Returns `false` if it was not present.
    pub fn remove(&mut self, color: Rgba8) -> bool {
        let before = self.colors.len();
        self.colors.retain(|c| *c != color);
        self.colors.len() != before
    }

    /// Drop every favorite.
    pub fn clear(&mut self) {
        self.colors.clear();
    }

    /// Parse a JSON array of colors. Duplicates are dropped and the cap is applied.
    pub fn from_json_str(s: &str) -> ColorbookResult<Self> {
        let raw: Vec<Rgba8> =
            serde_json::from_str(s).map_err(|e| ColorbookError::serde(e.to_string()))?;
        let mut colors = Vec::with_capacity(raw.len().min(MAX_FAVORITES));
        for c in raw {
            if colors.len() == MAX_FAVORITES {
                break;
            }
            if !colors.contains(&c) {
                colors.push(c);
            }
        }
        Ok(Self { colors })
    }

    /// Load from a JSON file. A missing or corrupt file yields an empty list.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Self::new(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "unreadable favorites file");
                return Self::new();
            }
        };
        Self::from_json_str(&text).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "corrupt favorites file ignored");
            Self::new()
        })
    }

    /// Write as a JSON array of hex strings.
    pub fn save(&self, path: &Path) -> ColorbookResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create favorites dir '{}'", parent.display()))?;
        }
        let json =
            serde_json::to_string_pretty(self).map_err(|e| ColorbookError::serde(e.to_string()))?;
        std::fs::write(path, json)
            .with_context(|| format!("write favorites '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/palette.rs"]
mod tests;
