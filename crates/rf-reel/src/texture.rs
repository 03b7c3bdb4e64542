//! Texture lookup seam
//!
//! Reels never load images. They ask a [`TextureProvider`] for a handle by name
//! and hand that handle to whatever renders the strip.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Opaque handle to a loaded texture
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle {
    /// Provider-assigned id
    pub id: u32,
    /// Name the texture was requested by
    pub name: String,
}

/// Resolves texture names to handles
pub trait TextureProvider: Send + Sync {
    /// Look up a texture; `None` when the asset is not loaded
    fn texture(&self, name: &str) -> Option<TextureHandle>;
}

/// Provider with no assets. Every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTextures;

impl TextureProvider for NoTextures {
    fn texture(&self, _name: &str) -> Option<TextureHandle> {
        None
    }
}

/// In-memory name → handle table, filled once after asset loading
#[derive(Debug, Clone, Default)]
pub struct TextureAtlas {
    textures: HashMap<String, TextureHandle>,
}

impl TextureAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an atlas holding every name, ids assigned in order
    pub fn with_textures<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut atlas = Self::new();
        for name in names {
            atlas.insert(name);
        }
        atlas
    }

    /// Register a texture, returning its handle. Re-inserting a name keeps the first id.
    pub fn insert(&mut self, name: impl Into<String>) -> TextureHandle {
        let name = name.into();
        let next_id = self.textures.len() as u32;
        self.textures
            .entry(name.clone())
            .or_insert_with(|| TextureHandle { id: next_id, name })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureProvider for TextureAtlas {
    fn texture(&self, name: &str) -> Option<TextureHandle> {
        self.textures.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atlas_lookup() {
        let atlas = TextureAtlas::with_textures(["symbol1.png", "symbol2.png"]);
        assert_eq!(atlas.len(), 2);

        let handle = atlas.texture("symbol2.png").unwrap();
        assert_eq!(handle.id, 1);
        assert_eq!(handle.name, "symbol2.png");
        assert!(atlas.texture("missing.png").is_none());
    }

    #[test]
    fn test_reinsert_keeps_id() {
        let mut atlas = TextureAtlas::new();
        let first = atlas.insert("button_spin.png");
        let again = atlas.insert("button_spin.png");
        assert_eq!(first, again);
        assert_eq!(atlas.len(), 1);
    }

    #[test]
    fn test_no_textures_misses() {
        assert!(NoTextures.texture("symbol1.png").is_none());
    }
}
