//! Spin button — texture-swapping trigger control

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use rf_reel::{TextureHandle, TextureProvider};

use crate::collaborators::SpinTrigger;

/// Button art for the two trigger states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonTextures {
    pub enabled: String,
    pub disabled: String,
}

impl Default for ButtonTextures {
    fn default() -> Self {
        Self {
            enabled: "button_spin.png".into(),
            disabled: "button_spin_disabled.png".into(),
        }
    }
}

/// Sprite button that swaps art and interactivity with its enabled state
pub struct SpinButton {
    textures: Arc<dyn TextureProvider>,
    art: ButtonTextures,
    texture: Option<TextureHandle>,
    interactive: bool,
}

impl SpinButton {
    /// Create an enabled button
    pub fn new(textures: Arc<dyn TextureProvider>, art: ButtonTextures) -> Self {
        let texture = textures.texture(&art.enabled);
        Self {
            textures,
            art,
            texture,
            interactive: true,
        }
    }

    /// Texture to draw, `None` if the art is not loaded
    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

impl SpinTrigger for SpinButton {
    fn set_enabled(&mut self, enabled: bool) {
        let name = if enabled {
            &self.art.enabled
        } else {
            &self.art.disabled
        };
        self.texture = self.textures.texture(name);
        self.interactive = enabled;
    }
}

impl std::fmt::Debug for SpinButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpinButton")
            .field("texture", &self.texture)
            .field("interactive", &self.interactive)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_reel::{NoTextures, TextureAtlas};

    fn atlas() -> Arc<dyn TextureProvider> {
        Arc::new(TextureAtlas::with_textures([
            "button_spin.png",
            "button_spin_disabled.png",
        ]))
    }

    #[test]
    fn test_starts_enabled() {
        let button = SpinButton::new(atlas(), ButtonTextures::default());
        assert!(button.is_interactive());
        assert_eq!(button.texture().unwrap().name, "button_spin.png");
    }

    #[test]
    fn test_toggle_swaps_art() {
        let mut button = SpinButton::new(atlas(), ButtonTextures::default());

        button.set_enabled(false);
        assert!(!button.is_interactive());
        assert_eq!(button.texture().unwrap().name, "button_spin_disabled.png");

        button.set_enabled(true);
        assert!(button.is_interactive());
        assert_eq!(button.texture().unwrap().name, "button_spin.png");
    }

    #[test]
    fn test_missing_art_still_toggles_interaction() {
        let mut button = SpinButton::new(Arc::new(NoTextures), ButtonTextures::default());
        button.set_enabled(false);
        assert!(!button.is_interactive());
        assert!(button.texture().is_none());
    }
}
