//! Symbol strip — the row of sprites a reel scrolls

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ReelConfig;
use crate::texture::{TextureHandle, TextureProvider};

/// One symbol sprite on the strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripSymbol {
    /// Texture name the symbol was built from
    pub texture_name: String,
    /// Resolved texture, `None` if the provider did not have it
    pub texture: Option<TextureHandle>,
    /// Horizontal position relative to the strip origin
    pub x: f32,
}

/// Ordered symbols with their resting positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolStrip {
    symbols: Vec<StripSymbol>,
    width: f32,
}

impl SymbolStrip {
    /// Fill a strip with `symbols_per_reel` symbols picked uniformly from the configured textures
    pub fn random<R: Rng>(config: &ReelConfig, textures: &dyn TextureProvider, rng: &mut R) -> Self {
        let names: Vec<&str> = (0..config.symbols_per_reel)
            .filter_map(|_| {
                if config.symbol_textures.is_empty() {
                    return None;
                }
                let pick = rng.random_range(0..config.symbol_textures.len());
                Some(config.symbol_textures[pick].as_str())
            })
            .collect();
        Self::from_names(config, &names, textures)
    }

    /// Build a strip from explicit texture names, laid out left to right
    pub fn from_names<S: AsRef<str>>(
        config: &ReelConfig,
        names: &[S],
        textures: &dyn TextureProvider,
    ) -> Self {
        let pitch = config.symbol_pitch();
        let lead_in = config.symbol_size * 0.25;

        let symbols: Vec<StripSymbol> = names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let name = name.as_ref();
                let texture = textures.texture(name);
                if texture.is_none() {
                    log::warn!("[Reel] Missing symbol texture '{}'", name);
                }
                StripSymbol {
                    texture_name: name.to_string(),
                    texture,
                    x: pitch * index as f32 - lead_in,
                }
            })
            .collect();

        let width = match symbols.len() {
            0 => 0.0,
            n => pitch * (n - 1) as f32 + config.symbol_size,
        };

        Self { symbols, width }
    }

    /// Visual extent of the strip, first symbol's left edge to last symbol's right edge
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn symbols(&self) -> &[StripSymbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{NoTextures, TextureAtlas};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn atlas(config: &ReelConfig) -> TextureAtlas {
        TextureAtlas::with_textures(config.symbol_textures.iter().cloned())
    }

    #[test]
    fn test_layout_positions() {
        let config = ReelConfig::default();
        let strip = SymbolStrip::from_names(
            &config,
            &["symbol1.png", "symbol2.png", "symbol3.png"],
            &atlas(&config),
        );

        let xs: Vec<f32> = strip.symbols().iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![-37.5, 122.5, 282.5]);
        // 2 pitches + one symbol
        assert_eq!(strip.width(), 470.0);
    }

    #[test]
    fn test_random_strip_uses_configured_textures() {
        let config = ReelConfig::default();
        let textures = atlas(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let strip = SymbolStrip::random(&config, &textures, &mut rng);
        assert_eq!(strip.len(), config.symbols_per_reel);
        for symbol in strip.symbols() {
            assert!(config.symbol_textures.contains(&symbol.texture_name));
            assert!(symbol.texture.is_some());
        }
    }

    #[test]
    fn test_random_strip_is_seed_reproducible() {
        let config = ReelConfig::default();
        let textures = atlas(&config);

        let a = SymbolStrip::random(&config, &textures, &mut ChaCha8Rng::seed_from_u64(42));
        let b = SymbolStrip::random(&config, &textures, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_textures_keep_layout() {
        let config = ReelConfig::default();
        let strip = SymbolStrip::from_names(&config, &["symbol1.png", "symbol9.png"], &NoTextures);

        assert_eq!(strip.len(), 2);
        assert!(strip.symbols().iter().all(|s| s.texture.is_none()));
        assert_eq!(strip.width(), 310.0);
    }

    #[test]
    fn test_empty_strip_has_zero_width() {
        let config = ReelConfig::default();
        let strip = SymbolStrip::from_names::<&str>(&config, &[], &NoTextures);
        assert!(strip.is_empty());
        assert_eq!(strip.width(), 0.0);
    }
}
