//! Capability interfaces for everything the controller does not own
//!
//! Sound, the spin button, animations, textures and the viewport are injected
//! at construction. Each has a no-op implementation, so a controller built
//! with [`Collaborators::default`] runs the full spin sequence silently.
//!
//! Hosts that need to observe a collaborator after handing it over can pass an
//! `Arc<Mutex<T>>`; the blanket impls below forward through the lock.

use std::sync::Arc;

use parking_lot::Mutex;

use rf_reel::{NoTextures, SharedViewport, TextureProvider, ViewportSize};

// ═══════════════════════════════════════════════════════════════════════════════
// TRAITS
// ═══════════════════════════════════════════════════════════════════════════════

/// Fire-and-forget sound cues. Unknown aliases must be ignored.
pub trait SoundPlayer: Send {
    fn play(&mut self, alias: &str);
    fn stop(&mut self, alias: &str);
}

/// The control that starts a spin (button, key binding...)
pub trait SpinTrigger: Send {
    /// Enable or disable both the visual and the interaction
    fn set_enabled(&mut self, enabled: bool);
}

/// Skeletal animation instance (frame idle loop, win burst)
pub trait AnimationHandle: Send {
    fn has_animation(&self, name: &str) -> bool;
    fn set_animation(&mut self, track: usize, name: &str, looped: bool);
    fn set_visible(&mut self, visible: bool);
}

// ═══════════════════════════════════════════════════════════════════════════════
// NO-OP DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct Silence;

impl SoundPlayer for Silence {
    fn play(&mut self, _alias: &str) {}
    fn stop(&mut self, _alias: &str) {}
}

/// Trigger with nothing attached
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrigger;

impl SpinTrigger for NoTrigger {
    fn set_enabled(&mut self, _enabled: bool) {}
}

/// Animation slot with no skeleton loaded. Reports no animations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnimation;

impl AnimationHandle for NoAnimation {
    fn has_animation(&self, _name: &str) -> bool {
        false
    }
    fn set_animation(&mut self, _track: usize, _name: &str, _looped: bool) {}
    fn set_visible(&mut self, _visible: bool) {}
}

// ═══════════════════════════════════════════════════════════════════════════════
// SHARED FORWARDING
// ═══════════════════════════════════════════════════════════════════════════════

impl<T: SoundPlayer> SoundPlayer for Arc<Mutex<T>> {
    fn play(&mut self, alias: &str) {
        self.lock().play(alias);
    }
    fn stop(&mut self, alias: &str) {
        self.lock().stop(alias);
    }
}

impl<T: SpinTrigger> SpinTrigger for Arc<Mutex<T>> {
    fn set_enabled(&mut self, enabled: bool) {
        self.lock().set_enabled(enabled);
    }
}

impl<T: AnimationHandle> AnimationHandle for Arc<Mutex<T>> {
    fn has_animation(&self, name: &str) -> bool {
        self.lock().has_animation(name)
    }
    fn set_animation(&mut self, track: usize, name: &str, looped: bool) {
        self.lock().set_animation(track, name, looped);
    }
    fn set_visible(&mut self, visible: bool) {
        self.lock().set_visible(visible);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// BUNDLE
// ═══════════════════════════════════════════════════════════════════════════════

/// Everything injected into the controller
pub struct Collaborators {
    pub sound: Box<dyn SoundPlayer>,
    pub trigger: Box<dyn SpinTrigger>,
    /// Frame animation, plays its idle loop for the controller's lifetime
    pub idle_animation: Box<dyn AnimationHandle>,
    /// Shown and started on a win
    pub win_animation: Box<dyn AnimationHandle>,
    pub textures: Arc<dyn TextureProvider>,
    pub viewport: Arc<dyn ViewportSize>,
}

impl Collaborators {
    pub fn with_sound(mut self, sound: impl SoundPlayer + 'static) -> Self {
        self.sound = Box::new(sound);
        self
    }

    pub fn with_trigger(mut self, trigger: impl SpinTrigger + 'static) -> Self {
        self.trigger = Box::new(trigger);
        self
    }

    pub fn with_idle_animation(mut self, animation: impl AnimationHandle + 'static) -> Self {
        self.idle_animation = Box::new(animation);
        self
    }

    pub fn with_win_animation(mut self, animation: impl AnimationHandle + 'static) -> Self {
        self.win_animation = Box::new(animation);
        self
    }

    pub fn with_textures(mut self, textures: Arc<dyn TextureProvider>) -> Self {
        self.textures = textures;
        self
    }

    pub fn with_viewport(mut self, viewport: Arc<dyn ViewportSize>) -> Self {
        self.viewport = viewport;
        self
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            sound: Box::new(Silence),
            trigger: Box::new(NoTrigger),
            idle_animation: Box::new(NoAnimation),
            win_animation: Box::new(NoAnimation),
            textures: Arc::new(NoTextures),
            viewport: Arc::new(SharedViewport::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSound {
        plays: Vec<String>,
    }

    impl SoundPlayer for CountingSound {
        fn play(&mut self, alias: &str) {
            self.plays.push(alias.to_string());
        }
        fn stop(&mut self, _alias: &str) {}
    }

    #[test]
    fn test_defaults_are_noops() {
        let mut collaborators = Collaborators::default();
        collaborators.sound.play("anything");
        collaborators.trigger.set_enabled(false);
        assert!(!collaborators.win_animation.has_animation("start"));
        assert!(collaborators.textures.texture("symbol1.png").is_none());
        assert!(collaborators.viewport.width() > 0.0);
    }

    #[test]
    fn test_shared_sound_forwards() {
        let shared = Arc::new(Mutex::new(CountingSound::default()));
        let mut collaborators = Collaborators::default().with_sound(shared.clone());

        collaborators.sound.play("win");
        assert_eq!(shared.lock().plays, vec!["win".to_string()]);
    }
}
