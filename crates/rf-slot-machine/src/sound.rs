//! Sound bank — alias → clip registry

use std::collections::HashMap;

use crate::collaborators::SoundPlayer;

/// A loaded, playable sound
pub trait SoundClip: Send {
    fn play(&mut self);
    fn stop(&mut self);
}

/// Named sound clips. Playing or stopping an unknown alias does nothing.
#[derive(Default)]
pub struct SoundBank {
    clips: HashMap<String, Box<dyn SoundClip>>,
}

impl SoundBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clip under `alias`, returning the clip it replaced
    pub fn add(
        &mut self,
        alias: impl Into<String>,
        clip: impl SoundClip + 'static,
    ) -> Option<Box<dyn SoundClip>> {
        self.clips.insert(alias.into(), Box::new(clip))
    }

    pub fn remove(&mut self, alias: &str) -> Option<Box<dyn SoundClip>> {
        self.clips.remove(alias)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.clips.contains_key(alias)
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.clips.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

impl SoundPlayer for SoundBank {
    fn play(&mut self, alias: &str) {
        match self.clips.get_mut(alias) {
            Some(clip) => clip.play(),
            None => log::debug!("[SoundBank] play: unknown alias '{}'", alias),
        }
    }

    fn stop(&mut self, alias: &str) {
        match self.clips.get_mut(alias) {
            Some(clip) => clip.stop(),
            None => log::debug!("[SoundBank] stop: unknown alias '{}'", alias),
        }
    }
}

impl std::fmt::Debug for SoundBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut aliases: Vec<&str> = self.aliases().collect();
        aliases.sort_unstable();
        f.debug_struct("SoundBank").field("aliases", &aliases).finish()
    }
}
