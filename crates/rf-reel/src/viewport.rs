//! Display width seam used by the wraparound check

use parking_lot::RwLock;

/// Default display width when nothing else is known
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;

/// Reports the current display width (pixels)
pub trait ViewportSize: Send + Sync {
    fn width(&self) -> f32;
}

/// Fixed width, never changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewport(pub f32);

impl Default for FixedViewport {
    fn default() -> Self {
        Self(DEFAULT_VIEWPORT_WIDTH)
    }
}

impl ViewportSize for FixedViewport {
    fn width(&self) -> f32 {
        self.0
    }
}

/// Width shared between the window host and every reel.
///
/// The host calls [`SharedViewport::resize`] on window resize; reels read the
/// new width on their next wraparound check.
#[derive(Debug)]
pub struct SharedViewport {
    width: RwLock<f32>,
}

impl SharedViewport {
    pub fn new(width: f32) -> Self {
        Self {
            width: RwLock::new(width),
        }
    }

    pub fn resize(&self, width: f32) {
        *self.width.write() = width;
    }
}

impl Default for SharedViewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH)
    }
}

impl ViewportSize for SharedViewport {
    fn width(&self) -> f32 {
        *self.width.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_viewport_resize() {
        let viewport = SharedViewport::new(800.0);
        assert_eq!(viewport.width(), 800.0);

        viewport.resize(1920.0);
        assert_eq!(viewport.width(), 1920.0);
    }

    #[test]
    fn test_fixed_default() {
        assert_eq!(FixedViewport::default().width(), DEFAULT_VIEWPORT_WIDTH);
    }
}
