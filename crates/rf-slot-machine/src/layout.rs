//! Machine layout — where the reels, frame and win burst sit on screen

use serde::{Deserialize, Serialize};

use rf_reel::ReelConfig;

/// Screen and reel block dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Height of one reel row
    pub reel_height: f32,
    /// Vertical gap between reel rows
    pub reel_spacing: f32,
    /// Border around the reel block for the background and mask
    pub frame_padding: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 720.0,
            reel_height: 150.0,
            reel_spacing: 10.0,
            frame_padding: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Resolved positions, computed once at machine construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineLayout {
    /// Screen position of the machine container, reel block centred
    pub origin: Point,
    /// Vertical offset of each reel row inside the container
    pub reel_rows: Vec<f32>,
    /// Background fill, also used as the reel mask (container space)
    pub background: Rect,
    /// Anchor for the frame and win animations (container space)
    pub animation_anchor: Point,
}

impl MachineLayout {
    pub fn compute(layout: &LayoutConfig, reel: &ReelConfig, reel_count: usize) -> Self {
        let strip_span = reel.symbol_size * reel.symbols_per_reel as f32;
        let block_height = Self::block_height(layout, reel_count);

        let origin = Point::new(
            layout.screen_width / 2.0 - strip_span / 2.0,
            layout.screen_height / 2.0 - block_height / 2.0,
        );

        let reel_rows = (0..reel_count)
            .map(|i| i as f32 * (layout.reel_height + layout.reel_spacing) - layout.reel_spacing * 2.0)
            .collect();

        let background = Rect::new(
            -layout.frame_padding,
            -layout.frame_padding,
            reel.symbol_pitch() * reel.symbols_per_reel as f32 + layout.reel_spacing,
            block_height + layout.frame_padding * 2.0,
        );

        Self {
            origin,
            reel_rows,
            background,
            animation_anchor: Point::new(strip_span / 2.0, block_height / 2.0),
        }
    }

    /// Height of all reel rows plus the gaps between them
    pub fn block_height(layout: &LayoutConfig, reel_count: usize) -> f32 {
        layout.reel_height * reel_count as f32
            + layout.reel_spacing * reel_count.saturating_sub(1) as f32
    }

    /// Screen-space rectangle of the background
    pub fn background_on_screen(&self) -> Rect {
        Rect::new(
            self.origin.x + self.background.x,
            self.origin.y + self.background.y,
            self.background.width,
            self.background.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_three_reel_layout() {
        let layout = MachineLayout::compute(&LayoutConfig::default(), &ReelConfig::default(), 3);

        assert_relative_eq!(layout.origin.x, 265.0);
        assert_relative_eq!(layout.origin.y, 125.0);
        assert_eq!(layout.reel_rows, vec![-20.0, 140.0, 300.0]);
        assert_eq!(layout.background, Rect::new(-20.0, -20.0, 810.0, 510.0));
        assert_eq!(layout.animation_anchor, Point::new(375.0, 235.0));
    }

    #[test]
    fn test_single_reel_block_has_no_gap() {
        let config = LayoutConfig::default();
        assert_relative_eq!(MachineLayout::block_height(&config, 1), 150.0);
        assert_relative_eq!(MachineLayout::block_height(&config, 0), 0.0);
    }

    #[test]
    fn test_background_on_screen_is_centred() {
        let config = LayoutConfig::default();
        let layout = MachineLayout::compute(&config, &ReelConfig::default(), 3);
        let screen = layout.background_on_screen();

        assert!(screen.contains(Point::new(
            config.screen_width / 2.0,
            config.screen_height / 2.0
        )));
        assert_relative_eq!(screen.y + screen.height / 2.0, config.screen_height / 2.0);
    }
}
