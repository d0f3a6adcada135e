//! Scrolling viewport that keeps the player on screen

use std::ops::Range;

use glam::Vec2;

use crate::sim::{Level, Rect};

/// A window onto the level, in screen pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Visible area (pixels)
    pub size: Vec2,
    /// Top-left corner of the visible area within the level (pixels)
    pub scroll: Vec2,
    /// Pixels per tile
    pub scale: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            scroll: Vec2::ZERO,
            scale,
        }
    }

    /// Size of the whole level in pixels
    pub fn level_size(&self, level: &Level) -> Vec2 {
        Vec2::new(level.width as f32, level.height as f32) * self.scale
    }

    /// Scroll so the center of `focus` stays at least a third of the
    /// viewport width away from every edge, without leaving the level.
    pub fn follow(&mut self, focus: &Rect, level: &Level) {
        let center = Vec2::from(focus.center()) * self.scale;
        let margin = self.size.x / 3.0;
        let near = self.scroll + margin;
        let far = self.scroll + self.size - margin;

        if center.x < near.x {
            self.scroll.x = center.x - margin;
        } else if center.x > far.x {
            self.scroll.x = center.x + margin - self.size.x;
        }
        if center.y < near.y {
            self.scroll.y = center.y - margin;
        } else if center.y > far.y {
            self.scroll.y = center.y + margin - self.size.y;
        }

        let max_scroll = (self.level_size(level) - self.size).max(Vec2::ZERO);
        self.scroll = self.scroll.clamp(Vec2::ZERO, max_scroll);
    }

    /// Jump straight to the scroll position `follow` would settle on
    pub fn center_on(&mut self, focus: &Rect, level: &Level) {
        let center = Vec2::from(focus.center()) * self.scale;
        self.scroll = center - self.size / 2.0;
        let max_scroll = (self.level_size(level) - self.size).max(Vec2::ZERO);
        self.scroll = self.scroll.clamp(Vec2::ZERO, max_scroll);
    }

    /// World position (tiles) to screen position (pixels)
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world * self.scale - self.scroll
    }

    /// Tile columns and rows at least partly on screen
    pub fn visible_tiles(&self, level: &Level) -> (Range<usize>, Range<usize>) {
        let first = (self.scroll / self.scale).floor().max(Vec2::ZERO);
        let last = ((self.scroll + self.size) / self.scale).ceil();
        let cols = first.x as usize..(last.x.max(0.0) as usize).min(level.width);
        let rows = first.y as usize..(last.y.max(0.0) as usize).min(level.height);
        (cols, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Extent, Point};

    fn wide_level() -> Level {
        let row = ".".repeat(100);
        let plan = format!("{row}\n{row}\n@{}", &row[1..]);
        Level::parse(&plan).unwrap()
    }

    fn focus(x: f32, y: f32) -> Rect {
        Rect::new(Point::new(x, y), Extent::new(0.8, 1.5))
    }

    #[test]
    fn test_scrolls_right_past_margin() {
        let level = wide_level();
        let mut view = Viewport::new(600.0, 450.0, 20.0);

        view.follow(&focus(50.0, 0.0), &level);
        // center.x = 50.4 * 20 = 1008; 1008 + 200 - 600
        assert!((view.scroll.x - 608.0).abs() < 1e-3);

        // Small moves inside the margin box leave the scroll alone
        view.follow(&focus(49.0, 0.0), &level);
        assert!((view.scroll.x - 608.0).abs() < 1e-3);
    }

    #[test]
    fn test_scroll_clamped_to_level() {
        let level = wide_level();
        let mut view = Viewport::new(600.0, 450.0, 20.0);

        view.follow(&focus(99.0, 0.0), &level);
        assert_eq!(view.scroll.x, 2000.0 - 600.0);
        // Level is shorter than the viewport: no vertical scroll
        assert_eq!(view.scroll.y, 0.0);

        view.follow(&focus(0.0, 0.0), &level);
        assert_eq!(view.scroll.x, 0.0);
    }

    #[test]
    fn test_visible_tiles() {
        let level = wide_level();
        let mut view = Viewport::new(600.0, 450.0, 20.0);
        view.scroll = Vec2::new(610.0, 0.0);
        let (cols, rows) = view.visible_tiles(&level);
        assert_eq!(cols, 30..61);
        assert_eq!(rows, 0..3);
        assert_eq!(view.to_screen(Vec2::new(31.0, 1.0)), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_center_on() {
        let level = wide_level();
        let mut view = Viewport::new(600.0, 450.0, 20.0);
        view.center_on(&focus(50.0, 0.0), &level);
        assert!((view.scroll.x - (1008.0 - 300.0)).abs() < 1e-3);
    }
}
