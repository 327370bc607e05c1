use crate::config::CursorConfig;
use crate::gfx::{anim::approach, math::Vec2};

/// Where the cursor dot and follower ring are drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorVisual {
    pub visible: bool,
    /// Top-left of the dot.
    pub dot: Vec2,
    /// Top-left of the follower ring before scaling.
    pub follower: Vec2,
    pub follower_scale: f32,
    /// Diameters, twice the respective offsets so the shapes center on the
    /// pointer.
    pub dot_size: f32,
    pub follower_size: f32,
    pub hovered: bool,
}

/// Last known pointer position plus the hover flag.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    sample: Vec2,
    present: bool,
    hovered: bool,
    // displayed follower position, eased toward sample - follower_offset
    follower: Vec2,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            sample: Vec2::ZERO,
            present: false,
            hovered: false,
            follower: Vec2::ZERO,
        }
    }

    pub fn on_enter(&mut self, pos: Vec2, cfg: &CursorConfig) {
        self.sample = pos;
        if !self.present {
            // no trail from a stale position on re-entry
            self.follower = pos - Vec2::new(cfg.follower_offset, cfg.follower_offset);
        }
        self.present = true;
    }

    pub fn on_move(&mut self, pos: Vec2) {
        self.sample = pos;
        self.present = true;
    }

    /// `interactive` is whether the element now under the pointer is a link,
    /// button or inside something clickable.
    pub fn on_over(&mut self, interactive: bool) {
        self.hovered = interactive;
    }

    pub fn on_leave(&mut self) {
        self.present = false;
        self.hovered = false;
    }

    pub fn sample(&self) -> Vec2 {
        self.sample
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn update(&mut self, dt: f32, cfg: &CursorConfig) {
        let target = self.sample - Vec2::new(cfg.follower_offset, cfg.follower_offset);
        self.follower = Vec2::new(
            approach(self.follower.x, target.x, dt, cfg.follower_smoothing),
            approach(self.follower.y, target.y, dt, cfg.follower_smoothing),
        );
    }

    pub fn visual(&self, cfg: &CursorConfig) -> CursorVisual {
        let follower = if cfg.follower_smoothing > 0.0 {
            self.follower
        } else {
            self.sample - Vec2::new(cfg.follower_offset, cfg.follower_offset)
        };
        CursorVisual {
            visible: self.present,
            dot: self.sample - Vec2::new(cfg.dot_offset, cfg.dot_offset),
            follower,
            follower_scale: if self.hovered { cfg.hover_scale } else { 1.0 },
            dot_size: cfg.dot_offset * 2.0,
            follower_size: cfg.follower_offset * 2.0,
            hovered: self.hovered,
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact() -> CursorConfig {
        CursorConfig {
            follower_smoothing: 0.0,
            ..CursorConfig::default()
        }
    }

    #[test]
    fn move_offsets_dot_and_follower() {
        let cfg = exact();
        let mut tracker = PointerTracker::new();
        tracker.on_move(Vec2::new(100.0, 50.0));
        let v = tracker.visual(&cfg);
        assert!(v.visible);
        assert_eq!(v.dot, Vec2::new(94.0, 44.0));
        assert_eq!(v.follower, Vec2::new(80.0, 30.0));
        assert_eq!(v.follower_scale, 1.0);
        assert_eq!(v.dot + Vec2::new(v.dot_size, v.dot_size) * 0.5, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn hover_scales_follower() {
        let cfg = exact();
        let mut tracker = PointerTracker::new();
        tracker.on_move(Vec2::new(10.0, 10.0));
        tracker.on_over(true);
        assert_eq!(tracker.visual(&cfg).follower_scale, 1.5);
        tracker.on_over(false);
        assert_eq!(tracker.visual(&cfg).follower_scale, 1.0);
    }

    #[test]
    fn only_last_sample_is_kept() {
        let mut tracker = PointerTracker::new();
        tracker.on_move(Vec2::new(1.0, 2.0));
        tracker.on_move(Vec2::new(300.0, 400.0));
        assert_eq!(tracker.sample(), Vec2::new(300.0, 400.0));
    }

    #[test]
    fn leave_hides_and_clears_hover() {
        let cfg = exact();
        let mut tracker = PointerTracker::new();
        assert!(!tracker.visual(&cfg).visible);
        tracker.on_enter(Vec2::new(5.0, 5.0), &cfg);
        tracker.on_over(true);
        tracker.on_leave();
        let v = tracker.visual(&cfg);
        assert!(!v.visible);
        assert!(!v.hovered);
    }

    #[test]
    fn smoothed_follower_converges() {
        let cfg = CursorConfig {
            follower_smoothing: 0.05,
            ..CursorConfig::default()
        };
        let mut tracker = PointerTracker::new();
        tracker.on_enter(Vec2::new(0.0, 0.0), &cfg);
        tracker.on_move(Vec2::new(200.0, 0.0));
        tracker.update(0.016, &cfg);
        let early = tracker.visual(&cfg).follower.x;
        assert!(early > -20.0 && early < 180.0);
        for _ in 0..200 {
            tracker.update(0.016, &cfg);
        }
        assert!((tracker.visual(&cfg).follower.x - 180.0).abs() < 0.01);
    }
}
