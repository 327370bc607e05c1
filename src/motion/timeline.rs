use crate::config::MotionConfig;
use crate::gfx::{anim::lerp, math::Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineEntry {
    pub index: usize,
    /// Progress at or above which the entry is revealed.
    pub threshold: f32,
}

/// Which side of the center line a card sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Side::Right
        } else {
            Side::Left
        }
    }
}

/// Presentation of one entry at a given reveal amount (0 hidden, 1 shown).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryStyle {
    pub opacity: f32,
    pub offset: Vec2,
    pub marker_rotation_deg: f32,
    pub marker_scale: f32,
    /// 0 for the idle marker color, 1 for the lit one.
    pub marker_glow: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineVisual {
    pub revealed: Vec<bool>,
    pub indicator_fraction: f32,
    pub indicator_length: f32,
}

/// Derives reveal state for the ordered experience entries.
#[derive(Debug, Clone)]
pub struct TimelineRenderer {
    entries: Vec<TimelineEntry>,
}

impl TimelineRenderer {
    pub fn new(total: usize) -> Self {
        let entries = (0..total)
            .map(|index| TimelineEntry {
                index,
                threshold: index as f32 / total as f32,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn is_revealed(&self, entry: &TimelineEntry, progress: f32) -> bool {
        progress >= entry.threshold
    }

    pub fn reveal_states(&self, progress: f32) -> Vec<bool> {
        self.entries
            .iter()
            .map(|entry| self.is_revealed(entry, progress))
            .collect()
    }

    pub fn visual(&self, progress: f32, container_height: f32) -> TimelineVisual {
        TimelineVisual {
            revealed: self.reveal_states(progress),
            indicator_fraction: progress,
            indicator_length: progress * container_height,
        }
    }
}

/// Interpolates between the hidden and revealed presentation. Hidden cards
/// slide in from the outside of their side of the line.
pub fn entry_style(index: usize, card_amount: f32, marker_amount: f32, cfg: &MotionConfig) -> EntryStyle {
    let t = card_amount.clamp(0.0, 1.0);
    let m = marker_amount.clamp(0.0, 1.0);
    let direction = match Side::for_index(index) {
        Side::Right => 1.0,
        Side::Left => -1.0,
    };
    let hidden = Vec2::new(direction * cfg.hidden_offset_x, cfg.hidden_offset_y);
    EntryStyle {
        opacity: t,
        offset: hidden * (1.0 - t),
        marker_rotation_deg: lerp(45.0, 135.0, m),
        marker_scale: lerp(1.0, 1.1, m),
        marker_glow: m,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn three_entries_reveal_in_order() {
        let renderer = TimelineRenderer::new(3);
        let thresholds: Vec<f32> = renderer.entries().iter().map(|e| e.threshold).collect();
        assert_eq!(thresholds[0], 0.0);
        assert!((thresholds[1] - 1.0 / 3.0).abs() < 1e-6);
        assert!((thresholds[2] - 2.0 / 3.0).abs() < 1e-6);

        assert_eq!(renderer.reveal_states(0.5), vec![true, true, false]);
        assert_eq!(renderer.reveal_states(1.0), vec![true, true, true]);
        assert_eq!(renderer.reveal_states(0.0), vec![true, false, false]);
    }

    #[test]
    fn no_entries() {
        let renderer = TimelineRenderer::new(0);
        assert!(renderer.reveal_states(1.0).is_empty());
        let v = renderer.visual(0.5, 800.0);
        assert_eq!(v.indicator_length, 400.0);
    }

    #[test]
    fn indicator_tracks_progress() {
        let v = TimelineRenderer::new(4).visual(0.25, 1200.0);
        assert_eq!(v.indicator_fraction, 0.25);
        assert_eq!(v.indicator_length, 300.0);
        assert_eq!(v.revealed, vec![true, true, false, false]);
    }

    #[test]
    fn sides_alternate() {
        assert_eq!(Side::for_index(0), Side::Right);
        assert_eq!(Side::for_index(1), Side::Left);
        assert_eq!(Side::for_index(2), Side::Right);
    }

    #[test]
    fn hidden_and_revealed_styles() {
        let cfg = MotionConfig::default();
        let hidden_even = entry_style(0, 0.0, 0.0, &cfg);
        assert_eq!(hidden_even.opacity, 0.0);
        assert_eq!(hidden_even.offset, Vec2::new(80.0, 40.0));
        assert_eq!(hidden_even.marker_rotation_deg, 45.0);
        assert_eq!(hidden_even.marker_scale, 1.0);

        let hidden_odd = entry_style(1, 0.0, 0.0, &cfg);
        assert_eq!(hidden_odd.offset, Vec2::new(-80.0, 40.0));

        let shown = entry_style(1, 1.0, 1.0, &cfg);
        assert_eq!(shown.opacity, 1.0);
        assert_eq!(shown.offset, Vec2::ZERO);
        assert_eq!(shown.marker_rotation_deg, 135.0);
        assert!((shown.marker_scale - 1.1).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn thresholds_are_non_decreasing(total in 1usize..64) {
            let renderer = TimelineRenderer::new(total);
            for pair in renderer.entries().windows(2) {
                prop_assert!(pair[0].threshold <= pair[1].threshold);
            }
        }

        #[test]
        fn reveal_never_oscillates_as_progress_grows(total in 1usize..32, steps in 2usize..200) {
            let renderer = TimelineRenderer::new(total);
            let mut previous = renderer.reveal_states(0.0);
            for step in 1..=steps {
                let progress = step as f32 / steps as f32;
                let current = renderer.reveal_states(progress);
                for (was, now) in previous.iter().zip(&current) {
                    prop_assert!(!*was || *now);
                }
                previous = current;
            }
        }

        #[test]
        fn reveal_matches_threshold(total in 1usize..32, progress in 0.0f32..=1.0) {
            let renderer = TimelineRenderer::new(total);
            let states = renderer.reveal_states(progress);
            for (entry, revealed) in renderer.entries().iter().zip(states) {
                prop_assert_eq!(revealed, progress >= entry.threshold);
            }
        }
    }
}
