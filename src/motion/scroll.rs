use crate::gfx::anim::Tween;

/// Tracked container position relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerGeometry {
    /// Distance from the viewport top to the container top, negative once
    /// the container starts above the viewport.
    pub top: f32,
    pub height: f32,
}

/// Maps the tracked container's position into a progress value in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollProgressMapper {
    /// Fraction of the viewport height where progress starts counting.
    start_fraction: f32,
}

impl ScrollProgressMapper {
    pub const DEFAULT_START_FRACTION: f32 = 0.7;

    pub fn new(start_fraction: f32) -> Self {
        Self { start_fraction }
    }

    pub fn map(&self, geometry: ContainerGeometry, viewport_height: f32) -> f32 {
        let start_offset = viewport_height * self.start_fraction;
        let current_pos = -geometry.top + start_offset;
        let raw = if geometry.height == 0.0 || !geometry.height.is_finite() {
            0.0
        } else {
            current_pos / geometry.height
        };
        if raw.is_nan() {
            return 0.0;
        }
        raw.clamp(0.0, 1.0)
    }

    /// Scroll handler. An absent container leaves `progress` untouched.
    pub fn on_scroll(
        &self,
        container: Option<ContainerGeometry>,
        viewport_height: f32,
        progress: &mut f32,
    ) {
        if let Some(geometry) = container {
            *progress = self.map(geometry, viewport_height);
        }
    }
}

impl Default for ScrollProgressMapper {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START_FRACTION)
    }
}

/// The page's own scroll offset.
#[derive(Debug, Clone)]
pub struct PageScroll {
    offset: f32,
    max: f32,
    tween: Option<Tween>,
}

impl PageScroll {
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            max: 0.0,
            tween: None,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn set_extent(&mut self, document_height: f32, viewport_height: f32) {
        self.max = (document_height - viewport_height).max(0.0);
        self.offset = self.offset.clamp(0.0, self.max);
        // targets were computed against the old layout
        self.tween = None;
    }

    /// Immediate relative scroll; cancels any running tween.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        self.tween = None;
        self.jump_to(self.offset + delta)
    }

    pub fn jump_to(&mut self, offset: f32) -> bool {
        self.tween = None;
        let before = self.offset;
        self.offset = offset.clamp(0.0, self.max);
        self.offset != before
    }

    /// Smoothly scrolls to `offset`, retargeting a running tween.
    pub fn animate_to(&mut self, offset: f32, now: f32, duration: f32) {
        let target = offset.clamp(0.0, self.max);
        match &mut self.tween {
            Some(tween) => tween.retarget(now, target, duration),
            None => self.tween = Some(Tween::new(self.offset, target, now, duration)),
        }
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Advances a running tween. Returns whether the offset moved.
    pub fn update(&mut self, now: f32) -> bool {
        let Some(tween) = self.tween else {
            return false;
        };
        let before = self.offset;
        self.offset = tween.sample(now).clamp(0.0, self.max);
        if tween.is_done(now) {
            self.tween = None;
        }
        self.offset != before
    }
}

impl Default for PageScroll {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn geometry(top: f32, height: f32) -> ContainerGeometry {
        ContainerGeometry { top, height }
    }

    #[rstest]
    #[case::partway(-200.0, 1000.0, 1000.0, 0.9)]
    #[case::far_below(2000.0, 1000.0, 1000.0, 0.0)]
    #[case::far_above(-5000.0, 1000.0, 1000.0, 1.0)]
    #[case::zero_height(-200.0, 0.0, 1000.0, 0.0)]
    #[case::at_start_line(700.0, 1000.0, 1000.0, 0.0)]
    fn maps_geometry(#[case] top: f32, #[case] height: f32, #[case] vh: f32, #[case] expected: f32) {
        let mapper = ScrollProgressMapper::default();
        let progress = mapper.map(geometry(top, height), vh);
        assert!((progress - expected).abs() < 1e-6, "got {progress}");
    }

    #[test]
    fn absent_container_is_a_no_op() {
        let mapper = ScrollProgressMapper::default();
        let mut progress = 0.42;
        mapper.on_scroll(None, 1000.0, &mut progress);
        assert_eq!(progress, 0.42);
        mapper.on_scroll(Some(geometry(-200.0, 1000.0)), 1000.0, &mut progress);
        assert!((progress - 0.9).abs() < 1e-6);
    }

    #[test]
    fn start_fraction_is_configurable() {
        let mapper = ScrollProgressMapper::new(0.5);
        let progress = mapper.map(geometry(0.0, 1000.0), 1000.0);
        assert!((progress - 0.5).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn progress_stays_in_unit_range(
            top in -1.0e6f32..1.0e6,
            height in 0.0f32..1.0e6,
            vh in 0.0f32..1.0e5,
        ) {
            let p = ScrollProgressMapper::default().map(geometry(top, height), vh);
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn progress_is_non_increasing_in_top(
            top in -1.0e5f32..1.0e5,
            shift in 0.0f32..1.0e4,
            height in 1.0f32..1.0e5,
            vh in 0.0f32..1.0e4,
        ) {
            let mapper = ScrollProgressMapper::default();
            let upper = mapper.map(geometry(top, height), vh);
            let lower = mapper.map(geometry(top + shift, height), vh);
            prop_assert!(lower <= upper);
        }

        #[test]
        fn mapping_is_idempotent(
            top in -1.0e5f32..1.0e5,
            height in 0.0f32..1.0e5,
            vh in 0.0f32..1.0e4,
        ) {
            let mapper = ScrollProgressMapper::default();
            let mut first = 0.0;
            let mut second = 0.0;
            mapper.on_scroll(Some(geometry(top, height)), vh, &mut first);
            mapper.on_scroll(Some(geometry(top, height)), vh, &mut second);
            mapper.on_scroll(Some(geometry(top, height)), vh, &mut second);
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn page_scroll_clamps_to_extent() {
        let mut scroll = PageScroll::new();
        scroll.set_extent(3000.0, 800.0);
        assert!(scroll.scroll_by(500.0));
        assert_eq!(scroll.offset(), 500.0);
        scroll.scroll_by(10_000.0);
        assert_eq!(scroll.offset(), 2200.0);
        scroll.scroll_by(-10_000.0);
        assert_eq!(scroll.offset(), 0.0);
        assert!(!scroll.scroll_by(-1.0));
    }

    #[test]
    fn short_document_never_scrolls() {
        let mut scroll = PageScroll::new();
        scroll.set_extent(500.0, 800.0);
        assert_eq!(scroll.max(), 0.0);
        assert!(!scroll.scroll_by(100.0));
    }

    #[test]
    fn shrinking_extent_pulls_offset_back() {
        let mut scroll = PageScroll::new();
        scroll.set_extent(3000.0, 800.0);
        scroll.jump_to(2000.0);
        scroll.set_extent(1800.0, 800.0);
        assert_eq!(scroll.offset(), 1000.0);
    }

    #[test]
    fn animated_scroll_reaches_target() {
        let mut scroll = PageScroll::new();
        scroll.set_extent(5000.0, 1000.0);
        scroll.animate_to(1200.0, 0.0, 0.5);
        assert!(scroll.is_animating());
        assert!(scroll.update(0.25));
        let mid = scroll.offset();
        assert!(mid > 0.0 && mid < 1200.0);
        scroll.update(0.6);
        assert_eq!(scroll.offset(), 1200.0);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn wheel_cancels_animation() {
        let mut scroll = PageScroll::new();
        scroll.set_extent(5000.0, 1000.0);
        scroll.animate_to(1200.0, 0.0, 0.5);
        scroll.scroll_by(10.0);
        assert!(!scroll.is_animating());
        assert_eq!(scroll.offset(), 10.0);
    }
}
