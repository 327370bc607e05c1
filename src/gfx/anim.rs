pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Frame-rate independent exponential approach. `smoothing` is the time in
/// seconds to cover ~63% of the remaining distance; zero snaps.
pub fn approach(current: f32, target: f32, dt: f32, smoothing: f32) -> f32 {
    if smoothing <= 0.0 || dt <= 0.0 {
        return target;
    }
    let k = 1.0 - (-dt / smoothing).exp();
    current + (target - current) * k
}

#[derive(Debug, Clone)]
pub struct Timeline {
    pub start_time: f32,
    pub duration: f32,
    pub current_time: f32,
}

impl Timeline {
    pub fn new(duration: f32) -> Self {
        Self {
            start_time: 0.0,
            duration,
            current_time: duration,
        }
    }

    pub fn start(&mut self, now: f32) {
        self.start_time = now;
        self.current_time = now;
    }

    pub fn update(&mut self, now: f32) {
        self.current_time = now;
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let elapsed = self.current_time - self.start_time;
        (elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// A value that moves linearly toward a target over a fixed duration, the
/// way a CSS transition does when its property changes mid-flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    value: f32,
    target: f32,
    duration: f32,
}

impl Transition {
    pub fn new(value: f32, duration: f32) -> Self {
        Self {
            value,
            target: value,
            duration,
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn snap(&mut self, value: f32) {
        self.value = value;
        self.target = value;
    }

    pub fn step(&mut self, dt: f32) {
        if self.duration <= 0.0 {
            self.value = self.target;
            return;
        }
        let max_step = dt.max(0.0) / self.duration;
        let delta = self.target - self.value;
        if delta.abs() <= max_step {
            self.value = self.target;
        } else {
            self.value += max_step * delta.signum();
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

/// Time-based interpolation from one offset to another, retargetable while
/// running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    start: f32,
    duration: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, start: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            start,
            duration: duration.max(1e-3),
        }
    }

    pub fn sample(&self, now: f32) -> f32 {
        let t = ((now - self.start) / self.duration).clamp(0.0, 1.0);
        lerp(self.from, self.to, smoothstep(t))
    }

    pub fn is_done(&self, now: f32) -> bool {
        now - self.start >= self.duration
    }

    pub fn retarget(&mut self, now: f32, to: f32, duration: f32) {
        let current = self.sample(now);
        *self = Self::new(current, to, now, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_progress_clamps() {
        let mut tl = Timeline::new(0.5);
        tl.start(1.0);
        tl.update(1.25);
        assert!((tl.progress() - 0.5).abs() < 1e-6);
        tl.update(3.0);
        assert!(tl.is_complete());
        tl.update(0.0);
        assert_eq!(tl.progress(), 0.0);
    }

    #[test]
    fn transition_moves_linearly_and_settles() {
        let mut t = Transition::new(0.0, 1.0);
        t.set_target(1.0);
        t.step(0.25);
        assert!((t.value() - 0.25).abs() < 1e-6);
        t.step(2.0);
        assert_eq!(t.value(), 1.0);
        t.step(1.0);
        assert_eq!(t.value(), 1.0);

        t.set_target(0.0);
        t.step(0.5);
        assert!((t.value() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn zero_duration_transition_snaps() {
        let mut t = Transition::new(0.0, 0.0);
        t.set_target(1.0);
        t.step(0.0);
        assert_eq!(t.value(), 1.0);
    }

    #[test]
    fn tween_retarget_starts_from_current_value() {
        let mut tw = Tween::new(0.0, 100.0, 0.0, 1.0);
        let mid = tw.sample(0.5);
        assert!((mid - 50.0).abs() < 1e-3);
        tw.retarget(0.5, 0.0, 1.0);
        assert!((tw.sample(0.5) - mid).abs() < 1e-3);
        assert!(tw.is_done(1.5));
        assert_eq!(tw.sample(1.5), 0.0);
    }

    #[test]
    fn approach_zero_smoothing_snaps() {
        assert_eq!(approach(0.0, 10.0, 0.016, 0.0), 10.0);
        let v = approach(0.0, 10.0, 0.1, 0.1);
        assert!(v > 6.0 && v < 7.0);
    }
}
