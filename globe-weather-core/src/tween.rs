//! Time-bounded interpolation with cancel-and-restart semantics.
//!
//! Time only moves through [`Tween::advance`] / [`Animator::advance`], so the
//! same sequence of steps always yields the same values. The caller decides
//! what a step is (the app feeds it from a wall-clock frame interval).

use std::time::Duration;

/// Rotation animation length used by the globe.
pub const GLOBE_TWEEN_DURATION: Duration = Duration::from_millis(1500);

/// Values that can be linearly interpolated.
pub trait Lerp: Copy {
    /// Interpolate toward `to`; `t = 0` is `self`, `t = 1` is `to`.
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

/// Easing curves mapping linear progress in `[0, 1]` to eased progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Cubic ease-in-out: slow start, fast middle, slow end.
    #[default]
    CubicInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let f = -2.0 * t + 2.0;
                    1.0 - f * f * f / 2.0
                }
            }
        }
    }
}

/// A single interpolation from one value to another over a fixed duration.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<V> {
    from: V,
    to: V,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl<V: Lerp> Tween<V> {
    pub fn new(from: V, to: V, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Linear progress in `[0, 1]`. A zero-length tween is always complete.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value(&self) -> V {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(self.progress()))
    }

    /// Move time forward by `dt` and return the new value.
    pub fn advance(&mut self, dt: Duration) -> V {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn target(&self) -> V {
        self.to
    }
}

/// Holds a current value and at most one tween driving it.
///
/// Retargeting while a tween is running drops that tween and starts a new one
/// from wherever the value currently is.
#[derive(Clone, Debug, PartialEq)]
pub struct Animator<V> {
    current: V,
    active: Option<Tween<V>>,
    duration: Duration,
    easing: Easing,
}

impl<V: Lerp> Animator<V> {
    pub fn new(initial: V, duration: Duration, easing: Easing) -> Self {
        Self {
            current: initial,
            active: None,
            duration,
            easing,
        }
    }

    /// Start animating toward `target`, superseding any running tween.
    pub fn retarget(&mut self, target: V) {
        self.active = Some(Tween::new(self.current, target, self.duration, self.easing));
    }

    /// Jump straight to `value` without animating.
    pub fn snap_to(&mut self, value: V) {
        self.current = value;
        self.active = None;
    }

    /// Advance the running tween. Returns `true` while the value is changing,
    /// including the step that lands on the target.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(tween) = self.active.as_mut() else {
            return false;
        };
        self.current = tween.advance(dt);
        if tween.is_finished() {
            self.active = None;
        }
        true
    }

    pub fn value(&self) -> V {
        self.current
    }

    /// Where the value is heading (the current value when idle).
    pub fn target(&self) -> V {
        self.active
            .as_ref()
            .map(Tween::target)
            .unwrap_or(self.current)
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(100);

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::CubicInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(-3.0), 0.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
    }

    #[test]
    fn test_cubic_in_out_is_symmetric() {
        let e = Easing::CubicInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
        for i in 1..10 {
            let t = i as f64 / 20.0;
            assert!((e.apply(t) + e.apply(1.0 - t) - 1.0).abs() < 1e-12);
        }
        // Slow start
        assert!(e.apply(0.1) < 0.1);
    }

    #[test]
    fn test_tween_reaches_target_exactly() {
        let mut tween = Tween::new(0.0, 10.0, Duration::from_millis(1500), Easing::CubicInOut);
        for _ in 0..14 {
            tween.advance(STEP);
            assert!(!tween.is_finished());
        }
        assert_eq!(tween.advance(STEP), 10.0);
        assert!(tween.is_finished());
        // Further steps stay put
        assert_eq!(tween.advance(STEP), 10.0);
    }

    #[test]
    fn test_zero_duration_tween_is_complete() {
        let tween = Tween::new(1.0, 2.0, Duration::ZERO, Easing::Linear);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 2.0);
    }

    #[test]
    fn test_animator_idle_does_not_change() {
        let mut animator = Animator::new(3.0, GLOBE_TWEEN_DURATION, Easing::CubicInOut);
        assert!(!animator.advance(STEP));
        assert_eq!(animator.value(), 3.0);
        assert_eq!(animator.target(), 3.0);
    }

    #[test]
    fn test_animator_finishes() {
        let mut animator = Animator::new(0.0, GLOBE_TWEEN_DURATION, Easing::CubicInOut);
        animator.retarget(1.0);
        assert!(animator.is_animating());

        let mut steps = 0;
        while animator.advance(STEP) {
            steps += 1;
        }
        assert_eq!(steps, 15);
        assert_eq!(animator.value(), 1.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_retarget_restarts_from_current_value() {
        let mut animator = Animator::new(0.0, Duration::from_secs(1), Easing::Linear);
        animator.retarget(10.0);
        for _ in 0..5 {
            animator.advance(STEP);
        }
        let midway = animator.value();
        assert!((midway - 5.0).abs() < 1e-9);

        animator.retarget(-10.0);
        assert_eq!(animator.value(), midway);
        assert_eq!(animator.target(), -10.0);

        // The first tween no longer contributes: a full duration lands on the new target.
        for _ in 0..10 {
            animator.advance(STEP);
        }
        assert_eq!(animator.value(), -10.0);
    }

    #[test]
    fn test_same_steps_same_values() {
        let run = || {
            let mut a = Animator::new(0.0, GLOBE_TWEEN_DURATION, Easing::CubicInOut);
            a.retarget(2.0);
            (0..7).map(|_| { a.advance(STEP); a.value() }).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_snap_to_cancels() {
        let mut animator = Animator::new(0.0, GLOBE_TWEEN_DURATION, Easing::Linear);
        animator.retarget(5.0);
        animator.snap_to(2.0);
        assert!(!animator.is_animating());
        assert_eq!(animator.value(), 2.0);
    }
}
