//! Swipe gestures to move directions.
//!
//! A swipe is the vector from where the pointer went down to where it came
//! up. Only the dominant axis matters, and a swipe must be strictly longer
//! than the minimum distance on that axis to count. Equal axes resolve to
//! the horizontal one.

use crate::types::Direction;

/// Pointer displacement in host units. `dy` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    pub dx: f32,
    pub dy: f32,
}

impl Swipe {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub fn between(from: (f32, f32), to: (f32, f32)) -> Self {
        Self {
            dx: to.0 - from.0,
            dy: to.1 - from.1,
        }
    }
}

/// Direction of a completed swipe, or `None` when it is too short.
///
/// `min_distance` is a per-axis threshold: it is compared against the
/// dominant component, not the length of the vector. A diagonal `(8, 8)`
/// swipe with a minimum of 10 is dropped even though it is ~11.3 long.
pub fn resolve_swipe(swipe: Swipe, min_distance: f32) -> Option<Direction> {
    let (ax, ay) = (swipe.dx.abs(), swipe.dy.abs());
    if ax.is_nan() || ay.is_nan() {
        return None;
    }

    if ax >= ay {
        if ax <= min_distance {
            return None;
        }
        Some(if swipe.dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        if ay <= min_distance {
            return None;
        }
        Some(if swipe.dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

/// Press/release tracker for pointer devices.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    origin: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.origin = Some((x, y));
    }

    /// Finish the gesture. Returns `None` if no press was recorded.
    pub fn release(&mut self, x: f32, y: f32) -> Option<Swipe> {
        let origin = self.origin.take()?;
        Some(Swipe::between(origin, (x, y)))
    }

    pub fn cancel(&mut self) {
        self.origin = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f32 = 10.0;

    #[test]
    fn dominant_axis_wins() {
        assert_eq!(resolve_swipe(Swipe::new(30.0, 5.0), MIN), Some(Direction::Right));
        assert_eq!(resolve_swipe(Swipe::new(-30.0, 12.0), MIN), Some(Direction::Left));
        assert_eq!(resolve_swipe(Swipe::new(3.0, 25.0), MIN), Some(Direction::Down));
        assert_eq!(resolve_swipe(Swipe::new(-3.0, -25.0), MIN), Some(Direction::Up));
    }

    #[test]
    fn threshold_is_strict() {
        assert_eq!(resolve_swipe(Swipe::new(10.0, 0.0), MIN), None);
        assert_eq!(resolve_swipe(Swipe::new(0.0, -10.0), MIN), None);
        assert_eq!(resolve_swipe(Swipe::new(10.5, 0.0), MIN), Some(Direction::Right));
        assert_eq!(resolve_swipe(Swipe::new(0.0, 0.0), 0.0), None);
    }

    #[test]
    fn diagonal_tie_is_horizontal() {
        assert_eq!(resolve_swipe(Swipe::new(20.0, 20.0), MIN), Some(Direction::Right));
        assert_eq!(resolve_swipe(Swipe::new(-20.0, 20.0), MIN), Some(Direction::Left));
    }

    #[test]
    fn threshold_applies_per_axis() {
        assert_eq!(resolve_swipe(Swipe::new(8.0, 8.0), MIN), None);
        assert_eq!(resolve_swipe(Swipe::new(-9.0, 9.5), MIN), None);
        assert_eq!(resolve_swipe(Swipe::new(11.0, 9.0), MIN), Some(Direction::Right));
    }

    #[test]
    fn nan_is_ignored() {
        assert_eq!(resolve_swipe(Swipe::new(f32::NAN, 40.0), MIN), None);
    }

    #[test]
    fn tracker_pairs_press_and_release() {
        let mut t = SwipeTracker::new();
        assert_eq!(t.release(5.0, 5.0), None);

        t.press(10.0, 10.0);
        assert!(t.is_tracking());
        let swipe = t.release(40.0, 12.0).unwrap();
        assert_eq!(swipe, Swipe::new(30.0, 2.0));
        assert!(!t.is_tracking());

        t.press(0.0, 0.0);
        t.cancel();
        assert_eq!(t.release(50.0, 0.0), None);
    }
}
